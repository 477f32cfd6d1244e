//! Error types module
//!
//! All server-side failures are unified under `AppError`. Each variant describes how it
//! is presented to HTTP clients through `ErrorMetadata`: a status code, a machine code
//! and a fixed client message. Details never leave the server; they are logged instead.
//!
//! The `Database` variant wraps `sqlx::Error` when the `sqlx` feature is enabled and a
//! plain message otherwise.

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected failures caused by the caller
    Debug,
    /// Recoverable issues
    Warn,
    /// Unexpected failures
    Error,
}

/// Describes how an error is presented to HTTP clients
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g. "UPSTREAM_ERROR")
    fn error_code(&self) -> &'static str;

    /// Fixed client-facing message
    fn client_message(&self) -> &'static str;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("No file in upload request")]
    MissingFile,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Media hosting error: {0}")]
    Upstream(String),

    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Listing error: {0}")]
    Listing(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(format!("{:#}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

/// Static metadata per variant: (http_status, error_code, client_message, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, &'static str, LogLevel) {
    match err {
        AppError::Unauthorized(_) => (401, "UNAUTHORIZED", "Unauthorized", LogLevel::Debug),
        AppError::Configuration(_) => (
            500,
            "CONFIGURATION_ERROR",
            "Cloudinary credentials not found",
            LogLevel::Error,
        ),
        AppError::MissingFile => (400, "FILE_NOT_FOUND", "File not found", LogLevel::Debug),
        AppError::InvalidInput(_) => (400, "INVALID_INPUT", "Invalid request", LogLevel::Debug),
        AppError::Upstream(_) => (
            500,
            "UPSTREAM_ERROR",
            "Upload video failed",
            LogLevel::Error,
        ),
        AppError::Database(_) => (
            500,
            "DATABASE_ERROR",
            "Upload video failed",
            LogLevel::Error,
        ),
        AppError::Listing(_) => (
            500,
            "LISTING_ERROR",
            "Error fetching videos",
            LogLevel::Error,
        ),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", "Internal error", LogLevel::Error),
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn client_message(&self) -> &'static str {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }
}

impl AppError {
    /// Variant name used as a structured log field
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => "AuthorizationError",
            AppError::Configuration(_) => "ConfigurationError",
            AppError::MissingFile | AppError::InvalidInput(_) => "ValidationError",
            AppError::Upstream(_) => "UpstreamError",
            AppError::Database(_) => "PersistenceError",
            AppError::Listing(_) => "ListingError",
            AppError::Internal(_) => "InternalError",
        }
    }

    /// Re-tag a store failure that happened while reading the listing.
    pub fn into_listing(self) -> AppError {
        match self {
            AppError::Listing(msg) => AppError::Listing(msg),
            other => AppError::Listing(other.to_string()),
        }
    }
}
