//! vidup core library
//!
//! Domain models, error types, configuration and media URL helpers shared by the
//! server, the hosting client and the API client.

pub mod config;
pub mod constants;
pub mod error;
pub mod media_url;
pub mod models;

// Re-export commonly used types
pub use config::{AuthConfig, CloudinaryCredentials, Config, HostingConfig, ServerConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use media_url::MediaUrlBuilder;
