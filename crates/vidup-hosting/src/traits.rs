//! Media hosting abstraction
//!
//! Defines the `MediaHost` trait that hosting backends implement, together with the
//! request and result types of an upload.

use async_trait::async_trait;
use bytes::Bytes;
use std::fmt::{Display, Formatter, Result as FmtResult};
use thiserror::Error;

/// Hosting operation errors
#[derive(Debug, Error)]
pub enum HostingError {
    #[error("Request to hosting service failed: {0}")]
    Request(String),

    #[error("Hosting service rejected upload ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid hosting response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for hosting operations
pub type HostingResult<T> = Result<T, HostingError>;

/// Kind of asset the hosting service should process the upload as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Video,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Video => "video",
        }
    }
}

impl Display for ResourceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Incoming transformation applied by the hosting service while ingesting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformation {
    pub quality: String,
    pub format: String,
}

impl Transformation {
    /// Automatic quality, delivered in the given container format.
    pub fn auto_quality(format: impl Into<String>) -> Self {
        Self {
            quality: "auto".to_string(),
            format: format.into(),
        }
    }
}

impl Display for Transformation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "q_{},f_{}", self.quality, self.format)
    }
}

/// Parameters of one upload call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOptions {
    pub resource_type: ResourceType,
    pub folder: String,
    pub transformation: Transformation,
}

impl UploadOptions {
    pub fn video(folder: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            resource_type: ResourceType::Video,
            folder: folder.into(),
            transformation: Transformation::auto_quality(format),
        }
    }
}

/// Raw file received from the uploading client.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub data: Bytes,
    pub filename: String,
    pub content_type: Option<String>,
}

/// Descriptor of a processed asset returned by the hosting service.
#[derive(Debug, Clone, PartialEq)]
pub struct HostedAsset {
    pub public_id: String,
    /// Byte size after processing
    pub bytes: u64,
    /// Seconds, when the service reports one
    pub duration: Option<f64>,
}

/// Media hosting backend.
#[async_trait]
pub trait MediaHost: Send + Sync {
    /// Upload one file and wait for the processed asset descriptor.
    async fn upload(&self, file: UploadFile, options: &UploadOptions) -> HostingResult<HostedAsset>;

    /// Short backend name for logs
    fn provider(&self) -> &'static str;
}
