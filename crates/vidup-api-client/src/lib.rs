//! HTTP client for the vidup API.
//!
//! `ApiClient` talks to the upload and listing routes. `page::UploadPage` and
//! `grid::VideoGrid` model the upload page natively on top of it; the CLI drives them.

pub mod grid;
pub mod page;

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use std::path::Path;
use std::time::Duration;
use vidup_core::constants::{form_fields, SESSION_COOKIE_NAME, VIDEOS_PATH, VIDEO_UPLOAD_PATH};
use vidup_core::models::{UploadVideoResponse, VideoRecord};

pub use grid::{DownloadLink, VideoCard, VideoGrid};
pub use page::{Phase, SelectedFile, SubmitOutcome, UploadPage};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Unexpected response format: {0}")]
    UnexpectedFormat(String),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// How requests prove the caller's identity.
#[derive(Clone, Debug)]
pub enum Auth {
    /// `Authorization: Bearer {token}`
    Bearer(String),
    /// Session cookie, as a browser would send it
    SessionCookie(String),
}

/// One upload as posted by the upload form.
#[derive(Clone, Debug)]
pub struct UploadRequest {
    pub data: Bytes,
    pub filename: String,
    pub content_type: Option<String>,
    pub title: String,
    pub description: String,
    /// Byte size of the selected file, sent as `originalSize`
    pub original_size: u64,
}

/// The two API operations the upload page depends on.
#[async_trait]
pub trait VideoApi: Send + Sync {
    async fn upload_video(&self, request: UploadRequest) -> Result<UploadVideoResponse, ClientError>;

    async fn list_videos(&self) -> Result<Vec<VideoRecord>, ClientError>;
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: Option<Auth>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, auth: Option<Auth>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
        })
    }

    /// Create client from environment: VIDUP_API_URL, VIDUP_SESSION_TOKEN (optional).
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url =
            std::env::var("VIDUP_API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let auth = std::env::var("VIDUP_SESSION_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .map(Auth::Bearer);

        Self::new(base_url, auth)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Some(Auth::Bearer(token)) => request.bearer_auth(token),
            Some(Auth::SessionCookie(token)) => {
                request.header("Cookie", format!("{}={}", SESSION_COOKIE_NAME, token))
            }
            None => request,
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ClientError::Status { status, body })
    }

    /// Download a hosted media file to `destination`. Returns the number of bytes written.
    pub async fn download_to(&self, url: &str, destination: &Path) -> anyhow::Result<u64> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to request {}", url))?;
        let response = Self::check_status(response).await?;
        let data = response.bytes().await.context("Failed to read media body")?;

        tokio::fs::write(destination, &data)
            .await
            .with_context(|| format!("Failed to write {}", destination.display()))?;

        tracing::debug!(url, path = %destination.display(), bytes = data.len(), "Downloaded media");
        Ok(data.len() as u64)
    }
}

#[async_trait]
impl VideoApi for ApiClient {
    async fn upload_video(&self, request: UploadRequest) -> Result<UploadVideoResponse, ClientError> {
        let length = request.data.len() as u64;
        let mut part = Part::stream_with_length(request.data, length).file_name(request.filename);
        if let Some(content_type) = request.content_type.as_deref() {
            part = part.mime_str(content_type)?;
        }

        let form = Form::new()
            .part(form_fields::FILE, part)
            .text(form_fields::TITLE, request.title)
            .text(form_fields::DESCRIPTION, request.description)
            .text(form_fields::ORIGINAL_SIZE, request.original_size.to_string());

        let response = self
            .apply_auth(self.client.post(self.build_url(VIDEO_UPLOAD_PATH)))
            .multipart(form)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn list_videos(&self) -> Result<Vec<VideoRecord>, ClientError> {
        let response = self
            .apply_auth(self.client.get(self.build_url(VIDEOS_PATH)))
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let body = response.bytes().await?;
        let value: serde_json::Value = serde_json::from_slice(&body)?;
        if !value.is_array() {
            return Err(ClientError::UnexpectedFormat(
                "listing is not a JSON array".to_string(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }
}
