//! Cloudinary upload client
//!
//! Signed uploads through the REST upload endpoint. The signature is the SHA-1 hex digest
//! of the signed parameters, sorted by name and joined as `k=v&k=v`, followed by the API
//! secret.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;
use vidup_core::CloudinaryCredentials;

use crate::traits::{HostedAsset, HostingError, HostingResult, MediaHost, UploadFile, UploadOptions};

/// Successful upload response (only the fields we use)
#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    bytes: u64,
    #[serde(default)]
    duration: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Cloudinary client
pub struct CloudinaryClient {
    http_client: Client,
    api_base: String,
    credentials: CloudinaryCredentials,
}

impl Debug for CloudinaryClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CloudinaryClient")
            .field("api_base", &self.api_base)
            .field("cloud_name", &self.credentials.cloud_name)
            .finish()
    }
}

impl CloudinaryClient {
    pub fn new(
        credentials: CloudinaryCredentials,
        api_base: impl Into<String>,
        timeout: Duration,
    ) -> HostingResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                HostingError::ConfigError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn cloud_name(&self) -> &str {
        &self.credentials.cloud_name
    }

    fn upload_url(&self, options: &UploadOptions) -> String {
        format!(
            "{}/v1_1/{}/{}/upload",
            self.api_base, self.credentials.cloud_name, options.resource_type
        )
    }

    /// Parameters covered by the signature, in signing order.
    fn signed_params(options: &UploadOptions, timestamp: i64) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("folder", options.folder.clone()),
            ("timestamp", timestamp.to_string()),
            ("transformation", options.transformation.to_string()),
        ];
        params.retain(|(_, value)| !value.is_empty());
        params.sort_by(|a, b| a.0.cmp(b.0));
        params
    }

    fn sign(params: &[(&'static str, String)], api_secret: &str) -> String {
        let to_sign = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = sha1_smol::Sha1::new();
        hasher.update(to_sign.as_bytes());
        hasher.update(api_secret.as_bytes());
        hasher.digest().to_string()
    }

    fn build_form(&self, file: UploadFile, options: &UploadOptions, timestamp: i64) -> HostingResult<Form> {
        let params = Self::signed_params(options, timestamp);
        let signature = Self::sign(&params, &self.credentials.api_secret);

        let length = file.data.len() as u64;
        let mut part = Part::stream_with_length(file.data, length).file_name(file.filename);
        if let Some(content_type) = file.content_type {
            part = part.mime_str(&content_type).map_err(|e| {
                HostingError::Request(format!("Invalid file content type: {}", e))
            })?;
        }

        let mut form = Form::new()
            .part("file", part)
            .text("api_key", self.credentials.api_key.clone())
            .text("signature", signature);
        for (key, value) in params {
            form = form.text(key, value);
        }
        Ok(form)
    }
}

#[async_trait]
impl MediaHost for CloudinaryClient {
    async fn upload(&self, file: UploadFile, options: &UploadOptions) -> HostingResult<HostedAsset> {
        let url = self.upload_url(options);
        let file_size = file.data.len();
        let timestamp = chrono::Utc::now().timestamp();
        let form = self.build_form(file, options, timestamp)?;

        tracing::debug!(
            url = %url,
            folder = %options.folder,
            file_size,
            "Uploading to Cloudinary"
        );

        let response = self
            .http_client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| HostingError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            return Err(HostingError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| HostingError::InvalidResponse(e.to_string()))?;

        tracing::info!(
            public_id = %uploaded.public_id,
            bytes = uploaded.bytes,
            duration = ?uploaded.duration,
            "Cloudinary upload complete"
        );

        Ok(HostedAsset {
            public_id: uploaded.public_id,
            bytes: uploaded.bytes,
            duration: uploaded.duration,
        })
    }

    fn provider(&self) -> &'static str {
        "cloudinary"
    }
}
