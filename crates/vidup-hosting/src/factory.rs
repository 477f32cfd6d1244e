use crate::{CloudinaryClient, HostingResult, MediaHost};
use std::sync::Arc;
use std::time::Duration;
use vidup_core::HostingConfig;

/// Create the media host from configuration.
///
/// Returns `Ok(None)` when credentials are not configured; the server still starts and
/// uploads are refused per request.
pub fn create_media_host(config: &HostingConfig) -> HostingResult<Option<Arc<dyn MediaHost>>> {
    let Some(credentials) = config.credentials.clone() else {
        tracing::warn!(
            "Cloudinary credentials not configured; video uploads will be rejected"
        );
        return Ok(None);
    };

    let client = CloudinaryClient::new(
        credentials,
        config.api_base.clone(),
        Duration::from_secs(config.timeout_seconds),
    )?;

    tracing::info!(
        cloud_name = %client.cloud_name(),
        folder = %config.upload_folder,
        "Media host initialized"
    );

    Ok(Some(Arc::new(client)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidup_core::CloudinaryCredentials;

    fn hosting_config(credentials: Option<CloudinaryCredentials>) -> HostingConfig {
        HostingConfig {
            credentials,
            cloud_name: Some("demo".to_string()),
            api_base: "https://api.cloudinary.com".to_string(),
            delivery_base: "https://res.cloudinary.com".to_string(),
            upload_folder: "video-uploads".to_string(),
            video_format: "mp4".to_string(),
            timeout_seconds: 30,
        }
    }

    #[test]
    fn missing_credentials_yield_no_host() {
        let host = create_media_host(&hosting_config(None)).unwrap();
        assert!(host.is_none());
    }

    #[test]
    fn credentials_yield_cloudinary_host() {
        let host = create_media_host(&hosting_config(Some(CloudinaryCredentials {
            cloud_name: "demo".to_string(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
        })))
        .unwrap()
        .expect("host");
        assert_eq!(host.provider(), "cloudinary");
    }
}
