//! Helpers shared by the `vidup` binary.

use anyhow::Context;
use std::path::Path;
use vidup_api_client::SelectedFile;
use vidup_core::{HostingConfig, MediaUrlBuilder};

/// Initialize tracing for the CLI.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Content type guessed from the file extension; `None` lets the server decide.
pub fn video_content_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        "mpeg" | "mpg" => "video/mpeg",
        "ogv" => "video/ogg",
        _ => return None,
    };
    Some(mime)
}

/// Read a local file into the form's file slot.
pub async fn read_selected_file(path: &Path) -> anyhow::Result<SelectedFile> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "video".to_string());

    Ok(SelectedFile {
        name,
        content_type: video_content_type(path).map(str::to_string),
        data: data.into(),
    })
}

/// Delivery URL builder from the hosting environment, with an optional cloud name override.
pub fn media_urls(
    hosting: &HostingConfig,
    cloud_name: Option<String>,
) -> anyhow::Result<MediaUrlBuilder> {
    let cloud_name = cloud_name
        .or_else(|| hosting.cloud_name.clone())
        .context("Cloud name not set. Pass --cloud-name or set CLOUDINARY_CLOUD_NAME")?;

    Ok(MediaUrlBuilder::new(cloud_name)
        .with_delivery_base(hosting.delivery_base.clone())
        .with_format(hosting.video_format.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hosting(cloud_name: Option<&str>) -> HostingConfig {
        HostingConfig {
            credentials: None,
            cloud_name: cloud_name.map(str::to_string),
            api_base: "https://api.cloudinary.com".to_string(),
            delivery_base: "https://res.cloudinary.com".to_string(),
            upload_folder: "video-uploads".to_string(),
            video_format: "mp4".to_string(),
            timeout_seconds: 300,
        }
    }

    #[test]
    fn content_type_from_extension() {
        assert_eq!(video_content_type(Path::new("a/clip.MP4")), Some("video/mp4"));
        assert_eq!(video_content_type(Path::new("clip.mov")), Some("video/quicktime"));
        assert_eq!(video_content_type(Path::new("notes.txt")), None);
        assert_eq!(video_content_type(Path::new("noext")), None);
    }

    #[test]
    fn cloud_name_override_wins() {
        let urls = media_urls(&hosting(Some("env-cloud")), Some("flag-cloud".to_string())).unwrap();
        assert_eq!(urls.cloud_name(), "flag-cloud");

        let urls = media_urls(&hosting(Some("env-cloud")), None).unwrap();
        assert_eq!(urls.cloud_name(), "env-cloud");
    }

    #[test]
    fn missing_cloud_name_is_an_error() {
        assert!(media_urls(&hosting(None), None).is_err());
    }

    #[tokio::test]
    async fn reads_file_with_name_and_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.webm");
        std::fs::write(&path, b"12345").unwrap();

        let file = read_selected_file(&path).await.unwrap();
        assert_eq!(file.name, "clip.webm");
        assert_eq!(file.size(), 5);
        assert_eq!(file.content_type.as_deref(), Some("video/webm"));
    }
}
