//! Delivery URL construction for hosted videos
//!
//! Records only store the hosting service's public id; playback, thumbnail and download
//! URLs are derived from it on the client side.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_VIDEO_FORMAT;

/// Default Cloudinary delivery host.
pub const DEFAULT_DELIVERY_BASE: &str = "https://res.cloudinary.com";

/// Builds delivery URLs for hosted video assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaUrlBuilder {
    delivery_base: String,
    cloud_name: String,
    format: String,
}

impl MediaUrlBuilder {
    pub fn new(cloud_name: impl Into<String>) -> Self {
        Self {
            delivery_base: DEFAULT_DELIVERY_BASE.to_string(),
            cloud_name: cloud_name.into(),
            format: DEFAULT_VIDEO_FORMAT.to_string(),
        }
    }

    pub fn with_delivery_base(mut self, base: impl Into<String>) -> Self {
        self.delivery_base = base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn cloud_name(&self) -> &str {
        &self.cloud_name
    }

    pub fn delivery_base(&self) -> &str {
        &self.delivery_base
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// Playback/download URL of the processed video.
    pub fn video_url(&self, public_id: &str) -> String {
        format!(
            "{}/{}/video/upload/{}.{}",
            self.delivery_base,
            self.cloud_name,
            public_id.trim_start_matches('/'),
            self.format
        )
    }

    /// Poster frame taken at the first second of the video.
    pub fn thumbnail_url(&self, public_id: &str) -> String {
        format!(
            "{}/{}/video/upload/so_0/{}.jpg",
            self.delivery_base,
            self.cloud_name,
            public_id.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_url_keeps_folder_in_public_id() {
        let urls = MediaUrlBuilder::new("demo");
        assert_eq!(
            urls.video_url("video-uploads/abc123"),
            "https://res.cloudinary.com/demo/video/upload/video-uploads/abc123.mp4"
        );
    }

    #[test]
    fn custom_base_and_format() {
        let urls = MediaUrlBuilder::new("demo")
            .with_delivery_base("http://localhost:9000/")
            .with_format("webm");
        assert_eq!(urls.video_url("x"), "http://localhost:9000/demo/video/upload/x.webm");
        assert_eq!(
            urls.thumbnail_url("x"),
            "http://localhost:9000/demo/video/upload/so_0/x.jpg"
        );
    }
}
