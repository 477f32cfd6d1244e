//! Application state shared by all handlers.

use std::sync::Arc;
use vidup_core::constants::{DEFAULT_UPLOAD_FOLDER, DEFAULT_VIDEO_FORMAT};
use vidup_core::{Config, MediaUrlBuilder};
use vidup_db::VideoStore;
use vidup_hosting::{MediaHost, UploadOptions};

/// Where and how uploaded videos are stored on the hosting service.
#[derive(Clone, Debug)]
pub struct UploadSettings {
    pub folder: String,
    pub video_format: String,
}

impl UploadSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            folder: config.hosting().upload_folder.clone(),
            video_format: config.hosting().video_format.clone(),
        }
    }

    pub fn options(&self) -> UploadOptions {
        UploadOptions::video(self.folder.clone(), self.video_format.clone())
    }
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            folder: DEFAULT_UPLOAD_FOLDER.to_string(),
            video_format: DEFAULT_VIDEO_FORMAT.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub videos: Arc<dyn VideoStore>,
    /// None when the server runs without hosting credentials
    pub hosting: Option<Arc<dyn MediaHost>>,
    pub upload: UploadSettings,
    /// Delivery URLs handed to the upload page
    pub media_urls: Option<MediaUrlBuilder>,
}

impl AppState {
    pub fn new(videos: Arc<dyn VideoStore>, hosting: Option<Arc<dyn MediaHost>>) -> Self {
        Self {
            videos,
            hosting,
            upload: UploadSettings::default(),
            media_urls: None,
        }
    }

    pub fn with_upload_settings(mut self, upload: UploadSettings) -> Self {
        self.upload = upload;
        self
    }

    pub fn with_media_urls(mut self, media_urls: Option<MediaUrlBuilder>) -> Self {
        self.media_urls = media_urls;
        self
    }
}
