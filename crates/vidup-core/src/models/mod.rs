//! Domain models

pub mod video;

pub use video::{NewVideo, UploadVideoResponse, VideoRecord};
