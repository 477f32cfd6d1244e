pub mod page;
pub mod video_upload;
pub mod videos;
