//! Constants shared by the server and its clients.

/// Largest file the upload page will submit (70 MiB).
pub const MAX_UPLOAD_FILE_SIZE: u64 = 70 * 1024 * 1024;

/// Route that receives multipart video uploads.
pub const VIDEO_UPLOAD_PATH: &str = "/api/video-upload";

/// Route that lists stored videos.
pub const VIDEOS_PATH: &str = "/api/videos";

/// Route that serves the browser upload page.
pub const UPLOAD_PAGE_PATH: &str = "/video-upload";

/// Cookie carrying the identity provider's session token for browser requests.
pub const SESSION_COOKIE_NAME: &str = "__session";

/// Hosting folder that receives uploaded videos unless configured otherwise.
pub const DEFAULT_UPLOAD_FOLDER: &str = "video-uploads";

/// Container format requested from the hosting service and used for downloads.
pub const DEFAULT_VIDEO_FORMAT: &str = "mp4";

/// Multipart field names of the upload form.
pub mod form_fields {
    pub const FILE: &str = "file";
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const ORIGINAL_SIZE: &str = "originalSize";
}
