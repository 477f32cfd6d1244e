//! Native model of the upload page
//!
//! Holds the form fields, the submit phase and the cached listing. An upload is split in
//! two steps, `begin_submit` and `finish_submit`, mirroring the browser page where the
//! submit control stays disabled while a request is in flight; `submit` runs both.

use crate::{ClientError, UploadRequest, VideoApi};
use bytes::Bytes;
use vidup_core::constants::MAX_UPLOAD_FILE_SIZE;
use vidup_core::models::{UploadVideoResponse, VideoRecord};

pub const LOAD_ERROR_MESSAGE: &str = "Error loading videos";

const SUBMIT_LABEL: &str = "Upload Video";
const SUBMITTING_LABEL: &str = "Uploading...";

/// File picked in the form.
#[derive(Clone, Debug)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl SelectedFile {
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// No file selected; nothing happened
    MissingFile,
    /// File over the size ceiling; no request was made
    TooLarge { size: u64, max: u64 },
    /// An upload is already in flight
    Busy,
    Uploaded(UploadVideoResponse),
    /// The upload request failed; the listing is untouched
    Failed(ClientError),
}

pub struct UploadPage<A: VideoApi> {
    api: A,
    pub title: String,
    pub description: String,
    file: Option<SelectedFile>,
    phase: Phase,
    videos: Vec<VideoRecord>,
    loading: bool,
    error: Option<String>,
}

impl<A: VideoApi> UploadPage<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            title: String::new(),
            description: String::new(),
            file: None,
            phase: Phase::Idle,
            videos: Vec::new(),
            loading: true,
            error: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn select_file(&mut self, file: Option<SelectedFile>) {
        self.file = file;
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn videos(&self) -> &[VideoRecord] {
        &self.videos
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn submit_enabled(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn submit_label(&self) -> &'static str {
        match self.phase {
            Phase::Idle => SUBMIT_LABEL,
            Phase::Submitting => SUBMITTING_LABEL,
        }
    }

    /// Initial listing fetch.
    pub async fn mount(&mut self) {
        self.refresh().await;
    }

    /// Fetch the listing. Success replaces the cache; any failure sets the error message
    /// and keeps whatever was cached before.
    pub async fn refresh(&mut self) {
        match self.api.list_videos().await {
            Ok(videos) => {
                self.videos = videos;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load videos");
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
            }
        }
        self.loading = false;
    }

    /// Validate the form and enter `Submitting`. Returns the request to send, or the
    /// outcome that ends the submit without a request.
    pub fn begin_submit(&mut self) -> Result<UploadRequest, SubmitOutcome> {
        if self.phase == Phase::Submitting {
            return Err(SubmitOutcome::Busy);
        }
        let Some(file) = &self.file else {
            return Err(SubmitOutcome::MissingFile);
        };
        let size = file.size();
        if size > MAX_UPLOAD_FILE_SIZE {
            return Err(SubmitOutcome::TooLarge {
                size,
                max: MAX_UPLOAD_FILE_SIZE,
            });
        }

        self.phase = Phase::Submitting;
        Ok(UploadRequest {
            data: file.data.clone(),
            filename: file.name.clone(),
            content_type: file.content_type.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            original_size: size,
        })
    }

    /// Leave `Submitting`; refresh the listing after a successful upload.
    pub async fn finish_submit(
        &mut self,
        result: Result<UploadVideoResponse, ClientError>,
    ) -> SubmitOutcome {
        let outcome = match result {
            Ok(response) => {
                tracing::info!(public_id = %response.public_id, "Video uploaded");
                self.refresh().await;
                SubmitOutcome::Uploaded(response)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Video upload failed");
                SubmitOutcome::Failed(e)
            }
        };
        self.phase = Phase::Idle;
        outcome
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let request = match self.begin_submit() {
            Ok(request) => request,
            Err(outcome) => return outcome,
        };
        let result = self.api.upload_video(request).await;
        self.finish_submit(result).await
    }
}
