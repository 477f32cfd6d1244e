use crate::auth::CallerIdentity;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::read_upload_form;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use std::sync::Arc;
use vidup_core::models::{NewVideo, UploadVideoResponse};
use vidup_core::AppError;

#[utoipa::path(
    post,
    path = "/api/video-upload",
    tag = "videos",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "Fields: file (binary), title, description, originalSize"),
    responses(
        (status = 200, description = "Video uploaded and recorded", body = UploadVideoResponse),
        (status = 400, description = "No file in the request", body = ErrorResponse),
        (status = 401, description = "No verified caller identity", body = ErrorResponse),
        (status = 500, description = "Hosting not configured, or upload or persistence failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = %caller.user_id))]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    caller: CallerIdentity,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadVideoResponse>, HttpAppError> {
    let host = state.hosting.clone().ok_or_else(|| {
        AppError::Configuration("Cloudinary credentials are not configured".to_string())
    })?;

    let multipart = multipart.map_err(|rejection| {
        tracing::debug!(reason = %rejection, "Upload request is not multipart");
        AppError::MissingFile
    })?;
    let form = read_upload_form(multipart).await?;
    let file = form.file.ok_or(AppError::MissingFile)?;

    tracing::debug!(
        filename = %file.filename,
        file_size = file.data.len(),
        declared_size = %form.original_size,
        "Forwarding video to media host"
    );

    let asset = host.upload(file, &state.upload.options()).await?;

    let new_video = NewVideo {
        title: form.title,
        description: form.description,
        public_id: asset.public_id.clone(),
        original_size: form.original_size,
        compressed_size: asset.bytes.to_string(),
        duration: asset.duration.unwrap_or(0.0),
    };

    let video = state.videos.create(new_video).await.map_err(|e| {
        tracing::error!(
            error = %e,
            public_id = %asset.public_id,
            provider = host.provider(),
            "Video hosted but record could not be saved; hosted asset is orphaned"
        );
        e
    })?;

    tracing::info!(
        video_id = %video.id,
        public_id = %video.public_id,
        compressed_size = %video.compressed_size,
        "Video uploaded"
    );

    Ok(Json(UploadVideoResponse {
        public_id: video.public_id,
    }))
}
