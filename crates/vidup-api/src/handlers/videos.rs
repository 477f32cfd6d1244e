use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;
use vidup_core::models::VideoRecord;
use vidup_core::AppError;

#[utoipa::path(
    get,
    path = "/api/videos",
    tag = "videos",
    responses(
        (status = 200, description = "All stored videos, newest first", body = Vec<VideoRecord>),
        (status = 500, description = "Store read failed", body = ErrorResponse)
    )
)]
pub async fn list_videos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<VideoRecord>>, HttpAppError> {
    let videos = state
        .videos
        .list_all()
        .await
        .map_err(AppError::into_listing)?;

    tracing::debug!(count = videos.len(), "Listed videos");
    Ok(Json(videos))
}
