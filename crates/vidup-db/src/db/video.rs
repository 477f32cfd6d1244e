use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use vidup_core::models::{NewVideo, VideoRecord};
use vidup_core::AppError;

const VIDEO_COLUMNS: &str = "id, title, description, public_id, original_size, compressed_size, duration, created_at, updated_at";

/// Access to persisted video records.
///
/// Records are created once per successful upload and only ever read afterwards.
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Insert one record; id and timestamps are assigned by the store.
    async fn create(&self, video: NewVideo) -> Result<VideoRecord, AppError>;

    /// Every stored record, newest first.
    async fn list_all(&self) -> Result<Vec<VideoRecord>, AppError>;

    /// Cheap connectivity probe used by the readiness check.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Postgres-backed `VideoStore`.
///
/// Every operation acquires its own pooled connection; the guard hands it back to the
/// pool when the operation returns, on success and on error alike.
#[derive(Clone)]
pub struct VideoRepository {
    pool: PgPool,
}

impl VideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoStore for VideoRepository {
    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "insert", public_id = %video.public_id))]
    async fn create(&self, video: NewVideo) -> Result<VideoRecord, AppError> {
        let mut conn = self.pool.acquire().await?;

        let record = sqlx::query_as::<Postgres, VideoRecord>(&format!(
            r#"
            INSERT INTO videos (title, description, public_id, original_size, compressed_size, duration)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            VIDEO_COLUMNS
        ))
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.public_id)
        .bind(&video.original_size)
        .bind(&video.compressed_size)
        .bind(video.duration)
        .fetch_one(&mut *conn)
        .await?;

        tracing::debug!(video_id = %record.id, "Video record created");
        Ok(record)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select"))]
    async fn list_all(&self) -> Result<Vec<VideoRecord>, AppError> {
        let mut conn = self.pool.acquire().await?;

        let records = sqlx::query_as::<Postgres, VideoRecord>(&format!(
            "SELECT {} FROM videos ORDER BY created_at DESC",
            VIDEO_COLUMNS
        ))
        .fetch_all(&mut *conn)
        .await?;

        Ok(records)
    }

    async fn ping(&self) -> Result<(), AppError> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }
}
