use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One uploaded-and-processed video, as persisted in the `videos` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Hosting service reference used to build playback and download URLs
    pub public_id: String,
    /// Byte size declared by the uploading client (not verified)
    pub original_size: String,
    /// Byte size reported by the hosting service after processing
    pub compressed_size: String,
    /// Seconds; 0 when the hosting service did not report a duration
    pub duration: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VideoRecord {
    /// Declared original size in bytes, if the stored string is numeric.
    pub fn original_bytes(&self) -> Option<u64> {
        self.original_size.trim().parse().ok()
    }

    /// Processed size in bytes, if the stored string is numeric.
    pub fn compressed_bytes(&self) -> Option<u64> {
        self.compressed_size.trim().parse().ok()
    }

    /// Size reduction achieved by the hosting service, in whole percent.
    ///
    /// Negative when the processed file is larger than the original.
    pub fn compression_percentage(&self) -> Option<i64> {
        let original = self.original_bytes()?;
        let compressed = self.compressed_bytes()?;
        if original == 0 {
            return None;
        }
        let ratio = 1.0 - compressed as f64 / original as f64;
        Some((ratio * 100.0).round() as i64)
    }
}

/// Insert payload for a new video row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVideo {
    pub title: String,
    pub description: Option<String>,
    pub public_id: String,
    pub original_size: String,
    pub compressed_size: String,
    pub duration: f64,
}

/// Body returned by a successful upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadVideoResponse {
    pub public_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(original: &str, compressed: &str) -> VideoRecord {
        let now = Utc::now();
        VideoRecord {
            id: Uuid::new_v4(),
            title: "Clip A".to_string(),
            description: None,
            public_id: "video-uploads/abc123".to_string(),
            original_size: original.to_string(),
            compressed_size: compressed.to_string(),
            duration: 12.5,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(record("2097152", "1048576")).unwrap();
        assert_eq!(value["publicId"], "video-uploads/abc123");
        assert_eq!(value["originalSize"], "2097152");
        assert_eq!(value["compressedSize"], "1048576");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("public_id").is_none());
    }

    #[test]
    fn compression_percentage_rounds() {
        assert_eq!(record("2097152", "1048576").compression_percentage(), Some(50));
        assert_eq!(record("1000", "1001").compression_percentage(), Some(0));
        assert_eq!(record("1000", "1500").compression_percentage(), Some(-50));
    }

    #[test]
    fn compression_percentage_needs_numeric_sizes() {
        assert_eq!(record("", "10").compression_percentage(), None);
        assert_eq!(record("0", "10").compression_percentage(), None);
        assert_eq!(record("abc", "10").original_bytes(), None);
    }

    #[test]
    fn upload_response_uses_public_id_key() {
        let body = serde_json::to_string(&UploadVideoResponse {
            public_id: "video-uploads/xyz".to_string(),
        })
        .unwrap();
        assert_eq!(body, r#"{"publicId":"video-uploads/xyz"}"#);
    }
}
