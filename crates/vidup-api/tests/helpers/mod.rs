//! Test helpers: in-memory store, media host and identity provider, and a router
//! built on top of them.

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use vidup_api::auth::{CallerIdentity, IdentityProvider};
use vidup_api::setup::routes::build_router;
use vidup_api::state::AppState;
use vidup_core::models::{NewVideo, VideoRecord};
use vidup_core::{AppError, MediaUrlBuilder};
use vidup_db::VideoStore;
use vidup_hosting::{
    HostedAsset, HostingError, HostingResult, MediaHost, UploadFile, UploadOptions,
};

pub const VALID_TOKEN: &str = "valid-session-token";
pub const TEST_USER_ID: &str = "user_2abc";

const BODY_LIMIT: usize = 100 * 1024 * 1024;

#[derive(Default)]
pub struct InMemoryVideoStore {
    rows: Mutex<Vec<VideoRecord>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
    pub create_calls: AtomicUsize,
}

impl InMemoryVideoStore {
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub fn rows(&self) -> Vec<VideoRecord> {
        self.rows.lock().unwrap().clone()
    }

    pub fn insert(&self, video: NewVideo) -> VideoRecord {
        let now = Utc::now();
        let record = VideoRecord {
            id: uuid::Uuid::new_v4(),
            title: video.title,
            description: video.description,
            public_id: video.public_id,
            original_size: video.original_size,
            compressed_size: video.compressed_size,
            duration: video.duration,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(record.clone());
        record
    }
}

#[async_trait]
impl VideoStore for InMemoryVideoStore {
    async fn create(&self, video: NewVideo) -> Result<VideoRecord, AppError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(self.insert(video))
    }

    async fn list_all(&self) -> Result<Vec<VideoRecord>, AppError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        let mut rows = self.rows();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Media host that records uploads and answers with a fixed asset.
pub struct FakeMediaHost {
    pub uploads: Mutex<Vec<(UploadFile, UploadOptions)>>,
    reject: AtomicBool,
    compressed_bytes: u64,
    duration: Option<f64>,
}

impl FakeMediaHost {
    pub fn new(compressed_bytes: u64, duration: Option<f64>) -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            reject: AtomicBool::new(false),
            compressed_bytes,
            duration,
        }
    }

    pub fn reject_uploads(&self) {
        self.reject.store(true, Ordering::SeqCst);
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl MediaHost for FakeMediaHost {
    async fn upload(&self, file: UploadFile, options: &UploadOptions) -> HostingResult<HostedAsset> {
        let index = {
            let mut uploads = self.uploads.lock().unwrap();
            uploads.push((file, options.clone()));
            uploads.len()
        };
        if self.reject.load(Ordering::SeqCst) {
            return Err(HostingError::Rejected {
                status: 401,
                message: "Invalid Signature".to_string(),
            });
        }
        Ok(HostedAsset {
            public_id: format!("{}/asset{}", options.folder, index),
            bytes: self.compressed_bytes,
            duration: self.duration,
        })
    }

    fn provider(&self) -> &'static str {
        "fake"
    }
}

/// Accepts exactly one token.
pub struct StaticIdentity;

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn verify(&self, token: &str) -> Result<CallerIdentity, AppError> {
        if token == VALID_TOKEN {
            Ok(CallerIdentity {
                user_id: TEST_USER_ID.to_string(),
                session_id: None,
            })
        } else {
            Err(AppError::Unauthorized("Unknown token".to_string()))
        }
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<InMemoryVideoStore>,
    pub host: Option<Arc<FakeMediaHost>>,
}

impl TestApp {
    pub fn upload_count(&self) -> usize {
        self.host.as_ref().map(|h| h.upload_count()).unwrap_or(0)
    }
}

pub fn setup_app_with_host(host: Option<Arc<FakeMediaHost>>) -> TestApp {
    let store = Arc::new(InMemoryVideoStore::default());
    let hosting = host.clone().map(|h| h as Arc<dyn MediaHost>);
    let state = Arc::new(
        AppState::new(store.clone(), hosting)
            .with_media_urls(Some(MediaUrlBuilder::new("demo"))),
    );
    let router = build_router(state, Arc::new(StaticIdentity), BODY_LIMIT);
    let server = TestServer::new(router).expect("test server");
    TestApp {
        server,
        store,
        host,
    }
}

/// App with a working media host reporting 1 MiB and 12.5 seconds per upload.
pub fn setup_test_app() -> TestApp {
    setup_app_with_host(Some(Arc::new(FakeMediaHost::new(1_048_576, Some(12.5)))))
}

/// App started without hosting credentials.
pub fn setup_unconfigured_app() -> TestApp {
    setup_app_with_host(None)
}

pub fn bearer() -> String {
    format!("Bearer {}", VALID_TOKEN)
}
