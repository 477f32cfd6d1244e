//! Application setup and initialization

pub mod database;
pub mod hosting;
pub mod routes;
pub mod server;
pub mod validation;

use crate::auth::JwksIdentityProvider;
use crate::state::{AppState, UploadSettings};
use anyhow::{Context, Result};
use std::sync::Arc;
use vidup_core::Config;
use vidup_db::VideoRepository;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.environment())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    validation::validate_config(&config).context("Configuration validation failed")?;
    tracing::info!("Configuration loaded and validated successfully");

    let pool = database::setup_database(&config).await?;
    let hosting = hosting::setup_hosting(&config)?;

    let state = Arc::new(
        AppState::new(Arc::new(VideoRepository::new(pool)), hosting)
            .with_upload_settings(UploadSettings::from_config(&config))
            .with_media_urls(config.media_urls()),
    );

    let identity = Arc::new(JwksIdentityProvider::new(config.auth()));
    let router = routes::setup_routes(&config, state.clone(), identity)?;

    Ok((state, router))
}
