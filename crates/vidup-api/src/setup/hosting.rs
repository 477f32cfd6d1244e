use anyhow::{Context, Result};
use std::sync::Arc;
use vidup_core::Config;
use vidup_hosting::{create_media_host, MediaHost};

/// Build the media host; `None` when credentials are missing.
pub fn setup_hosting(config: &Config) -> Result<Option<Arc<dyn MediaHost>>> {
    create_media_host(config.hosting()).context("Failed to initialize media host")
}
