//! Startup checks that only warn

use anyhow::Result;
use vidup_core::Config;

/// Validate configuration and report degraded setups.
///
/// Missing hosting credentials are not fatal: the server starts and upload requests
/// answer with a configuration error.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    let hosting = config.hosting();
    if hosting.credentials.is_none() {
        tracing::warn!(
            "CLOUDINARY_CLOUD_NAME, CLOUDINARY_API_KEY or CLOUDINARY_API_SECRET is not set; uploads are disabled"
        );
    }
    if hosting.cloud_name.is_none() {
        tracing::warn!("No cloud name configured; the upload page cannot build download links");
    }
    if config.auth().issuer.is_none() {
        tracing::warn!("AUTH_ISSUER is not set; session token issuers are not checked");
    }

    Ok(())
}
