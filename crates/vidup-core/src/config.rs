//! Configuration module
//!
//! Server configuration read from the environment (with `.env` support), including the
//! database pool, the media hosting service and the identity provider.

use std::env;

use crate::constants::{DEFAULT_UPLOAD_FOLDER, DEFAULT_VIDEO_FORMAT};
use crate::media_url::{MediaUrlBuilder, DEFAULT_DELIVERY_BASE};

// Common constants
const SERVER_PORT: u16 = 3000;
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MAX_UPLOAD_SIZE_MB: usize = 100;
const HOSTING_TIMEOUT_SECS: u64 = 300;
const JWKS_CACHE_SECS: i64 = 3600;
const DEFAULT_API_BASE: &str = "https://api.cloudinary.com";

/// API credentials of the media hosting account
#[derive(Clone)]
pub struct CloudinaryCredentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl std::fmt::Debug for CloudinaryCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryCredentials")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Media hosting settings
#[derive(Clone, Debug)]
pub struct HostingConfig {
    /// None when any of the three credential variables is missing
    pub credentials: Option<CloudinaryCredentials>,
    /// Cloud name used for delivery URLs; may be set without upload credentials
    pub cloud_name: Option<String>,
    pub api_base: String,
    pub delivery_base: String,
    pub upload_folder: String,
    pub video_format: String,
    pub timeout_seconds: u64,
}

/// Identity provider settings
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwks_url: String,
    pub issuer: Option<String>,
    pub jwks_cache_seconds: i64,
}

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub server_port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub max_upload_size_bytes: usize,
    pub hosting: HostingConfig,
    pub auth: AuthConfig,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<ServerConfig>);

impl Config {
    fn inner(&self) -> &ServerConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = ServerConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_env(&self.inner().environment)
    }

    pub fn server_port(&self) -> u16 {
        self.inner().server_port
    }

    pub fn database_url(&self) -> &str {
        &self.inner().database_url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.inner().db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.inner().db_timeout_seconds
    }

    pub fn environment(&self) -> &str {
        &self.inner().environment
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().cors_origins
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.inner().max_upload_size_bytes
    }

    pub fn hosting(&self) -> &HostingConfig {
        &self.inner().hosting
    }

    pub fn auth(&self) -> &AuthConfig {
        &self.inner().auth
    }

    /// Delivery URL builder, available whenever a cloud name is known.
    pub fn media_urls(&self) -> Option<MediaUrlBuilder> {
        let hosting = self.hosting();
        hosting.cloud_name.as_ref().map(|cloud| {
            MediaUrlBuilder::new(cloud.clone())
                .with_delivery_base(hosting.delivery_base.clone())
                .with_format(hosting.video_format.clone())
        })
    }
}

fn is_production_env(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

/// Read a variable, treating empty values as unset.
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> T {
    non_empty_var(key)
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl HostingConfig {
    pub fn from_env() -> Self {
        let cloud_name = non_empty_var("CLOUDINARY_CLOUD_NAME")
            .or_else(|| non_empty_var("NEXT_PUBLIC_CLOUDINARY_CLOUD_NAME"));
        let api_key = non_empty_var("CLOUDINARY_API_KEY");
        let api_secret = non_empty_var("CLOUDINARY_API_SECRET");

        let credentials = match (cloud_name.clone(), api_key, api_secret) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Some(CloudinaryCredentials {
                cloud_name,
                api_key,
                api_secret,
            }),
            _ => None,
        };

        Self {
            credentials,
            cloud_name,
            api_base: non_empty_var("CLOUDINARY_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            delivery_base: non_empty_var("CLOUDINARY_DELIVERY_BASE")
                .unwrap_or_else(|| DEFAULT_DELIVERY_BASE.to_string()),
            upload_folder: non_empty_var("CLOUDINARY_UPLOAD_FOLDER")
                .unwrap_or_else(|| DEFAULT_UPLOAD_FOLDER.to_string()),
            video_format: non_empty_var("CLOUDINARY_VIDEO_FORMAT")
                .unwrap_or_else(|| DEFAULT_VIDEO_FORMAT.to_string()),
            timeout_seconds: parse_var("HOSTING_TIMEOUT_SECONDS", HOSTING_TIMEOUT_SECS),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let database_url = non_empty_var("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let jwks_url = non_empty_var("AUTH_JWKS_URL")
            .ok_or_else(|| anyhow::anyhow!("AUTH_JWKS_URL must be set"))?;

        let max_upload_size_mb = parse_var("MAX_UPLOAD_SIZE_MB", MAX_UPLOAD_SIZE_MB);

        let config = Self {
            server_port: parse_var("PORT", SERVER_PORT),
            database_url,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", MAX_CONNECTIONS),
            db_timeout_seconds: parse_var("DB_TIMEOUT_SECONDS", CONNECTION_TIMEOUT_SECS),
            environment,
            cors_origins,
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            hosting: HostingConfig::from_env(),
            auth: AuthConfig {
                jwks_url,
                issuer: non_empty_var("AUTH_ISSUER"),
                jwks_cache_seconds: parse_var("AUTH_JWKS_CACHE_SECONDS", JWKS_CACHE_SECS),
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.db_max_connections == 0 {
            return Err(anyhow::anyhow!("Database max connections cannot be 0"));
        }
        if self.db_timeout_seconds == 0 {
            return Err(anyhow::anyhow!("Database timeout cannot be 0"));
        }
        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB cannot be 0"));
        }
        if is_production_env(&self.environment) && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> ServerConfig {
        ServerConfig {
            server_port: 3000,
            database_url: "postgres://localhost/vidup".to_string(),
            db_max_connections: 5,
            db_timeout_seconds: 30,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            max_upload_size_bytes: 100 * 1024 * 1024,
            hosting: HostingConfig {
                credentials: None,
                cloud_name: Some("demo".to_string()),
                api_base: DEFAULT_API_BASE.to_string(),
                delivery_base: DEFAULT_DELIVERY_BASE.to_string(),
                upload_folder: DEFAULT_UPLOAD_FOLDER.to_string(),
                video_format: DEFAULT_VIDEO_FORMAT.to_string(),
                timeout_seconds: 300,
            },
            auth: AuthConfig {
                jwks_url: "https://auth.example.com/.well-known/jwks.json".to_string(),
                issuer: None,
                jwks_cache_seconds: 3600,
            },
        }
    }

    #[test]
    fn wildcard_cors_rejected_in_production() {
        let mut config = base_config();
        assert!(config.validate().is_ok());
        config.environment = "Production".to_string();
        assert!(config.validate().is_err());
        config.cors_origins = vec!["https://app.example.com".to_string()];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_pool_size_rejected() {
        let mut config = base_config();
        config.db_max_connections = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn media_urls_follow_hosting_settings() {
        let config = Config(Box::new(base_config()));
        let urls = config.media_urls().expect("cloud name is set");
        assert_eq!(urls.cloud_name(), "demo");
        assert_eq!(urls.format(), "mp4");
    }

    #[test]
    fn credentials_debug_redacts_secret() {
        let creds = CloudinaryCredentials {
            cloud_name: "demo".to_string(),
            api_key: "123".to_string(),
            api_secret: "very-secret".to_string(),
        };
        let printed = format!("{:?}", creds);
        assert!(!printed.contains("very-secret"));
    }
}
