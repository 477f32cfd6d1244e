//! Session token verification against the identity provider's JWKS
//!
//! Tokens are RS256 or ES256 JWTs. Public keys are fetched from the provider's JWKS
//! endpoint and cached per key id for a configurable time so that key rotation is
//! picked up without a restart.

use crate::auth::middleware::IdentityProvider;
use crate::auth::models::{CallerIdentity, SessionClaims};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use vidup_core::{AppError, AuthConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwk {
    #[serde(rename = "kty")]
    pub key_type: String,
    #[serde(rename = "kid")]
    pub key_id: Option<String>,
    #[serde(rename = "n")]
    pub modulus: Option<String>,
    #[serde(rename = "e")]
    pub exponent: Option<String>,
    #[serde(rename = "x")]
    pub x_coordinate: Option<String>,
    #[serde(rename = "y")]
    pub y_coordinate: Option<String>,
    #[serde(rename = "crv")]
    pub curve: Option<String>,
}

#[derive(Clone)]
struct CachedKey {
    key: DecodingKey,
    expires_at: DateTime<Utc>,
}

pub struct JwksIdentityProvider {
    http_client: reqwest::Client,
    jwks_url: String,
    issuer: Option<String>,
    cache: Arc<RwLock<HashMap<String, CachedKey>>>,
    cache_ttl_seconds: i64,
    algorithms: Vec<Algorithm>,
}

impl JwksIdentityProvider {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            jwks_url: config.jwks_url.clone(),
            issuer: config.issuer.clone(),
            cache: Arc::new(RwLock::new(HashMap::new())),
            cache_ttl_seconds: config.jwks_cache_seconds,
            algorithms: vec![Algorithm::RS256, Algorithm::ES256],
        }
    }

    async fn fetch_jwks(&self) -> Result<Jwks, AppError> {
        let response = self
            .http_client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| AppError::Unauthorized(format!("Failed to fetch JWKS: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Unauthorized(format!(
                "JWKS endpoint returned error: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Unauthorized(format!("Failed to parse JWKS: {}", e)))
    }

    fn jwk_to_decoding_key(jwk: &Jwk) -> Result<DecodingKey, AppError> {
        match jwk.key_type.as_str() {
            "RSA" => {
                let n = jwk
                    .modulus
                    .as_ref()
                    .ok_or_else(|| AppError::Unauthorized("RSA key missing modulus".to_string()))?;
                let e = jwk.exponent.as_ref().ok_or_else(|| {
                    AppError::Unauthorized("RSA key missing exponent".to_string())
                })?;
                DecodingKey::from_rsa_components(n, e)
                    .map_err(|e| AppError::Unauthorized(format!("Failed to create RSA key: {}", e)))
            }
            "EC" => {
                let (Some(x), Some(y)) = (&jwk.x_coordinate, &jwk.y_coordinate) else {
                    return Err(AppError::Unauthorized(
                        "EC key missing coordinates".to_string(),
                    ));
                };
                if jwk.curve.as_deref() != Some("P-256") {
                    return Err(AppError::Unauthorized(format!(
                        "Unsupported EC curve: {:?}",
                        jwk.curve
                    )));
                }
                DecodingKey::from_ec_components(x, y)
                    .map_err(|e| AppError::Unauthorized(format!("Failed to create EC key: {}", e)))
            }
            other => Err(AppError::Unauthorized(format!(
                "Unsupported key type: {}",
                other
            ))),
        }
    }

    async fn decoding_key(&self, kid: Option<&str>) -> Result<DecodingKey, AppError> {
        let cache_key = kid.unwrap_or("default").to_string();

        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.get(&cache_key) {
                if cached.expires_at > Utc::now() {
                    return Ok(cached.key.clone());
                }
            }
        }

        let jwks = self.fetch_jwks().await?;
        let jwk = match kid {
            Some(kid) => jwks
                .keys
                .iter()
                .find(|k| k.key_id.as_deref() == Some(kid))
                .ok_or_else(|| AppError::Unauthorized(format!("Key ID {} not found in JWKS", kid)))?,
            None => jwks
                .keys
                .first()
                .ok_or_else(|| AppError::Unauthorized("No keys found in JWKS".to_string()))?,
        };
        let key = Self::jwk_to_decoding_key(jwk)?;

        self.cache.write().await.insert(
            cache_key,
            CachedKey {
                key: key.clone(),
                expires_at: Utc::now() + chrono::Duration::seconds(self.cache_ttl_seconds),
            },
        );

        Ok(key)
    }

    fn validation(&self, algorithm: Algorithm) -> Validation {
        let mut validation = Validation::new(algorithm);
        // jsonwebtoken requires every listed algorithm to match the key family
        validation.algorithms = vec![algorithm];
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.leeway = 5;
        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer]);
        }
        validation
    }
}

#[async_trait]
impl IdentityProvider for JwksIdentityProvider {
    async fn verify(&self, token: &str) -> Result<CallerIdentity, AppError> {
        let header = decode_header(token)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token header: {}", e)))?;

        if !self.algorithms.contains(&header.alg) {
            return Err(AppError::Unauthorized(format!(
                "Unsupported algorithm: {:?}",
                header.alg
            )));
        }

        let key = self.decoding_key(header.kid.as_deref()).await?;
        self.decode_claims(token, &key, header.alg)
    }
}

impl JwksIdentityProvider {
    fn decode_claims(
        &self,
        token: &str,
        key: &DecodingKey,
        algorithm: Algorithm,
    ) -> Result<CallerIdentity, AppError> {
        let data = decode::<SessionClaims>(token, key, &self.validation(algorithm)).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::Unauthorized("Token has expired".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                    AppError::Unauthorized("Invalid token issuer".to_string())
                }
                _ => AppError::Unauthorized(format!("Invalid token: {}", e)),
            },
        )?;

        if data.claims.sub.is_empty() {
            return Err(AppError::Unauthorized("Token has no subject".to_string()));
        }

        Ok(data.claims.into())
    }
}
