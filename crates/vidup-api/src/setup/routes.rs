//! Route configuration and setup

mod health;

use crate::api_doc::get_openapi_spec;
use crate::auth::{identity_middleware, IdentityProvider, IdentityState};
use crate::handlers;
use crate::middleware::request_id::{request_id_middleware, RequestId};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, Request},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use vidup_core::constants::{UPLOAD_PAGE_PATH, VIDEOS_PATH, VIDEO_UPLOAD_PATH};
use vidup_core::Config;

const OPENAPI_PATH: &str = "/api/openapi.json";

/// Setup all application routes
pub fn setup_routes(
    config: &Config,
    state: Arc<AppState>,
    identity: Arc<dyn IdentityProvider>,
) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;
    Ok(build_router(state, identity, config.max_upload_size_bytes()).layer(cors))
}

/// Router with every route and the request-level layers, without CORS.
pub fn build_router(
    state: Arc<AppState>,
    identity: Arc<dyn IdentityProvider>,
    body_limit: usize,
) -> Router {
    let identity_state = Arc::new(IdentityState::new(identity));

    let public_routes = Router::new()
        .route(VIDEOS_PATH, get(handlers::videos::list_videos))
        .route(UPLOAD_PAGE_PATH, get(handlers::page::upload_page))
        .route("/health", get(health::liveness_check))
        .route("/health/ready", get(health::readiness_check));

    let protected_routes = Router::new()
        .route(VIDEO_UPLOAD_PATH, post(handlers::video_upload::upload_video))
        .route_layer(axum::middleware::from_fn_with_state(
            identity_state,
            identity_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        let request_id = request
            .extensions()
            .get::<RequestId>()
            .map(|id| id.0.as_str())
            .unwrap_or("-");
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    });

    public_routes
        .merge(protected_routes)
        .with_state(state)
        .route(OPENAPI_PATH, get(|| async { Json(get_openapi_spec()) }))
        .merge(utoipa_rapidoc::RapiDoc::new(OPENAPI_PATH).path("/docs"))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(trace_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}
