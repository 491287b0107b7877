//! REST API Routes Module
//!
//! Route handlers organized by concern:
//! - Lock lifecycle (acquire/heartbeat/release)
//! - Asset catalog listing
//! - Health check endpoints (Kubernetes-compatible)
//! - CORS support for browser-based viewers

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub mod asset;
pub mod health;
pub mod lock;

// Re-export route creation functions for convenience
pub use asset::create_router as asset_router;
pub use health::create_router as health_router;
pub use lock::create_router as lock_router;

/// Build the full API router with CORS, tracing, and request timeouts.
pub fn create_api_router(state: AppState) -> ApiResult<Router> {
    let cors = build_cors_layer(&state.config.cors_origins)?;
    let timeout = TimeoutLayer::new(state.config.request_timeout);

    let router = Router::new()
        .merge(lock_router(state.clone()))
        .merge(asset_router(state.clone()))
        .merge(health_router(state.clone()));

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/docs")
            .url("/api-docs/openapi.json", crate::openapi::openapi_doc()),
    );

    Ok(router
        .layer(cors)
        .layer(timeout)
        .layer(TraceLayer::new_for_http()))
}

fn build_cors_layer(origins: &[String]) -> ApiResult<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.is_empty() {
        // Dev mode: allow all origins.
        return Ok(layer.allow_origin(Any));
    }

    let values = origins
        .iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|_| {
                ApiError::invalid_input(format!("Invalid CORS origin: {}", origin))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(layer.allow_origin(values))
}
