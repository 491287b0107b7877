//! Health Check Endpoints
//!
//! Kubernetes-compatible health endpoints:
//! - /health/ping - Simple liveness check
//! - /health/live - Process alive check
//! - /health/ready - Object store connectivity check

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use meshvault_storage::ListPageRequest;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

// ============================================================================
// TYPES
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HealthDetails>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthDetails {
    pub store: ComponentHealth,
    pub version: String,
    pub uptime_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ComponentHealth {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// HANDLERS
// ============================================================================

/// GET /health/ping - liveness probe
pub async fn ping() -> impl IntoResponse {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        message: Some("pong".to_string()),
        details: None,
    })
}

/// GET /health/live - process alive check
pub async fn live() -> impl IntoResponse {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        message: None,
        details: None,
    })
}

/// GET /health/ready - store connectivity check
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let started = std::time::Instant::now();
    let probe = state
        .store
        .list_page(&ListPageRequest {
            prefix: None,
            token: None,
            page_size: 1,
        })
        .await;
    let latency_ms = started.elapsed().as_millis() as u64;

    let store_health = match probe {
        Ok(_) => ComponentHealth {
            status: HealthStatus::Healthy,
            latency_ms: Some(latency_ms),
            error: None,
        },
        Err(e) => ComponentHealth {
            status: HealthStatus::Unhealthy,
            latency_ms: Some(latency_ms),
            error: Some(e.to_string()),
        },
    };

    let status = store_health.status;
    let body = HealthResponse {
        status,
        message: None,
        details: Some(HealthDetails {
            store: store_health,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.start_time.elapsed().as_secs(),
        }),
    };

    let http_status = match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (http_status, Json(body))
}

/// Create the health router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health/ping", get(ping))
        .route("/health/live", get(live))
        .route("/health/ready", get(ready))
        .with_state(state)
}
