//! Lock REST API Routes
//!
//! Axum route handlers for the distributed advisory lock: acquire,
//! heartbeat, release. A losing acquire is an expected outcome and maps
//! to 409 with code `LOCK_CONFLICT`; there is no retry or queueing on the
//! server side, the caller decides.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::types::{AcquireLockRequest, HeartbeatLockRequest, LockResponse, ReleaseLockRequest};
use crate::validation::{parse_key, resolve_lease_duration};
use meshvault_core::AcquireOutcome;

/// POST /api/v1/locks/acquire - Acquire an editing lock on an asset
#[utoipa::path(
    post,
    path = "/api/v1/locks/acquire",
    tag = "Locks",
    request_body = AcquireLockRequest,
    responses(
        (status = 201, description = "Lock acquired", body = LockResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 409, description = "Asset locked by another client", body = ApiError),
        (status = 503, description = "Object store unavailable", body = ApiError),
    )
)]
pub async fn acquire_lock(
    State(state): State<AppState>,
    Json(req): Json<AcquireLockRequest>,
) -> ApiResult<impl IntoResponse + std::fmt::Debug> {
    let key = parse_key(&req.key)?;
    let duration = resolve_lease_duration(req.duration_ms, &state.config)?;

    match state.locks.try_acquire(&key, duration).await? {
        AcquireOutcome::Acquired(handle) => {
            tracing::debug!(key = %key, "lock acquired");
            Ok((StatusCode::CREATED, Json(LockResponse::from(handle))))
        }
        AcquireOutcome::Conflict => Err(ApiError::lock_conflict(&key)),
    }
}

/// POST /api/v1/locks/release - Release a held lock
#[utoipa::path(
    post,
    path = "/api/v1/locks/release",
    tag = "Locks",
    request_body = ReleaseLockRequest,
    responses(
        (status = 204, description = "Lock released"),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 404, description = "No matching lease", body = ApiError),
        (status = 503, description = "Object store unavailable", body = ApiError),
    )
)]
pub async fn release_lock(
    State(state): State<AppState>,
    Json(req): Json<ReleaseLockRequest>,
) -> ApiResult<StatusCode> {
    let key = parse_key(&req.key)?;
    if req.lease_id.trim().is_empty() {
        return Err(ApiError::missing_field("lease_id"));
    }

    state.locks.release(&key, &req.lease_id).await?;
    tracing::debug!(key = %key, "lock released");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/locks/heartbeat - Renew a held lock before it expires
#[utoipa::path(
    post,
    path = "/api/v1/locks/heartbeat",
    tag = "Locks",
    request_body = HeartbeatLockRequest,
    responses(
        (status = 200, description = "Lock renewed", body = LockResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 404, description = "No matching lease", body = ApiError),
        (status = 409, description = "Lease expired; re-acquire", body = ApiError),
        (status = 503, description = "Object store unavailable", body = ApiError),
    )
)]
pub async fn heartbeat_lock(
    State(state): State<AppState>,
    Json(req): Json<HeartbeatLockRequest>,
) -> ApiResult<Json<LockResponse>> {
    let key = parse_key(&req.key)?;
    if req.lease_id.trim().is_empty() {
        return Err(ApiError::missing_field("lease_id"));
    }
    let duration = resolve_lease_duration(req.duration_ms, &state.config)?;

    let handle = state.locks.heartbeat(&key, &req.lease_id, duration).await?;
    Ok(Json(LockResponse::from(handle)))
}

/// Create the lock router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/locks/acquire", post(acquire_lock))
        .route("/api/v1/locks/release", post(release_lock))
        .route("/api/v1/locks/heartbeat", post(heartbeat_lock))
        .with_state(state)
}
