//! MeshVault API - REST layer
//!
//! Exposes the lock service and listing orchestrator as an Axum REST
//! surface: lock lifecycle endpoints, the paged asset listing endpoint,
//! and health checks. All state is injected at construction; see
//! `AppState`.

pub mod config;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use state::AppState;
pub use types::{
    AcquireLockRequest, HeartbeatLockRequest, ListAssetsQuery, ListAssetsResponse, LockResponse,
    ReleaseLockRequest,
};
