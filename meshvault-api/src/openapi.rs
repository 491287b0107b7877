//! OpenAPI Documentation
//!
//! Aggregates the route annotations and schemas into one document,
//! served at /api-docs/openapi.json (and browsable at /docs with the
//! `swagger-ui` feature).

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::health::{ComponentHealth, HealthDetails, HealthResponse, HealthStatus};
use crate::types::{
    AcquireLockRequest, HeartbeatLockRequest, ListAssetsResponse, LockResponse,
    ReleaseLockRequest,
};
use meshvault_core::{AssetFormat, AssetKey, AssetRecord};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MeshVault API",
        description = "Collaborative catalog of versioned 3D model assets: \
                       advisory editing locks and resumable paged listing.",
    ),
    paths(
        crate::routes::lock::acquire_lock,
        crate::routes::lock::release_lock,
        crate::routes::lock::heartbeat_lock,
        crate::routes::asset::list_assets,
    ),
    components(schemas(
        ApiError,
        ErrorCode,
        AcquireLockRequest,
        ReleaseLockRequest,
        HeartbeatLockRequest,
        LockResponse,
        ListAssetsResponse,
        AssetRecord,
        AssetKey,
        AssetFormat,
        HealthResponse,
        HealthStatus,
        HealthDetails,
        ComponentHealth,
    )),
    tags(
        (name = "Locks", description = "Distributed advisory locks over asset keys"),
        (name = "Assets", description = "Paged, filterable catalog listing"),
    )
)]
pub struct ApiDoc;

/// The generated OpenAPI document.
pub fn openapi_doc() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_builds() {
        let doc = openapi_doc();
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("/api/v1/locks/acquire"));
        assert!(json.contains("/api/v1/assets"));
    }
}
