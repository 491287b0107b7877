//! Request/Response Types for the MeshVault API
//!
//! Wire shapes for the lock endpoints (snake_case JSON bodies) and the
//! listing endpoint (camelCase query parameters and response, matching
//! the browser clients that consume it).

use meshvault_core::{AssetRecord, ListingPage, LockHandle, Timestamp};
use serde::{Deserialize, Serialize};

// ============================================================================
// LOCK TYPES
// ============================================================================

/// Request body for acquiring an editing lock on an asset.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AcquireLockRequest {
    /// Asset key to lock.
    pub key: String,
    /// Requested lease duration in milliseconds. Omitted = server default.
    #[serde(default)]
    pub duration_ms: Option<i64>,
}

/// Request body for releasing a held lock.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ReleaseLockRequest {
    pub key: String,
    pub lease_id: String,
}

/// Request body for renewing a held lock before it expires.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HeartbeatLockRequest {
    pub key: String,
    pub lease_id: String,
    /// Renewed lease duration in milliseconds. Omitted = server default.
    #[serde(default)]
    pub duration_ms: Option<i64>,
}

/// A held lock, as returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LockResponse {
    pub key: String,
    pub lease_id: String,
    #[schema(value_type = String, format = "date-time")]
    pub expires_at: Timestamp,
}

impl From<LockHandle> for LockResponse {
    fn from(handle: LockHandle) -> Self {
        Self {
            key: handle.key.into_string(),
            lease_id: handle.lease_id,
            expires_at: handle.expires_at,
        }
    }
}

// ============================================================================
// LISTING TYPES
// ============================================================================

/// Query parameters for the asset listing endpoint.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListAssetsQuery {
    /// Comma-separated category names.
    pub categories: Option<String>,
    /// Favourite flag restriction.
    pub is_favourite: Option<bool>,
    /// File format restriction (gltf, glb, obj, fbx, stl, usdz).
    pub format: Option<String>,
    /// Free-text substring match against name/alias/description/category.
    pub q: Option<String>,
    /// Store-native path-prefix restriction.
    pub prefix: Option<String>,
    /// Opaque cursor from the previous page; absent = first page.
    pub cursor: Option<String>,
    /// Page size bound; clamped to the configured maximum.
    pub page_size: Option<usize>,
}

/// One page of catalog results.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListAssetsResponse {
    pub items: Vec<AssetRecord>,
    /// Cursor for the next page; absent when enumeration is complete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    pub has_more: bool,
    /// Best-effort total; 0 when the store cannot cheaply report it.
    pub total_count: i64,
}

impl From<ListingPage<AssetRecord>> for ListAssetsResponse {
    fn from(page: ListingPage<AssetRecord>) -> Self {
        Self {
            items: page.items,
            next_cursor: page.next_cursor,
            has_more: page.has_more,
            total_count: page.total_count,
        }
    }
}
