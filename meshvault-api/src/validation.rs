//! Request validation helpers.
//!
//! Everything here runs before any store call: malformed keys, durations
//! and filter values are rejected as 400s without touching the network.

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::types::ListAssetsQuery;
use meshvault_core::{AssetFilter, AssetFormat, AssetKey};
use std::time::Duration;

/// Parse and validate an asset key from a request body.
pub fn parse_key(raw: &str) -> ApiResult<AssetKey> {
    AssetKey::new(raw).map_err(|_| ApiError::missing_field("key"))
}

/// Resolve a requested lease duration against the configured policy.
///
/// `None` falls back to the configured default; explicit values must be
/// positive and within the configured maximum.
pub fn resolve_lease_duration(requested_ms: Option<i64>, config: &ApiConfig) -> ApiResult<Duration> {
    let ms = requested_ms.unwrap_or(config.default_lease_ms);
    if ms <= 0 || ms > config.max_lease_ms {
        return Err(ApiError::invalid_range("duration_ms", 1, config.max_lease_ms));
    }
    Ok(Duration::from_millis(ms as u64))
}

/// Resolve a requested page size against the configured bounds.
///
/// `None` falls back to the default; 0 is rejected; oversized requests
/// are clamped rather than rejected.
pub fn resolve_page_size(requested: Option<usize>, config: &ApiConfig) -> ApiResult<usize> {
    match requested {
        None => Ok(config.default_page_size),
        Some(0) => Err(ApiError::invalid_range(
            "pageSize",
            1,
            config.max_page_size,
        )),
        Some(n) => Ok(n.min(config.max_page_size)),
    }
}

/// Build the filter predicate set from listing query parameters.
pub fn parse_filter(query: &ListAssetsQuery) -> ApiResult<AssetFilter> {
    let categories = query
        .categories
        .as_deref()
        .map(|raw| {
            raw.split(',')
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let format = query
        .format
        .as_deref()
        .map(|raw| {
            AssetFormat::parse(raw)
                .map_err(|e| ApiError::invalid_input(e.to_string()))
        })
        .transpose()?;

    Ok(AssetFilter {
        categories,
        is_favourite: query.is_favourite,
        format,
        q: query.q.clone(),
        prefix: query.prefix.clone(),
    })
}

// =============================================================================
// TESTS
// =============================================================================
