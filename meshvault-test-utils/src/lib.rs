//! MeshVault Test Utilities
//!
//! Centralized test infrastructure for the workspace:
//! - Proptest generators for keys, records, cursors, and filters
//! - Catalog seeding fixtures over the in-memory store

// Re-export the reference backend from its source crate
pub use meshvault_storage::MemoryLeaseStore;

// Re-export core types for convenience
pub use meshvault_core::{
    AssetFilter, AssetFormat, AssetKey, AssetRecord, ListingPage, LockHandle, PaginationCursor,
    Timestamp,
};

use chrono::Utc;
use proptest::prelude::*;

// ============================================================================
// PROPTEST STRATEGIES
// ============================================================================

/// Strategy for valid asset keys (blob-name shaped, never blank).
pub fn asset_key_strategy() -> impl Strategy<Value = AssetKey> {
    "[a-z0-9][a-z0-9/._-]{0,40}"
        .prop_map(|s| AssetKey::new(s).expect("generated key is valid"))
}

/// Strategy for asset formats.
pub fn asset_format_strategy() -> impl Strategy<Value = AssetFormat> {
    prop_oneof![
        Just(AssetFormat::Gltf),
        Just(AssetFormat::Glb),
        Just(AssetFormat::Obj),
        Just(AssetFormat::Fbx),
        Just(AssetFormat::Stl),
        Just(AssetFormat::Usdz),
    ]
}

/// Strategy for complete catalog records.
pub fn asset_record_strategy() -> impl Strategy<Value = AssetRecord> {
    (
        asset_key_strategy(),
        "[A-Za-z][A-Za-z0-9 ]{0,24}",
        proptest::option::of("[a-z-]{1,16}"),
        proptest::option::of("[A-Za-z0-9 ]{0,48}"),
        proptest::option::of("[a-z]{3,12}"),
        asset_format_strategy(),
        any::<bool>(),
        1i64..100_000_000,
    )
        .prop_map(
            |(key, name, alias, description, category, format, is_favourite, size_bytes)| {
                let now = Utc::now();
                AssetRecord {
                    key,
                    name,
                    alias,
                    description,
                    category,
                    format,
                    is_favourite,
                    size_bytes,
                    created_at: now,
                    updated_at: now,
                }
            },
        )
}

/// Strategy for versioned pagination cursors.
pub fn cursor_strategy() -> impl Strategy<Value = PaginationCursor> {
    (
        proptest::option::of("[A-Za-z0-9+/=_-]{0,48}"),
        proptest::option::of("[a-z0-9/._-]{0,48}"),
    )
        .prop_map(|(token, last)| PaginationCursor::new(token, last))
}

// ============================================================================
// FIXTURES
// ============================================================================

/// Build a deterministic catalog record for the given key.
pub fn sample_record(key: &str, name: &str) -> AssetRecord {
    let now = Utc::now();
    AssetRecord {
        key: AssetKey::new(key).expect("fixture key is valid"),
        name: name.to_string(),
        alias: None,
        description: None,
        category: None,
        format: AssetFormat::Glb,
        is_favourite: false,
        size_bytes: 2048,
        created_at: now,
        updated_at: now,
    }
}

/// Seed `count` sequentially-keyed records into the store.
///
/// Keys are zero-padded (`asset-000`, `asset-001`, ...) so store order
/// matches insertion order.
pub async fn seed_catalog(store: &MemoryLeaseStore, count: usize) -> Vec<AssetKey> {
    let mut keys = Vec::with_capacity(count);
    for i in 0..count {
        let key = format!("asset-{:03}", i);
        store
            .put_record(sample_record(&key, &format!("Asset {}", i)))
            .await;
        keys.push(AssetKey::new(key).expect("fixture key is valid"));
    }
    keys
}
