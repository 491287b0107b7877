//! Property-Based Tests for the Lock API
//!
//! Mutual exclusion is the contract under test: for any key, at most one
//! caller holds a valid lease within any overlapping window, losers see a
//! conflict (never a second handle), and release/expiry free the key.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use meshvault_api::routes::lock::{acquire_lock, heartbeat_lock, release_lock};
use meshvault_api::{AcquireLockRequest, ApiConfig, AppState, HeartbeatLockRequest, ReleaseLockRequest};
use meshvault_core::AssetKey;
use meshvault_test_utils::{asset_key_strategy, MemoryLeaseStore};
use proptest::prelude::*;
use tokio::runtime::Runtime;

// ============================================================================
// TEST CONFIGURATION
// ============================================================================

fn test_state() -> (Arc<MemoryLeaseStore>, AppState) {
    let store = Arc::new(MemoryLeaseStore::new());
    let state = AppState::new(store.clone(), ApiConfig::default());
    (store, state)
}

fn test_runtime() -> Result<Runtime, TestCaseError> {
    Runtime::new().map_err(|e| TestCaseError::fail(format!("Failed to create runtime: {}", e)))
}

fn acquire_req(key: &str, duration_ms: i64) -> AcquireLockRequest {
    AcquireLockRequest {
        key: key.to_string(),
        duration_ms: Some(duration_ms),
    }
}

// ============================================================================
// HANDLER-LEVEL TESTS
// ============================================================================

#[tokio::test]
async fn test_acquire_returns_201_then_409() {
    let (_store, state) = test_state();

    let first = acquire_lock(State(state.clone()), Json(acquire_req("asset-42", 30_000)))
        .await
        .expect("first acquire succeeds")
        .into_response();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = acquire_lock(State(state), Json(acquire_req("asset-42", 30_000)))
        .await
        .expect_err("second acquire conflicts");
    assert_eq!(second.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_acquire_rejects_blank_key_and_bad_duration() {
    let (store, state) = test_state();

    let err = acquire_lock(State(state.clone()), Json(acquire_req("   ", 30_000)))
        .await
        .expect_err("blank key rejected");
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

    let err = acquire_lock(State(state.clone()), Json(acquire_req("asset-42", 0)))
        .await
        .expect_err("zero duration rejected");
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

    let err = acquire_lock(
        State(state),
        Json(acquire_req("asset-42", ApiConfig::default().max_lease_ms + 1)),
    )
    .await
    .expect_err("oversized duration rejected");
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

    // Validation failures never reach the store.
    assert!(!store.has_marker(&AssetKey::new("asset-42").unwrap()).await);
}

#[tokio::test]
async fn test_release_with_unknown_lease_is_404() {
    let (_store, state) = test_state();

    let err = release_lock(
        State(state),
        Json(ReleaseLockRequest {
            key: "asset-42".to_string(),
            lease_id: "ghost".to_string(),
        }),
    )
    .await
    .expect_err("unknown lease rejected");
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_heartbeat_after_expiry_is_409() {
    let (store, state) = test_state();
    let key = AssetKey::new("asset-42").unwrap();

    let handle = state
        .locks
        .try_acquire(&key, Duration::from_secs(5))
        .await
        .unwrap()
        .handle()
        .expect("acquired");

    store.advance(Duration::from_secs(6)).await;

    let err = heartbeat_lock(
        State(state),
        Json(HeartbeatLockRequest {
            key: "asset-42".to_string(),
            lease_id: handle.lease_id,
            duration_ms: Some(5_000),
        }),
    )
    .await
    .expect_err("expired lease rejected");
    assert_eq!(err.status_code(), StatusCode::CONFLICT);
}

/// The full save-workflow scenario: acquire, racing conflict, heartbeat
/// extension, release, fresh acquire under a new lease.
#[tokio::test]
async fn test_lock_lifecycle_scenario() {
    let (_store, state) = test_state();
    let key = AssetKey::new("asset-42").unwrap();

    let l1 = state
        .locks
        .try_acquire(&key, Duration::from_secs(30))
        .await
        .unwrap()
        .handle()
        .expect("L1 acquired");

    let racing = state
        .locks
        .try_acquire(&key, Duration::from_secs(30))
        .await
        .unwrap();
    assert!(racing.is_conflict());

    let renewed = state
        .locks
        .heartbeat(&key, &l1.lease_id, Duration::from_secs(30))
        .await
        .expect("heartbeat before expiry");
    assert!(renewed.expires_at >= l1.expires_at);

    state.locks.release(&key, &l1.lease_id).await.expect("release");

    let l2 = state
        .locks
        .try_acquire(&key, Duration::from_secs(10))
        .await
        .unwrap()
        .handle()
        .expect("L2 acquired after release");
    assert_ne!(l2.lease_id, l1.lease_id);
}

// ============================================================================
// PROPERTY TESTS
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// For any key, a second acquire while the first lease is outstanding
    /// conflicts, and release restores acquirability.
    #[test]
    fn prop_mutual_exclusion_per_key(
        key in asset_key_strategy(),
        duration_ms in 1_000i64..120_000,
    ) {
        let rt = test_runtime()?;
        rt.block_on(async {
            let (_store, state) = test_state();
            let duration = Duration::from_millis(duration_ms as u64);

            let first = state
                .locks
                .try_acquire(&key, duration)
                .await
                .map_err(|e| TestCaseError::fail(e.to_string()))?
                .handle();
            let Some(handle) = first else {
                return Err(TestCaseError::fail("first acquire must succeed"));
            };

            let second = state
                .locks
                .try_acquire(&key, duration)
                .await
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert!(second.is_conflict());

            state
                .locks
                .release(&key, &handle.lease_id)
                .await
                .map_err(|e| TestCaseError::fail(e.to_string()))?;

            let third = state
                .locks
                .try_acquire(&key, duration)
                .await
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert!(!third.is_conflict());
            Ok(())
        })?;
    }

    /// A wrong lease id never releases the real holder's lease.
    #[test]
    fn prop_wrong_lease_id_never_releases(
        key in asset_key_strategy(),
        bogus in "[a-f0-9-]{8,36}",
    ) {
        let rt = test_runtime()?;
        rt.block_on(async {
            let (_store, state) = test_state();
            let duration = Duration::from_secs(30);

            let handle = state
                .locks
                .try_acquire(&key, duration)
                .await
                .map_err(|e| TestCaseError::fail(e.to_string()))?
                .handle()
                .ok_or_else(|| TestCaseError::fail("first acquire must succeed"))?;
            prop_assume!(bogus != handle.lease_id);

            prop_assert!(state.locks.release(&key, &bogus).await.is_err());

            // The real holder's lease still excludes others.
            let racing = state
                .locks
                .try_acquire(&key, duration)
                .await
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert!(racing.is_conflict());
            Ok(())
        })?;
    }
}
