//! Lock Service
//!
//! Key-scoped advisory locking over the lease store. Validates inputs,
//! guarantees the marker object exists, and translates store-level
//! outcomes into the lock lifecycle: acquire, heartbeat, release.
//!
//! The store is injected at construction; no global client state, so
//! multiple configurations (including test doubles) coexist.

use crate::lease::{LeaseAttempt, LeaseStore, ReleaseAttempt, RenewAttempt};
use meshvault_core::{
    AcquireOutcome, AssetKey, LockError, LockHandle, ValidationError, VaultResult,
};
use std::sync::Arc;
use std::time::Duration;

/// Advisory lock service over a lease-capable object store.
#[derive(Clone)]
pub struct LockService {
    store: Arc<dyn LeaseStore>,
}

impl LockService {
    pub fn new(store: Arc<dyn LeaseStore>) -> Self {
        Self { store }
    }

    /// Attempt to take the exclusive lease on `key` for `duration`.
    ///
    /// Ensures the marker object exists first (idempotent; a creation race
    /// between two callers is harmless, and a failed acquire after marker
    /// creation is safe to retry). At most one caller observes
    /// `Acquired` for a given key within any overlapping window; losers
    /// get `Conflict` immediately; there is no queue.
    ///
    /// # Errors
    ///
    /// `ValidationError::InvalidRange` for a zero duration, or a
    /// translated store failure.
    pub async fn try_acquire(
        &self,
        key: &AssetKey,
        duration: Duration,
    ) -> VaultResult<AcquireOutcome> {
        validate_duration(duration)?;

        self.store.ensure_marker(key).await?;

        match self.store.acquire_lease(key, duration).await? {
            LeaseAttempt::Acquired {
                lease_id,
                expires_at,
            } => Ok(AcquireOutcome::Acquired(LockHandle {
                key: key.clone(),
                lease_id,
                expires_at,
            })),
            LeaseAttempt::Conflict => Ok(AcquireOutcome::Conflict),
        }
    }

    /// Extend a held lease before it expires.
    ///
    /// # Errors
    ///
    /// `LockError::Expired` when the lease already lapsed (caller must
    /// re-acquire); `LockError::NotFound` when `lease_id` is not the
    /// current holder.
    pub async fn heartbeat(
        &self,
        key: &AssetKey,
        lease_id: &str,
        duration: Duration,
    ) -> VaultResult<LockHandle> {
        validate_duration(duration)?;

        match self.store.renew_lease(key, lease_id, duration).await? {
            RenewAttempt::Renewed { expires_at } => Ok(LockHandle {
                key: key.clone(),
                lease_id: lease_id.to_string(),
                expires_at,
            }),
            RenewAttempt::Expired => Err(LockError::Expired {
                key: key.as_str().to_string(),
            }
            .into()),
            RenewAttempt::NotHeld => Err(LockError::NotFound {
                key: key.as_str().to_string(),
            }
            .into()),
        }
    }

    /// Release a held lease.
    ///
    /// # Errors
    ///
    /// `LockError::NotFound` when the key carries no lease or `lease_id`
    /// does not match the current holder. A caller error, never silently
    /// ignored.
    pub async fn release(&self, key: &AssetKey, lease_id: &str) -> VaultResult<()> {
        match self.store.release_lease(key, lease_id).await? {
            ReleaseAttempt::Released => Ok(()),
            ReleaseAttempt::NotHeld => Err(LockError::NotFound {
                key: key.as_str().to_string(),
            }
            .into()),
        }
    }
}

fn validate_duration(duration: Duration) -> Result<(), ValidationError> {
    if duration.is_zero() {
        return Err(ValidationError::InvalidRange {
            field: "duration".to_string(),
            min: 1,
            max: i64::MAX,
        });
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryLeaseStore;
    use meshvault_core::{StoreError, VaultError};

    fn service() -> (Arc<MemoryLeaseStore>, LockService) {
        let store = Arc::new(MemoryLeaseStore::new());
        let service = LockService::new(store.clone());
        (store, service)
    }

    fn key(s: &str) -> AssetKey {
        AssetKey::new(s).unwrap()
    }

    #[tokio::test]
    async fn test_acquire_creates_marker_and_returns_handle() {
        let (store, locks) = service();
        let k = key("asset-42");

        let outcome = locks.try_acquire(&k, Duration::from_secs(30)).await.unwrap();
        let handle = outcome.handle().expect("should acquire");
        assert_eq!(handle.key, k);
        assert!(!handle.lease_id.is_empty());
        assert!(store.has_marker(&k).await);
    }

    #[tokio::test]
    async fn test_second_acquire_returns_conflict_value() {
        let (_store, locks) = service();
        let k = key("asset-42");

        locks.try_acquire(&k, Duration::from_secs(30)).await.unwrap();
        let second = locks.try_acquire(&k, Duration::from_secs(30)).await.unwrap();
        assert!(second.is_conflict());
    }

    #[tokio::test]
    async fn test_zero_duration_rejected_before_store_call() {
        let (store, locks) = service();
        let k = key("asset-42");

        let err = locks.try_acquire(&k, Duration::ZERO).await.unwrap_err();
        assert!(matches!(err, VaultError::Validation(_)));
        // Nothing reached the store.
        assert!(!store.has_marker(&k).await);
    }

    #[tokio::test]
    async fn test_release_unknown_lease_is_not_found() {
        let (_store, locks) = service();
        let k = key("asset-42");

        let err = locks.release(&k, "ghost").await.unwrap_err();
        assert!(matches!(
            err,
            VaultError::Lock(LockError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_heartbeat_after_expiry_requires_reacquire() {
        let (store, locks) = service();
        let k = key("asset-42");

        let handle = locks
            .try_acquire(&k, Duration::from_secs(5))
            .await
            .unwrap()
            .handle()
            .unwrap();
        store.advance(Duration::from_secs(6)).await;

        let err = locks
            .heartbeat(&k, &handle.lease_id, Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, VaultError::Lock(LockError::Expired { .. })));

        // Re-acquire succeeds after losing the lease.
        let outcome = locks.try_acquire(&k, Duration::from_secs(5)).await.unwrap();
        assert!(!outcome.is_conflict());
    }

    #[tokio::test]
    async fn test_store_failure_translates_to_store_error() {
        let (store, locks) = service();
        store.set_unavailable(true).await;

        let err = locks
            .try_acquire(&key("asset-42"), Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            VaultError::Store(StoreError::Unavailable { .. })
        ));
    }

    /// The full lifecycle: acquire, racing conflict, heartbeat extension,
    /// release, fresh acquire under a new lease id.
    #[tokio::test]
    async fn test_lock_lifecycle_end_to_end() {
        let (_store, locks) = service();
        let k = key("asset-42");

        let l1 = locks
            .try_acquire(&k, Duration::from_secs(30))
            .await
            .unwrap()
            .handle()
            .expect("first acquire");

        let racing = locks.try_acquire(&k, Duration::from_secs(30)).await.unwrap();
        assert!(racing.is_conflict());

        let renewed = locks
            .heartbeat(&k, &l1.lease_id, Duration::from_secs(30))
            .await
            .unwrap();
        assert!(renewed.expires_at >= l1.expires_at);

        locks.release(&k, &l1.lease_id).await.unwrap();

        let l2 = locks
            .try_acquire(&k, Duration::from_secs(10))
            .await
            .unwrap()
            .handle()
            .expect("fresh acquire after release");
        assert_ne!(l2.lease_id, l1.lease_id);
    }
}
