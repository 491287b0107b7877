//! In-memory lease store.
//!
//! Reference `LeaseStore` backend for tests and development. Lease expiry
//! is passive, exactly like a remote store: an expired lease is treated as
//! absent on every read path, and no sweeper runs. The catalog lives in a
//! `BTreeMap` so enumeration order is deterministic; the continuation
//! token is simply the key of the last record emitted.

use crate::lease::{
    LeaseAttempt, LeaseStore, ListPageRequest, ReleaseAttempt, RenewAttempt, StorePage,
};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use meshvault_core::{AssetKey, AssetRecord, StoreError, Timestamp};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::Bound;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct LeaseEntry {
    lease_id: String,
    expires_at: Timestamp,
}

#[derive(Debug, Default)]
struct Inner {
    markers: HashSet<String>,
    leases: HashMap<String, LeaseEntry>,
    records: BTreeMap<String, AssetRecord>,
    /// Test-only clock shift; `advance` moves the store's notion of now
    /// forward so expiry is testable without sleeping.
    clock_skew: ChronoDuration,
    /// Fault injection: every call fails with `StoreError::Unavailable`.
    unavailable: bool,
    /// Fault injection: `list_page` rejects any continuation token with
    /// `StoreError::InvalidToken`, as a store does after token rotation.
    reject_tokens: bool,
}

impl Inner {
    fn now(&self) -> Timestamp {
        Utc::now() + self.clock_skew
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable {
                reason: "memory store marked unavailable".to_string(),
            });
        }
        Ok(())
    }

    /// Current (non-expired) lease on a key, if any.
    fn current_lease(&self, key: &str) -> Option<&LeaseEntry> {
        let entry = self.leases.get(key)?;
        if self.now() >= entry.expires_at {
            return None;
        }
        Some(entry)
    }
}

/// In-memory `LeaseStore` for tests and development.
#[derive(Debug, Default)]
pub struct MemoryLeaseStore {
    inner: RwLock<Inner>,
}

impl MemoryLeaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed or replace one catalog record.
    pub async fn put_record(&self, record: AssetRecord) {
        let mut inner = self.inner.write().await;
        inner.records.insert(record.key.as_str().to_string(), record);
    }

    /// Remove one catalog record.
    pub async fn remove_record(&self, key: &AssetKey) {
        let mut inner = self.inner.write().await;
        inner.records.remove(key.as_str());
    }

    /// Shift the store clock forward. Leases whose deadline falls inside
    /// the shift lapse passively, as they would on a real store.
    pub async fn advance(&self, by: Duration) {
        let mut inner = self.inner.write().await;
        let by = ChronoDuration::from_std(by)
            .unwrap_or_else(|_| ChronoDuration::milliseconds(by.as_millis() as i64));
        inner.clock_skew += by;
    }

    /// Make every subsequent call fail with `StoreError::Unavailable`.
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.inner.write().await.unavailable = unavailable;
    }

    /// Make `list_page` reject any continuation token it is handed.
    pub async fn set_reject_tokens(&self, reject: bool) {
        self.inner.write().await.reject_tokens = reject;
    }

    /// Whether the marker object for `key` exists.
    pub async fn has_marker(&self, key: &AssetKey) -> bool {
        self.inner.read().await.markers.contains(key.as_str())
    }

    fn lease_duration(duration: Duration) -> ChronoDuration {
        ChronoDuration::from_std(duration)
            .unwrap_or_else(|_| ChronoDuration::milliseconds(duration.as_millis() as i64))
    }
}

#[async_trait]
impl LeaseStore for MemoryLeaseStore {
    async fn ensure_marker(&self, key: &AssetKey) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.check_available()?;
        inner.markers.insert(key.as_str().to_string());
        Ok(())
    }

    async fn acquire_lease(
        &self,
        key: &AssetKey,
        duration: Duration,
    ) -> Result<LeaseAttempt, StoreError> {
        let mut inner = self.inner.write().await;
        inner.check_available()?;

        if inner.current_lease(key.as_str()).is_some() {
            return Ok(LeaseAttempt::Conflict);
        }

        let expires_at = inner.now() + Self::lease_duration(duration);
        let lease_id = Uuid::now_v7().to_string();
        inner.leases.insert(
            key.as_str().to_string(),
            LeaseEntry {
                lease_id: lease_id.clone(),
                expires_at,
            },
        );
        Ok(LeaseAttempt::Acquired {
            lease_id,
            expires_at,
        })
    }

    async fn renew_lease(
        &self,
        key: &AssetKey,
        lease_id: &str,
        duration: Duration,
    ) -> Result<RenewAttempt, StoreError> {
        let mut inner = self.inner.write().await;
        inner.check_available()?;

        let now = inner.now();
        let Some(entry) = inner.leases.get_mut(key.as_str()) else {
            return Ok(RenewAttempt::NotHeld);
        };
        if entry.lease_id != lease_id {
            return Ok(RenewAttempt::NotHeld);
        }
        if now >= entry.expires_at {
            // Lapsed lease with a matching id: the holder arrived too late.
            inner.leases.remove(key.as_str());
            return Ok(RenewAttempt::Expired);
        }

        entry.expires_at = now + Self::lease_duration(duration);
        Ok(RenewAttempt::Renewed {
            expires_at: entry.expires_at,
        })
    }

    async fn release_lease(
        &self,
        key: &AssetKey,
        lease_id: &str,
    ) -> Result<ReleaseAttempt, StoreError> {
        let mut inner = self.inner.write().await;
        inner.check_available()?;

        let held = matches!(
            inner.current_lease(key.as_str()),
            Some(entry) if entry.lease_id == lease_id
        );
        if !held {
            return Ok(ReleaseAttempt::NotHeld);
        }
        inner.leases.remove(key.as_str());
        Ok(ReleaseAttempt::Released)
    }

    async fn list_page(&self, req: &ListPageRequest) -> Result<StorePage, StoreError> {
        let inner = self.inner.read().await;
        inner.check_available()?;

        if inner.reject_tokens {
            if let Some(token) = &req.token {
                return Err(StoreError::InvalidToken {
                    reason: format!("continuation token '{}' is no longer valid", token),
                });
            }
        }

        let prefix = req.prefix.as_deref().unwrap_or("");
        let lower: Bound<String> = match &req.token {
            Some(token) => Bound::Excluded(token.clone()),
            None => Bound::Unbounded,
        };

        let mut records = Vec::with_capacity(req.page_size.min(64));
        let mut next_token = None;
        for (key, record) in inner.records.range((lower, Bound::Unbounded)) {
            if !key.starts_with(prefix) {
                // BTreeMap order: once past the prefix range, nothing
                // further can match.
                if key.as_str() > prefix && !prefix.is_empty() {
                    break;
                }
                continue;
            }
            if records.len() == req.page_size {
                next_token = records
                    .last()
                    .map(|r: &AssetRecord| r.key.as_str().to_string());
                break;
            }
            records.push(record.clone());
        }

        let total = inner
            .records
            .values()
            .filter(|r| r.key.as_str().starts_with(prefix))
            .count() as i64;

        Ok(StorePage {
            records,
            next_token,
            total: Some(total),
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
