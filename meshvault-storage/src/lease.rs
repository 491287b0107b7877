//! Lease store trait: the narrow interface required of the backing store.
//!
//! Every method crosses the network in a real implementation and is the
//! only suspension point of its operation; dropping the future abandons
//! the call without partial in-process state.

use async_trait::async_trait;
use meshvault_core::{AssetKey, AssetRecord, StoreError, Timestamp};
use std::time::Duration;

/// Result of a store-level lease acquisition attempt.
///
/// A held lease is a conflict signal, not an error: the distinction between
/// "you got it" and "someone else has it" is a value the caller branches on.
#[derive(Debug, Clone, PartialEq)]
pub enum LeaseAttempt {
    Acquired {
        lease_id: String,
        expires_at: Timestamp,
    },
    Conflict,
}

/// Result of a store-level lease renewal.
#[derive(Debug, Clone, PartialEq)]
pub enum RenewAttempt {
    Renewed { expires_at: Timestamp },
    /// The lease id matched a lease that has already lapsed.
    Expired,
    /// No lease with that id is current on the key.
    NotHeld,
}

/// Result of a store-level lease release.
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseAttempt {
    Released,
    /// No lease with that id is current on the key.
    NotHeld,
}

/// One page request against the store-native enumeration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListPageRequest {
    /// Store-native path-prefix restriction; narrows I/O at the source.
    pub prefix: Option<String>,
    /// Continuation token from the previous page, verbatim.
    pub token: Option<String>,
    /// Upper bound on returned records.
    pub page_size: usize,
}

/// One page of the store-native enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct StorePage {
    /// Records in store order.
    pub records: Vec<AssetRecord>,
    /// Token to resume from; present iff more data remains.
    pub next_token: Option<String>,
    /// Total records under the requested prefix, when the store can report
    /// it cheaply.
    pub total: Option<i64>,
}

impl StorePage {
    pub fn has_more(&self) -> bool {
        self.next_token.is_some()
    }
}

/// Capabilities the backing object store must expose.
///
/// Mutual exclusion comes entirely from this external store, never from
/// in-process state: the serving layer may run as multiple independent
/// instances.
#[async_trait]
pub trait LeaseStore: Send + Sync {
    // ========================================================================
    // LEASE OPERATIONS
    // ========================================================================

    /// Create the zero-size marker object for `key` if absent.
    ///
    /// Idempotent: a race between two callers creating the same marker is
    /// harmless, and retrying after a failed acquire is safe.
    async fn ensure_marker(&self, key: &AssetKey) -> Result<(), StoreError>;

    /// Attempt to place an exclusive, time-bounded lease on `key`.
    async fn acquire_lease(
        &self,
        key: &AssetKey,
        duration: Duration,
    ) -> Result<LeaseAttempt, StoreError>;

    /// Renew a held lease before its expiry.
    async fn renew_lease(
        &self,
        key: &AssetKey,
        lease_id: &str,
        duration: Duration,
    ) -> Result<RenewAttempt, StoreError>;

    /// Release a held lease by id.
    async fn release_lease(
        &self,
        key: &AssetKey,
        lease_id: &str,
    ) -> Result<ReleaseAttempt, StoreError>;

    // ========================================================================
    // LISTING OPERATIONS
    // ========================================================================

    /// Fetch one bounded page of catalog records.
    async fn list_page(&self, req: &ListPageRequest) -> Result<StorePage, StoreError>;
}
