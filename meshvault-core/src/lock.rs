//! Lock handle for store-mediated advisory locking.
//!
//! The handle is a plain value: validity is decided by the lease store on
//! every call, not by in-process state, because the serving layer may run
//! as multiple independent instances.
//!
//! # Lifecycle
//!
//! ```text
//! (unheld) ─── try_acquire() ──→ Held ─── release() ──→ (unheld)
//!                                  │                        ↑
//!                             heartbeat() ↺      passive expiry (no event)
//! ```

use crate::{AssetKey, Timestamp};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A held advisory lease on an asset key.
///
/// Exists only while the lease is held. Exactly one valid handle may exist
/// per key at any instant, enforced by the lease store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LockHandle {
    pub key: AssetKey,
    pub lease_id: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub expires_at: Timestamp,
}

impl LockHandle {
    /// Check if the lease has lapsed at `now`.
    ///
    /// Expiry is passive: the store invalidates the lease after
    /// `expires_at` with no explicit event.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }

    /// Remaining time until expiry, or `None` once lapsed.
    pub fn remaining_duration(&self, now: Timestamp) -> Option<Duration> {
        if now >= self.expires_at {
            None
        } else {
            (self.expires_at - now).to_std().ok()
        }
    }
}

/// Result of an acquire attempt.
///
/// Losing the race is an ordinary outcome, not an error: callers decide
/// whether to poll again or surface "locked by someone else". There is no
/// queued state.
#[derive(Debug, Clone, PartialEq)]
pub enum AcquireOutcome {
    /// This caller now holds the lease.
    Acquired(LockHandle),
    /// Another holder currently owns the lease.
    Conflict,
}

impl AcquireOutcome {
    /// Unwrap the handle, if acquired.
    pub fn handle(self) -> Option<LockHandle> {
        match self {
            AcquireOutcome::Acquired(handle) => Some(handle),
            AcquireOutcome::Conflict => None,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, AcquireOutcome::Conflict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_handle(expires_at: Timestamp) -> LockHandle {
        LockHandle {
            key: AssetKey::new("asset-42").unwrap(),
            lease_id: "lease-1".to_string(),
            expires_at,
        }
    }

    #[test]
    fn test_handle_not_expired_before_deadline() {
        let now = Utc::now();
        let handle = make_handle(now + chrono::Duration::seconds(30));
        assert!(!handle.is_expired(now));
        assert!(handle.remaining_duration(now).is_some());
    }

    #[test]
    fn test_handle_expired_at_deadline() {
        let now = Utc::now();
        let handle = make_handle(now);
        assert!(handle.is_expired(now));
        assert_eq!(handle.remaining_duration(now), None);
    }

    #[test]
    fn test_acquire_outcome_handle() {
        let now = Utc::now();
        let handle = make_handle(now + chrono::Duration::seconds(30));
        let outcome = AcquireOutcome::Acquired(handle.clone());
        assert!(!outcome.is_conflict());
        assert_eq!(outcome.handle(), Some(handle));
        assert_eq!(AcquireOutcome::Conflict.handle(), None);
    }
}
