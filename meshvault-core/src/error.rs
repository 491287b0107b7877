//! Error types for MeshVault operations
//!
//! Store-level failures are translated into these kinds at the service
//! boundary; callers never see store-specific status codes. Note what is
//! deliberately absent: a malformed cursor is not an error anywhere in this
//! taxonomy; decoding always degrades to the legacy interpretation or to
//! "start of enumeration".

use thiserror::Error;

/// Lease store infrastructure errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Transient infrastructure failure. Idempotent operations (listing,
    /// acquire over a fresh marker) are safe to retry with backoff.
    #[error("Store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Marker creation failed for {key}: {reason}")]
    MarkerCreateFailed { key: String, reason: String },

    /// The store rejected a continuation token. Callers restart the
    /// enumeration from the top.
    #[error("Store rejected continuation token: {reason}")]
    InvalidToken { reason: String },
}

/// Lock lifecycle errors.
///
/// A lease held by someone else is NOT represented here: `try_acquire`
/// returns `AcquireOutcome::Conflict` as an ordinary value, because losing
/// an acquire race is an expected, frequent outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LockError {
    /// Release/heartbeat referenced a key/lease-id pair that is not the
    /// current holder. Caller error; never silently ignored.
    #[error("No matching lease on {key}")]
    NotFound { key: String },

    /// Heartbeat arrived after passive expiry. The caller must re-acquire.
    #[error("Lease on {key} has expired")]
    Expired { key: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Validation errors, rejected before any store call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Field {field} must be between {min} and {max}")]
    InvalidRange { field: String, min: i64, max: i64 },
}

/// Master error type for all MeshVault operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VaultError {
    #[error("Lock error: {0}")]
    Lock(#[from] LockError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type alias for MeshVault operations.
pub type VaultResult<T> = Result<T, VaultError>;

// =============================================================================
// TESTS
// =============================================================================
