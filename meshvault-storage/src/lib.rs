//! MeshVault Storage - Lease Store Abstraction and Services
//!
//! Defines the `LeaseStore` trait (the narrow interface the backing object
//! store must expose: idempotent marker creation, time-bounded exclusive
//! leases, paged listing with continuation tokens), an in-memory reference
//! implementation, and the two services built on top of it:
//!
//! - `LockService`: key-scoped acquire/heartbeat/release with deterministic
//!   semantics independent of the store's API shape.
//! - `ListingService`: one page of catalog enumeration per call, with
//!   cursor decode/re-encode and client-side filtering.

pub mod lease;
pub mod listing;
pub mod lock_service;
pub mod memory;

pub use lease::{
    LeaseAttempt, LeaseStore, ListPageRequest, ReleaseAttempt, RenewAttempt, StorePage,
};
pub use listing::ListingService;
pub use lock_service::LockService;
pub use memory::MemoryLeaseStore;
