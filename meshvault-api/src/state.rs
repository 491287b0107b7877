//! Shared application state for Axum routers.
//!
//! Everything is constructed explicitly in `main` from an injected store
//! client; there is no process-wide singleton, so multiple configurations
//! (including test doubles) can coexist.

use std::sync::Arc;

use meshvault_storage::{LeaseStore, ListingService, LockService};

use crate::config::ApiConfig;

/// Application-wide state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// The raw store client, used by health checks.
    pub store: Arc<dyn LeaseStore>,
    /// Advisory locking over the store's lease capability.
    pub locks: LockService,
    /// Paged catalog enumeration.
    pub catalog: ListingService,
    pub config: ApiConfig,
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Build the full service stack over one store client.
    pub fn new(store: Arc<dyn LeaseStore>, config: ApiConfig) -> Self {
        Self {
            locks: LockService::new(store.clone()),
            catalog: ListingService::new(store.clone()),
            store,
            config,
            start_time: std::time::Instant::now(),
        }
    }
}
