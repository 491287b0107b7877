//! API Configuration Module
//!
//! Lease-duration policy, page-size bounds, CORS, and request timeout.
//! Loaded from environment variables with development defaults.

use std::time::Duration;

/// Default lease duration handed to clients that send no explicit policy.
const DEFAULT_LEASE_MS: i64 = 30_000;
/// Upper bound on requested lease durations; balances "stale lock after a
/// crash" against heartbeat chatter.
const MAX_LEASE_MS: i64 = 300_000;

const DEFAULT_PAGE_SIZE: usize = 50;
const MAX_PAGE_SIZE: usize = 500;

/// API configuration for lease policy, paging bounds, and CORS.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    // ========================================================================
    // Lease policy
    // ========================================================================
    /// Default lease duration in milliseconds.
    pub default_lease_ms: i64,

    /// Maximum accepted lease duration in milliseconds.
    pub max_lease_ms: i64,

    // ========================================================================
    // Paging bounds
    // ========================================================================
    /// Page size used when the caller sends none.
    pub default_page_size: usize,

    /// Upper bound a caller-supplied page size is clamped to.
    pub max_page_size: usize,

    // ========================================================================
    // HTTP
    // ========================================================================
    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins (dev mode).
    pub cors_origins: Vec<String>,

    /// Per-request timeout; a timed-out request abandons its in-flight
    /// store call.
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            default_lease_ms: DEFAULT_LEASE_MS,
            max_lease_ms: MAX_LEASE_MS,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            cors_origins: Vec::new(), // Empty = allow all
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `MESHVAULT_DEFAULT_LEASE_MS`: default lease duration (default: 30000)
    /// - `MESHVAULT_MAX_LEASE_MS`: maximum lease duration (default: 300000)
    /// - `MESHVAULT_DEFAULT_PAGE_SIZE`: default listing page size (default: 50)
    /// - `MESHVAULT_MAX_PAGE_SIZE`: maximum listing page size (default: 500)
    /// - `MESHVAULT_CORS_ORIGINS`: comma-separated origins (empty = allow all)
    /// - `MESHVAULT_REQUEST_TIMEOUT_SECS`: per-request timeout (default: 30)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let cors_origins = std::env::var("MESHVAULT_CORS_ORIGINS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            default_lease_ms: env_parse("MESHVAULT_DEFAULT_LEASE_MS", defaults.default_lease_ms),
            max_lease_ms: env_parse("MESHVAULT_MAX_LEASE_MS", defaults.max_lease_ms),
            default_page_size: env_parse(
                "MESHVAULT_DEFAULT_PAGE_SIZE",
                defaults.default_page_size,
            ),
            max_page_size: env_parse("MESHVAULT_MAX_PAGE_SIZE", defaults.max_page_size),
            cors_origins,
            request_timeout: Duration::from_secs(env_parse(
                "MESHVAULT_REQUEST_TIMEOUT_SECS",
                30u64,
            )),
        }
    }
}

fn env_parse<T: std::str::FromStr>(var: &str, default: T) -> T {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
