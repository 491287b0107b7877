//! Opaque pagination cursor codec.
//!
//! A cursor wraps the store-native continuation token plus the last-seen
//! key and a schema version, serialized as JSON and base64url-encoded
//! (no padding) so it travels as a single query parameter.
//!
//! Decoding is deliberately infallible: anything that is not a well-formed
//! versioned cursor is treated as a legacy raw store token. Worst case the
//! enumeration restarts from the top, which is safe (if wasteful) for
//! idempotent listings.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Schema version emitted by this system. Inbound cursors with any
/// version >= 1 are accepted as structured.
pub const CURSOR_VERSION: i32 = 1;

/// Resumable position within a catalog enumeration.
///
/// Immutable once handed to the caller; never stored server-side. The
/// client is the sole owner and presents it verbatim on the next call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationCursor {
    /// Schema version; 0 marks a legacy raw store token.
    pub version: i32,
    /// Store-native continuation token, forwarded as-is.
    pub store_token: Option<String>,
    /// Key of the last item on the previous page. Absent for legacy
    /// cursors, which therefore cannot support key-based dedup if the
    /// store's token semantics shift between calls.
    pub last_key: Option<String>,
}

/// JSON shape of the versioned wire format: {"v":1,"ct":...,"last":...}.
#[derive(Serialize, Deserialize)]
struct WireCursor {
    v: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ct: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last: Option<String>,
}

impl PaginationCursor {
    /// Build a current-version cursor from a store token and last key.
    pub fn new(store_token: Option<String>, last_key: Option<String>) -> Self {
        Self {
            version: CURSOR_VERSION,
            store_token,
            last_key,
        }
    }

    /// Wrap a raw, non-versioned store token (compatibility shim for
    /// callers that still hold the old cursor format).
    pub fn legacy(store_token: impl Into<String>) -> Self {
        Self {
            version: 0,
            store_token: Some(store_token.into()),
            last_key: None,
        }
    }

    /// Whether this cursor came in through the legacy fallback.
    pub fn is_legacy(&self) -> bool {
        self.version < 1
    }

    /// Serialize to the opaque wire string.
    ///
    /// Only meaningful for versioned cursors; legacy cursors are forwarded
    /// by the orchestrator, never re-encoded.
    pub fn encode(&self) -> String {
        let wire = WireCursor {
            v: self.version,
            ct: self.store_token.clone(),
            last: self.last_key.clone(),
        };
        // Serializing a struct of optional strings cannot fail.
        let json = serde_json::to_vec(&wire).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    /// Decode an inbound cursor parameter.
    ///
    /// Rules, in order:
    /// 1. absent/blank input -> `None` (start of enumeration);
    /// 2. structured decode with version >= 1 -> that cursor;
    /// 3. anything else -> the whole raw string as a legacy store token.
    pub fn decode(raw: Option<&str>) -> Option<Self> {
        let raw = raw?.trim();
        if raw.is_empty() {
            return None;
        }

        if let Some(cursor) = Self::decode_structured(raw) {
            return Some(cursor);
        }

        Some(Self::legacy(raw))
    }

    fn decode_structured(raw: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(raw).ok()?;
        let wire: WireCursor = serde_json::from_slice(&bytes).ok()?;
        if wire.v < 1 {
            return None;
        }
        Some(Self {
            version: wire.v,
            store_token: wire.ct,
            last_key: wire.last,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
