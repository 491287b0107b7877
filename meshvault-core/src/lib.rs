//! MeshVault Core - Catalog Data Types
//!
//! Pure data structures shared by the storage and API layers. This crate
//! contains the asset catalog vocabulary (keys, records, formats), the
//! pagination cursor codec, the filter predicate set, and the error
//! taxonomy. No I/O lives here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod cursor;
pub mod error;
pub mod filter;
pub mod lock;

pub use cursor::{PaginationCursor, CURSOR_VERSION};
pub use error::{
    LockError, StoreError, ValidationError, VaultError, VaultResult,
};
pub use filter::AssetFilter;
pub use lock::{AcquireOutcome, LockHandle};

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Opaque string identifying a lockable/listable resource (an asset id or
/// blob name). Validated at construction: never empty, never whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(try_from = "String", into = "String")]
pub struct AssetKey(String);

impl AssetKey {
    /// Create a validated asset key.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::RequiredFieldMissing` when the value is
    /// empty or whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::RequiredFieldMissing {
                field: "key".to_string(),
            });
        }
        Ok(Self(value))
    }

    /// Borrow the raw key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key and return the raw string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for AssetKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for AssetKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<AssetKey> for String {
    fn from(key: AssetKey) -> Self {
        key.0
    }
}

// ============================================================================
// ASSET FORMAT ENUM
// ============================================================================

/// 3D model file format stored in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum AssetFormat {
    Gltf,
    Glb,
    Obj,
    Fbx,
    Stl,
    Usdz,
}

impl AssetFormat {
    /// Convert to the canonical wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetFormat::Gltf => "gltf",
            AssetFormat::Glb => "glb",
            AssetFormat::Obj => "obj",
            AssetFormat::Fbx => "fbx",
            AssetFormat::Stl => "stl",
            AssetFormat::Usdz => "usdz",
        }
    }

    /// Parse from a wire string (case-insensitive).
    pub fn parse(s: &str) -> Result<Self, AssetFormatParseError> {
        match s.to_lowercase().as_str() {
            "gltf" => Ok(AssetFormat::Gltf),
            "glb" => Ok(AssetFormat::Glb),
            "obj" => Ok(AssetFormat::Obj),
            "fbx" => Ok(AssetFormat::Fbx),
            "stl" => Ok(AssetFormat::Stl),
            "usdz" => Ok(AssetFormat::Usdz),
            _ => Err(AssetFormatParseError(s.to_string())),
        }
    }
}

impl fmt::Display for AssetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AssetFormat {
    type Err = AssetFormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error when parsing an invalid asset format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFormatParseError(pub String);

impl fmt::Display for AssetFormatParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid asset format: {}", self.0)
    }
}

impl std::error::Error for AssetFormatParseError {}

// ============================================================================
// CATALOG RECORD
// ============================================================================

/// One catalog entry: the metadata the store keeps per versioned model file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AssetRecord {
    pub key: AssetKey,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub format: AssetFormat,
    pub is_favourite: bool,
    pub size_bytes: i64,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub updated_at: Timestamp,
}

// ============================================================================
// LISTING PAGE
// ============================================================================

/// One page of an enumeration, with the cursor to resume from.
///
/// `total_count` is best-effort; 0 means the store could not cheaply
/// report it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingPage<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    pub has_more: bool,
    pub total_count: i64,
}

impl<T> ListingPage<T> {
    /// An empty terminal page (empty catalog or end of enumeration).
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
            has_more: false,
            total_count: 0,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_key_rejects_empty() {
        assert!(AssetKey::new("").is_err());
    }

    #[test]
    fn test_asset_key_rejects_whitespace_only() {
        assert!(AssetKey::new("   \t\n").is_err());
    }

    #[test]
    fn test_asset_key_accepts_blob_names() {
        let key = AssetKey::new("models/2024/oak-table.glb").unwrap();
        assert_eq!(key.as_str(), "models/2024/oak-table.glb");
        assert_eq!(key.to_string(), "models/2024/oak-table.glb");
    }

    #[test]
    fn test_asset_format_roundtrip() {
        for format in [
            AssetFormat::Gltf,
            AssetFormat::Glb,
            AssetFormat::Obj,
            AssetFormat::Fbx,
            AssetFormat::Stl,
            AssetFormat::Usdz,
        ] {
            let parsed = AssetFormat::parse(format.as_str()).unwrap();
            assert_eq!(format, parsed);
        }
    }

    #[test]
    fn test_asset_format_parse_is_case_insensitive() {
        assert_eq!(AssetFormat::parse("GLB").unwrap(), AssetFormat::Glb);
    }

    #[test]
    fn test_asset_format_parse_rejects_unknown() {
        assert!(AssetFormat::parse("step").is_err());
    }

    #[test]
    fn test_listing_page_empty() {
        let page = ListingPage::<AssetRecord>::empty();
        assert!(page.items.is_empty());
        assert!(page.next_cursor.is_none());
        assert!(!page.has_more);
        assert_eq!(page.total_count, 0);
    }
}
