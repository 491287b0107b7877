//! Catalog filter predicates.
//!
//! The `prefix` restriction is store-native and narrows I/O at the source;
//! everything else is applied client-side over the fetched page. Shared by
//! the listing orchestrator and the API layer.

use crate::{AssetFormat, AssetRecord};
use serde::{Deserialize, Serialize};

/// Predicate set for catalog enumeration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetFilter {
    /// Category membership (case-insensitive). Empty means no restriction.
    pub categories: Vec<String>,
    /// Favourite flag, when set.
    pub is_favourite: Option<bool>,
    /// File format, when set.
    pub format: Option<AssetFormat>,
    /// Free-text substring match (case-insensitive) against name, alias,
    /// description and category.
    pub q: Option<String>,
    /// Path-prefix restriction, applied natively by the store.
    pub prefix: Option<String>,
}

impl AssetFilter {
    /// Filter matching everything.
    pub fn any() -> Self {
        Self::default()
    }

    /// Restrict to a free-text query.
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    /// Restrict to a store-native path prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Restrict to the given categories.
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    /// Whether any client-side predicate is present (prefix excluded).
    pub fn has_client_predicates(&self) -> bool {
        !self.categories.is_empty()
            || self.is_favourite.is_some()
            || self.format.is_some()
            || self.q.as_deref().is_some_and(|q| !q.trim().is_empty())
    }

    /// Apply the client-side predicates to one record.
    ///
    /// The prefix is NOT checked here; the store already restricted the
    /// page to it.
    pub fn matches(&self, record: &AssetRecord) -> bool {
        if !self.categories.is_empty() {
            let Some(category) = record.category.as_deref() else {
                return false;
            };
            if !self
                .categories
                .iter()
                .any(|c| c.eq_ignore_ascii_case(category))
            {
                return false;
            }
        }

        if let Some(favourite) = self.is_favourite {
            if record.is_favourite != favourite {
                return false;
            }
        }

        if let Some(format) = self.format {
            if record.format != format {
                return false;
            }
        }

        if let Some(q) = self.q.as_deref() {
            let q = q.trim();
            if !q.is_empty() && !Self::text_matches(record, q) {
                return false;
            }
        }

        true
    }

    fn text_matches(record: &AssetRecord, q: &str) -> bool {
        let needle = q.to_lowercase();
        let mut haystacks = [
            Some(record.name.as_str()),
            record.alias.as_deref(),
            record.description.as_deref(),
            record.category.as_deref(),
        ]
        .into_iter()
        .flatten();
        haystacks.any(|field| field.to_lowercase().contains(&needle))
    }
}

// =============================================================================
// TESTS
// =============================================================================
