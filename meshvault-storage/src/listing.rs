//! Listing Orchestrator
//!
//! Drives one page of catalog enumeration per call: decodes the inbound
//! cursor, fetches exactly one store page (prefix applied natively), runs
//! the remaining predicates client-side, and re-encodes the outbound
//! cursor.
//!
//! A selective filter can under-fill a page while `has_more` stays true:
//! one store round-trip per call, never filter-then-refetch. That trades
//! strict page-size guarantees for bounded latency and is part of the
//! contract, not a bug to fix.

use crate::lease::{LeaseStore, ListPageRequest};
use meshvault_core::{
    AssetFilter, AssetRecord, ListingPage, PaginationCursor, ValidationError, VaultResult,
};
use std::sync::Arc;

/// Paged catalog enumeration over the lease store.
#[derive(Clone)]
pub struct ListingService {
    store: Arc<dyn LeaseStore>,
}

impl ListingService {
    pub fn new(store: Arc<dyn LeaseStore>) -> Self {
        Self { store }
    }

    /// Fetch one page of the filtered catalog.
    ///
    /// The cursor is decoded leniently: a malformed value degrades to the
    /// legacy raw-token interpretation and, at worst, the enumeration
    /// restarts from the top. A legacy cursor carries no last-seen key,
    /// so key-based dedup across token-semantics changes is impossible
    /// for those callers.
    ///
    /// # Errors
    ///
    /// `ValidationError::InvalidRange` for a zero page size, or a
    /// translated store failure.
    pub async fn list(
        &self,
        filter: &AssetFilter,
        cursor: Option<&str>,
        page_size: usize,
    ) -> VaultResult<ListingPage<AssetRecord>> {
        if page_size == 0 {
            return Err(ValidationError::InvalidRange {
                field: "page_size".to_string(),
                min: 1,
                max: i64::MAX,
            }
            .into());
        }

        let decoded = PaginationCursor::decode(cursor);
        let token = decoded.and_then(|c| c.store_token);

        let page = self
            .store
            .list_page(&ListPageRequest {
                prefix: filter.prefix.clone(),
                token,
                page_size,
            })
            .await?;

        // The outbound cursor resumes from the store's position, so the
        // last key is taken from the unfiltered page.
        let last_key = page.records.last().map(|r| r.key.as_str().to_string());
        let next_cursor = page
            .next_token
            .as_ref()
            .map(|token| PaginationCursor::new(Some(token.clone()), last_key).encode());
        let has_more = page.next_token.is_some();
        let total_count = page.total.unwrap_or(0);

        let items = if filter.has_client_predicates() {
            page.records
                .into_iter()
                .filter(|record| filter.matches(record))
                .collect()
        } else {
            page.records
        };

        Ok(ListingPage {
            items,
            next_cursor,
            has_more,
            total_count,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryLeaseStore;
    use chrono::Utc;
    use meshvault_core::{AssetFormat, AssetKey, VaultError};
    use std::collections::HashSet;

    fn record(key: &str, name: &str) -> AssetRecord {
        let now = Utc::now();
        AssetRecord {
            key: AssetKey::new(key).unwrap(),
            name: name.to_string(),
            alias: None,
            description: None,
            category: None,
            format: AssetFormat::Glb,
            is_favourite: false,
            size_bytes: 512,
            created_at: now,
            updated_at: now,
        }
    }

    async fn seeded(entries: &[(&str, &str)]) -> (Arc<MemoryLeaseStore>, ListingService) {
        let store = Arc::new(MemoryLeaseStore::new());
        for (key, name) in entries {
            store.put_record(record(key, name)).await;
        }
        let service = ListingService::new(store.clone());
        (store, service)
    }

    #[tokio::test]
    async fn test_empty_catalog_yields_terminal_page() {
        let (_store, listing) = seeded(&[]).await;
        let page = listing.list(&AssetFilter::any(), None, 10).await.unwrap();
        assert!(page.items.is_empty());
        assert!(page.next_cursor.is_none());
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn test_zero_page_size_rejected() {
        let (_store, listing) = seeded(&[]).await;
        let err = listing
            .list(&AssetFilter::any(), None, 0)
            .await
            .unwrap_err();
        assert!(matches!(err, VaultError::Validation(_)));
    }

    #[tokio::test]
    async fn test_three_pages_over_five_items_no_repeats() {
        let (_store, listing) = seeded(&[
            ("a", "Asset A"),
            ("b", "Asset B"),
            ("c", "Asset C"),
            ("d", "Asset D"),
            ("e", "Asset E"),
        ])
        .await;

        let mut cursor: Option<String> = None;
        let mut seen = HashSet::new();
        let mut pages = 0;
        loop {
            let page = listing
                .list(&AssetFilter::any(), cursor.as_deref(), 2)
                .await
                .unwrap();
            pages += 1;
            for item in &page.items {
                assert!(
                    seen.insert(item.key.as_str().to_string()),
                    "item repeated across pages"
                );
            }
            assert_eq!(page.total_count, 5);
            match pages {
                1 | 2 => assert!(page.has_more),
                3 => assert!(!page.has_more),
                _ => panic!("too many pages"),
            }
            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }
        assert_eq!(pages, 3);
        assert_eq!(seen.len(), 5);
    }

    #[tokio::test]
    async fn test_query_filter_matches_case_insensitively() {
        let (_store, listing) = seeded(&[
            ("a", "Oak Table"),
            ("b", "Pine Chair"),
            ("c", "Oak Shelf"),
        ])
        .await;

        let filter = AssetFilter::any().with_query("oak");
        let page = listing.list(&filter, None, 10).await.unwrap();
        let names: Vec<_> = page.items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Oak Table", "Oak Shelf"]);
    }

    #[tokio::test]
    async fn test_selective_filter_underfills_page_but_more_remains() {
        let (_store, listing) = seeded(&[
            ("a", "Oak Table"),
            ("b", "Pine Chair"),
            ("c", "Pine Stool"),
            ("d", "Oak Shelf"),
        ])
        .await;

        // Page 1 covers keys a..b; only "Oak Table" survives the filter,
        // yet enumeration continues.
        let filter = AssetFilter::any().with_query("oak");
        let page = listing.list(&filter, None, 2).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert!(page.has_more);
        assert!(page.next_cursor.is_some());

        // The rest of the catalog is reachable through the cursor.
        let page2 = listing
            .list(&filter, page.next_cursor.as_deref(), 2)
            .await
            .unwrap();
        let names: Vec<_> = page2.items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Oak Shelf"]);
        assert!(!page2.has_more);
    }

    #[tokio::test]
    async fn test_prefix_applied_natively() {
        let (_store, listing) = seeded(&[
            ("models/a", "Model A"),
            ("models/b", "Model B"),
            ("textures/x", "Texture X"),
        ])
        .await;

        let filter = AssetFilter::any().with_prefix("models/");
        let page = listing.list(&filter, None, 10).await.unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_count, 2);
    }

    #[tokio::test]
    async fn test_legacy_cursor_token_is_forwarded() {
        let (_store, listing) = seeded(&[
            ("a", "Asset A"),
            ("b", "Asset B"),
            ("c", "Asset C"),
        ])
        .await;

        // A raw legacy token equal to the store token (the key "a")
        // resumes after the first record.
        let page = listing
            .list(&AssetFilter::any(), Some("a"), 10)
            .await
            .unwrap();
        let keys: Vec<_> = page.items.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["b", "c"]);
    }

    #[tokio::test]
    async fn test_malformed_cursor_restarts_enumeration() {
        let (_store, listing) = seeded(&[("a", "Asset A"), ("b", "Asset B")]).await;

        // Garbage decodes as a legacy token the store has never issued;
        // for this store the range restart is still safe and lossless
        // for keys beyond the garbage value.
        let page = listing
            .list(&AssetFilter::any(), Some("!!not-a-cursor!!"), 10)
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
    }

    #[tokio::test]
    async fn test_outbound_cursor_is_versioned_with_last_key() {
        let (_store, listing) = seeded(&[("a", "Asset A"), ("b", "Asset B"), ("c", "C")]).await;

        let page = listing.list(&AssetFilter::any(), None, 2).await.unwrap();
        let decoded =
            PaginationCursor::decode(page.next_cursor.as_deref()).expect("cursor present");
        assert!(!decoded.is_legacy());
        assert_eq!(decoded.last_key.as_deref(), Some("b"));
        assert_eq!(decoded.store_token.as_deref(), Some("b"));
    }
}
