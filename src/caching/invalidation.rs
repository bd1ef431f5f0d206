//! # Cache Invalidation
//!
//! The write path of the cache layer. When a product is created, updated or
//! deleted, any cached listing could now include or exclude that product and
//! the categories facet may have gained or lost a value, so the coordinator
//! invalidates coarsely: the entity's own key, the entire listing namespace,
//! and the categories key.

use super::cache_manager::CatalogCache;
use std::sync::Arc;
use tracing::{info, warn};

/// Fans out cache deletions in response to entity mutations.
pub struct CacheInvalidator {
    cache: Arc<CatalogCache>,
}

impl CacheInvalidator {
    pub fn new(cache: Arc<CatalogCache>) -> Self {
        Self { cache }
    }

    /// Invalidate everything a mutation of `product_id` could have staled.
    ///
    /// Three deletions run concurrently and independently; a failure in one
    /// leg never blocks the others. Deleting a key that was never cached is a
    /// no-op, so this is safe to call after creates as well — the new id's
    /// own-key delete simply does nothing. Returns whether every leg
    /// succeeded.
    pub async fn on_product_mutated(&self, product_id: i64) -> bool {
        let keys = self.cache.keys();
        let product_key = keys.product_key(product_id);
        let listing_pattern = keys.listing_pattern();
        let categories_key = keys.categories_key();

        let (product_ok, listings_ok, categories_ok) = tokio::join!(
            self.cache.remove(&product_key),
            self.cache.remove_pattern(&listing_pattern),
            self.cache.remove(&categories_key),
        );

        let all_ok = product_ok && listings_ok && categories_ok;
        if all_ok {
            info!(product_id, "invalidated product-related caches");
        } else {
            warn!(
                product_id,
                product_ok, listings_ok, categories_ok, "partial cache invalidation"
            );
        }
        all_ok
    }

    /// Invalidate every cached listing without touching entity keys.
    pub async fn invalidate_listings(&self) -> bool {
        let pattern = self.cache.keys().listing_pattern();
        self.cache.remove_pattern(&pattern).await
    }

    /// Invalidate the categories facet.
    pub async fn invalidate_categories(&self) -> bool {
        let key = self.cache.keys().categories_key();
        self.cache.remove(&key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caching::stores::{CacheStore, InMemoryStore};
    use crate::core::config::CacheSettings;
    use std::time::Duration;

    async fn seeded_cache() -> (Arc<InMemoryStore>, Arc<CatalogCache>) {
        let store = Arc::new(InMemoryStore::new());
        let cache = Arc::new(CatalogCache::new(
            store.clone(),
            CacheSettings::default(),
        ));
        let ttl = Duration::from_secs(60);

        store
            .set("product_api:product:7", b"{}", ttl)
            .await
            .unwrap();
        store
            .set("product_api:product:8", b"{}", ttl)
            .await
            .unwrap();
        store
            .set("product_api:listing:aaa", b"{}", ttl)
            .await
            .unwrap();
        store
            .set("product_api:listing:bbb", b"{}", ttl)
            .await
            .unwrap();
        store
            .set("product_api:categories", b"[]", ttl)
            .await
            .unwrap();

        (store, cache)
    }

    #[tokio::test]
    async fn test_mutation_fans_out_to_all_namespaces() {
        let (store, cache) = seeded_cache().await;
        let invalidator = CacheInvalidator::new(cache);

        assert!(invalidator.on_product_mutated(7).await);

        assert!(!store.exists("product_api:product:7").await.unwrap());
        assert!(!store.exists("product_api:listing:aaa").await.unwrap());
        assert!(!store.exists("product_api:listing:bbb").await.unwrap());
        assert!(!store.exists("product_api:categories").await.unwrap());

        // Other entities are untouched.
        assert!(store.exists("product_api:product:8").await.unwrap());
    }

    #[tokio::test]
    async fn test_mutation_of_uncached_entity_is_a_noop_success() {
        let store = Arc::new(InMemoryStore::new());
        let cache = Arc::new(CatalogCache::new(
            store.clone(),
            CacheSettings::default(),
        ));
        let invalidator = CacheInvalidator::new(cache);

        // Nothing cached yet (the create case): still reports success.
        assert!(invalidator.on_product_mutated(99).await);
    }

    #[tokio::test]
    async fn test_repeated_invalidation_is_idempotent() {
        let (_store, cache) = seeded_cache().await;
        let invalidator = CacheInvalidator::new(cache);

        assert!(invalidator.on_product_mutated(7).await);
        // Concurrent writers may interleave fan-outs; re-running the same
        // fan-out deletes already-deleted keys, which is a no-op.
        assert!(invalidator.on_product_mutated(7).await);
    }

    #[tokio::test]
    async fn test_targeted_helpers() {
        let (store, cache) = seeded_cache().await;
        let invalidator = CacheInvalidator::new(cache);

        assert!(invalidator.invalidate_listings().await);
        assert!(!store.exists("product_api:listing:aaa").await.unwrap());
        assert!(store.exists("product_api:product:7").await.unwrap());

        assert!(invalidator.invalidate_categories().await);
        assert!(!store.exists("product_api:categories").await.unwrap());
    }
}
