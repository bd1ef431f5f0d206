//! # Catalog Service
//!
//! Wires the persistence collaborator, the cache-aside read path and the
//! invalidation fan-out into the operations the request-handling layer calls.
//! All components are constructed explicitly here and shared by reference;
//! there is no process-global instance.

use super::repository::ProductRepository;
use super::types::{FilterSet, NewProduct, Product, ProductListing, ProductUpdate};
use crate::caching::admin::{CacheAdmin, CacheStats};
use crate::caching::cache_manager::{CachedRead, CatalogCache};
use crate::caching::invalidation::CacheInvalidator;
use crate::caching::stores::CacheStore;
use crate::caching::CacheCategory;
use crate::core::config::CacheSettings;
use crate::core::error::{CatalogError, CatalogResult};
use std::sync::Arc;
use tracing::{info, warn};

/// The catalog read/write API, fronted by the cache-aside layer.
pub struct CatalogService {
    repository: Arc<dyn ProductRepository>,
    cache: Arc<CatalogCache>,
    invalidator: CacheInvalidator,
    admin: CacheAdmin,
}

impl CatalogService {
    pub fn new(
        repository: Arc<dyn ProductRepository>,
        store: Arc<dyn CacheStore>,
        settings: CacheSettings,
    ) -> Self {
        let cache = Arc::new(CatalogCache::new(store, settings));
        Self {
            repository,
            invalidator: CacheInvalidator::new(cache.clone()),
            admin: CacheAdmin::new(cache.clone()),
            cache,
        }
    }

    /// Shared cache handle, for callers that need direct key operations.
    pub fn cache(&self) -> &Arc<CatalogCache> {
        &self.cache
    }

    /// Fetch a single product through the cache.
    ///
    /// A missing product is reported as `Ok(None)` and never cached, so a
    /// later insert under the same id becomes visible immediately.
    pub async fn get_product(&self, id: i64) -> CatalogResult<Option<CachedRead<Product>>> {
        let key = self.cache.keys().product_key(id);
        let ttl = self.cache.ttl_for(CacheCategory::Product);

        let result = self
            .cache
            .read_through(&key, ttl, || async {
                self.repository
                    .find_by_id(id)
                    .await?
                    .ok_or(CatalogError::NotFound {
                        resource: "product",
                        id,
                    })
            })
            .await;

        match result {
            Ok(read) => Ok(Some(read)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Fetch a listing page through the cache.
    pub async fn list_products(
        &self,
        filters: &FilterSet,
    ) -> CatalogResult<CachedRead<ProductListing>> {
        let key = self.cache.keys().listing_key(filters);
        let ttl = self.cache.ttl_for(CacheCategory::Listing);

        self.cache
            .read_through(&key, ttl, || async {
                let products = self.repository.find_all(filters).await?;
                let total = self.repository.count(filters).await?;
                Ok(ProductListing::assemble(products, total, filters))
            })
            .await
    }

    /// Fetch the distinct category values through the cache.
    pub async fn get_categories(&self) -> CatalogResult<CachedRead<Vec<String>>> {
        let key = self.cache.keys().categories_key();
        let ttl = self.cache.ttl_for(CacheCategory::Categories);

        self.cache
            .read_through(&key, ttl, || async {
                self.repository.distinct_categories().await
            })
            .await
    }

    /// Create a product and invalidate every cache it could stale.
    pub async fn create_product(&self, input: NewProduct) -> CatalogResult<Product> {
        let product = self.repository.create(input).await?;
        self.invalidate_after_mutation(product.id).await;
        info!(product_id = product.id, "product created");
        Ok(product)
    }

    /// Update a product; `Ok(None)` if it does not exist.
    pub async fn update_product(
        &self,
        id: i64,
        changes: ProductUpdate,
    ) -> CatalogResult<Option<Product>> {
        let updated = self.repository.update(id, changes).await?;
        if let Some(product) = &updated {
            self.invalidate_after_mutation(product.id).await;
            info!(product_id = product.id, "product updated");
        }
        Ok(updated)
    }

    /// Delete a product; `Ok(None)` if it does not exist.
    pub async fn delete_product(&self, id: i64) -> CatalogResult<Option<Product>> {
        let deleted = self.repository.delete(id).await?;
        if deleted.is_some() {
            self.invalidate_after_mutation(id).await;
            info!(product_id = id, "product deleted");
        }
        Ok(deleted)
    }

    /// Live key counts per cache category.
    pub async fn cache_stats(&self) -> CacheStats {
        self.admin.stats().await
    }

    /// Destructive full cache flush.
    pub async fn clear_cache(&self) -> bool {
        self.admin.clear_all().await
    }

    /// Invalidation failures must not fail the mutation that already
    /// committed; stale entries age out via TTL.
    async fn invalidate_after_mutation(&self, id: i64) {
        if !self.invalidator.on_product_mutated(id).await {
            warn!(product_id = id, "cache invalidation incomplete after mutation");
        }
    }
}
