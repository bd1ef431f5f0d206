//! # Cache Admin Surface
//!
//! Operational visibility and maintenance operations: live key counts per
//! cache category and a destructive full flush. Counts enumerate keys via the
//! store's listing primitive and are intended for dashboards, not for
//! correctness-critical decisions.

use super::cache_manager::CatalogCache;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Live key counts per cache category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub products: usize,
    pub listings: usize,
    pub categories: usize,
    pub total: usize,
    pub collected_at: DateTime<Utc>,
}

/// Admin operations over the cache namespaces.
pub struct CacheAdmin {
    cache: Arc<CatalogCache>,
}

impl CacheAdmin {
    pub fn new(cache: Arc<CatalogCache>) -> Self {
        Self { cache }
    }

    /// Count live keys per category.
    ///
    /// Fail-open like the rest of the layer: if the store is unreachable the
    /// counts degrade to zero rather than erroring.
    pub async fn stats(&self) -> CacheStats {
        let keys = self.cache.keys();
        let store = self.cache.store();

        let products = match store.keys(&keys.product_pattern()).await {
            Ok(found) => found.len(),
            Err(e) => {
                warn!(error = %e, "failed to count product keys");
                0
            }
        };
        let listings = match store.keys(&keys.listing_pattern()).await {
            Ok(found) => found.len(),
            Err(e) => {
                warn!(error = %e, "failed to count listing keys");
                0
            }
        };
        let categories = usize::from(self.cache.contains(&keys.categories_key()).await);

        CacheStats {
            products,
            listings,
            categories,
            total: products + listings + categories,
            collected_at: Utc::now(),
        }
    }

    /// Delete every key under the configured prefix and flush the store.
    ///
    /// Destructive and non-selective; meant for maintenance windows and test
    /// teardown. Returns whether both steps succeeded.
    pub async fn clear_all(&self) -> bool {
        let pattern = self.cache.keys().all_pattern();
        let prefix_cleared = self.cache.remove_pattern(&pattern).await;

        let flushed = match self.cache.store().flush_all().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "cache flush failed");
                false
            }
        };

        if prefix_cleared && flushed {
            info!("all cache entries cleared");
        }
        prefix_cleared && flushed
    }
}
