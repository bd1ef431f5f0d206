//! # Cache Manager
//!
//! The read path of the cache-aside layer. [`CatalogCache`] owns the store
//! handle, the key codec and the TTL policy, and exposes the read-through
//! operation plus fail-open primitives used by invalidation and admin.
//!
//! Every store interaction here is fail-open: a transport error is logged and
//! surfaced as a miss or a `false` success flag, never as an `Err`. The only
//! errors [`read_through`](CatalogCache::read_through) returns are the ones
//! the fetch callback itself produced, forwarded unchanged.

use super::key_codec::KeyCodec;
use super::stores::CacheStore;
use super::CacheCategory;
use crate::core::config::CacheSettings;
use crate::core::error::CatalogResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

/// A value returned by the read path, tagged with cache metadata so the
/// request-handling collaborator can annotate responses and metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedRead<T> {
    pub value: T,
    pub cache_hit: bool,
    pub elapsed_ms: u64,
}

/// Cache-aside coordinator for catalog reads.
pub struct CatalogCache {
    store: Arc<dyn CacheStore>,
    keys: KeyCodec,
    settings: CacheSettings,
}

impl CatalogCache {
    pub fn new(store: Arc<dyn CacheStore>, settings: CacheSettings) -> Self {
        let keys = KeyCodec::new(&settings.prefix);
        Self {
            store,
            keys,
            settings,
        }
    }

    /// Key codec bound to the configured prefix.
    pub fn keys(&self) -> &KeyCodec {
        &self.keys
    }

    /// The underlying store handle.
    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    /// TTL for a cache category, from the configured policy.
    pub fn ttl_for(&self, category: CacheCategory) -> Duration {
        self.settings.ttl_for(category)
    }

    /// Look up `key`; on a miss, run `fetch` and populate the cache.
    ///
    /// A cached entry that fails to decode is evicted and treated as a miss.
    /// Errors from `fetch` propagate unchanged and are never cached. There is
    /// no per-key deduplication: concurrent misses for the same key each run
    /// their own fetch and the last write wins, which is harmless for the
    /// idempotent reads this layer serves.
    pub async fn read_through<T, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        fetch: F,
    ) -> CatalogResult<CachedRead<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = CatalogResult<T>>,
    {
        let start = Instant::now();

        if let Some(bytes) = self.get_bytes(key).await {
            match serde_json::from_slice::<T>(&bytes) {
                Ok(value) => {
                    debug!(key, "cache hit");
                    return Ok(CachedRead {
                        value,
                        cache_hit: true,
                        elapsed_ms: elapsed_ms(start),
                    });
                }
                Err(e) => {
                    warn!(key, error = %e, "cached entry failed to decode, evicting");
                    self.remove(key).await;
                }
            }
        }

        debug!(key, "cache miss");
        let value = fetch().await?;
        self.put_value(key, &value, ttl).await;

        Ok(CachedRead {
            value,
            cache_hit: false,
            elapsed_ms: elapsed_ms(start),
        })
    }

    /// Fail-open get: transport errors surface as a miss.
    pub async fn get_bytes(&self, key: &str) -> Option<Vec<u8>> {
        match self.store.get(key).await {
            Ok(found) => found,
            Err(e) => {
                warn!(key, error = %e, "cache get failed, treating as miss");
                None
            }
        }
    }

    /// Fail-open set of a serializable value; returns whether it was stored.
    pub async fn put_value<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) -> bool {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                // A value the repository produced should always serialize;
                // this is a contract violation, but the fetched value is
                // still good, so the read proceeds uncached.
                error!(key, error = %e, "failed to encode value for caching");
                return false;
            }
        };
        self.put_bytes(key, &bytes, ttl).await
    }

    /// Fail-open set of raw bytes; returns whether it was stored.
    pub async fn put_bytes(&self, key: &str, bytes: &[u8], ttl: Duration) -> bool {
        match self.store.set(key, bytes, ttl).await {
            Ok(()) => {
                debug!(key, ttl_seconds = ttl.as_secs(), "cached value");
                true
            }
            Err(e) => {
                warn!(key, error = %e, "cache set failed");
                false
            }
        }
    }

    /// Fail-open delete; returns whether the operation succeeded (an absent
    /// key still counts as success).
    pub async fn remove(&self, key: &str) -> bool {
        match self.store.delete(key).await {
            Ok(existed) => {
                debug!(key, existed, "cache delete");
                true
            }
            Err(e) => {
                warn!(key, error = %e, "cache delete failed");
                false
            }
        }
    }

    /// Fail-open pattern delete; returns whether the operation succeeded.
    /// Zero matches is a successful no-op.
    pub async fn remove_pattern(&self, pattern: &str) -> bool {
        match self.store.delete_by_pattern(pattern).await {
            Ok(removed) => {
                debug!(pattern, removed, "cache pattern delete");
                true
            }
            Err(e) => {
                warn!(pattern, error = %e, "cache pattern delete failed");
                false
            }
        }
    }

    /// Fail-open existence check.
    pub async fn contains(&self, key: &str) -> bool {
        match self.store.exists(key).await {
            Ok(exists) => exists,
            Err(e) => {
                warn!(key, error = %e, "cache exists check failed");
                false
            }
        }
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
