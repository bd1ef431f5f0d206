//! # Cache Stores Module
//!
//! Store implementations behind the [`CacheStore`] trait: Redis for
//! production and an in-memory map for tests and single-process deployments.

pub mod memory;
pub mod redis_store;

pub use memory::InMemoryStore;
pub use redis_store::{RedisStore, RedisStoreConfig};

use super::CacheResult;
use async_trait::async_trait;
use std::time::Duration;

/// Key/value store with per-key TTL, used behind the cache manager.
///
/// Implementations report transport failures as `Err`; the manager above
/// translates those into misses and no-ops (fail-open). `delete_by_pattern`
/// is list-then-bulk-delete everywhere, since the stores have no native
/// pattern-delete primitive, and zero matches is a successful no-op.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Get a value from the cache
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>>;

    /// Set a value in the cache with a TTL
    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> CacheResult<()>;

    /// Delete a single key; returns whether it existed
    async fn delete(&self, key: &str) -> CacheResult<bool>;

    /// Delete every key matching a glob pattern; returns the count removed
    async fn delete_by_pattern(&self, pattern: &str) -> CacheResult<u64>;

    /// Check if a key exists (and is not expired)
    async fn exists(&self, key: &str) -> CacheResult<bool>;

    /// List keys matching a glob pattern
    async fn keys(&self, pattern: &str) -> CacheResult<Vec<String>>;

    /// Drop every entry in the store, not just those under a prefix
    async fn flush_all(&self) -> CacheResult<()>;

    /// Perform a liveness check against the backing store
    async fn health_check(&self) -> CacheResult<bool>;
}

/// Glob matching over cache keys, supporting `*` as a multi-character
/// wildcard. This mirrors the subset of Redis `MATCH` syntax the key
/// namespaces actually use.
pub(crate) fn glob_matches(pattern: &str, key: &str) -> bool {
    let mut segments = pattern.split('*');
    let first = segments.next().unwrap_or("");
    if !key.starts_with(first) {
        return false;
    }
    if !pattern.contains('*') {
        return key == pattern;
    }

    let mut rest = &key[first.len()..];
    let mut last_segment = "";
    for segment in segments {
        last_segment = segment;
        if segment.is_empty() {
            continue;
        }
        match rest.find(segment) {
            Some(idx) => rest = &rest[idx + segment.len()..],
            None => return false,
        }
    }

    // A trailing literal segment must sit at the very end of the key.
    last_segment.is_empty() || key.ends_with(last_segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_exact_match() {
        assert!(glob_matches("product_api:categories", "product_api:categories"));
        assert!(!glob_matches("product_api:categories", "product_api:categorie"));
    }

    #[test]
    fn test_glob_prefix_wildcard() {
        assert!(glob_matches("product_api:listing:*", "product_api:listing:abc"));
        assert!(glob_matches("product_api:*", "product_api:product:7"));
        assert!(!glob_matches("product_api:listing:*", "product_api:product:7"));
    }

    #[test]
    fn test_glob_inner_wildcard() {
        assert!(glob_matches("product_api:*:7", "product_api:product:7"));
        assert!(!glob_matches("product_api:*:7", "product_api:product:8"));
    }
}
