//! # In-Memory Cache Store
//!
//! A process-local store used as the default in tests and available for
//! deployments that do not run Redis. Entries expire lazily: an expired entry
//! is dropped the next time any operation touches it.

use super::{glob_matches, CacheStore};
use crate::caching::CacheResult;
use async_trait::async_trait;
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// A stored value with its expiry deadline.
#[derive(Debug, Clone)]
struct StoredEntry {
    value: Vec<u8>,
    expires_at: Instant,
}

impl StoredEntry {
    fn new(value: Vec<u8>, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// In-memory cache store backed by a concurrent map.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: DashMap<String, StoredEntry>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| !entry.value().is_expired())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheStore for InMemoryStore {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        // Clone out of the map guard before any removal; holding a shard
        // guard across a remove would deadlock.
        let cached = self
            .entries
            .get(key)
            .map(|entry| (entry.value.clone(), entry.is_expired()));

        match cached {
            Some((value, false)) => Ok(Some(value)),
            Some((_, true)) => {
                self.entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> CacheResult<()> {
        self.entries
            .insert(key.to_string(), StoredEntry::new(value.to_vec(), ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        Ok(self.entries.remove(key).is_some())
    }

    async fn delete_by_pattern(&self, pattern: &str) -> CacheResult<u64> {
        let matching = self.keys(pattern).await?;
        let mut removed = 0;
        for key in &matching {
            if self.entries.remove(key).is_some() {
                removed += 1;
            }
        }
        if removed > 0 {
            debug!(pattern, removed, "removed keys by pattern");
        }
        Ok(removed)
    }

    async fn exists(&self, key: &str) -> CacheResult<bool> {
        Ok(self
            .entries
            .get(key)
            .map(|entry| !entry.is_expired())
            .unwrap_or(false))
    }

    async fn keys(&self, pattern: &str) -> CacheResult<Vec<String>> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| !entry.value().is_expired() && glob_matches(pattern, entry.key()))
            .map(|entry| entry.key().clone())
            .collect())
    }

    async fn flush_all(&self) -> CacheResult<()> {
        let count = self.entries.len();
        self.entries.clear();
        debug!(count, "flushed in-memory store");
        Ok(())
    }

    async fn health_check(&self) -> CacheResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test]
    async fn test_basic_operations() {
        let store = InMemoryStore::new();
        let ttl = Duration::from_secs(60);

        store.set("k", b"v", ttl).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(b"v".to_vec()));
        assert!(store.exists("k").await.unwrap());

        assert!(store.delete("k").await.unwrap());
        assert!(!store.exists("k").await.unwrap());
        assert!(!store.delete("k").await.unwrap());
    }

    #[tokio::test]
    async fn test_ttl_expiration() {
        let store = InMemoryStore::new();
        store
            .set("k", b"v", Duration::from_millis(50))
            .await
            .unwrap();
        assert!(store.exists("k").await.unwrap());

        sleep(Duration::from_millis(80)).await;
        assert_eq!(store.get("k").await.unwrap(), None);
        assert!(!store.exists("k").await.unwrap());
    }

    #[tokio::test]
    async fn test_pattern_delete_and_keys() {
        let store = InMemoryStore::new();
        let ttl = Duration::from_secs(60);
        store.set("app:listing:a", b"1", ttl).await.unwrap();
        store.set("app:listing:b", b"2", ttl).await.unwrap();
        store.set("app:product:7", b"3", ttl).await.unwrap();

        let mut listing_keys = store.keys("app:listing:*").await.unwrap();
        listing_keys.sort();
        assert_eq!(listing_keys, vec!["app:listing:a", "app:listing:b"]);

        assert_eq!(store.delete_by_pattern("app:listing:*").await.unwrap(), 2);
        assert!(store.exists("app:product:7").await.unwrap());

        // Zero matches is a no-op success
        assert_eq!(store.delete_by_pattern("app:listing:*").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_flush_all() {
        let store = InMemoryStore::new();
        store.set("a", b"1", Duration::from_secs(60)).await.unwrap();
        store.set("b", b"2", Duration::from_secs(60)).await.unwrap();

        store.flush_all().await.unwrap();
        assert!(store.is_empty());
    }
}
