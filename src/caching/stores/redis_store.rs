//! # Redis Cache Store
//!
//! Production store adapter backed by a multiplexed Redis connection. Every
//! command runs under a short timeout so that a partitioned Redis degrades to
//! cache misses upstream instead of hanging requests. There is deliberately
//! no retry loop: the manager above treats any failure as a miss, so a retry
//! would only add latency to the fallback path.

use super::CacheStore;
use crate::caching::{CacheError, CacheResult};
use crate::core::config::AppConfig;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisResult};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info};

/// Redis store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisStoreConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection establishment timeout
    #[serde(with = "humantime_serde")]
    pub connection_timeout: Duration,

    /// Per-command timeout; keeps the fail-open contract under partition
    #[serde(with = "humantime_serde")]
    pub operation_timeout: Duration,
}

impl Default for RedisStoreConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            connection_timeout: Duration::from_secs(5),
            operation_timeout: Duration::from_secs(1),
        }
    }
}

impl RedisStoreConfig {
    /// Assemble store settings from the application configuration.
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            url: config.redis.url.clone(),
            connection_timeout: config.redis.connection_timeout,
            operation_timeout: config.cache.operation_timeout,
        }
    }
}

/// Redis-backed cache store.
pub struct RedisStore {
    config: RedisStoreConfig,
    connection: ConnectionManager,
}

impl RedisStore {
    /// Connect to Redis. Fails fast if the initial connection cannot be
    /// established within the configured timeout; once connected, the
    /// connection manager reconnects on its own.
    pub async fn connect(config: RedisStoreConfig) -> CacheResult<Self> {
        let client = Client::open(config.url.as_str())?;

        let connection = timeout(config.connection_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| CacheError::Timeout)??;

        info!(url = %config.url, "Redis cache store connected");

        Ok(Self { config, connection })
    }

    /// Run a command future under the per-operation timeout.
    async fn run<T, F>(&self, op: F) -> CacheResult<T>
    where
        F: Future<Output = RedisResult<T>>,
    {
        match timeout(self.config.operation_timeout, op).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(CacheError::Timeout),
        }
    }

    /// Cursor through SCAN until exhaustion, collecting matching keys.
    async fn scan_keys(&self, pattern: &str) -> CacheResult<Vec<String>> {
        let mut conn = self.connection.clone();
        let mut cursor: u64 = 0;
        let mut all_keys = Vec::new();

        loop {
            let (next_cursor, keys): (u64, Vec<String>) = self
                .run(
                    redis::cmd("SCAN")
                        .arg(cursor)
                        .arg("MATCH")
                        .arg(pattern)
                        .arg("COUNT")
                        .arg(1000)
                        .query_async(&mut conn),
                )
                .await?;

            all_keys.extend(keys);
            if next_cursor == 0 {
                break;
            }
            cursor = next_cursor;
        }

        Ok(all_keys)
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let mut conn = self.connection.clone();
        let value: Option<Vec<u8>> = self.run(conn.get(key)).await?;
        debug!(key, hit = value.is_some(), "redis get");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> CacheResult<()> {
        let mut conn = self.connection.clone();
        let seconds = ttl.as_secs().max(1);
        self.run(conn.set_ex::<_, _, ()>(key, value, seconds))
            .await?;
        debug!(key, ttl_seconds = seconds, "redis set");
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        let mut conn = self.connection.clone();
        let removed: i64 = self.run(conn.del(key)).await?;
        Ok(removed > 0)
    }

    async fn delete_by_pattern(&self, pattern: &str) -> CacheResult<u64> {
        // List-then-bulk-delete; Redis has no pattern-delete primitive.
        let keys = self.scan_keys(pattern).await?;
        if keys.is_empty() {
            return Ok(0);
        }

        let mut conn = self.connection.clone();
        let removed: u64 = self.run(conn.del(&keys)).await?;
        debug!(pattern, removed, "redis pattern delete");
        Ok(removed)
    }

    async fn exists(&self, key: &str) -> CacheResult<bool> {
        let mut conn = self.connection.clone();
        Ok(self.run(conn.exists(key)).await?)
    }

    async fn keys(&self, pattern: &str) -> CacheResult<Vec<String>> {
        self.scan_keys(pattern).await
    }

    async fn flush_all(&self) -> CacheResult<()> {
        let mut conn = self.connection.clone();
        self.run(redis::cmd("FLUSHDB").query_async::<_, ()>(&mut conn))
            .await?;
        info!("redis store flushed");
        Ok(())
    }

    async fn health_check(&self) -> CacheResult<bool> {
        let mut conn = self.connection.clone();
        let response: String = self.run(redis::cmd("PING").query_async(&mut conn)).await?;
        Ok(response == "PONG")
    }
}
