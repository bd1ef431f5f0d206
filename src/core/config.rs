//! # Configuration Module
//!
//! Configuration for the cache layer and its Redis backend. The structs are
//! serde-deserializable so a host application can embed them in its own config
//! file; environment variables override whatever was loaded, which keeps
//! container deployments simple.
//!
//! Construct one [`AppConfig`] at process start and pass it by reference to
//! the components that need it. There is deliberately no global instance.

use crate::core::error::{CatalogError, CatalogResult};
use crate::caching::CacheCategory;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level configuration for the catalog cache layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Cache behavior (prefix, TTLs)
    #[serde(default)]
    pub cache: CacheSettings,

    /// Redis connection settings
    #[serde(default)]
    pub redis: RedisSettings,
}

/// Cache key namespacing and per-category TTL policy.
///
/// Products, listings and the categories facet each carry an independent TTL;
/// there is no per-key override.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Namespace prefix for every key this layer writes
    pub prefix: String,

    /// Default TTL, used for the categories facet
    #[serde(with = "humantime_serde")]
    pub default_ttl: Duration,

    /// TTL for single product entities
    #[serde(with = "humantime_serde")]
    pub product_ttl: Duration,

    /// TTL for listing query results
    #[serde(with = "humantime_serde")]
    pub listing_ttl: Duration,

    /// Upper bound on any single store round trip; keeps the fail-open
    /// contract meaningful under a network partition
    #[serde(with = "humantime_serde")]
    pub operation_timeout: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            prefix: "product_api".to_string(),
            default_ttl: Duration::from_secs(600),
            product_ttl: Duration::from_secs(600),
            listing_ttl: Duration::from_secs(300),
            operation_timeout: Duration::from_secs(1),
        }
    }
}

impl CacheSettings {
    /// Resolve the TTL for a cache category.
    pub fn ttl_for(&self, category: CacheCategory) -> Duration {
        match category {
            CacheCategory::Product => self.product_ttl,
            CacheCategory::Listing => self.listing_ttl,
            CacheCategory::Categories => self.default_ttl,
        }
    }
}

/// Redis connection settings for the production store adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisSettings {
    /// Redis connection URL
    pub url: String,

    /// Connection establishment timeout
    #[serde(with = "humantime_serde")]
    pub connection_timeout: Duration,
}

impl Default for RedisSettings {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            connection_timeout: Duration::from_secs(5),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache: CacheSettings::default(),
            redis: RedisSettings::default(),
        }
    }
}

impl AppConfig {
    /// Build a configuration from defaults plus environment overrides.
    pub fn from_env() -> CatalogResult<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides to an existing configuration.
    ///
    /// Recognized variables: `CACHE_PREFIX`, `CACHE_TTL`, `CACHE_PRODUCT_TTL`,
    /// `CACHE_LISTING_TTL`, `CACHE_OPERATION_TIMEOUT`, `REDIS_URL`. TTL values
    /// accept either plain seconds (`600`) or humantime strings (`10m`).
    pub fn apply_env_overrides(&mut self) -> CatalogResult<()> {
        if let Ok(prefix) = std::env::var("CACHE_PREFIX") {
            self.cache.prefix = prefix;
        }
        if let Some(ttl) = parse_duration_env("CACHE_TTL")? {
            self.cache.default_ttl = ttl;
        }
        if let Some(ttl) = parse_duration_env("CACHE_PRODUCT_TTL")? {
            self.cache.product_ttl = ttl;
        }
        if let Some(ttl) = parse_duration_env("CACHE_LISTING_TTL")? {
            self.cache.listing_ttl = ttl;
        }
        if let Some(timeout) = parse_duration_env("CACHE_OPERATION_TIMEOUT")? {
            self.cache.operation_timeout = timeout;
        }
        if let Ok(url) = std::env::var("REDIS_URL") {
            self.redis.url = url;
        }

        self.validate()
    }

    /// Validate the configuration, rejecting values the cache layer cannot
    /// operate with.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.cache.prefix.is_empty() {
            return Err(CatalogError::configuration(
                "cache prefix must not be empty",
            ));
        }
        if self.cache.prefix.contains(['*', ':']) {
            return Err(CatalogError::configuration(
                "cache prefix must not contain ':' or '*'",
            ));
        }
        if self.cache.operation_timeout.is_zero() {
            return Err(CatalogError::configuration(
                "cache operation timeout must be positive",
            ));
        }
        Ok(())
    }
}

/// Parse a duration from an environment variable, accepting bare seconds or
/// humantime syntax.
fn parse_duration_env(name: &str) -> CatalogResult<Option<Duration>> {
    match std::env::var(name) {
        Ok(raw) => {
            let parsed = raw
                .parse::<u64>()
                .map(Duration::from_secs)
                .or_else(|_| humantime::parse_duration(&raw))
                .map_err(|e| {
                    CatalogError::configuration(format!("invalid {}: {}", name, e))
                })?;
            Ok(Some(parsed))
        }
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttl_policy() {
        let settings = CacheSettings::default();
        assert_eq!(
            settings.ttl_for(CacheCategory::Product),
            Duration::from_secs(600)
        );
        assert_eq!(
            settings.ttl_for(CacheCategory::Listing),
            Duration::from_secs(300)
        );
        assert_eq!(
            settings.ttl_for(CacheCategory::Categories),
            Duration::from_secs(600)
        );
    }

    #[test]
    fn test_validate_rejects_bad_prefix() {
        let mut config = AppConfig::default();
        config.cache.prefix = "".to_string();
        assert!(config.validate().is_err());

        config.cache.prefix = "bad:prefix".to_string();
        assert!(config.validate().is_err());

        config.cache.prefix = "product_api".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_round_trip() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.cache.prefix, config.cache.prefix);
        assert_eq!(parsed.cache.listing_ttl, config.cache.listing_ttl);
    }
}
