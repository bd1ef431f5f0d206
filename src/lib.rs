//! # Catalog Cache Library
//!
//! A cache-aside read layer for a relational product catalog. The hard part
//! lives in `caching`: deterministic cache-key derivation for parameterized
//! listing queries, TTL-differentiated storage for entities, collections and
//! the categories facet, and coordinated invalidation when the underlying
//! data changes.
//!
//! HTTP routing, request validation and SQL construction are collaborators:
//! the host hands this crate a typed query and a fetch function, and gets
//! back the value plus a cache-hit flag and elapsed time.
//!
//! ```no_run
//! use catalog_cache::caching::stores::{RedisStore, RedisStoreConfig};
//! use catalog_cache::catalog::{CatalogService, FilterSet, ProductRepository};
//! use catalog_cache::core::AppConfig;
//! use std::sync::Arc;
//!
//! # async fn example(repository: Arc<dyn ProductRepository>) -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let store = RedisStore::connect(RedisStoreConfig::from_app_config(&config)).await?;
//! let service = CatalogService::new(repository, Arc::new(store), config.cache);
//!
//! let listing = service
//!     .list_products(&FilterSet::new().category("books").limit(20))
//!     .await?;
//! println!("hit={} elapsed={}ms", listing.cache_hit, listing.elapsed_ms);
//! # Ok(())
//! # }
//! ```

/// Core functionality: configuration, error types and observability bootstrap
pub mod core;

/// Cache-aside layer: key codec, stores, read-through manager, invalidation,
/// admin surface
pub mod caching;

/// Catalog domain: entity types, the persistence trait and the service layer
pub mod catalog;

// Re-export the types most hosts touch directly.
pub use caching::{CacheAdmin, CacheInvalidator, CacheStats, CacheStore, CachedRead, CatalogCache};
pub use catalog::{CatalogService, FilterSet, Product, ProductRepository};
pub use core::error::{CatalogError, CatalogResult};
pub use core::{AppConfig, CacheSettings};
