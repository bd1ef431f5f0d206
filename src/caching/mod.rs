//! # Caching System Module
//!
//! Cache-aside read layer for the product catalog. The layer derives
//! deterministic keys for entities, parameterized listings and the categories
//! facet, stores serialized values with per-category TTLs, and fans out
//! invalidation when an entity mutates.
//!
//! ## Architecture
//! 1. **Key Codec**: deterministic key derivation per cache category
//! 2. **Cache Stores**: Redis (production) and in-memory implementations
//! 3. **Cache Manager**: the read-through path with fail-open semantics
//! 4. **Invalidation**: write-path fan-out deletions
//! 5. **Admin**: key counts per category and full flush
//!
//! ## Fail-open contract
//! Store errors never escape this module as errors: a failed `get` is a miss,
//! a failed `set`/`delete` is a logged no-op. Cache unavailability degrades
//! reads to direct persistence fetches, never to an outage.

pub mod admin;
pub mod cache_manager;
pub mod invalidation;
pub mod key_codec;
pub mod stores;

pub use admin::{CacheAdmin, CacheStats};
pub use cache_manager::{CachedRead, CatalogCache};
pub use invalidation::CacheInvalidator;
pub use key_codec::KeyCodec;
pub use stores::{CacheStore, InMemoryStore, RedisStore};

/// Cache operation result, internal to the store boundary.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache-transport error types.
///
/// These are swallowed at the cache manager boundary (logged, surfaced as a
/// miss or a `false` success flag) and never propagate to callers.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache store error: {message}")]
    Store { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Cache operation timed out")]
    Timeout,
}

/// The three key namespaces this layer manages.
///
/// Each category carries its own TTL (see
/// [`CacheSettings::ttl_for`](crate::core::config::CacheSettings::ttl_for))
/// and its own invalidation granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheCategory {
    /// Single product entities, keyed by id
    Product,
    /// Listing query results, keyed by canonicalized filter set
    Listing,
    /// The distinct-categories facet, a single key
    Categories,
}

impl CacheCategory {
    /// Namespace segment used in cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Listing => "listing",
            Self::Categories => "categories",
        }
    }
}
