//! Core building blocks: configuration, error types, and observability
//! bootstrap shared by the caching and catalog modules.

pub mod config;
pub mod error;
pub mod observability;

pub use config::{AppConfig, CacheSettings, RedisSettings};
pub use error::{CatalogError, CatalogResult};
