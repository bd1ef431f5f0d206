//! # Cache Key Codec
//!
//! Deterministic cache key derivation for the three key namespaces. Keys are
//! shaped as `{prefix}:{category}:{discriminator}`; the listing discriminator
//! is derived from the canonical filter encoding so that logically identical
//! queries always land on the same key, and arbitrary characters in search
//! terms can never corrupt key syntax.

use crate::caching::CacheCategory;
use crate::catalog::types::FilterSet;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::{Digest, Sha256};

/// Discriminators longer than this are hashed down to a fixed-width digest.
/// Keeps keys under Redis-friendly lengths for pathological search terms.
const MAX_DISCRIMINATOR_LEN: usize = 180;

/// Derives cache keys and namespace patterns from request shapes.
///
/// Pure and cheap to clone; one instance per configured prefix.
#[derive(Debug, Clone)]
pub struct KeyCodec {
    prefix: String,
}

impl KeyCodec {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Key for a single product entity.
    pub fn product_key(&self, id: i64) -> String {
        format!("{}:{}:{}", self.prefix, CacheCategory::Product.as_str(), id)
    }

    /// Key for a listing query result.
    ///
    /// The discriminator is the URL-safe base64 of the filter set's canonical
    /// sorted-key JSON, so construction order of the filters is irrelevant.
    /// Oversized encodings collapse to a SHA-256 hex digest of the same
    /// canonical text, which stays deterministic.
    pub fn listing_key(&self, filters: &FilterSet) -> String {
        let canonical = filters.canonical_json();
        let encoded = URL_SAFE_NO_PAD.encode(canonical.as_bytes());

        let discriminator = if encoded.len() <= MAX_DISCRIMINATOR_LEN {
            encoded
        } else {
            let mut hasher = Sha256::new();
            hasher.update(canonical.as_bytes());
            format!("{:x}", hasher.finalize())
        };

        format!(
            "{}:{}:{}",
            self.prefix,
            CacheCategory::Listing.as_str(),
            discriminator
        )
    }

    /// Key for the distinct-categories facet.
    pub fn categories_key(&self) -> String {
        format!("{}:{}", self.prefix, CacheCategory::Categories.as_str())
    }

    /// Glob pattern matching every product entity key.
    pub fn product_pattern(&self) -> String {
        format!("{}:{}:*", self.prefix, CacheCategory::Product.as_str())
    }

    /// Glob pattern matching every listing key.
    pub fn listing_pattern(&self) -> String {
        format!("{}:{}:*", self.prefix, CacheCategory::Listing.as_str())
    }

    /// Glob pattern matching every key under the configured prefix.
    pub fn all_pattern(&self) -> String {
        format!("{}:*", self.prefix)
    }
}
