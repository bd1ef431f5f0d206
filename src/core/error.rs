//! # Error Handling Module
//!
//! Error types shared across the catalog read layer. Persistence errors are
//! forwarded to callers without interpretation; cache-transport errors are a
//! separate taxonomy (`crate::caching::CacheError`) that is swallowed at the
//! cache boundary and never reaches these types.

use thiserror::Error;

/// Main result type used throughout the catalog layer.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors surfaced to the request-handling collaborator.
///
/// Each variant represents a different category of failure. The `#[error("...")]`
/// attribute from `thiserror` implements `Display` with the given message.
#[derive(Debug, Error, Clone)]
pub enum CatalogError {
    /// Configuration-related errors (invalid values, bad environment overrides)
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Errors raised by the persistence collaborator, forwarded unchanged
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    /// Requested entity does not exist in persistence
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    /// Contract violations in the core itself (non-serializable payloads etc.)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CatalogError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error means the entity simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CatalogError::NotFound {
            resource: "product",
            id: 42,
        };
        assert_eq!(err.to_string(), "product 42 not found");

        let err = CatalogError::persistence("connection refused");
        assert_eq!(err.to_string(), "Persistence error: connection refused");
    }

    #[test]
    fn test_not_found_predicate() {
        assert!(CatalogError::NotFound {
            resource: "product",
            id: 1
        }
        .is_not_found());
        assert!(!CatalogError::persistence("boom").is_not_found());
    }
}
