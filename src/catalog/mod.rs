//! Catalog domain: entity types, the persistence collaborator trait and the
//! service layer that fronts persistence with the cache.

pub mod repository;
pub mod service;
pub mod types;

pub use repository::ProductRepository;
pub use service::CatalogService;
pub use types::{FilterSet, NewProduct, Product, ProductListing, ProductUpdate, SortField, SortOrder};
