//! # Persistence Collaborator Interface
//!
//! The contract the relational store fulfills. Query construction and
//! durability live entirely behind this trait; the cache layer only consumes
//! it as a fetch source and forwards its errors unchanged.

use super::types::{FilterSet, NewProduct, Product, ProductUpdate};
use crate::core::error::CatalogResult;
use async_trait::async_trait;

/// Read and write access to the product table.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fetch a single product, `None` if it does not exist.
    async fn find_by_id(&self, id: i64) -> CatalogResult<Option<Product>>;

    /// Fetch the page of products matching the filters.
    async fn find_all(&self, filters: &FilterSet) -> CatalogResult<Vec<Product>>;

    /// Count products matching the filters, ignoring pagination.
    async fn count(&self, filters: &FilterSet) -> CatalogResult<u64>;

    /// Insert a product, returning it with its assigned id.
    async fn create(&self, input: NewProduct) -> CatalogResult<Product>;

    /// Apply a partial update, `None` if the product does not exist.
    async fn update(&self, id: i64, changes: ProductUpdate) -> CatalogResult<Option<Product>>;

    /// Delete a product, returning the deleted row, `None` if absent.
    async fn delete(&self, id: i64) -> CatalogResult<Option<Product>>;

    /// List the distinct category values in use.
    async fn distinct_categories(&self) -> CatalogResult<Vec<String>>;
}
