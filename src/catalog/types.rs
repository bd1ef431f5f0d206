//! # Catalog Data Types
//!
//! Value types exchanged between the request-handling collaborator, the
//! cache layer and the persistence collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A product entity as returned by persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
}

/// Partial update payload; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
}

/// Sortable listing fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Price,
    Name,
    CreatedAt,
}

/// Listing sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// A normalized set of listing query filters.
///
/// Treated as a value type: equality is defined by the canonical sorted-key
/// serialization, not by construction order. Backed by a `BTreeMap` so the
/// canonical encoding falls out of iteration order.
///
/// Absent values are omitted entirely; a setter called with `None` and a
/// setter never called produce identical filter sets. Raw `insert`s normalize
/// JSON `null` to absent for the same reason.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet {
    fields: BTreeMap<String, Value>,
}

impl FilterSet {
    /// Create an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw filter value. `Value::Null` is treated as absent.
    pub fn insert(mut self, name: impl Into<String>, value: Value) -> Self {
        let name = name.into();
        if value.is_null() {
            self.fields.remove(&name);
        } else {
            self.fields.insert(name, value);
        }
        self
    }

    /// Filter by product category.
    pub fn category(self, category: impl Into<String>) -> Self {
        self.insert("category", Value::String(category.into()))
    }

    /// Lower price bound, inclusive.
    pub fn price_min(self, price: f64) -> Self {
        self.insert("price_min", json_number(price))
    }

    /// Upper price bound, inclusive.
    pub fn price_max(self, price: f64) -> Self {
        self.insert("price_max", json_number(price))
    }

    /// Free-text search over name and description.
    pub fn search(self, term: impl Into<String>) -> Self {
        self.insert("search", Value::String(term.into()))
    }

    /// Sort field.
    pub fn sort_by(self, field: SortField) -> Self {
        // serde renames give us the wire spelling
        self.insert("sort_by", serde_json::to_value(field).unwrap_or(Value::Null))
    }

    /// Sort direction.
    pub fn sort_order(self, order: SortOrder) -> Self {
        self.insert(
            "sort_order",
            serde_json::to_value(order).unwrap_or(Value::Null),
        )
    }

    /// Page size.
    pub fn limit(self, limit: u64) -> Self {
        self.insert("limit", Value::from(limit))
    }

    /// Pagination offset.
    pub fn offset(self, offset: u64) -> Self {
        self.insert("offset", Value::from(offset))
    }

    /// Look up a raw filter value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Effective page size, defaulting to 10.
    pub fn effective_limit(&self) -> u64 {
        self.fields
            .get("limit")
            .and_then(Value::as_u64)
            .filter(|l| *l > 0)
            .unwrap_or(10)
    }

    /// Effective offset, defaulting to 0.
    pub fn effective_offset(&self) -> u64 {
        self.fields.get("offset").and_then(Value::as_u64).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Canonical sorted-key JSON encoding of the filter set.
    ///
    /// Two filter sets with identical key/value pairs serialize identically
    /// regardless of how they were built; this text is the sole input to
    /// listing key derivation.
    pub fn canonical_json(&self) -> String {
        serde_json::to_string(&self.fields).unwrap_or_else(|_| "{}".to_string())
    }
}

fn json_number(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// A page of listing results with the pagination envelope the API returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListing {
    pub products: Vec<Product>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl ProductListing {
    /// Assemble the envelope from fetched rows, the filtered total and the
    /// filters that produced them.
    pub fn assemble(products: Vec<Product>, total: u64, filters: &FilterSet) -> Self {
        let limit = filters.effective_limit();
        let offset = filters.effective_offset();
        Self {
            products,
            total,
            page: offset / limit + 1,
            limit,
            total_pages: total.div_ceil(limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_json_is_order_independent() {
        let a = FilterSet::new().category("books").limit(10);
        let b = FilterSet::new().limit(10).category("books");
        assert_eq!(a.canonical_json(), b.canonical_json());
        assert_eq!(a, b);
    }

    #[test]
    fn test_null_normalizes_to_absent() {
        let with_null = FilterSet::new()
            .category("books")
            .insert("price_min", Value::Null);
        let without = FilterSet::new().category("books");
        assert_eq!(with_null.canonical_json(), without.canonical_json());
    }

    #[test]
    fn test_insert_null_removes_existing() {
        let filters = FilterSet::new()
            .price_min(5.0)
            .insert("price_min", Value::Null);
        assert!(filters.is_empty());
    }

    #[test]
    fn test_effective_pagination_defaults() {
        let filters = FilterSet::new();
        assert_eq!(filters.effective_limit(), 10);
        assert_eq!(filters.effective_offset(), 0);

        let filters = FilterSet::new().limit(25).offset(50);
        assert_eq!(filters.effective_limit(), 25);
        assert_eq!(filters.effective_offset(), 50);
    }

    #[test]
    fn test_listing_envelope_math() {
        let filters = FilterSet::new().limit(10).offset(20);
        let listing = ProductListing::assemble(Vec::new(), 45, &filters);
        assert_eq!(listing.page, 3);
        assert_eq!(listing.total_pages, 5);
        assert_eq!(listing.limit, 10);
    }

    #[test]
    fn test_sort_spellings_match_wire_format() {
        let filters = FilterSet::new()
            .sort_by(SortField::CreatedAt)
            .sort_order(SortOrder::Desc);
        assert_eq!(
            filters.get("sort_by").and_then(Value::as_str),
            Some("created_at")
        );
        assert_eq!(
            filters.get("sort_order").and_then(Value::as_str),
            Some("DESC")
        );
    }
}
