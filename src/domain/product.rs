use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation of a sellable product.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    /// Opaque UUID identifier assigned on creation.
    pub id: String,
    /// Human-readable name of the product.
    pub name: String,
    /// Price represented in the smallest currency unit (for example cents).
    pub price: i64,
    /// Category label used for exact-match filtering.
    pub category: String,
    /// City of the distribution center serving this product.
    pub distribution_center: String,
    /// `false` once the product has been deleted.
    pub active: bool,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub category: String,
    pub distribution_center: String,
    /// Timestamp captured when the product payload was created.
    pub created_at: NaiveDateTime,
}

impl NewProduct {
    /// Build a new active product payload with a fresh identifier and the current timestamp.
    pub fn new(
        name: impl Into<String>,
        price: i64,
        category: impl Into<String>,
        distribution_center: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            price,
            category: category.into(),
            distribution_center: distribution_center.into(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Changes applied when updating an existing product.
///
/// Only the name and price are mutable; category, distribution center and
/// the active flag are fixed after creation.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    pub name: String,
    pub price: i64,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl UpdateProduct {
    pub fn new(name: impl Into<String>, price: i64) -> Self {
        Self {
            name: name.into(),
            price,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Query definition used to list products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Optional exact category filter.
    pub category: Option<String>,
    /// Whether deactivated products should be included in the results.
    pub include_inactive: bool,
}

impl ProductListQuery {
    /// Construct a query that targets all active products.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter the results to products whose category equals `category` exactly.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Include deactivated products in the results.
    pub fn include_inactive(mut self) -> Self {
        self.include_inactive = true;
        self
    }
}
