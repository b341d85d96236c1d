//! Product domain model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use loja_core::{CategoryId, ProductId};

use super::category::CategoryRef;

/// A catalog product.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub category_id: CategoryId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product with its category embedded, as returned by the catalog routes.
#[derive(Debug, Clone, Serialize)]
pub struct ProductWithCategory {
    #[serde(flatten)]
    pub product: Product,
    pub category: CategoryRef,
}

/// Fields required to create or overwrite a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub category_id: CategoryId,
}
