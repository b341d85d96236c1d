//! Category domain model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use loja_core::CategoryId;

/// A product category.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Shallow category reference embedded in product responses.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRef {
    pub id: CategoryId,
    pub name: String,
}
