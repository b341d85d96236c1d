//! Product repository for database operations.
//!
//! Catalog reads embed the category reference; the order service resolves
//! bare products in bulk when pricing an order.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use loja_core::{CategoryId, ProductId};

use super::RepositoryError;
use crate::models::{CategoryRef, NewProduct, Product, ProductWithCategory};

/// Internal row type for `PostgreSQL` product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    description: String,
    price: Decimal,
    image_url: Option<String>,
    category_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            image_url: row.image_url,
            category_id: CategoryId::new(row.category_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Product row joined with its category name.
#[derive(Debug, sqlx::FromRow)]
struct ProductWithCategoryRow {
    #[sqlx(flatten)]
    product: ProductRow,
    category_name: String,
}

impl From<ProductWithCategoryRow> for ProductWithCategory {
    fn from(row: ProductWithCategoryRow) -> Self {
        let category = CategoryRef {
            id: CategoryId::new(row.product.category_id),
            name: row.category_name,
        };
        Self {
            product: row.product.into(),
            category,
        }
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all products with their categories, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<ProductWithCategory>, RepositoryError> {
        let rows: Vec<ProductWithCategoryRow> = sqlx::query_as(
            r"
            SELECT p.id, p.name, p.description, p.price, p.image_url,
                   p.category_id, p.created_at, p.updated_at,
                   c.name AS category_name
            FROM products p
            JOIN categories c ON c.id = p.category_id
            ORDER BY p.created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a product with its category by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(
        &self,
        id: ProductId,
    ) -> Result<Option<ProductWithCategory>, RepositoryError> {
        let row: Option<ProductWithCategoryRow> = sqlx::query_as(
            r"
            SELECT p.id, p.name, p.description, p.price, p.image_url,
                   p.category_id, p.created_at, p.updated_at,
                   c.name AS category_name
            FROM products p
            JOIN categories c ON c.id = p.category_id
            WHERE p.id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Resolve the products referenced by an order, by ID set.
    ///
    /// Ids not present in the catalog are simply absent from the result;
    /// the caller compares counts to detect unknown products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn resolve_by_ids(
        &self,
        ids: &[ProductId],
    ) -> Result<Vec<Product>, RepositoryError> {
        let raw: Vec<Uuid> = ids.iter().map(|id| id.as_uuid()).collect();

        let rows: Vec<ProductRow> = sqlx::query_as(
            r"
            SELECT id, name, description, price, image_url,
                   category_id, created_at, updated_at
            FROM products
            WHERE id = ANY($1)
            ",
        )
        .bind(&raw)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Create a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name already exists.
    /// Returns `RepositoryError::ForeignKey` if the category doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let row: ProductRow = sqlx::query_as(
            r"
            INSERT INTO products (name, description, price, image_url, category_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, price, image_url,
                      category_id, created_at, updated_at
            ",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.image_url)
        .bind(product.category_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            RepositoryError::from_sqlx(e, "product name already exists", "unknown category")
        })?;

        Ok(row.into())
    }

    /// Overwrite all fields of a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new name is taken.
    /// Returns `RepositoryError::ForeignKey` if the category doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        product: &NewProduct,
    ) -> Result<Product, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(
            r"
            UPDATE products
            SET name = $2, description = $3, price = $4,
                image_url = $5, category_id = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, price, image_url,
                      category_id, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.image_url)
        .bind(product.category_id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            RepositoryError::from_sqlx(e, "product name already exists", "unknown category")
        })?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Delete a product by ID.
    ///
    /// # Returns
    ///
    /// Returns `true` if the product was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::ForeignKey` if order items still reference it.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from_sqlx(e, "product name already exists", "product in use")
            })?;

        Ok(result.rows_affected() > 0)
    }
}
