//! Category repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use loja_core::CategoryId;

use super::RepositoryError;
use crate::models::Category;

/// Internal row type for `PostgreSQL` category queries.
#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(row.id),
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows: Vec<CategoryRow> = sqlx::query_as(
            r"
            SELECT id, name, created_at, updated_at
            FROM categories
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a category by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let row: Option<CategoryRow> = sqlx::query_as(
            r"
            SELECT id, name, created_at, updated_at
            FROM categories
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a new category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, name: &str) -> Result<Category, RepositoryError> {
        let row: CategoryRow = sqlx::query_as(
            r"
            INSERT INTO categories (name)
            VALUES ($1)
            RETURNING id, name, created_at, updated_at
            ",
        )
        .bind(name)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            RepositoryError::from_sqlx(e, "category name already exists", "unknown reference")
        })?;

        Ok(row.into())
    }

    /// Overwrite a category's name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new name is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: CategoryId, name: &str) -> Result<Category, RepositoryError> {
        let row: Option<CategoryRow> = sqlx::query_as(
            r"
            UPDATE categories
            SET name = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            RepositoryError::from_sqlx(e, "category name already exists", "unknown reference")
        })?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Delete a category by ID.
    ///
    /// # Returns
    ///
    /// Returns `true` if the category was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::ForeignKey` if products still reference it.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: CategoryId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from_sqlx(e, "category name already exists", "category in use")
            })?;

        Ok(result.rows_affected() > 0)
    }
}
