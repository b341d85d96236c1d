//! User repository for database operations.
//!
//! Uniqueness of the email column is enforced by the database; a unique
//! violation surfaces as `RepositoryError::Conflict` so callers never race a
//! check-then-insert.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use loja_core::{Email, Role, UserId};

use super::RepositoryError;
use crate::models::User;

/// Internal row type for `PostgreSQL` user queries.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    role: Role,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: UserId::new(row.id),
            name: row.name,
            email,
            role: row.role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all users, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r"
            SELECT id, name, email, role, created_at, updated_at
            FROM users
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(
            r"
            SELECT id, name, email, role, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a user and their password hash by email.
    ///
    /// Returns `None` if no user exists with that email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct UserWithHashRow {
            #[sqlx(flatten)]
            user: UserRow,
            password_hash: String,
        }

        let row: Option<UserWithHashRow> = sqlx::query_as(
            r"
            SELECT id, name, email, role, created_at, updated_at, password_hash
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some((row.user.try_into()?, row.password_hash)))
    }

    /// Create a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        email: &Email,
        password_hash: &str,
        role: Role,
    ) -> Result<User, RepositoryError> {
        let row: UserRow = sqlx::query_as(
            r"
            INSERT INTO users (name, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, role, created_at, updated_at
            ",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "email already exists", "unknown reference"))?;

        row.try_into()
    }

    /// Overwrite a user's name and email, optionally replacing the password.
    ///
    /// When `password_hash` is `None` the stored hash is kept as-is.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new email is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: UserId,
        name: &str,
        email: &Email,
        password_hash: Option<&str>,
    ) -> Result<User, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(
            r"
            UPDATE users
            SET name = $2,
                email = $3,
                password_hash = COALESCE($4, password_hash),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, email, role, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "email already exists", "unknown reference"))?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Delete a user by ID.
    ///
    /// # Returns
    ///
    /// Returns `true` if the user was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::ForeignKey` if addresses or orders still
    /// reference the user.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx(e, "email already exists", "user in use"))?;

        Ok(result.rows_affected() > 0)
    }
}
