//! Address repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use loja_core::{AddressId, StateCode, UserId, ZipCode};

use super::RepositoryError;
use crate::models::{Address, AddressOwner, AddressWithUser};

/// Internal row type for `PostgreSQL` address queries.
#[derive(Debug, sqlx::FromRow)]
struct AddressRow {
    id: Uuid,
    user_id: Uuid,
    street: String,
    number: String,
    city: String,
    state: String,
    zip_code: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AddressRow> for Address {
    type Error = RepositoryError;

    fn try_from(row: AddressRow) -> Result<Self, Self::Error> {
        let state = StateCode::parse(&row.state).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid state code in database: {e}"))
        })?;
        let zip_code = ZipCode::parse(&row.zip_code).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid zip code in database: {e}"))
        })?;

        Ok(Self {
            id: AddressId::new(row.id),
            user_id: UserId::new(row.user_id),
            street: row.street,
            number: row.number,
            city: row.city,
            state,
            zip_code,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Address row joined with its owner's name.
#[derive(Debug, sqlx::FromRow)]
struct AddressWithUserRow {
    #[sqlx(flatten)]
    address: AddressRow,
    user_name: String,
}

impl TryFrom<AddressWithUserRow> for AddressWithUser {
    type Error = RepositoryError;

    fn try_from(row: AddressWithUserRow) -> Result<Self, Self::Error> {
        let user = AddressOwner {
            id: UserId::new(row.address.user_id),
            name: row.user_name,
        };
        Ok(Self {
            address: row.address.try_into()?,
            user,
        })
    }
}

/// Repository for address database operations.
pub struct AddressRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AddressRepository<'a> {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the addresses owned by a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<AddressWithUser>, RepositoryError> {
        let rows: Vec<AddressWithUserRow> = sqlx::query_as(
            r"
            SELECT a.id, a.user_id, a.street, a.number, a.city, a.state,
                   a.zip_code, a.created_at, a.updated_at,
                   u.name AS user_name
            FROM addresses a
            JOIN users u ON u.id = a.user_id
            WHERE a.user_id = $1
            ORDER BY a.created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List every address in the system, newest first (admin listing).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list_all(&self) -> Result<Vec<AddressWithUser>, RepositoryError> {
        let rows: Vec<AddressWithUserRow> = sqlx::query_as(
            r"
            SELECT a.id, a.user_id, a.street, a.number, a.city, a.state,
                   a.zip_code, a.created_at, a.updated_at,
                   u.name AS user_name
            FROM addresses a
            JOIN users u ON u.id = a.user_id
            ORDER BY a.created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get an address with its owner by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_by_id(
        &self,
        id: AddressId,
    ) -> Result<Option<AddressWithUser>, RepositoryError> {
        let row: Option<AddressWithUserRow> = sqlx::query_as(
            r"
            SELECT a.id, a.user_id, a.street, a.number, a.city, a.state,
                   a.zip_code, a.created_at, a.updated_at,
                   u.name AS user_name
            FROM addresses a
            JOIN users u ON u.id = a.user_id
            WHERE a.id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a new address for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::ForeignKey` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        user_id: UserId,
        street: &str,
        number: &str,
        city: &str,
        state: &StateCode,
        zip_code: &ZipCode,
    ) -> Result<Address, RepositoryError> {
        let row: AddressRow = sqlx::query_as(
            r"
            INSERT INTO addresses (user_id, street, number, city, state, zip_code)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, street, number, city, state,
                      zip_code, created_at, updated_at
            ",
        )
        .bind(user_id)
        .bind(street)
        .bind(number)
        .bind(city)
        .bind(state)
        .bind(zip_code)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "duplicate address", "unknown user"))?;

        row.try_into()
    }

    /// Overwrite all fields of an address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the address doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: AddressId,
        street: &str,
        number: &str,
        city: &str,
        state: &StateCode,
        zip_code: &ZipCode,
    ) -> Result<Address, RepositoryError> {
        let row: Option<AddressRow> = sqlx::query_as(
            r"
            UPDATE addresses
            SET street = $2, number = $3, city = $4,
                state = $5, zip_code = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, street, number, city, state,
                      zip_code, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(street)
        .bind(number)
        .bind(city)
        .bind(state)
        .bind(zip_code)
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Delete an address by ID.
    ///
    /// # Returns
    ///
    /// Returns `true` if the address was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::ForeignKey` if orders still reference it.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: AddressId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from_sqlx(e, "duplicate address", "address in use")
            })?;

        Ok(result.rows_affected() > 0)
    }
}
