//! Database operations for the Loja `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `users` - Customer and admin accounts (argon2 password hashes)
//! - `categories` - Product categories
//! - `products` - Catalog products (price as `NUMERIC`)
//! - `addresses` - User address book
//! - `orders` / `order_items` - Orders with immutable price snapshots
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p loja-cli -- migrate
//! ```

pub mod addresses;
pub mod categories;
pub mod orders;
pub mod products;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors from the repository layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Unique constraint violation (e.g., duplicate email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Foreign key violation (e.g., unknown category).
    #[error("unknown reference: {0}")]
    ForeignKey(String),
}

impl RepositoryError {
    /// Map a sqlx error, turning a unique violation into `Conflict` and a
    /// foreign key violation into `ForeignKey`.
    #[must_use]
    pub fn from_sqlx(err: sqlx::Error, conflict: &str, reference: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return Self::Conflict(conflict.to_owned());
            }
            if db_err.is_foreign_key_violation() {
                return Self::ForeignKey(reference.to_owned());
            }
        }
        Self::Database(err)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
