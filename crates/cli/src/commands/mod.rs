//! CLI command implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use thiserror::Error;

/// Errors shared by the CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(#[from] loja_api::db::RepositoryError),

    /// Authentication error (hashing/validation).
    #[error("Auth error: {0}")]
    Auth(#[from] loja_api::services::auth::AuthError),
}

/// Read the database URL from `LOJA_DATABASE_URL` or `DATABASE_URL`.
pub(crate) fn database_url() -> Result<SecretString, CommandError> {
    dotenvy::dotenv().ok();

    std::env::var("LOJA_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("LOJA_DATABASE_URL"))
}
