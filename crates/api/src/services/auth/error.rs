//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] loja_core::EmailError),

    /// Name shorter than the minimum length.
    #[error("name too short")]
    InvalidName,

    /// Password shorter than the minimum length.
    #[error("password too short")]
    WeakPassword,

    /// Invalid credentials (wrong password or unknown email).
    ///
    /// Both cases collapse into this one variant so the response never
    /// reveals whether the email exists.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Email already registered.
    #[error("email already registered")]
    EmailTaken,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Token signing error.
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
