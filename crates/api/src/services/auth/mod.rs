//! Authentication service.
//!
//! Handles registration and password sign-in. Passwords are hashed with
//! argon2; successful sign-in issues a bearer token.

mod error;
pub mod jwt;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use jsonwebtoken::EncodingKey;
use sqlx::PgPool;

use loja_core::{Email, Role};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Minimum display name length.
const MIN_NAME_LENGTH: usize = 3;

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user with name, email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidName` if the name is too short.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password is too short.
    /// Returns `AuthError::EmailTaken` if the email is already registered.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<User, AuthError> {
        if name.chars().count() < MIN_NAME_LENGTH {
            return Err(AuthError::InvalidName);
        }

        let email = Email::parse(email)?;
        validate_password(password)?;

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(name, &email, &password_hash, role)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::EmailTaken,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Sign in with email and password, issuing a bearer token.
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`; the
    /// caller cannot tell them apart.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    /// Returns `AuthError::Token` if signing the token fails.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
        key: &EncodingKey,
    ) -> Result<(User, String), AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;

        let (user, password_hash) = self
            .users
            .get_with_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        let token = jwt::issue(&user, key)?;

        Ok((user, token))
    }
}

/// Validate that a password meets the minimum length requirement.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` if it doesn't.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword);
    }
    Ok(())
}

/// Hash a password with argon2 and a fresh random salt.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AuthError::PasswordHash)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored argon2 hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if the password doesn't match
/// (or the stored hash cannot be parsed).
pub fn verify_password(password: &str, password_hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(password_hash).map_err(|_| AuthError::InvalidCredentials)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("segredo123").unwrap();
        assert!(verify_password("segredo123", &hash).is_ok());
        assert!(matches!(
            verify_password("senha-errada", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("segredo123").unwrap();
        let second = hash_password("segredo123").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_validate_password_minimum_length() {
        assert!(matches!(
            validate_password("12345"),
            Err(AuthError::WeakPassword)
        ));
        assert!(validate_password("123456").is_ok());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(matches!(
            verify_password("qualquer", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
