//! Bearer token issuing and verification.
//!
//! Tokens are HS256 JWTs carrying the authenticated user's identity and
//! role. They expire after seven days; verification rejects expired tokens
//! and bad signatures alike.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use loja_core::{Role, UserId};

use crate::models::User;

/// Token lifetime in days.
const TOKEN_TTL_DAYS: i64 = 7;

/// Claims carried by every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated user id.
    pub sub: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// Issue a signed token for a user.
///
/// # Errors
///
/// Returns `jsonwebtoken::errors::Error` if signing fails.
pub fn issue(user: &User, key: &EncodingKey) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id,
        name: user.name.clone(),
        email: user.email.to_string(),
        role: user.role,
        iat: now.timestamp(),
        exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
    };

    jsonwebtoken::encode(&Header::default(), &claims, key)
}

/// Verify a token and return its claims.
///
/// # Errors
///
/// Returns `jsonwebtoken::errors::Error` if the signature is invalid or the
/// token is expired.
pub fn verify(token: &str, key: &DecodingKey) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = jsonwebtoken::decode::<Claims>(token, key, &Validation::default())?;
    Ok(data.claims)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use loja_core::Email;

    fn test_user(role: Role) -> User {
        User {
            id: UserId::new(uuid::Uuid::new_v4()),
            name: "Maria Silva".to_string(),
            email: Email::parse("maria@exemplo.com").unwrap(),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn keys() -> (EncodingKey, DecodingKey) {
        let secret = b"Jm4q!x9W#kP2vN8rT5bY0zH6cL3dF7sA";
        (
            EncodingKey::from_secret(secret),
            DecodingKey::from_secret(secret),
        )
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let user = test_user(Role::Admin);
        let (enc, dec) = keys();

        let token = issue(&user, &enc).unwrap();
        let claims = verify(&token, &dec).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "maria@exemplo.com");
        assert_eq!(claims.role, Role::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_rejects_wrong_key() {
        let user = test_user(Role::User);
        let (enc, _) = keys();
        let other = DecodingKey::from_secret(b"u8Rj!2mQ#wZ5xB9kV4nC7pG0yT3eH6sD");

        let token = issue(&user, &enc).unwrap();
        assert!(verify(&token, &other).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let (_, dec) = keys();
        assert!(verify("not-a-token", &dec).is_err());
        assert!(verify("", &dec).is_err());
    }
}
