//! Authentication extractors.
//!
//! Provides extractors for requiring a valid bearer token in route handlers,
//! and an admin-gated variant layered on top of it.

use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};

use loja_core::{Role, UserId};

use crate::error::AppError;
use crate::services::auth::jwt;
use crate::state::AppState;

/// The authenticated identity decoded from the bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(user: CurrentUser) -> impl IntoResponse {
///     format!("Olá, {}!", user.name)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?;

        let claims =
            jwt::verify(token, state.jwt_decoding_key()).map_err(|_| AppError::Unauthorized)?;

        Ok(Self {
            id: claims.sub,
            name: claims.name,
            email: claims.email,
            role: claims.role,
        })
    }
}

/// Extractor that additionally requires the ADMIN role.
///
/// Rejects with the same unauthorized response whether the token is missing,
/// invalid, or carries a non-admin role.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub CurrentUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;

        if !user.role.is_admin() {
            return Err(AppError::Unauthorized);
        }

        Ok(Self(user))
    }
}
