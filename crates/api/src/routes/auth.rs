//! Sign-in route handler.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::error::AppError;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Sign-in request body.
#[derive(Debug, Deserialize)]
pub struct SignInBody {
    pub email: String,
    pub password: String,
}

/// POST /auth/sign-in
///
/// Unknown email and wrong password produce the same response body, so the
/// endpoint never reveals whether an account exists.
#[instrument(skip(state, body))]
pub async fn sign_in(
    State(state): State<AppState>,
    body: Result<Json<SignInBody>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(body) = body.map_err(|_| {
        AppError::validation("Erro ao realizar o login, verifique os dados informados.")
    })?;

    let auth = AuthService::new(state.pool());
    let (_, token) = auth
        .sign_in(&body.email, &body.password, state.jwt_encoding_key())
        .await
        .map_err(|e| match e {
            AuthError::InvalidEmail(_) | AuthError::WeakPassword => AppError::validation(
                "Erro ao realizar o login, verifique os dados informados.",
            ),
            other => AppError::from(other),
        })?;

    Ok(Json(json!({
        "message": "Login realizado com sucesso!",
        "token": token,
    })))
}
