//! User CRUD route handlers.
//!
//! Registration and the profile routes are unauthenticated, mirroring the
//! public sign-up flow. Update is a full-field overwrite, except that an
//! omitted password keeps the stored hash.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use loja_core::{Email, Role, UserId};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::error::AppError;
use crate::services::auth::{self, AuthError, AuthService};
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct CreateUserBody {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Update request body; password may be omitted to keep the current one.
#[derive(Debug, Deserialize)]
pub struct UpdateUserBody {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
}

/// POST /users/create
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateUserBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(body) = body.map_err(|_| AppError::validation("Erro ao criar um usuário"))?;

    let auth = AuthService::new(state.pool());
    auth.register(&body.name, &body.email, &body.password, Role::User)
        .await
        .map_err(|e| match e {
            AuthError::EmailTaken => {
                AppError::conflict("O email que você está tentando cadastrar já existe.")
            }
            AuthError::InvalidName | AuthError::InvalidEmail(_) | AuthError::WeakPassword => {
                AppError::validation("Erro ao criar um usuário")
            }
            other => AppError::from(other),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Usuário cadastrado com sucesso." })),
    ))
}

/// GET /users/list
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let users = UserRepository::new(state.pool()).list().await?;

    Ok(Json(json!({ "data": users })))
}

/// GET /users/get/{id}
#[instrument(skip(state))]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id: UserId = id
        .parse()
        .map_err(|_| AppError::validation("Erro ao buscar o usuário"))?;

    let user = UserRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Usuário não encontrado"))?;

    Ok(Json(json!({ "data": user })))
}

/// PUT /users/update/{id}
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateUserBody>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    const MESSAGE: &str = "Erro ao tentar atualizar o usuário, tente novamente!";

    let id: UserId = id.parse().map_err(|_| AppError::validation(MESSAGE))?;
    let Json(body) = body.map_err(|_| AppError::validation(MESSAGE))?;

    if body.name.chars().count() < 3 {
        return Err(AppError::validation(MESSAGE));
    }
    let email = Email::parse(&body.email).map_err(|_| AppError::validation(MESSAGE))?;

    // Omitted password keeps the stored hash
    let password_hash = match body.password.as_deref() {
        Some(password) => {
            auth::validate_password(password).map_err(|_| AppError::validation(MESSAGE))?;
            Some(auth::hash_password(password)?)
        }
        None => None,
    };

    UserRepository::new(state.pool())
        .update(id, &body.name, &email, password_hash.as_deref())
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::not_found("Usuário não encontrado"),
            RepositoryError::Conflict(_) => {
                AppError::conflict("O email que você está tentando cadastrar já existe.")
            }
            other => AppError::from(other),
        })?;

    Ok(Json(json!({ "message": "Usuário atualizado com sucesso!" })))
}

/// DELETE /users/delete/{id}
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id: UserId = id
        .parse()
        .map_err(|_| AppError::validation("Erro ao tentar deletar o usuário, tente novamente!"))?;

    let deleted = UserRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::not_found("Usuário não encontrado"));
    }

    Ok(Json(json!({ "message": "Usuário deletado com sucesso" })))
}
