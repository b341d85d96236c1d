//! Category CRUD route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use loja_core::CategoryId;

use crate::db::RepositoryError;
use crate::db::categories::CategoryRepository;
use crate::error::AppError;
use crate::middleware::{CurrentUser, RequireAdmin};
use crate::state::AppState;

/// Category create/update request body.
#[derive(Debug, Deserialize)]
pub struct CategoryBody {
    pub name: String,
}

/// POST /category/create
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CategoryBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(body) = body.map_err(|_| {
        AppError::validation("Erro ao criar a categoria, verifique os dados informados.")
    })?;

    let category = CategoryRepository::new(state.pool())
        .create(&body.name)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => {
                AppError::conflict("Erro ao criar a categoria, categoria já existe.")
            }
            other => AppError::from(other),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Categoria criada com sucesso", "category": category })),
    ))
}

/// GET /category/list (admin only)
#[instrument(skip(state, _admin))]
pub async fn list(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<Value>, AppError> {
    let categories = CategoryRepository::new(state.pool()).list().await?;

    Ok(Json(json!({ "categories": categories })))
}

/// GET /category/get/{id}
#[instrument(skip(state, _user))]
pub async fn get(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id: CategoryId = id.parse().map_err(|_| {
        AppError::validation("Erro ao buscar a categoria, verifique os dados informados.")
    })?;

    let category = CategoryRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Categoria não encontrada"))?;

    Ok(Json(json!({ "category": category })))
}

/// PUT /category/update/{id}
#[instrument(skip(state, _user, body))]
pub async fn update(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
    body: Result<Json<CategoryBody>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    const MESSAGE: &str = "Erro ao atualizar a categoria, verifique os dados informados.";

    let id: CategoryId = id.parse().map_err(|_| AppError::validation(MESSAGE))?;
    let Json(body) = body.map_err(|_| AppError::validation(MESSAGE))?;

    let category = CategoryRepository::new(state.pool())
        .update(id, &body.name)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::not_found("Categoria não encontrada"),
            RepositoryError::Conflict(_) => {
                AppError::conflict("Erro ao criar a categoria, categoria já existe.")
            }
            other => AppError::from(other),
        })?;

    Ok(Json(
        json!({ "message": "Categoria atualizada com sucesso", "category": category }),
    ))
}

/// DELETE /category/delete/{id}
#[instrument(skip(state, _user))]
pub async fn delete(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id: CategoryId = id.parse().map_err(|_| {
        AppError::validation("Erro ao deletar a categoria, verifique os dados informados.")
    })?;

    let deleted = CategoryRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(|e| match e {
            RepositoryError::ForeignKey(_) => {
                AppError::conflict("Categoria está em uso e não pode ser deletada.")
            }
            other => AppError::from(other),
        })?;
    if !deleted {
        return Err(AppError::not_found("Categoria não encontrada"));
    }

    Ok(Json(json!({ "message": "Categoria deletada com sucesso" })))
}
