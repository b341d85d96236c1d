//! Address book route handlers.
//!
//! Creation always attaches the address to the authenticated user; the plain
//! listing is scoped to the caller while the admin listing covers everyone.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use loja_core::{AddressId, StateCode, ZipCode};

use crate::db::RepositoryError;
use crate::db::addresses::AddressRepository;
use crate::error::AppError;
use crate::middleware::{CurrentUser, RequireAdmin};
use crate::state::AppState;

/// Address create/update request body.
#[derive(Debug, Deserialize)]
pub struct AddressBody {
    pub street: String,
    pub number: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "zipCode")]
    pub zip_code: String,
}

/// Validated address fields.
struct AddressFields {
    street: String,
    number: String,
    city: String,
    state: StateCode,
    zip_code: ZipCode,
}

impl AddressBody {
    /// Validate the state code and zip code.
    fn validate(self, message: &str) -> Result<AddressFields, AppError> {
        let state =
            StateCode::parse(&self.state).map_err(|_| AppError::validation(message))?;
        let zip_code =
            ZipCode::parse(&self.zip_code).map_err(|_| AppError::validation(message))?;

        Ok(AddressFields {
            street: self.street,
            number: self.number,
            city: self.city,
            state,
            zip_code,
        })
    }
}

/// POST /address
#[instrument(skip(state, user, body))]
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    body: Result<Json<AddressBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    const MESSAGE: &str = "Erro ao salvar o endereço, verifique os dados informados.";

    let Json(body) = body.map_err(|_| AppError::validation(MESSAGE))?;
    let fields = body.validate(MESSAGE)?;

    let address = AddressRepository::new(state.pool())
        .create(
            user.id,
            &fields.street,
            &fields.number,
            &fields.city,
            &fields.state,
            &fields.zip_code,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Endereço criado com sucesso", "address": address })),
    ))
}

/// GET /address - the caller's own addresses
#[instrument(skip(state, user))]
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Value>, AppError> {
    let address = AddressRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(Json(json!({ "address": address })))
}

/// GET /address/admin/list - every address (admin only)
#[instrument(skip(state, _admin))]
pub async fn list_all(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<Value>, AppError> {
    let address = AddressRepository::new(state.pool()).list_all().await?;

    Ok(Json(json!({ "address": address })))
}

/// GET /address/{id}
#[instrument(skip(state, _user))]
pub async fn get(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id: AddressId = id.parse().map_err(|_| {
        AppError::validation("Erro ao buscar o endereço, verifique os dados informados.")
    })?;

    let address = AddressRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Endereço não encontrado"))?;

    Ok(Json(json!({ "address": address })))
}

/// PUT /address/{id}
#[instrument(skip(state, _user, body))]
pub async fn update(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
    body: Result<Json<AddressBody>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    const MESSAGE: &str = "Erro ao editar o endereço, verifique os dados informados.";

    let id: AddressId = id.parse().map_err(|_| AppError::validation(MESSAGE))?;
    let Json(body) = body.map_err(|_| AppError::validation(MESSAGE))?;
    let fields = body.validate(MESSAGE)?;

    let address = AddressRepository::new(state.pool())
        .update(
            id,
            &fields.street,
            &fields.number,
            &fields.city,
            &fields.state,
            &fields.zip_code,
        )
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::not_found("Endereço não encontrado"),
            other => AppError::from(other),
        })?;

    Ok(Json(
        json!({ "message": "Endereço atualizado com sucesso", "address": address }),
    ))
}

/// DELETE /address/{id}
#[instrument(skip(state, _user))]
pub async fn delete(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id: AddressId = id
        .parse()
        .map_err(|_| AppError::validation("Erro ao excluir o endereço"))?;

    let deleted = AddressRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(|e| match e {
            RepositoryError::ForeignKey(_) => {
                AppError::conflict("Endereço está vinculado a pedidos e não pode ser deletado.")
            }
            other => AppError::from(other),
        })?;
    if !deleted {
        return Err(AppError::not_found("Endereço não encontrado"));
    }

    Ok(Json(json!({ "message": "Endereço deletado com sucesso" })))
}
