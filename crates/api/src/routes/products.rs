//! Product CRUD route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use loja_core::{CategoryId, ProductId};

use crate::db::RepositoryError;
use crate::db::products::ProductRepository;
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::models::NewProduct;
use crate::state::AppState;

/// Product create/update request body.
#[derive(Debug, Deserialize)]
pub struct ProductBody {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    pub category_id: String,
}

impl ProductBody {
    /// Parse the category reference, producing the repository input.
    fn into_new_product(self, message: &str) -> Result<NewProduct, AppError> {
        let category_id: CategoryId = self
            .category_id
            .parse()
            .map_err(|_| AppError::validation(message))?;

        Ok(NewProduct {
            name: self.name,
            description: self.description,
            price: self.price,
            image_url: self.image_url,
            category_id,
        })
    }
}

/// POST /products/create
#[instrument(skip(state, _user, body))]
pub async fn create(
    State(state): State<AppState>,
    _user: CurrentUser,
    body: Result<Json<ProductBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    const MESSAGE: &str = "Erro ao criar o produto, verifique os dados informados.";

    let Json(body) = body.map_err(|_| AppError::validation(MESSAGE))?;
    let new_product = body.into_new_product(MESSAGE)?;

    let product = ProductRepository::new(state.pool())
        .create(&new_product)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => AppError::conflict("Produto já existe"),
            RepositoryError::ForeignKey(_) => AppError::validation(MESSAGE),
            other => AppError::from(other),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Produto criado com sucesso", "product": product })),
    ))
}

/// GET /products/list
#[instrument(skip(state, _user))]
pub async fn list(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Value>, AppError> {
    let products = ProductRepository::new(state.pool()).list().await?;

    Ok(Json(json!({ "products": products })))
}

/// GET /products/get/{id}
#[instrument(skip(state))]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id: ProductId = id.parse().map_err(|_| {
        AppError::validation("Erro ao buscar o produto, verifique os dados informados.")
    })?;

    let product = ProductRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Produto não encontrado"))?;

    Ok(Json(json!({ "product": product })))
}

/// PUT /products/update/{id}
#[instrument(skip(state, _user, body))]
pub async fn update(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
    body: Result<Json<ProductBody>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    const MESSAGE: &str = "Erro ao editar um produto, verifique os dados informados.";

    let id: ProductId = id.parse().map_err(|_| AppError::validation(MESSAGE))?;
    let Json(body) = body.map_err(|_| AppError::validation(MESSAGE))?;
    let new_product = body.into_new_product(MESSAGE)?;

    let product = ProductRepository::new(state.pool())
        .update(id, &new_product)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::not_found("Produto não encontrado"),
            RepositoryError::Conflict(_) => AppError::conflict("Produto já existe"),
            RepositoryError::ForeignKey(_) => AppError::validation(MESSAGE),
            other => AppError::from(other),
        })?;

    Ok(Json(
        json!({ "message": "Produto atualizado com sucesso", "product": product }),
    ))
}

/// DELETE /products/delete/{id}
#[instrument(skip(state, _user))]
pub async fn delete(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id: ProductId = id.parse().map_err(|_| {
        AppError::validation("Erro ao deletar um produto, verifique os dados informados.")
    })?;

    let deleted = ProductRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(|e| match e {
            RepositoryError::ForeignKey(_) => {
                AppError::conflict("Produto está vinculado a pedidos e não pode ser deletado.")
            }
            other => AppError::from(other),
        })?;
    if !deleted {
        return Err(AppError::not_found("Produto não encontrado"));
    }

    Ok(Json(json!({ "message": "Produto deletado com sucesso" })))
}
