//! Order route handlers.
//!
//! Placement delegates the pricing and atomic persistence to
//! [`OrderService`]; the admin routes list every order and move orders
//! between statuses.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use loja_core::{AddressId, OrderId, OrderStatus, ProductId};

use crate::db::RepositoryError;
use crate::db::orders::OrderRepository;
use crate::error::AppError;
use crate::middleware::{CurrentUser, RequireAdmin};
use crate::services::orders::{OrderDraftItem, OrderService};
use crate::state::AppState;

/// Order creation request body.
#[derive(Debug, Deserialize)]
pub struct CreateOrderBody {
    pub address_id: String,
    pub items: Vec<OrderItemBody>,
}

/// A requested line item.
#[derive(Debug, Deserialize)]
pub struct OrderItemBody {
    pub product_id: String,
    pub quantity: i32,
}

/// Status update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderBody {
    pub status: OrderStatus,
}

/// POST /order/create
#[instrument(skip(state, user, body))]
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    body: Result<Json<CreateOrderBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    const MESSAGE: &str = "Erro ao criar o pedido, verifique os dados informados.";

    let Json(body) = body.map_err(|_| AppError::validation(MESSAGE))?;

    let address_id: AddressId = body
        .address_id
        .parse()
        .map_err(|_| AppError::validation(MESSAGE))?;

    let items = body
        .items
        .iter()
        .map(|item| {
            let product_id: ProductId = item
                .product_id
                .parse()
                .map_err(|_| AppError::validation(MESSAGE))?;
            Ok(OrderDraftItem {
                product_id,
                quantity: item.quantity,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    let order = OrderService::new(state.pool())
        .place(user.id, address_id, &items)
        .await?;

    Ok((StatusCode::CREATED, Json(json!(order))))
}

/// GET /order/list - the caller's own orders
#[instrument(skip(state, user))]
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Value>, AppError> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(Json(json!(orders)))
}

/// GET /order/admin/list-all (admin only)
#[instrument(skip(state, _admin))]
pub async fn list_all(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<Value>, AppError> {
    let orders = OrderRepository::new(state.pool()).list_all().await?;

    Ok(Json(json!(orders)))
}

/// PUT /order/admin/update/{id} (admin only)
///
/// Accepts any of the four statuses; no transition graph is enforced.
#[instrument(skip(state, _admin, body))]
pub async fn update_status(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
    body: Result<Json<UpdateOrderBody>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    const MESSAGE: &str = "Erro ao atualizar o pedido, verifique os dados informados.";

    let id: OrderId = id.parse().map_err(|_| AppError::validation(MESSAGE))?;
    let Json(body) = body.map_err(|_| AppError::validation(MESSAGE))?;

    let order = OrderRepository::new(state.pool())
        .update_status(id, body.status)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::not_found("Pedido não encontrado"),
            other => AppError::from(other),
        })?;

    Ok(Json(json!(order)))
}
