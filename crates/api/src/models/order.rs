//! Order domain model.
//!
//! An order owns its items; each item carries the product price captured at
//! order-creation time. That snapshot is immutable - later catalog price
//! changes never touch stored orders.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use loja_core::{AddressId, OrderId, OrderItemId, OrderStatus, ProductId, UserId};

use super::address::Address;
use super::product::Product;

/// An order header row.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub address_id: AddressId,
    pub status: OrderStatus,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

/// An order with its delivery address embedded (creation response).
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithAddress {
    #[serde(flatten)]
    pub order: Order,
    pub address: Address,
}

/// An order item with its product embedded (listing responses).
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemDetail {
    pub id: OrderItemId,
    pub product_id: ProductId,
    pub quantity: i32,
    /// Price captured when the order was placed.
    pub price: Decimal,
    pub product: Product,
}

/// A fully-hydrated order: address plus items with their products.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub address: Address,
    pub items: Vec<OrderItemDetail>,
}

/// A priced line item ready to be persisted with its order.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub quantity: i32,
    /// Snapshot of the product price at order-creation time.
    pub price: Decimal,
}
