//! Order repository for database operations.
//!
//! Order creation writes the header row and every item row in a single
//! transaction; a failure anywhere leaves no partial order behind. Item
//! prices are written once and never updated.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use loja_core::{
    AddressId, CategoryId, OrderId, OrderItemId, OrderStatus, ProductId, StateCode, UserId,
    ZipCode,
};

use super::RepositoryError;
use crate::models::{
    Address, NewOrderItem, Order, OrderDetail, OrderItemDetail, OrderWithAddress, Product,
};

/// Internal row type for `PostgreSQL` order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    user_id: Uuid,
    address_id: Uuid,
    status: OrderStatus,
    total: Decimal,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: OrderId::new(row.id),
            user_id: UserId::new(row.user_id),
            address_id: AddressId::new(row.address_id),
            status: row.status,
            total: row.total,
            created_at: row.created_at,
        }
    }
}

/// Order row joined with its delivery address.
#[derive(Debug, sqlx::FromRow)]
struct OrderJoinAddressRow {
    #[sqlx(flatten)]
    order: OrderRow,
    address_user_id: Uuid,
    street: String,
    number: String,
    city: String,
    state: String,
    zip_code: String,
    address_created_at: DateTime<Utc>,
    address_updated_at: DateTime<Utc>,
}

impl TryFrom<OrderJoinAddressRow> for OrderWithAddress {
    type Error = RepositoryError;

    fn try_from(row: OrderJoinAddressRow) -> Result<Self, Self::Error> {
        let state = StateCode::parse(&row.state).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid state code in database: {e}"))
        })?;
        let zip_code = ZipCode::parse(&row.zip_code).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid zip code in database: {e}"))
        })?;

        let address = Address {
            id: AddressId::new(row.order.address_id),
            user_id: UserId::new(row.address_user_id),
            street: row.street,
            number: row.number,
            city: row.city,
            state,
            zip_code,
            created_at: row.address_created_at,
            updated_at: row.address_updated_at,
        };

        Ok(Self {
            order: row.order.into(),
            address,
        })
    }
}

/// Order item row joined with its product.
#[derive(Debug, sqlx::FromRow)]
struct ItemJoinProductRow {
    id: Uuid,
    order_id: Uuid,
    product_id: Uuid,
    quantity: i32,
    price: Decimal,
    product_name: String,
    product_description: String,
    product_price: Decimal,
    product_image_url: Option<String>,
    product_category_id: Uuid,
    product_created_at: DateTime<Utc>,
    product_updated_at: DateTime<Utc>,
}

impl ItemJoinProductRow {
    /// Split into the owning order id and the hydrated item.
    fn into_detail(self) -> (Uuid, OrderItemDetail) {
        let product = Product {
            id: ProductId::new(self.product_id),
            name: self.product_name,
            description: self.product_description,
            price: self.product_price,
            image_url: self.product_image_url,
            category_id: CategoryId::new(self.product_category_id),
            created_at: self.product_created_at,
            updated_at: self.product_updated_at,
        };

        let detail = OrderItemDetail {
            id: OrderItemId::new(self.id),
            product_id: ProductId::new(self.product_id),
            quantity: self.quantity,
            price: self.price,
            product,
        };

        (self.order_id, detail)
    }
}

const ORDER_WITH_ADDRESS_SQL: &str = r"
    SELECT o.id, o.user_id, o.address_id, o.status, o.total, o.created_at,
           a.user_id AS address_user_id, a.street, a.number, a.city, a.state,
           a.zip_code,
           a.created_at AS address_created_at,
           a.updated_at AS address_updated_at
    FROM orders o
    JOIN addresses a ON a.id = o.address_id
";

const ITEMS_WITH_PRODUCT_SQL: &str = r"
    SELECT oi.id, oi.order_id, oi.product_id, oi.quantity, oi.price,
           p.name AS product_name,
           p.description AS product_description,
           p.price AS product_price,
           p.image_url AS product_image_url,
           p.category_id AS product_category_id,
           p.created_at AS product_created_at,
           p.updated_at AS product_updated_at
    FROM order_items oi
    JOIN products p ON p.id = oi.product_id
    WHERE oi.order_id = ANY($1)
";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist an order and its items as a single atomic unit.
    ///
    /// Either the header row and every item row are written, or none are.
    /// Returns the created order with its address relation populated.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::ForeignKey` if the address or a product
    /// doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        user_id: UserId,
        address_id: AddressId,
        total: Decimal,
        items: &[NewOrderItem],
    ) -> Result<OrderWithAddress, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order: OrderRow = sqlx::query_as(
            r"
            INSERT INTO orders (user_id, address_id, status, total)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, address_id, status, total, created_at
            ",
        )
        .bind(user_id)
        .bind(address_id)
        .bind(OrderStatus::Pending)
        .bind(total)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "duplicate order", "unknown address"))?;

        for item in items {
            sqlx::query(
                r"
                INSERT INTO order_items (order_id, product_id, quantity, price)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(order.id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.price)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::from_sqlx(e, "duplicate item", "unknown product"))?;
        }

        let row: OrderJoinAddressRow =
            sqlx::query_as(&format!("{ORDER_WITH_ADDRESS_SQL} WHERE o.id = $1"))
                .bind(order.id)
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;

        row.try_into()
    }

    /// List a user's orders, newest first, with address and items hydrated.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<OrderDetail>, RepositoryError> {
        let rows: Vec<OrderJoinAddressRow> = sqlx::query_as(&format!(
            "{ORDER_WITH_ADDRESS_SQL} WHERE o.user_id = $1 ORDER BY o.created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        self.hydrate_items(rows).await
    }

    /// List every order in the system, newest first (admin listing).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list_all(&self) -> Result<Vec<OrderDetail>, RepositoryError> {
        let rows: Vec<OrderJoinAddressRow> =
            sqlx::query_as(&format!("{ORDER_WITH_ADDRESS_SQL} ORDER BY o.created_at DESC"))
                .fetch_all(self.pool)
                .await?;

        self.hydrate_items(rows).await
    }

    /// Set an order's status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let row: Option<OrderRow> = sqlx::query_as(
            r"
            UPDATE orders
            SET status = $2
            WHERE id = $1
            RETURNING id, user_id, address_id, status, total, created_at
            ",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(self.pool)
        .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Attach items (with products) to a page of order rows.
    async fn hydrate_items(
        &self,
        rows: Vec<OrderJoinAddressRow>,
    ) -> Result<Vec<OrderDetail>, RepositoryError> {
        let order_ids: Vec<Uuid> = rows.iter().map(|r| r.order.id).collect();

        let item_rows: Vec<ItemJoinProductRow> = sqlx::query_as(ITEMS_WITH_PRODUCT_SQL)
            .bind(&order_ids)
            .fetch_all(self.pool)
            .await?;

        let mut items_by_order: HashMap<Uuid, Vec<OrderItemDetail>> = HashMap::new();
        for item_row in item_rows {
            let (order_id, detail) = item_row.into_detail();
            items_by_order.entry(order_id).or_default().push(detail);
        }

        rows.into_iter()
            .map(|row| {
                let order_id = row.order.id;
                let with_address: OrderWithAddress = row.try_into()?;
                Ok(OrderDetail {
                    order: with_address.order,
                    address: with_address.address,
                    items: items_by_order.remove(&order_id).unwrap_or_default(),
                })
            })
            .collect()
    }
}
