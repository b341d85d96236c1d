//! Order placement service.
//!
//! This is where an order draft becomes a priced, persisted order:
//! referenced products are resolved in one lookup, each line gets a price
//! snapshot taken from the catalog at this moment, and the header plus item
//! rows are written in a single transaction. An unknown product anywhere in
//! the draft rejects the whole order.

use std::collections::{BTreeSet, HashMap};

use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

use loja_core::{AddressId, ProductId, UserId};

use crate::db::RepositoryError;
use crate::db::orders::OrderRepository;
use crate::db::products::ProductRepository;
use crate::models::{NewOrderItem, OrderWithAddress, Product};

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Empty item list or a non-positive quantity.
    #[error("invalid order items")]
    InvalidItems,

    /// One or more referenced products don't exist.
    #[error("one or more products not found")]
    ProductsNotFound,

    /// The delivery address doesn't exist.
    #[error("unknown address")]
    UnknownAddress,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// A requested line item, before pricing.
#[derive(Debug, Clone, Copy)]
pub struct OrderDraftItem {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Order placement service.
pub struct OrderService<'a> {
    products: ProductRepository<'a>,
    orders: OrderRepository<'a>,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            products: ProductRepository::new(pool),
            orders: OrderRepository::new(pool),
        }
    }

    /// Place an order for a user.
    ///
    /// Resolves every referenced product, snapshots current prices, computes
    /// the total and persists the order atomically. The created order always
    /// starts as `PENDING`.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::InvalidItems` if the draft is empty or has a
    /// non-positive quantity.
    /// Returns `OrderError::ProductsNotFound` if any product id is unknown;
    /// nothing is persisted in that case.
    /// Returns `OrderError::UnknownAddress` if the address doesn't exist.
    pub async fn place(
        &self,
        user_id: UserId,
        address_id: AddressId,
        items: &[OrderDraftItem],
    ) -> Result<OrderWithAddress, OrderError> {
        if items.is_empty() || items.iter().any(|item| item.quantity < 1) {
            return Err(OrderError::InvalidItems);
        }

        // Single lookup over the distinct id set
        let distinct: BTreeSet<ProductId> = items.iter().map(|item| item.product_id).collect();
        let ids: Vec<ProductId> = distinct.into_iter().collect();
        let products = self.products.resolve_by_ids(&ids).await?;

        let (line_items, total) = price_items(items, &ids, &products)?;

        self.orders
            .create(user_id, address_id, total, &line_items)
            .await
            .map_err(|e| match e {
                RepositoryError::ForeignKey(_) => OrderError::UnknownAddress,
                other => OrderError::Repository(other),
            })
    }
}

/// Snapshot prices for a draft and compute the order total.
///
/// `resolved` must come from a lookup over `distinct_ids`; a count mismatch
/// means at least one requested product doesn't exist, which rejects the
/// entire draft.
fn price_items(
    items: &[OrderDraftItem],
    distinct_ids: &[ProductId],
    resolved: &[Product],
) -> Result<(Vec<NewOrderItem>, Decimal), OrderError> {
    if resolved.len() != distinct_ids.len() {
        return Err(OrderError::ProductsNotFound);
    }

    let by_id: HashMap<ProductId, &Product> =
        resolved.iter().map(|product| (product.id, product)).collect();

    let mut line_items = Vec::with_capacity(items.len());
    let mut total = Decimal::ZERO;

    for item in items {
        let product = by_id
            .get(&item.product_id)
            .ok_or(OrderError::ProductsNotFound)?;

        // Price snapshot: later catalog changes never touch this order
        let price = product.price;
        total += price * Decimal::from(item.quantity);

        line_items.push(NewOrderItem {
            product_id: item.product_id,
            quantity: item.quantity,
            price,
        });
    }

    Ok((line_items, total))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use loja_core::CategoryId;
    use rust_decimal_macros::dec;

    fn product(id: ProductId, price: Decimal) -> Product {
        Product {
            id,
            name: format!("produto-{id}"),
            description: "produto de teste".to_string(),
            price,
            image_url: None,
            category_id: CategoryId::new(uuid::Uuid::new_v4()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn pid() -> ProductId {
        ProductId::new(uuid::Uuid::new_v4())
    }

    #[test]
    fn test_total_is_sum_of_price_times_quantity() {
        let p1 = pid();
        let p2 = pid();
        let products = vec![product(p1, dec!(10.00)), product(p2, dec!(5.50))];
        let items = vec![
            OrderDraftItem {
                product_id: p1,
                quantity: 2,
            },
            OrderDraftItem {
                product_id: p2,
                quantity: 1,
            },
        ];
        let mut ids = vec![p1, p2];
        ids.sort();

        let (line_items, total) = price_items(&items, &ids, &products).unwrap();

        assert_eq!(total, dec!(25.50));
        assert_eq!(line_items.len(), 2);
        assert_eq!(line_items[0].price, dec!(10.00));
        assert_eq!(line_items[1].price, dec!(5.50));
    }

    #[test]
    fn test_missing_product_rejects_entire_order() {
        let p1 = pid();
        let missing = pid();
        let products = vec![product(p1, dec!(10.00))];
        let items = vec![
            OrderDraftItem {
                product_id: p1,
                quantity: 1,
            },
            OrderDraftItem {
                product_id: missing,
                quantity: 1,
            },
        ];
        let mut ids = vec![p1, missing];
        ids.sort();

        assert!(matches!(
            price_items(&items, &ids, &products),
            Err(OrderError::ProductsNotFound)
        ));
    }

    #[test]
    fn test_duplicate_product_ids_price_each_line() {
        let p1 = pid();
        let products = vec![product(p1, dec!(3.25))];
        let items = vec![
            OrderDraftItem {
                product_id: p1,
                quantity: 2,
            },
            OrderDraftItem {
                product_id: p1,
                quantity: 3,
            },
        ];

        // Two lines for the same product resolve against one catalog row
        let (line_items, total) = price_items(&items, &[p1], &products).unwrap();

        assert_eq!(line_items.len(), 2);
        assert_eq!(total, dec!(16.25));
    }

    #[test]
    fn test_snapshot_is_taken_from_resolved_product() {
        let p1 = pid();
        let products = vec![product(p1, dec!(99.90))];
        let items = vec![OrderDraftItem {
            product_id: p1,
            quantity: 1,
        }];

        let (line_items, _) = price_items(&items, &[p1], &products).unwrap();
        assert_eq!(line_items[0].price, dec!(99.90));
    }
}
