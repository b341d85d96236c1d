//! Order status enum.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
///
/// Every order is created as `Pending`; the admin status-update route may
/// move an order to any other status. No transition graph is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "order_status", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Delivered,
    Canceled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Preparing => write!(f, "PREPARING"),
            Self::Delivered => write!(f, "DELIVERED"),
            Self::Canceled => write!(f, "CANCELED"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_form() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"PENDING\""
        );
        let status: OrderStatus = serde_json::from_str("\"DELIVERED\"").unwrap();
        assert_eq!(status, OrderStatus::Delivered);
    }

    #[test]
    fn test_rejects_unknown_status() {
        assert!(serde_json::from_str::<OrderStatus>("\"SHIPPED\"").is_err());
        assert!(serde_json::from_str::<OrderStatus>("\"pending\"").is_err());
    }

    #[test]
    fn test_default_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }
}
