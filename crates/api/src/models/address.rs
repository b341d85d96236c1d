//! Address domain model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use loja_core::{AddressId, StateCode, UserId, ZipCode};

/// A user address book entry.
#[derive(Debug, Clone, Serialize)]
pub struct Address {
    pub id: AddressId,
    pub user_id: UserId,
    pub street: String,
    pub number: String,
    pub city: String,
    pub state: StateCode,
    pub zip_code: ZipCode,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Shallow owner reference embedded in address responses.
#[derive(Debug, Clone, Serialize)]
pub struct AddressOwner {
    pub id: UserId,
    pub name: String,
}

/// An address with its owner embedded.
#[derive(Debug, Clone, Serialize)]
pub struct AddressWithUser {
    #[serde(flatten)]
    pub address: Address,
    pub user: AddressOwner,
}
