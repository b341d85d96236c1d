//! User domain model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use loja_core::{Email, Role, UserId};

/// A registered user.
///
/// The password hash never lives on this struct; repository methods that
/// need it return it separately so it cannot leak into a response body.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
