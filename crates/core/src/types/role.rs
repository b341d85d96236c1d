//! User roles.

use serde::{Deserialize, Serialize};

/// Access role carried by every user and embedded in auth tokens.
///
/// The wire form is SCREAMING_SNAKE_CASE (`"ADMIN"` / `"USER"`), matching the
/// values stored in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full access, including the admin-gated routes.
    Admin,
    /// Regular customer account.
    #[default]
    User,
}

impl Role {
    /// Whether this role passes the admin gate.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "ADMIN"),
            Self::User => write!(f, "USER"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "USER" => Ok(Self::User),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_form() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"USER\"");

        let role: Role = serde_json::from_str("\"ADMIN\"").unwrap();
        assert!(role.is_admin());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("USER".parse::<Role>().unwrap(), Role::User);
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_default_is_user() {
        assert_eq!(Role::default(), Role::User);
    }
}
