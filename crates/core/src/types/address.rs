//! Brazilian address field types.
//!
//! Shipping addresses carry a two-letter state code (UF) and a CEP postal
//! code in the `NNNNN-NNN` format. Both are parse-validated newtypes so a
//! malformed value never reaches the database.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`StateCode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum StateCodeError {
    /// The input is not exactly two characters.
    #[error("state code must be exactly 2 letters")]
    WrongLength,
    /// The input contains something other than ASCII letters.
    #[error("state code must contain only letters")]
    NotAlphabetic,
}

/// A two-letter Brazilian state code (UF), stored uppercase.
///
/// ```
/// use loja_core::StateCode;
///
/// let uf = StateCode::parse("sp").unwrap();
/// assert_eq!(uf.as_str(), "SP");
/// assert!(StateCode::parse("S1").is_err());
/// assert!(StateCode::parse("SAO").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct StateCode(String);

impl StateCode {
    /// Parse a `StateCode` from a string, normalizing to uppercase.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly two ASCII letters.
    pub fn parse(s: &str) -> Result<Self, StateCodeError> {
        if s.chars().count() != 2 {
            return Err(StateCodeError::WrongLength);
        }
        if !s.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(StateCodeError::NotAlphabetic);
        }
        Ok(Self(s.to_ascii_uppercase()))
    }

    /// Returns the state code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for StateCode {
    type Err = StateCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Errors that can occur when parsing a [`ZipCode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum ZipCodeError {
    /// The input does not match the `NNNNN-NNN` pattern.
    #[error("zip code must match the NNNNN-NNN pattern")]
    InvalidFormat,
}

/// A Brazilian CEP postal code in the fixed `NNNNN-NNN` format.
///
/// ```
/// use loja_core::ZipCode;
///
/// assert!(ZipCode::parse("01310-100").is_ok());
/// assert!(ZipCode::parse("01310100").is_err());
/// assert!(ZipCode::parse("1310-100").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ZipCode(String);

impl ZipCode {
    /// Parse a `ZipCode` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error unless the input is exactly five digits, a hyphen,
    /// and three digits.
    pub fn parse(s: &str) -> Result<Self, ZipCodeError> {
        let bytes = s.as_bytes();
        if bytes.len() != 9 {
            return Err(ZipCodeError::InvalidFormat);
        }
        let valid = bytes.iter().enumerate().all(|(i, b)| {
            if i == 5 {
                *b == b'-'
            } else {
                b.is_ascii_digit()
            }
        });
        if !valid {
            return Err(ZipCodeError::InvalidFormat);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the zip code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ZipCode {
    type Err = ZipCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
macro_rules! impl_pg_text {
    ($name:ident) => {
        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
                // Database values are assumed valid
                Ok(Self(s))
            }
        }

        impl sqlx::Encode<'_, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }
    };
}

#[cfg(feature = "postgres")]
impl_pg_text!(StateCode);
#[cfg(feature = "postgres")]
impl_pg_text!(ZipCode);
