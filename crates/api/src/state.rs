//! Application state shared across handlers.

use std::sync::Arc;

use jsonwebtoken::{DecodingKey, EncodingKey};
use secrecy::ExposeSecret;
use sqlx::PgPool;

use crate::config::ApiConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool and token signing keys.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    pool: PgPool,
    jwt_encoding_key: EncodingKey,
    jwt_decoding_key: DecodingKey,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The token signing keys are derived once from the configured secret so
    /// handlers never touch the raw secret.
    #[must_use]
    pub fn new(config: ApiConfig, pool: PgPool) -> Self {
        let secret = config.jwt_secret.expose_secret().as_bytes();
        let jwt_encoding_key = EncodingKey::from_secret(secret);
        let jwt_decoding_key = DecodingKey::from_secret(secret);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                jwt_encoding_key,
                jwt_decoding_key,
            }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the token encoding key.
    #[must_use]
    pub fn jwt_encoding_key(&self) -> &EncodingKey {
        &self.inner.jwt_encoding_key
    }

    /// Get a reference to the token decoding key.
    #[must_use]
    pub fn jwt_decoding_key(&self) -> &DecodingKey {
        &self.inner.jwt_decoding_key
    }
}
