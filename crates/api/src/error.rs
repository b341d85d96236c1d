//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures unexpected errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`; every failure becomes the JSON `{"message": …}`
//! envelope the API speaks everywhere.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::orders::OrderError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Order placement failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Malformed or missing input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Duplicate unique key.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing/invalid token or insufficient role.
    #[error("Unauthorized")]
    Unauthorized,

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// 400 with the given client-facing message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// 409 with the given client-facing message.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// 404 with the given client-facing message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

/// JSON error envelope: `{"message": "…"}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

/// Generic message for unexpected failures; detail stays server-side.
const INTERNAL_MESSAGE: &str = "Erro interno do servidor, por favor tente novamente!";

impl AppError {
    /// Status code and client-facing message for this error.
    ///
    /// Internal detail is never exposed: everything that maps to a 500 gets
    /// the same generic message regardless of the underlying cause.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Database(err) => match err {
                RepositoryError::Conflict(_) => {
                    (StatusCode::CONFLICT, "Registro já existe.".to_string())
                }
                RepositoryError::NotFound => (
                    StatusCode::NOT_FOUND,
                    "Registro não encontrado.".to_string(),
                ),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_MESSAGE.to_string(),
                ),
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => (
                    StatusCode::BAD_REQUEST,
                    "E-mail ou senha inválidos.".to_string(),
                ),
                AuthError::EmailTaken => (
                    StatusCode::CONFLICT,
                    "O email que você está tentando cadastrar já existe.".to_string(),
                ),
                AuthError::InvalidEmail(_) | AuthError::InvalidName | AuthError::WeakPassword => (
                    StatusCode::BAD_REQUEST,
                    "Verifique os dados informados.".to_string(),
                ),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_MESSAGE.to_string(),
                ),
            },
            Self::Order(err) => match err {
                OrderError::InvalidItems | OrderError::UnknownAddress => (
                    StatusCode::BAD_REQUEST,
                    "Erro ao criar o pedido, verifique os dados informados.".to_string(),
                ),
                OrderError::ProductsNotFound => (
                    StatusCode::BAD_REQUEST,
                    "Um ou mais produtos não foram encontrados.".to_string(),
                ),
                OrderError::Repository(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro ao criar uma nova ordem, por favor tente novamente!".to_string(),
                ),
            },
            Self::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
            Self::Conflict(message) => (StatusCode::CONFLICT, message.clone()),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message.clone()),
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Não autorizado.".to_string()),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_MESSAGE.to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        // Capture server errors to Sentry; clients only ever see the
        // generic message
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        (status, Json(ErrorBody { message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::not_found("Produto não encontrado");
        assert_eq!(err.to_string(), "Not found: Produto não encontrado");

        let err = AppError::validation("dados inválidos");
        assert_eq!(err.to_string(), "Validation error: dados inválidos");
    }

    #[test]
    fn test_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::not_found("x")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(get_status(AppError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            get_status(AppError::validation("x")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(get_status(AppError::conflict("x")), StatusCode::CONFLICT);
        assert_eq!(
            get_status(AppError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_never_leaks() {
        let (_, message) = AppError::Internal("connection refused at 10.0.0.7".to_string())
            .status_and_message();
        assert_eq!(message, INTERNAL_MESSAGE);
    }

    #[test]
    fn test_order_error_messages() {
        let (status, message) = AppError::Order(OrderError::ProductsNotFound).status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Um ou mais produtos não foram encontrados.");
    }
}
