//! Error types for the entity cache and its service layer
//!
//! `StoreError` is what the backing store surfaces; the cache hands it back
//! untouched. `AppError` is the service-layer error that maps onto HTTP.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Store Error Enum ==
/// Failure surfaced by a backing store call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record with the given id
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// Constraint violation (duplicate, bad reference, ...)
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Store unreachable or in a broken state
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Store call exceeded its deadline
    #[error("Store timeout: {0}")]
    Timeout(String),
}

/// Result of a store call, passed through the cache unchanged.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == App Error Enum ==
/// Unified error type for the service layer.
#[derive(Error, Debug)]
pub enum AppError {
    /// Error raised by the backing store
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Entity rejected by field validation
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Lookup found nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::Constraint(_)) => StatusCode::CONFLICT,
            AppError::Store(StoreError::Connection(_)) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Store(StoreError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the service layer.
pub type Result<T> = std::result::Result<T, AppError>;
