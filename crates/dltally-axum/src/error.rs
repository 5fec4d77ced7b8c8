//! Axum-specific error types and mappings.
//!
//! Maps `CoreError` to HTTP status codes and a JSON error body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dltally_core::CoreError;
use serde::Serialize;
use thiserror::Error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// A blocking storage task panicked or was cancelled.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Internal server error, including every storage failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Storage(storage) => Self::Internal(format!("Storage: {storage}")),
            CoreError::Settings(settings) => Self::Internal(format!("Settings: {settings}")),
            CoreError::Configuration(msg) => Self::Internal(format!("Config: {msg}")),
        }
    }
}

impl From<tokio::task::JoinError> for HttpError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::ServiceUnavailable(format!("Storage task did not complete: {err}"))
    }
}
