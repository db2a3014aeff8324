use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::shell::ShellError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Configuration unavailable: {0}")]
    ConfigUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ShellError> for AppError {
    fn from(err: ShellError) -> Self {
        match err {
            ShellError::Load(e) => AppError::ConfigUnavailable(e.to_string()),
            ShellError::Storage(e) => AppError::Storage(e.to_string()),
            ShellError::Superseded(_) | ShellError::Unavailable(_) => {
                AppError::Conflict(err.to_string())
            }
            ShellError::UnknownKey { .. } => AppError::NotFound(err.to_string()),
            ShellError::RedirectLoop(_) => AppError::Internal(anyhow::anyhow!(err.to_string())),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::ConfigUnavailable(msg) => {
                tracing::error!("Configuration unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "CONFIG_UNAVAILABLE",
                    msg.clone(),
                )
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
