//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use planhub_core::error::{AppError, ErrorKind};

/// HTTP-facing wrapper around the domain [`AppError`].
///
/// `IntoResponse` cannot be implemented on `AppError` here (both trait and
/// type are foreign to this crate), so handlers and extractors use this
/// newtype as their error type; `?` converts via `From<AppError>`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, error_code, message) = match &err.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.message.clone()),
            ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", err.message.clone()),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", err.message.clone()),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT", err.message.clone()),
            ErrorKind::SnapshotUnavailable => (
                StatusCode::BAD_REQUEST,
                "SNAPSHOT_UNAVAILABLE",
                err.message.clone(),
            ),
            ErrorKind::UnsupportedItemType => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNSUPPORTED_ITEM_TYPE",
                err.message.clone(),
            ),
            ErrorKind::ReplayFailed => {
                // The cause stays in the log; the response carries only a
                // generic message.
                tracing::error!(error = %err.message, source = ?err.source, "Replay failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "REPLAY_FAILED",
                    "Undo/redo could not be applied".to_string(),
                )
            }
            ErrorKind::Serialization | ErrorKind::Database | ErrorKind::Configuration | ErrorKind::Internal => {
                tracing::error!(error = %err.message, source = ?err.source, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
