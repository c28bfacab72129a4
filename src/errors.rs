use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::models::ErrorResponse;

/// Top-level application error.
/// Every variant is reported to the caller as HTTP 500 with its display text.
#[derive(Debug, Error)]
pub enum AppError {
    // ── Request errors ───────────────────────────────────────────────────────
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Messages must be an array!")]
    NotAnArray,

    #[error("Conversation must contain at least one message.")]
    EmptyConversation,

    #[error("Message text is required for all conversation parts.")]
    MissingText,

    #[error("Unknown role: {role}")]
    UnknownRole { role: String },

    // ── Provider errors ──────────────────────────────────────────────────────
    #[error("{message}")]
    Provider { message: String },

    #[error("Failed to build provider client: {0}")]
    ClientBuild(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse { error: self.to_string() };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_message_verbatim() {
        let err = AppError::Provider { message: "quota exceeded".to_string() };
        assert_eq!(err.to_string(), "quota exceeded");
    }

    #[test]
    fn validation_errors_map_to_internal_server_error() {
        let resp = AppError::NotAnArray.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
