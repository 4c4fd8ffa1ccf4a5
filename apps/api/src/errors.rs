#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Gemini error: {0}")]
    Gemini(String),

    #[error("Sheets error: {0}")]
    Sheets(String),

    #[error("Sheets export is not configured")]
    SheetsNotConfigured,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            // Provider messages are surfaced verbatim: the frontend shows them
            // to the user as transient notifications.
            AppError::Gemini(msg) => {
                tracing::error!("Gemini error: {msg}");
                (StatusCode::BAD_GATEWAY, "GENERATION_ERROR", msg.clone())
            }
            AppError::Sheets(msg) => {
                tracing::error!("Sheets error: {msg}");
                (StatusCode::BAD_GATEWAY, "SHEETS_ERROR", msg.clone())
            }
            AppError::SheetsNotConfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SHEETS_NOT_CONFIGURED",
                "Pour activer la création de Google Sheets, un administrateur doit configurer \
                 la variable d'environnement GOOGLE_CLIENT_ID."
                    .to_string(),
            ),
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
