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

    /// The editor refused to change the document. The original travels back
    /// untouched so the caller never loses it.
    #[error("Edit failed: {message}")]
    EditFailed {
        message: String,
        original_document: String,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, original_document) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg, None),
            AppError::EditFailed {
                message,
                original_document,
            } => {
                tracing::warn!("Edit failed: {message}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EDIT_FAILED",
                    message,
                    Some(original_document),
                )
            }
        };

        let mut body = json!({
            "error": {
                "code": code,
                "message": message
            }
        });
        if let Some(original) = original_document {
            body["original_document"] = json!(original);
        }

        (status, Json(body)).into_response()
    }
}
