use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors raised by worksheet generation, layout and rendering.
///
/// All of these are synchronous validation or output failures. Nothing is retried.
#[derive(Debug, Error)]
pub enum WorksheetError {
    #[error("Limit must be greater than or equal to 10, got {0}")]
    InvalidLimit(i64),

    #[error("Number of exercises must be between 1 and 10000, got {0}")]
    InvalidCount(i64),

    #[error("Unknown operation: {0}. Allowed: ADDITION,SUBTRACTION,MULTIPLICATION,DIVISION")]
    InvalidOperationName(String),

    #[error("Iterations must be between 1 and 100, got {0}")]
    InvalidIterations(i64),

    #[error("Equations list cannot be empty")]
    EmptyEquationList,

    #[error("Column capacity must be > 0")]
    InvalidColumnCapacity,

    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorksheetError {
    /// True for caller contract violations (bad input), false for output failures.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            WorksheetError::InvalidLimit(_)
                | WorksheetError::InvalidCount(_)
                | WorksheetError::InvalidOperationName(_)
                | WorksheetError::InvalidIterations(_)
                | WorksheetError::EmptyEquationList
                | WorksheetError::InvalidColumnCapacity
        )
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Worksheet(#[from] WorksheetError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Worksheet(e) if e.is_validation() => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Worksheet(e) => {
                tracing::error!("Worksheet output error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    "The worksheet could not be rendered".to_string(),
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
