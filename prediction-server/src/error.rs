//! Error handling

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use diagnosis_core::{ErrorKind, PredictionError};
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Resource errors
    #[error("{0}")]
    NotFound(String),

    // Request body is not a valid prediction request
    #[error("{0}")]
    BadRequest(String),

    // User input errors (missing, invalid or unknown field)
    #[error("{message}")]
    InvalidInput { kind: ErrorKind, message: String },

    // Model failed at inference time
    #[error("prediction unavailable: {0}")]
    PredictionUnavailable(String),

    // Generic errors
    #[error("internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, kind) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.as_str(), None),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.as_str(), None),
            AppError::InvalidInput { kind, message } => {
                (StatusCode::UNPROCESSABLE_ENTITY, message.as_str(), Some(kind.as_str()))
            }
            AppError::PredictionUnavailable(msg) => {
                tracing::error!("Prediction unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, "Prediction unavailable", Some(ErrorKind::ModelInference.as_str()))
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", None)
            }
        };

        let body = Json(json!({
            "error": error_message,
            "kind": kind,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<PredictionError> for AppError {
    fn from(err: PredictionError) -> Self {
        match err.kind() {
            ErrorKind::MissingField | ErrorKind::InvalidValue | ErrorKind::UnknownField => {
                AppError::InvalidInput {
                    kind: err.kind(),
                    message: err.to_string(),
                }
            }
            ErrorKind::ModelInference => AppError::PredictionUnavailable(err.to_string()),
            ErrorKind::SchemaMismatch => AppError::InternalError(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
