use std::any::Any;

use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use records_core::error::CoreError;
use serde_json::json;

/// Body message of every 500 response. Callers get no detail beyond this.
pub const INTERNAL_ERROR_MESSAGE: &str =
    "Our developers made a mistake, sorry ☹️. He will get a lower salary! 😄";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce `{ "message": ... }` bodies.
///
/// Only malformed client input is reported as such (400). Every other
/// failure, including a missing record on update or delete, is logged and
/// answered with the same generic 500.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `records_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Core(CoreError::Validation(msg)) | AppError::BadRequest(msg) => {
                tracing::debug!(error = %msg, "Rejected client input");
                (StatusCode::BAD_REQUEST, axum::Json(json!({ "message": msg }))).into_response()
            }
            AppError::Core(CoreError::NotFound { entity, id }) => {
                tracing::error!(entity = *entity, id = *id, "Entity not found");
                internal_error_response()
            }
            AppError::Core(CoreError::Internal(msg)) | AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_error_response()
            }
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                internal_error_response()
            }
        }
    }
}

/// The fixed 500 response.
pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(json!({ "message": INTERNAL_ERROR_MESSAGE })),
    )
        .into_response()
}

/// Panic handler for `CatchPanicLayer::custom`: log the payload and answer
/// with the fixed 500.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "Handler panicked");
    internal_error_response()
}

// ---------------------------------------------------------------------------
// Extractor rejections
// ---------------------------------------------------------------------------

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
