use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use renungan_core::error::CoreError;
use renungan_translate::TranslateError;
use serde_json::json;

use crate::views;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses;
/// HTML handlers wrap it in [`PageError`] instead.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `renungan_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The translation service failed.
    #[error("Translation failed: {0}")]
    Translation(#[from] TranslateError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for JSON handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// HTTP status, machine-readable code and client-safe message.
    pub fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Upstream translation service ---
            AppError::Translation(err) => {
                tracing::error!(error = %err, "Translation error");
                (
                    StatusCode::BAD_GATEWAY,
                    "TRANSLATION_ERROR",
                    "Translation failed".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.classify();

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Error returned by handlers that render HTML. Renders the error page
/// with the same status [`AppError`] would use.
#[derive(Debug)]
pub struct PageError(pub AppError);

/// Convenience type alias for HTML handler return values.
pub type PageResult<T> = Result<T, PageError>;

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        PageError(err)
    }
}

impl From<sqlx::Error> for PageError {
    fn from(err: sqlx::Error) -> Self {
        PageError(AppError::Database(err))
    }
}

impl From<CoreError> for PageError {
    fn from(err: CoreError) -> Self {
        PageError(AppError::Core(err))
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, _code, message) = self.0.classify();
        (status, Html(views::error::render(status, &message))).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_errors_are_bad_gateway() {
        let err = AppError::Translation(TranslateError::NotConfigured);
        let (status, code, _) = err.classify();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(code, "TRANSLATION_ERROR");
    }

    #[test]
    fn not_found_message_names_entity() {
        let err = AppError::Core(CoreError::NotFound {
            entity: "Section",
            id: 7,
        });
        let (status, _, message) = err.classify();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "Section with id 7 not found");
    }

    #[test]
    fn row_not_found_is_404() {
        let (status, code, _) = classify_sqlx_error(&sqlx::Error::RowNotFound);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "NOT_FOUND");
    }
}
