pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{ConnAcquireErr, DbErr};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Error as UuidError;
use validator::ValidationErrors;

/// Standard error response structure.
///
/// Returned for every error response:
/// - `code`: integer error code for logging/monitoring (e.g., 1008)
/// - `error`: machine-readable error identifier (e.g., "CONFLICT")
/// - `message`: human-readable error message
/// - `details`: optional structured details (e.g., validation errors)
///
/// # JSON Example
///
/// ```json
/// {
///   "code": 1008,
///   "error": "CONFLICT",
///   "message": "Product with SKU 'X1' already exists"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details (e.g., validation field errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application error type that can be converted to HTTP responses.
///
/// Domain crates convert their own errors into this type; it is the single
/// place where errors become status codes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("UUID error: {0}")]
    UuidError(#[from] UuidError),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Detail is logged, never sent to the client
    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details, code) = match self {
            AppError::Database(e) => map_db_error(&e),
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::InvalidJson.code(),
                    "JSON extraction error: {:?}",
                    e
                );
                (
                    StatusCode::BAD_REQUEST,
                    e.body_text(),
                    None,
                    ErrorCode::InvalidJson,
                )
            }
            AppError::ValidationError(e) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Validation error: {:?}",
                    e
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::ValidationError.default_message().to_string(),
                    serde_json::to_value(&e).ok(),
                    ErrorCode::ValidationError,
                )
            }
            AppError::UuidError(e) => {
                tracing::warn!(
                    error_code = ErrorCode::InvalidUuid.code(),
                    "UUID error: {:?}",
                    e
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::InvalidUuid.default_message().to_string(),
                    None,
                    ErrorCode::InvalidUuid,
                )
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg, None, ErrorCode::BadRequest)
            }
            AppError::InvalidReference(msg) => {
                tracing::info!(
                    error_code = ErrorCode::InvalidReference.code(),
                    "Invalid reference: {}",
                    msg
                );
                (
                    StatusCode::BAD_REQUEST,
                    msg,
                    None,
                    ErrorCode::InvalidReference,
                )
            }
            AppError::NotFound(msg) => {
                tracing::info!(
                    error_code = ErrorCode::NotFound.code(),
                    "Not found: {}",
                    msg
                );
                (StatusCode::NOT_FOUND, msg, None, ErrorCode::NotFound)
            }
            AppError::Conflict(msg) => {
                tracing::info!(
                    error_code = ErrorCode::Conflict.code(),
                    "Conflict: {}",
                    msg
                );
                (StatusCode::CONFLICT, msg, None, ErrorCode::Conflict)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalError.default_message().to_string(),
                    None,
                    ErrorCode::InternalError,
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code.code(),
            error: code.as_str().to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Maps a DbErr to response components.
///
/// Pool exhaustion is reported as 503; everything else is an opaque 500 with
/// the driver detail kept in the logs.
fn map_db_error(error: &DbErr) -> (StatusCode, String, Option<serde_json::Value>, ErrorCode) {
    match error {
        DbErr::ConnectionAcquire(ConnAcquireErr::Timeout) => {
            tracing::warn!(
                error_code = ErrorCode::DatabasePoolTimeout.code(),
                "Database connection pool timed out"
            );
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::DatabasePoolTimeout.default_message().to_string(),
                None,
                ErrorCode::DatabasePoolTimeout,
            )
        }
        _ => {
            tracing::error!(
                error_code = ErrorCode::DatabaseError.code(),
                "Database error: {:?}",
                error
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::DatabaseError.default_message().to_string(),
                None,
                ErrorCode::DatabaseError,
            )
        }
    }
}

/// Build an error response from a status and code with a custom message.
///
/// # Example
///
/// ```rust,ignore
/// use axum_helpers::errors::{error_response, ErrorCode};
/// use axum::http::StatusCode;
///
/// let response = error_response(
///     StatusCode::BAD_REQUEST,
///     "Invalid input".to_string(),
///     ErrorCode::ValidationError,
/// );
/// ```
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    let body = Json(ErrorResponse {
        code: error_code.code(),
        error: error_code.as_str().to_string(),
        message,
        details: None,
    });

    (status, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn into_parts(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_keeps_message() {
        let (status, body) = into_parts(AppError::NotFound("Product abc not found".into())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 1004);
        assert_eq!(body["error"], "NOT_FOUND");
        assert_eq!(body["message"], "Product abc not found");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_conflict_is_409() {
        let (status, body) = into_parts(AppError::Conflict("duplicate sku".into())).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "CONFLICT");
    }

    #[tokio::test]
    async fn test_invalid_reference_is_400() {
        let (status, body) = into_parts(AppError::InvalidReference("no such category".into())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "INVALID_REFERENCE");
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let (status, body) =
            into_parts(AppError::InternalServerError("connection reset by peer".into())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "An internal server error occurred");
    }

    #[tokio::test]
    async fn test_database_error_hides_detail() {
        let (status, body) =
            into_parts(AppError::Database(DbErr::Custom("relation missing".into()))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "DATABASE_ERROR");
        assert!(!body["message"].as_str().unwrap().contains("relation"));
    }

    #[tokio::test]
    async fn test_pool_timeout_is_503() {
        let err = AppError::Database(DbErr::ConnectionAcquire(ConnAcquireErr::Timeout));
        let (status, body) = into_parts(err).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], 2013);
    }

    #[tokio::test]
    async fn test_uuid_error_is_400() {
        let err = uuid::Uuid::parse_str("not-a-uuid").unwrap_err();
        let (status, body) = into_parts(AppError::from(err)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "INVALID_UUID");
    }
}
