pub mod codes;
pub mod handlers;

pub use codes::ErrorCode;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use thiserror::Error;

/// Application error type that can be converted to HTTP responses.
///
/// Every variant renders as a fixed status code and a plain-text body. Details
/// that should not leak to clients (parser and database messages) are logged
/// with the variant's [`ErrorCode`] and replaced by the code's default message.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Wrong type: {0}")]
    WrongType(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// Code attached to the log line of this error.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::InvalidData(_) => ErrorCode::InvalidData,
            AppError::Validation(_) | AppError::BadRequest(_) => ErrorCode::ValidationError,
            AppError::WrongType(_) => ErrorCode::WrongType,
            AppError::InvalidQuery(_) => ErrorCode::InvalidQuery,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::PageNotFound(_) => ErrorCode::PageNotFound,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::Serialization(_) => ErrorCode::SerializationError,
            AppError::InternalServerError(_) => ErrorCode::InternalError,
            AppError::ServiceUnavailable(_) => ErrorCode::ServiceUnavailable,
        }
    }

    /// Status code and client-facing message for this error. Logs it on the way.
    fn parts(self) -> (StatusCode, String) {
        let code = self.error_code();
        match self {
            AppError::InvalidData(detail) => {
                tracing::info!(error_code = code.code(), "Invalid request body: {}", detail);
                (StatusCode::BAD_REQUEST, code.default_message().to_string())
            }
            AppError::Validation(msg) => {
                tracing::info!(error_code = code.code(), "Validation error: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::WrongType(msg) => {
                tracing::info!(error_code = code.code(), "Wrong type: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::InvalidQuery(msg) => {
                tracing::info!(error_code = code.code(), "Invalid query: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::BadRequest(msg) => {
                tracing::info!(error_code = code.code(), "Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = code.code(), "Not found: {}", msg);
                (StatusCode::NOT_FOUND, msg)
            }
            AppError::PageNotFound(path) => {
                tracing::info!(
                    error_code = code.code(),
                    path = %path,
                    "No route for path"
                );
                (StatusCode::NOT_FOUND, code.default_message().to_string())
            }
            AppError::Database(e) => {
                tracing::error!(error_code = code.code(), "Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, code.default_message().to_string())
            }
            AppError::Serialization(detail) => {
                tracing::error!(error_code = code.code(), "Serialization error: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, code.default_message().to_string())
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(error_code = code.code(), "Internal server error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!(error_code = code.code(), "Service unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, msg)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.parts();
        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: AppError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_data_hides_parser_detail() {
        let (status, body) = render(AppError::InvalidData("missing field `name`".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Invalid data");
    }

    #[tokio::test]
    async fn test_client_errors_keep_message() {
        let (status, body) = render(AppError::WrongType("Id should be of type int".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Id should be of type int");

        let (status, body) = render(AppError::NotFound("Product 7 not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Product 7 not found");
    }

    #[tokio::test]
    async fn test_database_error_is_internal() {
        let (status, body) = render(AppError::Database(DbErr::Custom("boom".into()))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Database error occurred");
    }

    #[tokio::test]
    async fn test_bad_request_is_logged_as_validation_error() {
        let err = AppError::BadRequest("Product with id 9 does not exist".into());
        assert_eq!(err.error_code(), ErrorCode::ValidationError);

        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Product with id 9 does not exist");
    }

    #[test]
    fn test_every_error_has_a_code() {
        assert_eq!(
            AppError::InvalidQuery("x".into()).error_code(),
            ErrorCode::InvalidQuery
        );
        assert_eq!(
            AppError::PageNotFound("/x".into()).error_code(),
            ErrorCode::PageNotFound
        );
        assert_eq!(
            AppError::Database(DbErr::Custom("x".into())).error_code(),
            ErrorCode::DatabaseError
        );
    }

    #[tokio::test]
    async fn test_body_is_plain_text() {
        let response = AppError::PageNotFound("/nowhere".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let content_type = response.headers()["content-type"].to_str().unwrap();
        assert!(content_type.starts_with("text/plain"));
    }
}
