use axum::{
    http::Uri,
    response::{IntoResponse, Response},
};

use super::AppError;

/// Fallback handler for unmatched routes.
pub async fn not_found(uri: Uri) -> Response {
    AppError::PageNotFound(uri.path().to_string()).into_response()
}
