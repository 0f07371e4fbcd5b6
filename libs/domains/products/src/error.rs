use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product with id {0} not found")]
    NotFound(i32),

    /// Update target does not exist
    #[error("Product with id {0} does not exist")]
    UnknownProduct(i32),

    #[error("No products owned by {0}")]
    NoProductsOwnedBy(String),

    #[error("No products with price {}", price_label(*.0))]
    NoProductsWithPrice(Option<i32>),

    #[error("{0}")]
    WrongType(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidQuery(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProductError {
    /// `"{param} should be of type {ty}"`
    pub fn wrong_type(param: &str, ty: &str) -> Self {
        ProductError::WrongType(format!("{} should be of type {}", param, ty))
    }
}

fn price_label(price: Option<i32>) -> String {
    price.map_or_else(|| "null".to_string(), |p| p.to_string())
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) | ProductError::NoProductsWithPrice(_) => {
                AppError::NotFound(err.to_string())
            }
            ProductError::UnknownProduct(_) | ProductError::NoProductsOwnedBy(_) => {
                AppError::BadRequest(err.to_string())
            }
            ProductError::WrongType(msg) => AppError::WrongType(msg),
            ProductError::Validation(msg) => AppError::Validation(msg),
            ProductError::InvalidQuery(msg) => AppError::InvalidQuery(msg),
            ProductError::InvalidData(msg) => AppError::InvalidData(msg),
            ProductError::Database(e) => AppError::Database(e),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn status(err: ProductError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status(ProductError::NotFound(1)), StatusCode::NOT_FOUND);
        assert_eq!(status(ProductError::UnknownProduct(1)), StatusCode::BAD_REQUEST);
        assert_eq!(
            status(ProductError::NoProductsOwnedBy("Ann".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(ProductError::NoProductsWithPrice(None)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(ProductError::wrong_type("Id", "int")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(ProductError::Database(sea_orm::DbErr::Custom("down".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ProductError::wrong_type("Price", "Integer").to_string(),
            "Price should be of type Integer"
        );
        assert_eq!(
            ProductError::NoProductsWithPrice(None).to_string(),
            "No products with price null"
        );
        assert_eq!(
            ProductError::NoProductsWithPrice(Some(5)).to_string(),
            "No products with price 5"
        );
    }
}
