//! Type-safe error codes for logging and monitoring.
//!
//! Error bodies are plain text, so the codes never reach the client. They are
//! attached to the `error_code` field of every error log line instead.
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::InvalidData;
//! assert_eq!(code.as_str(), "INVALID_DATA");
//! assert_eq!(code.code(), 1002);
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request payload failed field validation
    ValidationError,

    /// Request body could not be parsed
    InvalidData,

    /// Path or query parameter has the wrong type
    WrongType,

    /// Filter, sort or paging parameters are not acceptable
    InvalidQuery,

    /// Requested resource was not found
    NotFound,

    /// No route matched the request path
    PageNotFound,

    // Server errors
    /// An unexpected internal server error occurred
    InternalError,

    /// Service is temporarily unavailable
    ServiceUnavailable,

    /// Response body could not be serialized
    SerializationError,

    // Database errors (2000-2999)
    /// Database connection or query error
    DatabaseError,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidData => "INVALID_DATA",
            Self::WrongType => "WRONG_TYPE",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::NotFound => "NOT_FOUND",
            Self::PageNotFound => "PAGE_NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::SerializationError => "SERIALIZATION_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
        }
    }

    /// Integer code for logs and metrics.
    ///
    /// - 1000-1999: client errors
    /// - 2000-2999: database errors
    /// - 5000-5999: serialization errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidData => 1002,
            Self::WrongType => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::InvalidQuery => 1006,
            Self::PageNotFound => 1007,
            Self::ServiceUnavailable => 1011,
            Self::DatabaseError => 2003,
            Self::SerializationError => 5001,
        }
    }

    /// Default plain-text message for the error class.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidData => "Invalid data",
            Self::WrongType => "Parameter has the wrong type",
            Self::InvalidQuery => "Invalid query parameters",
            Self::NotFound => "Resource not found",
            Self::PageNotFound => "Page not found",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::SerializationError => "Failed to serialize response",
            Self::DatabaseError => "Database error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
