//! XML request extractor and response type.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Request},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use serde::{Serialize, de::DeserializeOwned};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// XML body extractor and response, the XML counterpart of `axum::Json`.
///
/// As an extractor the root element name is not checked, only its children.
/// Any read or parse failure is rejected with [`AppError::InvalidData`].
///
/// As a response the value is serialized with its serde name as the root
/// element and sent as `application/xml`.
///
/// # Example
/// ```ignore
/// use axum_helpers::Xml;
///
/// async fn echo(Xml(person): Xml<Person>) -> Xml<Person> {
///     Xml(person)
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Xml<T>(pub T);

impl<T, S> FromRequest<S> for Xml<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = String::from_request(req, state)
            .await
            .map_err(|e| AppError::InvalidData(e.body_text()))?;

        from_xml(&body).map(Xml)
    }
}

impl<T> IntoResponse for Xml<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        match to_xml(&self.0) {
            Ok(body) => (
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/xml"),
                )],
                body,
            )
                .into_response(),
            Err(err) => err.into_response(),
        }
    }
}

/// Parse an XML document into `T`.
pub fn from_xml<T: DeserializeOwned>(body: &str) -> Result<T, AppError> {
    quick_xml::de::from_str(body).map_err(|e| AppError::InvalidData(e.to_string()))
}

/// Serialize `T` into an XML document with a declaration.
pub fn to_xml<T: Serialize>(value: &T) -> Result<String, AppError> {
    let body = quick_xml::se::to_string(value).map_err(|e| AppError::Serialization(e.to_string()))?;
    Ok(format!("{XML_DECLARATION}{body}"))
}
