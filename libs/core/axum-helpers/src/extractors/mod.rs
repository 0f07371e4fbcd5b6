//! Custom extractors for Axum handlers.

pub mod xml;

pub use xml::Xml;
