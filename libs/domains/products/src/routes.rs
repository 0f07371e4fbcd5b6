//! Dispatch of `/products` sub-paths.
//!
//! GET and DELETE share one wildcard route each; the path after `/products`
//! (the path info) picks the operation here. Parameters are kept as raw text
//! and converted with [`parse_id`] / [`parse_price`] so that type errors get
//! their own messages.

use crate::error::{ProductError, ProductResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetRoute<'a> {
    /// `/id/{id}`, with no further segments
    ById(&'a str),
    /// `/manufacture-cost/average`
    AverageManufactureCost,
    /// Anything else; the path info is a filter
    List(Option<&'a str>),
}

impl<'a> GetRoute<'a> {
    pub fn parse(path_info: Option<&'a str>) -> Self {
        if let Some(id) = path_info.and_then(|p| p.strip_prefix("/id/")) {
            if !id.contains('/') {
                return GetRoute::ById(id);
            }
        }

        match path_info {
            Some("/manufacture-cost/average") => GetRoute::AverageManufactureCost,
            other => GetRoute::List(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteRoute<'a> {
    /// `/id/{id}`
    ById(&'a str),
    /// `/owner`, Person in the body
    ByOwner,
    /// `/price/{price}`; an empty price selects products without one
    ByPrice(&'a str),
    NotFound,
}

impl<'a> DeleteRoute<'a> {
    pub fn parse(path_info: Option<&'a str>) -> Self {
        let Some(path) = path_info else {
            return DeleteRoute::NotFound;
        };

        if let Some(id) = path.strip_prefix("/id/") {
            DeleteRoute::ById(id)
        } else if path == "/owner" {
            DeleteRoute::ByOwner
        } else if let Some(price) = path.strip_prefix("/price/") {
            DeleteRoute::ByPrice(price)
        } else {
            DeleteRoute::NotFound
        }
    }
}

pub fn parse_id(text: &str) -> ProductResult<i32> {
    text.parse()
        .map_err(|_| ProductError::wrong_type("Id", "int"))
}

/// `""` is the NULL price
pub fn parse_price(text: &str) -> ProductResult<Option<i32>> {
    if text.is_empty() {
        return Ok(None);
    }
    text.parse()
        .map(Some)
        .map_err(|_| ProductError::wrong_type("Price", "Integer"))
}
