use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{sea_query::StringLen, DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

use crate::validation::{finite_coordinates, finite_create_cost, finite_update_cost, not_blank};

/// Unit a product is measured in
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitOfMeasure {
    #[sea_orm(string_value = "KILOGRAMS")]
    Kilograms,
    #[sea_orm(string_value = "CENTIMETERS")]
    Centimeters,
    #[sea_orm(string_value = "SQUARE_METERS")]
    SquareMeters,
    #[sea_orm(string_value = "PCS")]
    Pcs,
    #[sea_orm(string_value = "MILLILITERS")]
    Milliliters,
    #[sea_orm(string_value = "MILLIGRAMS")]
    Milligrams,
}

/// Position of a product
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "finite_coordinates"))]
pub struct Coordinates {
    #[validate(range(max = 600.0, message = "must not be greater than 600"))]
    pub x: f64,
    #[validate(range(exclusive_min = -500, message = "must be greater than -500"))]
    pub y: i64,
}

/// Product owner
///
/// Equality compares every field, which is what owner-based deletion matches on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(rename = "person", rename_all = "camelCase")]
pub struct Person {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "must be greater than 0"))]
    pub height: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 6, max = 64, message = "must be between 6 and 64 characters"))]
    pub passport_id: Option<String>,
}

/// Product resource as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "product", rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub coordinates: Coordinates,
    pub creation_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,
    pub manufacture_cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_of_measure: Option<UnitOfMeasure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Person>,
}

/// POST body. `id` and `creationDate` are server-assigned, so they are not
/// read even when the client sends them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename = "product", rename_all = "camelCase")]
#[validate(schema(function = "finite_create_cost"))]
pub struct CreateProduct {
    #[validate(
        length(max = 255, message = "must be at most 255 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
    #[validate(nested)]
    pub coordinates: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "must be greater than 0"))]
    pub price: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 64, message = "must be between 1 and 64 characters"))]
    pub part_number: Option<String>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub manufacture_cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_of_measure: Option<UnitOfMeasure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub owner: Option<Person>,
}

/// PUT body. Same rules as [`CreateProduct`] plus a required `id`; the
/// stored creation date is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename = "product", rename_all = "camelCase")]
#[validate(schema(function = "finite_update_cost"))]
pub struct UpdateProduct {
    #[validate(
        required(message = "is required"),
        range(min = 1, message = "must be greater than 0")
    )]
    pub id: Option<i32>,
    #[validate(
        length(max = 255, message = "must be at most 255 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
    #[validate(nested)]
    pub coordinates: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "must be greater than 0"))]
    pub price: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 64, message = "must be between 1 and 64 characters"))]
    pub part_number: Option<String>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub manufacture_cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_of_measure: Option<UnitOfMeasure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub owner: Option<Person>,
}

/// Body of a list response: `<products><product>…</product></products>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename = "products")]
pub struct ProductsList {
    #[serde(rename = "product", default)]
    pub products: Vec<Product>,
}

impl From<Vec<Product>> for ProductsList {
    fn from(products: Vec<Product>) -> Self {
        Self { products }
    }
}

impl Product {
    /// Build a stored product from a create payload.
    ///
    /// Used by the in-memory repository; PostgreSQL goes through
    /// `entity::ActiveModel` instead.
    pub fn new(id: i32, input: CreateProduct, creation_date: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            coordinates: input.coordinates,
            creation_date,
            price: input.price,
            part_number: input.part_number,
            manufacture_cost: input.manufacture_cost,
            unit_of_measure: input.unit_of_measure,
            owner: input.owner,
        }
    }

    /// Replace every client-editable field. `id` and `creation_date` stay.
    pub fn apply_update(&mut self, update: UpdateProduct) {
        self.name = update.name;
        self.coordinates = update.coordinates;
        self.price = update.price;
        self.part_number = update.part_number;
        self.manufacture_cost = update.manufacture_cost;
        self.unit_of_measure = update.unit_of_measure;
        self.owner = update.owner;
    }
}
