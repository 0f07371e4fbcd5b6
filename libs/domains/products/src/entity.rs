use crate::models::{Coordinates, CreateProduct, Person, Product, UnitOfMeasure, UpdateProduct};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};

/// Sea-ORM Entity for the products table
///
/// Coordinates and owner are flattened into columns; the owner exists iff
/// `owner_name` is not NULL.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub coordinates_x: f64,
    pub coordinates_y: i64,
    pub creation_date: DateTimeWithTimeZone,
    pub price: Option<i32>,
    pub part_number: Option<String>,
    pub manufacture_cost: f64,
    pub unit_of_measure: Option<UnitOfMeasure>,
    pub owner_name: Option<String>,
    pub owner_birthday: Option<Date>,
    pub owner_height: Option<i32>,
    pub owner_passport_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        let owner = model.owner_name.map(|name| Person {
            name,
            birthday: model.owner_birthday,
            height: model.owner_height,
            passport_id: model.owner_passport_id,
        });

        Self {
            id: model.id,
            name: model.name,
            coordinates: Coordinates {
                x: model.coordinates_x,
                y: model.coordinates_y,
            },
            creation_date: model.creation_date.into(),
            price: model.price,
            part_number: model.part_number,
            manufacture_cost: model.manufacture_cost,
            unit_of_measure: model.unit_of_measure,
            owner,
        }
    }
}

/// Owner columns in table order: name, birthday, height, passport id
pub(crate) type OwnerColumns = (
    Option<String>,
    Option<Date>,
    Option<i32>,
    Option<String>,
);

pub(crate) fn owner_columns(owner: Option<Person>) -> OwnerColumns {
    match owner {
        Some(p) => (Some(p.name), p.birthday, p.height, p.passport_id),
        None => (None, None, None, None),
    }
}

// Id is left to the sequence; creation date is stamped here.
impl From<CreateProduct> for ActiveModel {
    fn from(input: CreateProduct) -> Self {
        let (owner_name, owner_birthday, owner_height, owner_passport_id) =
            owner_columns(input.owner);

        ActiveModel {
            id: NotSet,
            name: Set(input.name),
            coordinates_x: Set(input.coordinates.x),
            coordinates_y: Set(input.coordinates.y),
            creation_date: Set(chrono::Utc::now().into()),
            price: Set(input.price),
            part_number: Set(input.part_number),
            manufacture_cost: Set(input.manufacture_cost),
            unit_of_measure: Set(input.unit_of_measure),
            owner_name: Set(owner_name),
            owner_birthday: Set(owner_birthday),
            owner_height: Set(owner_height),
            owner_passport_id: Set(owner_passport_id),
        }
    }
}

impl ActiveModel {
    /// Full replacement of product `id`. `creation_date` stays `NotSet`, so
    /// the stored value survives the UPDATE.
    pub fn from_update(id: i32, input: UpdateProduct) -> Self {
        let (owner_name, owner_birthday, owner_height, owner_passport_id) =
            owner_columns(input.owner);

        ActiveModel {
            id: Set(id),
            name: Set(input.name),
            coordinates_x: Set(input.coordinates.x),
            coordinates_y: Set(input.coordinates.y),
            creation_date: NotSet,
            price: Set(input.price),
            part_number: Set(input.part_number),
            manufacture_cost: Set(input.manufacture_cost),
            unit_of_measure: Set(input.unit_of_measure),
            owner_name: Set(owner_name),
            owner_birthday: Set(owner_birthday),
            owner_height: Set(owner_height),
            owner_passport_id: Set(owner_passport_id),
        }
    }
}
