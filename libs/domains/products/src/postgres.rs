use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect, Select, Statement, Value,
};

use crate::entity::{ActiveModel, Column, Entity};
use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Person, Product, UpdateProduct};
use crate::query::{FilterCondition, ProductFilter, ProductQuery, SortDirection, SortField};
use crate::repository::ProductRepository;

const AVERAGE_COST_SQL: &str = "SELECT AVG(manufacture_cost) AS average FROM products";

/// PostgreSQL implementation of ProductRepository
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn filter_condition(filter: &ProductFilter) -> Condition {
    filter
        .conditions
        .iter()
        .fold(Condition::all(), |condition, c| match c {
            FilterCondition::Id(id) => condition.add(Column::Id.eq(*id)),
            FilterCondition::Name(name) => condition.add(Column::Name.eq(name.as_str())),
            FilterCondition::Price(price) => condition.add(Column::Price.eq(*price)),
            FilterCondition::PartNumber(part) => {
                condition.add(Column::PartNumber.eq(part.as_str()))
            }
            FilterCondition::ManufactureCost(cost) => {
                condition.add(Column::ManufactureCost.eq(*cost))
            }
            FilterCondition::UnitOfMeasure(unit) => condition.add(Column::UnitOfMeasure.eq(*unit)),
            FilterCondition::OwnerName(name) => condition.add(Column::OwnerName.eq(name.as_str())),
        })
}

fn sort_column(field: SortField) -> Column {
    match field {
        SortField::Id => Column::Id,
        SortField::Name => Column::Name,
        SortField::CreationDate => Column::CreationDate,
        SortField::Price => Column::Price,
        SortField::PartNumber => Column::PartNumber,
        SortField::ManufactureCost => Column::ManufactureCost,
        SortField::UnitOfMeasure => Column::UnitOfMeasure,
    }
}

fn select_products(query: &ProductQuery) -> Select<Entity> {
    let mut select = Entity::find().filter(filter_condition(&query.filter));

    for key in query.effective_sort() {
        let order = match key.direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };
        select = select.order_by(sort_column(key.field), order);
    }

    if let Some(page) = query.page {
        select = select.offset(page.offset()).limit(page.capacity);
    }

    select
}

/// `column = value`, or `column IS NULL` for an absent value
fn eq_or_null<V: Into<Value>>(column: Column, value: Option<V>) -> Condition {
    match value {
        Some(v) => Condition::all().add(column.eq(v)),
        None => Condition::all().add(column.is_null()),
    }
}

fn owner_condition(owner: &Person) -> Condition {
    Condition::all()
        .add(Column::OwnerName.eq(owner.name.as_str()))
        .add(eq_or_null(Column::OwnerBirthday, owner.birthday))
        .add(eq_or_null(Column::OwnerHeight, owner.height))
        .add(eq_or_null(Column::OwnerPassportId, owner.passport_id.clone()))
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let model: ActiveModel = input.into();
        let product: Product = model.insert(&self.db).await?.into();

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let result = Entity::find_by_id(id).one(&self.db).await?.map(Into::into);
        Ok(result)
    }

    async fn list(&self, query: ProductQuery) -> ProductResult<Vec<Product>> {
        let results = select_products(&query)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(results)
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        let model = ActiveModel::from_update(id, input);

        match model.update(&self.db).await {
            Ok(updated) => {
                tracing::info!(product_id = id, "Updated product");
                Ok(updated.into())
            }
            Err(DbErr::RecordNotUpdated) => Err(ProductError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let result = Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(result.rows_affected > 0)
    }

    async fn delete_by_owner(&self, owner: &Person) -> ProductResult<u64> {
        let result = Entity::delete_many()
            .filter(owner_condition(owner))
            .exec(&self.db)
            .await?;

        tracing::info!(owner = %owner.name, deleted = result.rows_affected, "Deleted products by owner");
        Ok(result.rows_affected)
    }

    async fn delete_by_price(&self, price: Option<i32>) -> ProductResult<u64> {
        let result = Entity::delete_many()
            .filter(eq_or_null(Column::Price, price))
            .exec(&self.db)
            .await?;

        tracing::info!(?price, deleted = result.rows_affected, "Deleted products by price");
        Ok(result.rows_affected)
    }

    async fn average_manufacture_cost(&self) -> ProductResult<Option<f64>> {
        let statement = Statement::from_string(self.db.get_database_backend(), AVERAGE_COST_SQL);
        let Some(row) = self.db.query_one_raw(statement).await? else {
            return Ok(None);
        };

        let average = row.try_get::<Option<f64>>("", "average")?;
        Ok(average)
    }
}
