//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Person, Product, UpdateProduct};
use crate::query::ProductQuery;
use crate::repository::ProductRepository;
use crate::validation::describe;

/// Product service providing business logic operations
///
/// The service layer handles validation, existence rules, and orchestrates
/// repository operations.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(describe(&e)))?;

        self.repository.create(input).await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, query: ProductQuery) -> ProductResult<Vec<Product>> {
        self.repository.list(query).await
    }

    /// Average manufacture cost over all products, `0.0` when there are none
    #[instrument(skip(self))]
    pub async fn average_manufacture_cost(&self) -> ProductResult<f64> {
        let average = self.repository.average_manufacture_cost().await?;
        Ok(average.unwrap_or(0.0))
    }

    /// Replace an existing product. The id comes from the payload.
    #[instrument(skip(self, input), fields(product_id = ?input.id))]
    pub async fn update_product(&self, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(describe(&e)))?;

        let Some(id) = input.id else {
            return Err(ProductError::Validation("id: is required".to_string()));
        };

        match self.repository.update(id, input).await {
            Err(ProductError::NotFound(id)) => Err(ProductError::UnknownProduct(id)),
            result => result,
        }
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }
        Ok(())
    }

    /// Delete every product owned by `owner`; fails when there is none.
    #[instrument(skip(self, owner), fields(owner = %owner.name))]
    pub async fn delete_by_owner(&self, owner: Person) -> ProductResult<u64> {
        owner
            .validate()
            .map_err(|e| ProductError::Validation(describe(&e)))?;

        let deleted = self.repository.delete_by_owner(&owner).await?;
        if deleted == 0 {
            return Err(ProductError::NoProductsOwnedBy(owner.name));
        }
        Ok(deleted)
    }

    /// Delete every product with `price`; fails when there is none.
    #[instrument(skip(self))]
    pub async fn delete_by_price(&self, price: Option<i32>) -> ProductResult<u64> {
        let deleted = self.repository.delete_by_price(price).await?;
        if deleted == 0 {
            return Err(ProductError::NoProductsWithPrice(price));
        }
        Ok(deleted)
    }
}
