use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Person, Product, UpdateProduct};
use crate::query::ProductQuery;

/// Repository trait for Product persistence
///
/// Implementations assign ids and creation dates; callers never supply them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Store a new product
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Filtered, sorted and paged products
    async fn list(&self, query: ProductQuery) -> ProductResult<Vec<Product>>;

    /// Replace product `id`, keeping its creation date.
    ///
    /// Fails with [`ProductError::NotFound`] when there is no such product.
    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product>;

    /// Delete a product by ID
    async fn delete(&self, id: i32) -> ProductResult<bool>;

    /// Delete every product whose owner equals `owner` in all fields
    async fn delete_by_owner(&self, owner: &Person) -> ProductResult<u64>;

    /// Delete every product with this price; `None` matches products without one
    async fn delete_by_price(&self, price: Option<i32>) -> ProductResult<u64>;

    /// `None` when there are no products
    async fn average_manufacture_cost(&self) -> ProductResult<Option<f64>>;
}

#[derive(Debug)]
struct Store {
    products: HashMap<i32, Product>,
    next_id: i32,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            products: HashMap::new(),
            next_id: 1,
        }
    }
}

impl Store {
    fn retain(&mut self, keep: impl Fn(&Product) -> bool) -> u64 {
        let before = self.products.len();
        self.products.retain(|_, p| keep(p));
        (before - self.products.len()) as u64
    }
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        let id = store.next_id;
        store.next_id = id
            .checked_add(1)
            .ok_or_else(|| ProductError::Internal("product id space exhausted".to_string()))?;

        let product = Product::new(id, input, Utc::now());
        store.products.insert(id, product.clone());

        tracing::info!(product_id = id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.get(&id).cloned())
    }

    async fn list(&self, query: ProductQuery) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;
        let products = store.products.values().cloned().collect();
        Ok(query.apply(products))
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        let product = store
            .products
            .get_mut(&id)
            .ok_or(ProductError::NotFound(id))?;
        product.apply_update(input);

        tracing::info!(product_id = id, "Updated product");
        Ok(product.clone())
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let mut store = self.store.write().await;

        if store.products.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn delete_by_owner(&self, owner: &Person) -> ProductResult<u64> {
        let mut store = self.store.write().await;
        let deleted = store.retain(|p| p.owner.as_ref() != Some(owner));

        tracing::info!(owner = %owner.name, deleted, "Deleted products by owner");
        Ok(deleted)
    }

    async fn delete_by_price(&self, price: Option<i32>) -> ProductResult<u64> {
        let mut store = self.store.write().await;
        let deleted = store.retain(|p| p.price != price);

        tracing::info!(?price, deleted, "Deleted products by price");
        Ok(deleted)
    }

    async fn average_manufacture_cost(&self) -> ProductResult<Option<f64>> {
        let store = self.store.read().await;
        if store.products.is_empty() {
            return Ok(None);
        }

        let total: f64 = store.products.values().map(|p| p.manufacture_cost).sum();
        Ok(Some(total / store.products.len() as f64))
    }
}
