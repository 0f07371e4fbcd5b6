//! Products API routes

use axum::Router;
use domain_products::{handlers, InMemoryProductRepository, PgProductRepository, ProductService};

use crate::state::AppState;

/// Create products router backed by PostgreSQL, or by memory without a database
pub fn router(state: &AppState) -> Router {
    match &state.db {
        Some(db) => handlers::router(ProductService::new(PgProductRepository::new(db.clone()))),
        None => handlers::router(ProductService::new(InMemoryProductRepository::new())),
    }
}
