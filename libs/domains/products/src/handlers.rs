//! HTTP handlers for Products API
//!
//! GET and DELETE below `/products` each go through a single wildcard route;
//! [`crate::routes`] decides which operation the rest of the path names.

use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use axum_extra::extract::{Query, QueryRejection};
use axum_helpers::{extractors::xml::from_xml, AppError, Xml};
use std::sync::Arc;

use crate::models::{CreateProduct, Person, ProductsList, UpdateProduct};
use crate::query::{ListParams, ProductQuery};
use crate::repository::ProductRepository;
use crate::routes::{parse_id, parse_price, DeleteRoute, GetRoute};
use crate::service::ProductService;

type SharedService<R> = Arc<ProductService<R>>;

/// Create the products router; nest it under `/products`.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            get(list_all)
                .post(create_product)
                .put(update_product)
                .fallback(page_not_found),
        )
        .route(
            "/{*path}",
            get(get_dispatch)
                .delete(delete_dispatch)
                .fallback(page_not_found),
        )
        .with_state(shared_service)
}

async fn list_all<R: ProductRepository>(
    State(service): State<SharedService<R>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Response, AppError> {
    list_products(&service, None, &list_params(params)?).await
}

fn list_params(params: Result<Query<ListParams>, QueryRejection>) -> Result<ListParams, AppError> {
    params
        .map(|Query(params)| params)
        .map_err(|rejection| AppError::InvalidQuery(rejection.to_string()))
}

/// `GET /products/{*path}`
async fn get_dispatch<R: ProductRepository>(
    State(service): State<SharedService<R>>,
    Path(path): Path<String>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Response, AppError> {
    let path_info = format!("/{}", path);
    let params = list_params(params)?;

    match GetRoute::parse(Some(&path_info)) {
        GetRoute::ById(raw_id) => {
            let product = service.get_product(parse_id(raw_id)?).await?;
            Ok(Xml(product).into_response())
        }
        GetRoute::AverageManufactureCost => {
            let average = service.average_manufacture_cost().await?;
            Ok(format!("{:?}", average).into_response())
        }
        GetRoute::List(filter_path) => list_products(&service, filter_path, &params).await,
    }
}

async fn list_products<R: ProductRepository>(
    service: &ProductService<R>,
    filter_path: Option<&str>,
    params: &ListParams,
) -> Result<Response, AppError> {
    let query = ProductQuery::from_request(filter_path, params)?;
    let products = service.list_products(query).await?;
    Ok(Xml(ProductsList::from(products)).into_response())
}

/// `POST /products`
async fn create_product<R: ProductRepository>(
    State(service): State<SharedService<R>>,
    Xml(input): Xml<CreateProduct>,
) -> Result<StatusCode, AppError> {
    service.create_product(input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /products`
async fn update_product<R: ProductRepository>(
    State(service): State<SharedService<R>>,
    Xml(input): Xml<UpdateProduct>,
) -> Result<StatusCode, AppError> {
    service.update_product(input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Any method or path below `/products` that names no operation
async fn page_not_found(uri: Uri) -> AppError {
    AppError::PageNotFound(uri.path().to_string())
}

/// `DELETE /products/{*path}`
async fn delete_dispatch<R: ProductRepository>(
    State(service): State<SharedService<R>>,
    Path(path): Path<String>,
    body: String,
) -> Result<StatusCode, AppError> {
    let path_info = format!("/{}", path);

    match DeleteRoute::parse(Some(&path_info)) {
        DeleteRoute::ById(raw_id) => {
            service.delete_product(parse_id(raw_id)?).await?;
        }
        DeleteRoute::ByOwner => {
            let owner: Person = from_xml(&body)?;
            service.delete_by_owner(owner).await?;
        }
        DeleteRoute::ByPrice(raw_price) => {
            service.delete_by_price(parse_price(raw_price)?).await?;
        }
        DeleteRoute::NotFound => return Err(AppError::PageNotFound(path_info)),
    }

    Ok(StatusCode::NO_CONTENT)
}
