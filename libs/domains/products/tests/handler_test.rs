//! Handler tests for Products domain
//!
//! These tests drive the products router directly, backed by the in-memory
//! repository:
//! - Path-info dispatch for GET and DELETE
//! - XML request parsing and response rendering
//! - HTTP status codes and plain-text error bodies

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use domain_products::*;
use http_body_util::BodyExt;
use tower::ServiceExt; // For oneshot()

struct TestApp {
    router: Router,
    repo: InMemoryProductRepository,
}

impl TestApp {
    fn new() -> Self {
        let repo = InMemoryProductRepository::new();
        let router = handlers::router(ProductService::new(repo.clone()));
        Self { router, repo }
    }

    async fn send(&self, method: &str, uri: &str, body: &str) -> (StatusCode, String, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/xml")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string())
            .unwrap_or_default();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn seed(&self, name: &str, price: Option<i32>, cost: f64, owner: Option<Person>) -> Product {
        self.repo
            .create(CreateProduct {
                name: name.to_string(),
                coordinates: Coordinates { x: 1.0, y: 2 },
                price,
                part_number: None,
                manufacture_cost: cost,
                unit_of_measure: Some(UnitOfMeasure::Pcs),
                owner,
            })
            .await
            .unwrap()
    }

    async fn ids(&self) -> Vec<i32> {
        let products = self.repo.list(ProductQuery::default()).await.unwrap();
        products.iter().map(|p| p.id).collect()
    }
}

fn product_xml(id: Option<i32>, name: &str, price: Option<i32>) -> String {
    let id = id.map(|id| format!("<id>{}</id>", id)).unwrap_or_default();
    let price = price.map(|p| format!("<price>{}</price>", p)).unwrap_or_default();
    format!(
        "<product>{id}<name>{name}</name><coordinates><x>1.5</x><y>3</y></coordinates>\
         {price}<manufactureCost>2.5</manufactureCost><unitOfMeasure>KILOGRAMS</unitOfMeasure></product>"
    )
}

fn parse_list(body: &str) -> Vec<i32> {
    let (_, document) = body.split_once("?>").unwrap();
    let list: ProductsList = quick_xml::de::from_str(document).unwrap();
    list.products.iter().map(|p| p.id).collect()
}

fn ann() -> Person {
    Person {
        name: "Ann".to_string(),
        birthday: None,
        height: Some(170),
        passport_id: None,
    }
}

// ============================================================================
// POST / PUT
// ============================================================================

#[tokio::test]
async fn test_create_product_returns_204_and_stamps_creation_date() {
    let app = TestApp::new();
    let before = Utc::now();

    let body = "<product><id>99</id><name>Bolt</name><coordinates><x>1.5</x><y>3</y></coordinates>\
                <creationDate>1999-01-01T00:00:00Z</creationDate><manufactureCost>2.5</manufactureCost></product>";
    let (status, _, _) = app.send("POST", "/", body).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    let stored = app.repo.get_by_id(1).await.unwrap().unwrap();
    assert_eq!(stored.name, "Bolt");
    assert!(stored.creation_date >= before);
    assert!(stored.creation_date <= Utc::now());
    assert!(app.repo.get_by_id(99).await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_product_rejects_malformed_xml() {
    let app = TestApp::new();

    let (status, _, body) = app.send("POST", "/", "<product><name>Bolt</name>").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Invalid data");
    assert!(app.ids().await.is_empty());
}

#[tokio::test]
async fn test_create_product_reports_validation_errors() {
    let app = TestApp::new();

    let (status, _, body) = app
        .send("POST", "/", &product_xml(None, "Bolt", Some(0)))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "price: must be greater than 0");
}

#[tokio::test]
async fn test_update_product_keeps_creation_date() {
    let app = TestApp::new();
    let created = app.seed("Bolt", Some(10), 1.0, None).await;

    let (status, _, _) = app
        .send("PUT", "/", &product_xml(Some(created.id), "Washer", None))
        .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    let stored = app.repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Washer");
    assert_eq!(stored.price, None);
    assert_eq!(stored.unit_of_measure, Some(UnitOfMeasure::Kilograms));
    assert_eq!(stored.creation_date, created.creation_date);
}

#[tokio::test]
async fn test_update_unknown_product_is_bad_request() {
    let app = TestApp::new();

    let (status, _, body) = app
        .send("PUT", "/", &product_xml(Some(7), "Washer", None))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Product with id 7 does not exist");
}

#[tokio::test]
async fn test_update_without_id_is_bad_request() {
    let app = TestApp::new();

    let (status, _, body) = app
        .send("PUT", "/", &product_xml(None, "Washer", None))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "id: is required");
}

// ============================================================================
// GET
// ============================================================================

#[tokio::test]
async fn test_get_product_by_id() {
    let app = TestApp::new();
    app.seed("Bolt", Some(10), 2.5, Some(ann())).await;

    let (status, content_type, body) = app.send("GET", "/id/1", "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/xml");
    assert!(body.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?><product><id>1</id>"#));
    assert!(body.contains("<owner><name>Ann</name><height>170</height></owner>"));
}

#[tokio::test]
async fn test_get_unknown_id_is_404() {
    let app = TestApp::new();

    let (status, _, _) = app.send("GET", "/id/42", "").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_non_integer_id_is_400() {
    let app = TestApp::new();

    let (status, _, body) = app.send("GET", "/id/abc", "").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Id should be of type int");
}

#[tokio::test]
async fn test_average_manufacture_cost() {
    let app = TestApp::new();

    let (status, content_type, body) = app.send("GET", "/manufacture-cost/average", "").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(body, "0.0");

    app.seed("a", None, 10.0, None).await;
    app.seed("b", None, 15.0, None).await;

    let (_, _, body) = app.send("GET", "/manufacture-cost/average", "").await;
    assert_eq!(body, "12.5");
}

#[tokio::test]
async fn test_list_all_in_id_order() {
    let app = TestApp::new();
    for name in ["a", "b", "c"] {
        app.seed(name, None, 1.0, None).await;
    }

    let (status, content_type, body) = app.send("GET", "/", "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/xml");
    assert_eq!(parse_list(&body), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_list_with_filter_sort_and_paging() {
    let app = TestApp::new();
    app.seed("Bolt", Some(30), 1.0, None).await;
    app.seed("Nut", Some(5), 1.0, None).await;
    app.seed("Bolt", Some(10), 1.0, None).await;
    app.seed("Bolt", Some(20), 1.0, None).await;

    let (status, _, body) = app
        .send("GET", "/name/Bolt?sort=-price&page-number=1&page-capacity=2", "")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse_list(&body), vec![1, 4]);
}

#[tokio::test]
async fn test_list_with_repeated_sort_parameters() {
    let app = TestApp::new();
    app.seed("b", Some(10), 1.0, None).await;
    app.seed("a", Some(10), 1.0, None).await;
    app.seed("c", Some(5), 1.0, None).await;

    let (_, _, body) = app.send("GET", "/?sort=-price&sort=name", "").await;

    assert_eq!(parse_list(&body), vec![2, 1, 3]);
}

#[tokio::test]
async fn test_list_rejects_page_number_zero() {
    let app = TestApp::new();

    let (status, _, body) = app.send("GET", "/?page-number=0", "").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "page-number should be greater than 0");
}

#[tokio::test]
async fn test_list_rejects_bad_filter_and_sort() {
    let app = TestApp::new();

    let (status, _, _) = app.send("GET", "/name", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, body) = app.send("GET", "/?sort=weight", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Unknown sort field: weight");
}

#[tokio::test]
async fn test_list_rejects_page_offset_beyond_bigint() {
    let app = TestApp::new();

    let (status, _, body) = app
        .send(
            "GET",
            "/?page-number=99999999999999999&page-capacity=99999999999999999",
            "",
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "page-number is too large for page-capacity");
}

#[tokio::test]
async fn test_list_rejects_malformed_query_string_as_plain_text() {
    let app = TestApp::new();

    let (status, content_type, body) = app.send("GET", "/?page-number=1&page-number=2", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(content_type.starts_with("text/plain"));
    assert!(body.contains("page-number"));

    let (status, _, _) = app.send("GET", "/name/Bolt?page-number=1&page-number=2", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// DELETE
// ============================================================================

#[tokio::test]
async fn test_delete_by_id() {
    let app = TestApp::new();
    app.seed("a", None, 1.0, None).await;

    let (status, _, _) = app.send("DELETE", "/id/1", "").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, _) = app.send("DELETE", "/id/1", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, body) = app.send("DELETE", "/id/x", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Id should be of type int");
}

#[tokio::test]
async fn test_delete_by_owner() {
    let app = TestApp::new();
    app.seed("a", None, 1.0, Some(ann())).await;
    app.seed("b", None, 1.0, None).await;
    app.seed("c", None, 1.0, Some(ann())).await;

    let owner = "<person><name>Ann</name><height>170</height></person>";
    let (status, _, _) = app.send("DELETE", "/owner", owner).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(app.ids().await, vec![2]);

    let (status, _, _) = app.send("DELETE", "/owner", owner).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_by_owner_rejects_bad_body() {
    let app = TestApp::new();

    let (status, _, body) = app.send("DELETE", "/owner", "not xml").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Invalid data");
}

#[tokio::test]
async fn test_delete_by_empty_price_removes_only_priceless_products() {
    let app = TestApp::new();
    app.seed("a", None, 1.0, None).await;
    app.seed("b", Some(10), 1.0, None).await;
    app.seed("c", None, 1.0, None).await;

    let (status, _, _) = app.send("DELETE", "/price/", "").await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(app.ids().await, vec![2]);
}

#[tokio::test]
async fn test_delete_by_price_without_matches_is_404() {
    let app = TestApp::new();
    app.seed("a", Some(10), 1.0, None).await;

    let (status, _, _) = app.send("DELETE", "/price/11", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, body) = app.send("DELETE", "/price/ten", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Price should be of type Integer");
}

#[tokio::test]
async fn test_delete_unknown_path_is_page_not_found() {
    let app = TestApp::new();

    let (status, _, body) = app.send("DELETE", "/colour/red", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Page not found");

    let (status, _, _) = app.send("DELETE", "/", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unsupported_method_is_page_not_found() {
    let app = TestApp::new();

    let (status, content_type, body) = app.send("POST", "/id/1", &product_xml(None, "Bolt", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(body, "Page not found");

    let (status, _, body) = app.send("PUT", "/anything", &product_xml(Some(1), "Bolt", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Page not found");

    let (status, _, body) = app.send("PATCH", "/", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Page not found");
    assert!(app.ids().await.is_empty());
}
