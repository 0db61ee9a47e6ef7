//! Handler tests for the Products domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Request deserialization and validation
//! - Response serialization
//! - HTTP status codes
//! - Error responses
//!
//! Storage is the in-memory repository; see `integration_test.rs` for
//! PostgreSQL.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> Router {
    handlers::router(ProductService::new(InMemoryProductRepository::new()))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create(app: &Router, sku: &str, category_id: Uuid) -> Product {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            json!({
                "sku": sku,
                "name": "Widget",
                "description": "d",
                "price": 100,
                "category_id": category_id,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_product_lifecycle() {
    let app = app();
    let category_id = Uuid::now_v7();

    // Create
    let created = create(&app, "X1", category_id).await;
    assert_eq!(created.price, 100);
    assert_eq!(created.category_id, category_id);
    assert_eq!(created.created_at, created.updated_at);

    // Read back
    let uri = format!("/{}", created.id);
    let response = app.clone().oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Product = json_body(response.into_body()).await;
    assert_eq!(fetched, created);

    // Partial update
    let response = app
        .clone()
        .oneshot(json_request("PUT", &uri, json!({ "price": 150 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.clone().oneshot(empty_request("GET", &uri)).await.unwrap();
    let updated: Product = json_body(response.into_body()).await;
    assert_eq!(updated.price, 150);
    assert_eq!(updated.sku, created.sku);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.description, created.description);
    assert_eq!(updated.category_id, created.category_id);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
}

#[tokio::test]
async fn test_duplicate_sku_returns_409() {
    let app = app();
    create(&app, "X1", Uuid::now_v7()).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "sku": "X1", "name": "Other", "price": 1, "category_id": Uuid::now_v7() }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "CONFLICT");
    assert_eq!(body["code"], 1008);
}

#[tokio::test]
async fn test_update_to_taken_sku_returns_409() {
    let app = app();
    create(&app, "X1", Uuid::now_v7()).await;
    let second = create(&app, "X2", Uuid::now_v7()).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/{}", second.id),
            json!({ "sku": "X1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_product_validates_input() {
    let app = app();

    for body in [
        json!({ "sku": "", "name": "Widget", "price": 1, "category_id": Uuid::now_v7() }),
        json!({ "sku": "X1", "name": "", "price": 1, "category_id": Uuid::now_v7() }),
        json!({ "sku": "X1", "name": "Widget", "price": -1, "category_id": Uuid::now_v7() }),
    ] {
        let response = app.clone().oneshot(json_request("POST", "/", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_create_product_missing_field_is_invalid_json() {
    let app = app();

    let response = app
        .oneshot(json_request("POST", "/", json!({ "sku": "X1", "name": "Widget" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_JSON");
}

#[tokio::test]
async fn test_get_unknown_product_returns_404() {
    let app = app();

    let response = app
        .oneshot(empty_request("GET", &format!("/{}", Uuid::now_v7())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_unknown_product_returns_404() {
    let app = app();

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/{}", Uuid::now_v7()),
            json!({ "price": 1 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_id_returns_400() {
    let app = app();

    for request in [
        empty_request("GET", "/123"),
        json_request("PUT", "/123", json!({ "price": 1 })),
        empty_request("DELETE", "/123"),
    ] {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_delete_twice_returns_204() {
    let app = app();
    let created = create(&app, "X1", Uuid::now_v7()).await;
    let uri = format!("/{}", created.id);

    for _ in 0..2 {
        let response = app.clone().oneshot(empty_request("DELETE", &uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let response = app.oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_pagination_newest_first() {
    let app = app();
    let category_id = Uuid::now_v7();
    for i in 1..=5 {
        create(&app, &format!("S{i}"), category_id).await;
    }

    let response = app
        .oneshot(empty_request("GET", "/?limit=2&offset=0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page: Vec<Product> = json_body(response.into_body()).await;
    let skus: Vec<_> = page.iter().map(|p| p.sku.as_str()).collect();
    assert_eq!(skus, ["S5", "S4"]);
}

#[tokio::test]
async fn test_list_filters_by_sku_and_category() {
    let app = app();
    let tools = Uuid::now_v7();
    let garden = Uuid::now_v7();
    create(&app, "ABC", tools).await;
    create(&app, "abc", tools).await;
    create(&app, "XYZ", garden).await;

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/?sku=ABC"))
        .await
        .unwrap();
    let by_sku: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(by_sku.len(), 1);
    assert_eq!(by_sku[0].sku, "ABC");

    let response = app
        .oneshot(empty_request("GET", &format!("/?category_id={tools}")))
        .await
        .unwrap();
    let by_category: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(by_category.len(), 2);
    assert!(by_category.iter().all(|p| p.category_id == tools));
}

#[tokio::test]
async fn test_list_rejects_malformed_category_id() {
    let app = app();

    let response = app
        .oneshot(empty_request("GET", "/?category_id=nope"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_rejects_offset_beyond_i64() {
    let app = app();

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/?offset=9223372036854775808"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let response = app
        .oneshot(empty_request("GET", "/?offset=9223372036854775807"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
