//! Drives the axum router end to end with `oneshot`

use axum::body::Body;
use axum::Router;
use catalog_server::routes::build_app;
use catalog_server::{CatalogService, Config, DbService, ServerState};
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app() -> Router {
    let pool = DbService::in_memory().await.unwrap().pool;
    build_app(ServerState::new(Config::from_env(), CatalogService::new(pool)))
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(match body {
            Some(v) => Body::from(v.to_string()),
            None => Body::empty(),
        })
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_is_public() {
    let app = app().await;
    let (status, body) = call(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = call(&app, "GET", "/health/detailed", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"]["status"], "ok");
}

#[tokio::test]
async fn variant_checkout_flow() {
    let app = app().await;

    let (status, product) = call(&app, "POST", "/api/products", Some(json!({ "name_en": "Tee" }))).await;
    assert_eq!(status, StatusCode::OK);
    let product_id = product["id"].as_i64().unwrap();

    let (_, color) = call(
        &app,
        "POST",
        "/api/attributes",
        Some(json!({ "name_en": "Color", "values": [{ "label_en": "Red" }, { "label_en": "Blue" }] })),
    )
    .await;
    let color_id = color["id"].as_i64().unwrap();
    let red_id = color["values"][0]["id"].as_i64().unwrap();

    let (status, _) = call(
        &app,
        "POST",
        &format!("/api/products/{product_id}/attributes"),
        Some(json!({ "attribute_id": color_id, "controls_pricing": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, stock) = call(&app, "GET", &format!("/api/products/{product_id}/stock"), None).await;
    let rows = stock.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    let red_variant = rows
        .iter()
        .find(|r| r["combination"][color_id.to_string()] == red_id)
        .and_then(|r| r["variant_id"].as_i64())
        .unwrap();

    // no price group yet: checkout must fail, never default to zero
    let (status, body) = call(&app, "GET", &format!("/api/variants/{red_variant}/checkout"), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["data"], Value::Null);

    let (status, group) = call(
        &app,
        "POST",
        &format!("/api/products/{product_id}/price-groups"),
        Some(json!({ "combination": { (color_id.to_string()): red_id }, "price": 25.5, "sale_price": 20 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(group["price"], 25.5);

    let (status, _) = call(
        &app,
        "POST",
        &format!("/api/products/{product_id}/weight-groups"),
        Some(json!({ "weight": 0.25 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, quote) = call(&app, "GET", &format!("/api/variants/{red_variant}/checkout"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quote["effective_price"], 20.0);
    assert_eq!(quote["weight"], 0.25);
}

#[tokio::test]
async fn errors_use_catalog_codes() {
    let app = app().await;
    let (status, body) = call(&app, "GET", "/api/products/404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6001);

    let (_, product) = call(&app, "POST", "/api/products", Some(json!({ "name_en": "Lamp" }))).await;
    let product_id = product["id"].as_i64().unwrap();
    let (status, body) = call(
        &app,
        "POST",
        &format!("/api/products/{product_id}/price-groups"),
        Some(json!({ "combination": { "77": 1 }, "price": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6403);
}
