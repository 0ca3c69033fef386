//! Drives the full router: Widget lifecycle, error bodies and the summary.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use orders_service::{app_state::AppState, config::ServiceConfig, router::build_router};

fn app() -> Router {
    build_router(AppState::new(ServiceConfig::default()).unwrap())
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn widget_lifecycle() {
    let app = app();

    let (status, created) = send_json(
        &app,
        Method::POST,
        "/api/orders",
        Some(json!({"productName": "Widget", "quantity": 2, "price": 9.99, "customerEmail": "a@b.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["totalAmount"], 19.98);
    assert_eq!(created["status"], "PENDING");
    let id = created["id"].as_str().unwrap().to_string();

    let (status, fetched) = send_json(&app, Method::GET, &format!("/api/orders/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, pending) = send_json(&app, Method::GET, "/api/orders/status/PENDING", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(pending.as_array().unwrap().iter().any(|o| o["id"] == id.as_str()));

    let (status, mine) = send_json(&app, Method::GET, "/api/orders/customer/a@b.com", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::DELETE, &format!("/api/orders/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, err) = send_json(&app, Method::GET, &format!("/api/orders/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["status"], 404);
    assert_eq!(err["error"], "Not Found");
    assert_eq!(err["message"], format!("Order not found with id : '{id}'"));
    assert_eq!(err["path"], format!("/api/orders/{id}"));
}

#[tokio::test]
async fn invalid_price_is_400_and_counted_once() {
    let app = app();

    let (status, err) = send_json(
        &app,
        Method::POST,
        "/api/orders",
        Some(json!({"productName": "Widget", "quantity": 1, "price": 0, "customerEmail": "a@b.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "Bad Request");
    assert_eq!(err["message"], "Price must be greater than 0");

    let (_, orders) = send_json(&app, Method::GET, "/api/orders", None).await;
    assert!(orders.as_array().unwrap().is_empty());

    let (_, summary) = send_json(&app, Method::GET, "/api/metrics/summary", None).await;
    assert_eq!(summary["totalApiCalls"], 2);
    assert_eq!(summary["successfulApiCalls"], 1);
    assert_eq!(summary["failedApiCalls"], 1);
    assert_eq!(summary["successRate"], "50.00%");
}

#[tokio::test]
async fn malformed_inputs_are_bad_requests() {
    let app = app();

    let (status, err) = send_json(&app, Method::GET, "/api/orders/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["path"], "/api/orders/not-a-uuid");

    let body = json!({"productName": "Widget"});
    let (status, err) = send_json(&app, Method::POST, "/api/orders", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["status"], 400);

    let (_, summary) = send_json(&app, Method::GET, "/api/metrics/summary", None).await;
    assert_eq!(summary["failedApiCalls"], 2);
    assert_eq!(summary["totalApiCalls"], 2);
}

#[tokio::test]
async fn undecodable_path_segments_get_the_json_error_body() {
    let app = app();

    for uri in ["/api/orders/customer/%FF", "/api/orders/status/%FF"] {
        let (status, err) = send_json(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["status"], 400);
        assert_eq!(err["error"], "Bad Request");
        assert!(err["message"].as_str().unwrap().contains("Invalid UTF-8"));
        assert_eq!(err["path"], uri);
    }

    let (_, summary) = send_json(&app, Method::GET, "/api/metrics/summary", None).await;
    assert_eq!(summary["failedApiCalls"], 2);
    assert_eq!(summary["totalApiCalls"], 2);
}

#[tokio::test]
async fn overflowing_total_is_a_counted_bad_request() {
    let app = app();

    let (status, err) = send_json(
        &app,
        Method::POST,
        "/api/orders",
        Some(json!({"productName": "Widget", "quantity": 1_000_000, "price": 1e25, "customerEmail": "a@b.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["message"], "Total amount is out of range");

    let (_, summary) = send_json(&app, Method::GET, "/api/metrics/summary", None).await;
    assert_eq!(summary["totalApiCalls"], 1);
    assert_eq!(summary["failedApiCalls"], 1);
    assert_eq!(summary["successfulApiCalls"], 0);
}

#[tokio::test]
async fn health_and_metrics_endpoints() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/orders/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"Orders Service is UP and running!");

    let (status, health) = send_json(&app, Method::GET, "/api/metrics/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health, json!({"status": "UP", "message": "Metrics service is running"}));

    let (_, summary) = send_json(&app, Method::GET, "/api/metrics/summary", None).await;
    assert_eq!(summary["successRate"], "0.00%");

    send(&app, Method::GET, "/api/orders", None).await;
    let (status, text) = send(&app, Method::GET, "/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(text).unwrap();
    assert!(text.contains("orders_service_get_all_order_success_total"));
    assert!(text.contains("orders_service_get_all_order_duration_micros_count"));

    let (_, ops) = send_json(&app, Method::GET, "/api/metrics/operations", None).await;
    let all = ops
        .as_array()
        .unwrap()
        .iter()
        .find(|o| o["operation"] == "get-all-order")
        .unwrap();
    assert_eq!(all["success"], 1);
    assert_eq!(all["calls"], 1);
}
