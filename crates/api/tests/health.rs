//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get, RecordingMailer};

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let pool = common::test_pool().await;
    let app = common::build_test_app(pool, Arc::new(RecordingMailer::default()), 7);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["store_healthy"], true);
    assert_eq!(json["max_slots"], 7);
}

#[tokio::test]
async fn health_check_degrades_when_store_closes() {
    let pool = common::test_pool().await;
    let app = common::build_test_app(pool.clone(), Arc::new(RecordingMailer::default()), 7);
    pool.close().await;

    let json = body_json(get(app, "/health").await).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["store_healthy"], false);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let pool = common::test_pool().await;
    let app = common::build_test_app(pool, Arc::new(RecordingMailer::default()), 7);
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let pool = common::test_pool().await;
    let app = common::build_test_app(pool, Arc::new(RecordingMailer::default()), 7);
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}
