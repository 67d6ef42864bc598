//! HTTP round-trip tests for the axum transport

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use hypeboard::board::SqliteBoard;
use hypeboard::web::{create_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn test_router() -> Router {
    let storage = Arc::new(
        SqliteBoard::connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory storage"),
    );
    create_router(Arc::new(AppState::new(storage)))
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body")
        .to_vec()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("Response body was not JSON")
}

fn record_request(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/record")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

#[tokio::test]
async fn test_record_round_trip() {
    let app = test_router().await;

    let response = app
        .oneshot(record_request(json!({
            "address": "0xAAA",
            "symbol": "WIF",
            "hype": 42
        })))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "ok": true }));
}

#[tokio::test]
async fn test_record_invalid_address_maps_to_400() {
    let app = test_router().await;

    let response = app
        .oneshot(record_request(json!({ "address": "nope" })))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "ok": false, "error": "invalid address" })
    );
}

#[tokio::test]
async fn test_record_unreadable_body_maps_to_500() {
    let app = test_router().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/record")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("Failed to build request");

    let response = app.oneshot(request).await.expect("Request failed");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["ok"], json!(false));
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_leaderboard_reflects_recorded_observations() {
    let app = test_router().await;

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(record_request(json!({
                "address": "0xAAA",
                "symbol": "WIF",
                "hype": 70,
                "safety": 30
            })))
            .await
            .expect("Request failed");
        assert_eq!(response.status(), StatusCode::OK);
    }
    let response = app
        .clone()
        .oneshot(record_request(json!({ "address": "0xBBB", "hype": 10 })))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request("/leaderboard"))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let board = body_json(response).await;
    assert_eq!(board["mostSearched"][0]["address"], json!("0xaaa"));
    assert_eq!(board["mostSearched"][0]["hits"], json!(2));
    assert_eq!(board["mostSearched"][0]["rank"], json!(1));
    assert_eq!(board["mostSearched"][0]["symbol"], json!("WIF"));
    assert_eq!(board["mostSearched"][1]["address"], json!("0xbbb"));
    assert_eq!(board["topHype"][0]["address"], json!("0xaaa"));
    assert_eq!(board["topHype"][0]["hype"], json!(70));
    assert_eq!(board["topSafety"][0]["safety"], json!(30));
}

#[tokio::test]
async fn test_leaderboard_empty_store() {
    let app = test_router().await;

    let response = app
        .oneshot(get_request("/leaderboard"))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        body_json(response).await,
        json!({ "mostSearched": [], "topHype": [], "topSafety": [] })
    );
}

#[tokio::test]
async fn test_leaderboard_tolerates_unparseable_days() {
    let app = test_router().await;

    let response = app
        .clone()
        .oneshot(record_request(json!({ "address": "0xAAA" })))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);

    // Falls back to the default window instead of failing
    let response = app
        .clone()
        .oneshot(get_request("/leaderboard?days=abc"))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let board = body_json(response).await;
    assert_eq!(board["mostSearched"][0]["address"], json!("0xaaa"));

    // Numeric windows are honored
    let response = app
        .clone()
        .oneshot(get_request("/leaderboard?days=7"))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_round_trip() {
    let app = test_router().await;

    let response = app
        .oneshot(get_request("/health"))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "ok": true }));
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = test_router().await;

    let response = app
        .oneshot(get_request("/nope"))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_bytes(response).await, b"Not found");
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let app = test_router().await;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/record")
        .header(header::ORIGIN, "https://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .expect("Failed to build request");

    let response = app.oneshot(request).await.expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let allow_origin = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .expect("Missing allow-origin header");
    assert_eq!(allow_origin, "*");
}
