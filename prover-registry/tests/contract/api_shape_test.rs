//! Contract test: レスポンス形状
//!
//! ルーターを直接呼び出し、各エンドポイントのJSON形状を確認する。

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use prover_registry::api;
use prover_registry::types::prover::Network;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::support::prover::healthy_prover;
use crate::support::registry::{seed_endpoint, test_config, test_state};

async fn call(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_returns_healthy() {
    let (state, _pool) = test_state(test_config()).await;
    let (status, body) = call(api::create_router(state), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy"}));
}

#[tokio::test]
async fn valid_provers_items_have_url_and_minimum_gas_only() {
    let mock = healthy_prover(7).await;
    let (state, pool) = test_state(test_config()).await;
    seed_endpoint(&pool, &mock.uri(), Network::Testnet).await;

    let (status, body) = call(api::create_router(state), get("/validTestnetProvers")).await;

    assert_eq!(status, StatusCode::OK);
    let item = body[0].as_object().unwrap();
    let mut keys: Vec<&str> = item.keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(keys, vec!["minimumGas", "url"]);
    assert!(item["minimumGas"].is_number());
}

#[tokio::test]
async fn list_endpoints_filters_by_network_query() {
    let (state, pool) = test_state(test_config()).await;
    let record = seed_endpoint(&pool, "http://prover-a:9000", Network::Testnet).await;
    seed_endpoint(&pool, "http://prover-b:9000", Network::Mainnet).await;
    let router = api::create_router(state);

    let (status, body) = call(router.clone(), get("/api/endpoints?network=testnet")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], record.id.to_string());
    assert_eq!(body[0]["url"], "http://prover-a:9000");
    assert_eq!(body[0]["network"], "testnet");
    assert!(body[0]["created_at"].is_string());

    let (status, body) = call(router, get("/api/endpoints?network=devnet")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Request error"}));
}

#[tokio::test]
async fn create_endpoint_with_malformed_json_is_bad_request() {
    let (state, _pool) = test_state(test_config()).await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/endpoints")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"address": "http://p"}"#))
        .unwrap();

    let (status, body) = call(api::create_router(state), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
