//! Integration Test: 登録ゲート
//!
//! 生存確認とスキーマ適合を満たさないエンドポイントは登録されず、
//! レコードも作成されないことを確認する。

use prover_registry::db::endpoints::count_endpoints;
use prover_registry::types::prover::Network;
use prover_registry::types::status::RegistrationSchema;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use crate::support::http::spawn_registry;
use crate::support::prover::{
    healthy_prover, legacy_prover, slow_prover, status_mock, unreachable_url,
};
use crate::support::registry::{test_config, test_state};

const REJECTED: &str = "registration rejected: endpoint failed liveness/schema probe";

#[tokio::test]
async fn test_registration_succeeds_and_appears_in_list() {
    let mock = healthy_prover(42).await;
    let (state, pool) = test_state(test_config()).await;
    let server = spawn_registry(state).await;
    let client = Client::new();

    let response = client
        .post(server.url("/api/endpoints"))
        .json(&json!({"url": mock.uri()}))
        .send()
        .await
        .expect("registration request failed");

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["url"], mock.uri());
    assert_eq!(body["network"], "mainnet");
    assert!(body["id"].is_string());

    let list: Value = client
        .get(server.url("/api/endpoints"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], body["id"]);

    assert_eq!(count_endpoints(&pool, Network::Mainnet).await.unwrap(), 1);
    server.stop().await;
}

#[tokio::test]
async fn test_registration_rejects_empty_status_object() {
    let mock = status_mock(200, json!({})).await;
    let mut config = test_config();
    config.registration_schema = RegistrationSchema::Any;
    let (state, pool) = test_state(config).await;
    let server = spawn_registry(state).await;

    let response = Client::new()
        .post(server.url("/api/endpoints"))
        .json(&json!({"url": mock.uri()}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": REJECTED}));
    assert_eq!(count_endpoints(&pool, Network::Mainnet).await.unwrap(), 0);
    server.stop().await;
}

#[tokio::test]
async fn test_registration_rejects_every_failure_mode_without_writing() {
    let server_error = status_mock(500, json!({"minSgxTierFee": 1})).await;
    let legacy = legacy_prover().await;
    let unreachable = unreachable_url().await;

    let (state, pool) = test_state(test_config()).await;
    let server = spawn_registry(state).await;
    let client = Client::new();

    for url in [server_error.uri(), legacy.uri(), unreachable] {
        let response = client
            .post(server.url("/api/endpoints"))
            .json(&json!({"url": url}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400, "url: {}", url);
        let body: Value = response.json().await.unwrap();
        // 失敗原因（接続先アドレス等）は外部に返さない
        assert_eq!(body["error"], REJECTED);
    }

    assert_eq!(count_endpoints(&pool, Network::Mainnet).await.unwrap(), 0);
    server.stop().await;
}

#[tokio::test]
async fn test_registration_times_out() {
    let mock = slow_prover(42, Duration::from_secs(3)).await;
    let mut config = test_config();
    config.registration_timeout_secs = 1;
    let (state, pool) = test_state(config).await;
    let server = spawn_registry(state).await;

    let response = Client::new()
        .post(server.url("/api/endpoints"))
        .json(&json!({"url": mock.uri()}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(count_endpoints(&pool, Network::Mainnet).await.unwrap(), 0);
    server.stop().await;
}

#[tokio::test]
async fn test_legacy_schema_accepts_legacy_prover() {
    let mock = legacy_prover().await;
    let mut config = test_config();
    config.registration_schema = RegistrationSchema::Legacy;
    let (state, pool) = test_state(config).await;
    let server = spawn_registry(state).await;

    let response = Client::new()
        .post(server.url("/api/endpoints"))
        .json(&json!({"url": mock.uri(), "network": "testnet"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 201);
    assert_eq!(count_endpoints(&pool, Network::Testnet).await.unwrap(), 1);
    assert_eq!(count_endpoints(&pool, Network::Mainnet).await.unwrap(), 0);
    server.stop().await;
}

#[tokio::test]
async fn test_duplicate_registration_is_conflict() {
    let mock = healthy_prover(1).await;
    let (state, pool) = test_state(test_config()).await;
    let server = spawn_registry(state).await;
    let client = Client::new();

    let first = client
        .post(server.url("/api/endpoints"))
        .json(&json!({"url": mock.uri()}))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status().as_u16(), 201);

    let second = client
        .post(server.url("/api/endpoints"))
        .json(&json!({"url": mock.uri()}))
        .send()
        .await
        .unwrap();
    assert_eq!(second.status().as_u16(), 409);

    assert_eq!(count_endpoints(&pool, Network::Mainnet).await.unwrap(), 1);
    server.stop().await;
}

#[tokio::test]
async fn test_invalid_url_is_bad_request() {
    let (state, pool) = test_state(test_config()).await;
    let server = spawn_registry(state).await;

    let response = Client::new()
        .post(server.url("/api/endpoints"))
        .json(&json!({"url": "not a url"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid URL");
    assert_eq!(count_endpoints(&pool, Network::Mainnet).await.unwrap(), 0);
    server.stop().await;
}
