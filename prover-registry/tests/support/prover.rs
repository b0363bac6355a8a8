//! モックプローバーサービス
//!
//! `GET /status` に固定レスポンスを返す wiremock サーバー

use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 任意のステータス・ボディを返すモック
pub async fn status_mock(status: u16, body: Value) -> MockServer {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&mock)
        .await;
    mock
}

/// 現行プロトコルの健全なプローバー
pub async fn healthy_prover(fee: u64) -> MockServer {
    status_mock(200, json!({"minSgxTierFee": fee})).await
}

/// 旧プロトコルのプローバー
pub async fn legacy_prover() -> MockServer {
    status_mock(200, json!({"minProofFee": 1, "currentCapacity": 5})).await
}

/// 非JSONボディを返すプローバー
pub async fn malformed_prover() -> MockServer {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&mock)
        .await;
    mock
}

/// 応答が `delay` だけ遅れる健全なプローバー
pub async fn slow_prover(fee: u64, delay: Duration) -> MockServer {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"minSgxTierFee": fee}))
                .set_delay(delay),
        )
        .mount(&mock)
        .await;
    mock
}

/// 接続を受け付けないURL（一度バインドしてすぐ解放したポート）
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
