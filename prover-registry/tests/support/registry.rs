//! テスト用のアプリケーション状態

use prover_registry::config::RegistryConfig;
use prover_registry::db::endpoints::SqliteEndpointStore;
use prover_registry::db::init_db_pool;
use prover_registry::types::prover::{EndpointRecord, Network};
use prover_registry::AppState;
use sqlx::SqlitePool;
use std::sync::Arc;

/// テスト向けの短いタイムアウト設定
pub fn test_config() -> RegistryConfig {
    RegistryConfig {
        registration_timeout_secs: 2,
        probe_timeout_secs: 1,
        ..RegistryConfig::default()
    }
}

/// インメモリSQLiteで状態を作成し、検証用にプールも返す
pub async fn test_state(config: RegistryConfig) -> (AppState, SqlitePool) {
    let pool = init_db_pool("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    let store = Arc::new(SqliteEndpointStore::new(pool.clone()));
    (AppState::new(store, reqwest::Client::new(), config), pool)
}

/// 登録ゲートを通さずにレコードを直接書き込む
///
/// 登録後に状態が変化したプローバーを再現するために使う。
pub async fn seed_endpoint(pool: &SqlitePool, url: &str, network: Network) -> EndpointRecord {
    let record = EndpointRecord::new(url.to_string(), network);
    prover_registry::db::endpoints::create_endpoint(pool, &record)
        .await
        .expect("Failed to seed endpoint");
    record
}
