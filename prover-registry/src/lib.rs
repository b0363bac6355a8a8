//! Prover registry server
//!
//! プローバーエンドポイントを登録時に検証し、
//! 読み取り時に現在健全なものだけを返すレジストリ

#![warn(missing_docs)]

/// 共通型定義（エラー等）
pub mod common;

/// REST APIハンドラー
pub mod api;

/// CLIサブコマンド
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// データベースアクセス
pub mod db;

/// プローブ・ライブ集計
pub mod health;

/// ロギング初期化ユーティリティ
pub mod logging;

/// エンドポイント登録（登録ゲート）
pub mod registry;

/// axumサーバー起動
pub mod server;

/// 型定義
pub mod types;

use std::sync::Arc;

use crate::config::RegistryConfig;
use crate::db::traits::EndpointStore;
use crate::health::{LiveAggregator, ProbeClient, ProverCache};
use crate::registry::{EndpointRegistry, RegistrationGate};

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// 登録（書き込み）パス
    pub registry: EndpointRegistry,
    /// ライブ集計（読み取り）パス
    pub aggregator: LiveAggregator,
    /// 起動時の設定
    pub config: RegistryConfig,
}

impl AppState {
    /// ストアと共有HTTPクライアントからアプリケーション状態を組み立てる
    ///
    /// キャッシュ有効時は登録パスと集計パスで同じキャッシュを共有する。
    pub fn new(
        store: Arc<dyn EndpointStore>,
        http_client: reqwest::Client,
        config: RegistryConfig,
    ) -> Self {
        let probe = ProbeClient::new(http_client);

        let gate = RegistrationGate::new(probe.clone(), config.registration_schema)
            .with_timeout(config.registration_timeout());
        let mut registry =
            EndpointRegistry::new(store.clone(), gate).with_list_limit(config.list_limit);

        let mut aggregator = LiveAggregator::new(store, probe)
            .with_timeout(config.probe_timeout())
            .with_limit(config.list_limit);

        if let Some(max_age) = config.cache_max_age() {
            let cache = ProverCache::new(max_age);
            registry = registry.with_cache(cache.clone());
            aggregator = aggregator.with_cache(cache);
        }

        Self {
            registry,
            aggregator,
            config,
        }
    }
}
