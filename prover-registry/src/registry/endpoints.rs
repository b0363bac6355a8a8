//! エンドポイントレジストリ
//!
//! 登録候補を検証し、登録ゲートを通過したものだけをストアへ書き込む。
//! ゲートが失敗した場合、レコードは一切作成されない。

use reqwest::Url;
use std::sync::Arc;
use tracing::info;

use super::gate::RegistrationGate;
use crate::common::error::{RegistryError, RegistryResult};
use crate::db::traits::EndpointStore;
use crate::health::aggregator::DEFAULT_LIST_LIMIT;
use crate::health::cache::ProverCache;
use crate::types::prover::{EndpointRecord, Network, NewEndpoint};

/// エンドポイントレジストリ
#[derive(Clone)]
pub struct EndpointRegistry {
    store: Arc<dyn EndpointStore>,
    gate: RegistrationGate,
    list_limit: u32,
    /// 登録成功時に破棄する集計結果キャッシュ
    cache: Option<ProverCache>,
}

impl EndpointRegistry {
    /// ストアと登録ゲートからレジストリを作成
    pub fn new(store: Arc<dyn EndpointStore>, gate: RegistrationGate) -> Self {
        Self {
            store,
            gate,
            list_limit: DEFAULT_LIST_LIMIT,
            cache: None,
        }
    }

    /// 一覧取得の上限件数を設定
    pub fn with_list_limit(mut self, limit: u32) -> Self {
        self.list_limit = limit;
        self
    }

    /// 登録成功時に破棄するキャッシュを設定
    pub fn with_cache(mut self, cache: ProverCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// エンドポイントを登録する
    ///
    /// URL形式チェック → 登録ゲート → 書き込み の順に実行する。
    /// 同一ネットワークに同じURLが既に登録されていれば `Conflict`。
    pub async fn register(&self, request: NewEndpoint) -> RegistryResult<EndpointRecord> {
        let url = validate_url(&request.url)?;

        self.gate.before_create(&url).await?;

        let record = EndpointRecord::new(url, request.network);
        self.store.create_endpoint(&record).await?;

        if let Some(cache) = &self.cache {
            cache.invalidate(record.network).await;
        }

        info!(
            endpoint_id = %record.id,
            url = %record.url,
            network = %record.network,
            "Prover endpoint registered"
        );

        Ok(record)
    }

    /// ネットワーク内の登録済みレコード一覧（プローブなし）
    pub async fn list(&self, network: Network) -> RegistryResult<Vec<EndpointRecord>> {
        Ok(self.store.list_endpoints(network, self.list_limit).await?)
    }
}

/// 登録候補URLの形式チェック
///
/// 空文字・解釈不能・http(s)以外・ホストなしは `InvalidUrl`。
pub fn validate_url(raw: &str) -> RegistryResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RegistryError::InvalidUrl("URL is required".to_string()));
    }

    let parsed =
        Url::parse(trimmed).map_err(|e| RegistryError::InvalidUrl(format!("{}: {}", trimmed, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(RegistryError::InvalidUrl(format!(
            "unsupported scheme '{}'",
            parsed.scheme()
        )));
    }
    if parsed.host_str().is_none() {
        return Err(RegistryError::InvalidUrl(format!("{}: missing host", trimmed)));
    }

    Ok(trimmed.to_string())
}
