//! ライブ集計
//!
//! 登録済みエンドポイントを一覧し、全件を並列にプローブして
//! 現在健全なものだけを `{url, minimumGas}` として返す。
//!
//! 各プローブは独立しており、1件の失敗（タイムアウト・接続エラー・
//! スキーマ不一致）はその1件を結果から除外するだけで、他には影響しない。
//! 各タスクは結果を値として返し、全タスク終了後に単一スレッドでマージする。

use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::cache::ProverCache;
use super::probe::ProbeClient;
use crate::common::error::{ProbeError, RegistryResult};
use crate::db::traits::EndpointStore;
use crate::types::prover::{EndpointRecord, Network, ValidatedProver};
use crate::types::status::{sgx_tier_fee, StatusSchema, FIELD_MIN_SGX_TIER_FEE};

/// 集計時プローブのデフォルトタイムアウト（秒）
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 4;

/// 集計対象のデフォルト上限件数
pub const DEFAULT_LIST_LIMIT: u32 = 100;

/// 1件のエンドポイントを検証し、集計結果の1要素に変換する
///
/// ステータス200かつ数値の `minSgxTierFee` を含む場合のみ採用する。
pub async fn validate_endpoint(
    probe: &ProbeClient,
    url: &str,
    timeout: Duration,
) -> Result<ValidatedProver, ProbeError> {
    let response = probe.probe(url, timeout).await?;
    let body = response.accept(StatusSchema::SgxTierFee)?;
    let minimum_gas =
        sgx_tier_fee(body).ok_or(ProbeError::SchemaMismatch(FIELD_MIN_SGX_TIER_FEE))?;

    Ok(ValidatedProver {
        url: url.to_string(),
        minimum_gas,
    })
}

/// ライブ集計
#[derive(Clone)]
pub struct LiveAggregator {
    store: Arc<dyn EndpointStore>,
    probe: ProbeClient,
    timeout: Duration,
    limit: u32,
    cache: Option<ProverCache>,
}

impl LiveAggregator {
    /// 新しい集計器を作成
    pub fn new(store: Arc<dyn EndpointStore>, probe: ProbeClient) -> Self {
        Self {
            store,
            probe,
            timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
            limit: DEFAULT_LIST_LIMIT,
            cache: None,
        }
    }

    /// プローブのタイムアウトを設定
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// 集計対象の上限件数を設定
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// 集計結果キャッシュを有効化
    pub fn with_cache(mut self, cache: ProverCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// 健全なプローバー一覧を返す
    ///
    /// キャッシュ無効時は毎回ライブ集計する。有効時はキャッシュを返し、
    /// 鮮度上限を超えていればバックグラウンドで再集計する。
    /// 集計中に登録があった場合、その集計結果はキャッシュに保存しない。
    pub async fn valid_provers(&self, network: Network) -> RegistryResult<Vec<ValidatedProver>> {
        let Some(cache) = &self.cache else {
            return self.aggregate(network).await;
        };

        match cache.get(network).await {
            Some(entry) => {
                if entry.is_stale(cache.max_age()) && cache.begin_refresh(network).await {
                    debug!(network = %network, "Serving stale provers, refreshing in background");
                    let generation = cache.generation(network).await;
                    let aggregator = self.clone();
                    let cache = cache.clone();
                    tokio::spawn(async move {
                        match aggregator.aggregate(network).await {
                            Ok(provers) => {
                                cache.store(network, generation, provers).await;
                            }
                            Err(e) => warn!(network = %network, error = %e, "Background refresh failed"),
                        }
                        cache.end_refresh(network).await;
                    });
                }
                Ok(entry.provers)
            }
            None => {
                let generation = cache.generation(network).await;
                let provers = self.aggregate(network).await?;
                cache.store(network, generation, provers.clone()).await;
                Ok(provers)
            }
        }
    }

    /// ストアから一覧を取得し、全件を並列にプローブする
    ///
    /// ストアの一覧取得に失敗した場合のみエラーを返す。
    /// 健全なエンドポイントが0件でも成功（空配列）。
    pub async fn aggregate(&self, network: Network) -> RegistryResult<Vec<ValidatedProver>> {
        let records = self.store.list_endpoints(network, self.limit).await?;

        if records.is_empty() {
            debug!(network = %network, "No prover endpoints registered");
            return Ok(Vec::new());
        }

        let total = records.len();
        let handles = records.into_iter().map(|record| {
            let probe = self.probe.clone();
            let timeout = self.timeout;
            tokio::spawn(async move {
                let outcome = validate_endpoint(&probe, &record.url, timeout).await;
                (record, outcome)
            })
        });

        let provers = merge_outcomes(join_all(handles).await);

        info!(
            network = %network,
            total = total,
            healthy = provers.len(),
            "Prover aggregation completed"
        );

        Ok(provers)
    }
}

type ProbeOutcome = (EndpointRecord, Result<ValidatedProver, ProbeError>);

/// 各タスクの結果をマージする（失敗は除外のみ）
fn merge_outcomes(
    results: Vec<Result<ProbeOutcome, tokio::task::JoinError>>,
) -> Vec<ValidatedProver> {
    let mut provers = Vec::with_capacity(results.len());

    for result in results {
        match result {
            Ok((_, Ok(prover))) => provers.push(prover),
            Ok((record, Err(e))) => {
                debug!(
                    endpoint_id = %record.id,
                    url = %record.url,
                    error = %e,
                    "Prover excluded"
                );
            }
            Err(e) => {
                error!("Probe task join error: {}", e);
            }
        }
    }

    provers
}
