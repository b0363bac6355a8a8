//! 集計結果キャッシュ
//!
//! 有効時は直近の集計結果を保持し、鮮度上限を超えたら古い結果を返しつつ
//! バックグラウンドで再集計する（stale-while-revalidate）。
//! ネットワークごとに同時に走る再集計は1つまで。
//!
//! 破棄のたびにネットワークごとの世代番号が進む。集計開始時に取得した世代と
//! 保存時の世代が異なる場合、その結果は保存しない。

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::debug;

use crate::types::prover::{Network, ValidatedProver};

/// キャッシュエントリ
#[derive(Debug, Clone)]
pub struct CachedProvers {
    /// 集計完了時刻
    pub fetched_at: Instant,
    /// 集計結果
    pub provers: Vec<ValidatedProver>,
}

impl CachedProvers {
    /// 鮮度上限を超えているか
    pub fn is_stale(&self, max_age: Duration) -> bool {
        self.fetched_at.elapsed() > max_age
    }
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<Network, CachedProvers>,
    generations: HashMap<Network, u64>,
}

impl CacheState {
    fn generation(&self, network: Network) -> u64 {
        self.generations.get(&network).copied().unwrap_or(0)
    }
}

/// ネットワーク別の集計結果キャッシュ
#[derive(Debug, Clone)]
pub struct ProverCache {
    max_age: Duration,
    state: Arc<RwLock<CacheState>>,
    refreshing: Arc<Mutex<HashSet<Network>>>,
}

impl ProverCache {
    /// 鮮度上限を指定してキャッシュを作成
    pub fn new(max_age: Duration) -> Self {
        Self {
            max_age,
            state: Arc::new(RwLock::new(CacheState::default())),
            refreshing: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// 鮮度上限
    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// エントリを取得
    pub async fn get(&self, network: Network) -> Option<CachedProvers> {
        self.state.read().await.entries.get(&network).cloned()
    }

    /// 現在の世代番号（集計開始前に取得する）
    pub async fn generation(&self, network: Network) -> u64 {
        self.state.read().await.generation(network)
    }

    /// 集計結果を保存
    ///
    /// `generation` 取得後に破棄されていれば保存せず false を返す。
    pub async fn store(
        &self,
        network: Network,
        generation: u64,
        provers: Vec<ValidatedProver>,
    ) -> bool {
        let mut state = self.state.write().await;
        if state.generation(network) != generation {
            debug!(network = %network, "Discarding provers aggregated before invalidation");
            return false;
        }
        state.entries.insert(
            network,
            CachedProvers {
                fetched_at: Instant::now(),
                provers,
            },
        );
        true
    }

    /// エントリを破棄し、世代を進める（新規登録時）
    pub async fn invalidate(&self, network: Network) {
        let mut state = self.state.write().await;
        state.entries.remove(&network);
        *state.generations.entry(network).or_insert(0) += 1;
    }

    /// 再集計を開始してよいか（既に実行中ならfalse）
    pub async fn begin_refresh(&self, network: Network) -> bool {
        self.refreshing.lock().await.insert(network)
    }

    /// 再集計の終了を記録
    pub async fn end_refresh(&self, network: Network) {
        self.refreshing.lock().await.remove(&network);
    }
}
