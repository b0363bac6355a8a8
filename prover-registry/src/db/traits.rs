//! Repository traitパターン定義
//!
//! Registry Storeの操作を抽象化する。登録ゲートとライブ集計はこのtrait
//! 越しにのみストアへアクセスする（作成と一覧のみ）。

use async_trait::async_trait;

use crate::types::prover::{EndpointRecord, Network};

/// エンドポイントレコードのRepository trait
#[async_trait]
pub trait EndpointStore: Send + Sync {
    /// レコードを作成
    async fn create_endpoint(&self, record: &EndpointRecord) -> Result<(), sqlx::Error>;

    /// ネットワーク単位でレコードを最大 `limit` 件取得（ストア既定の順序）
    async fn list_endpoints(
        &self,
        network: Network,
        limit: u32,
    ) -> Result<Vec<EndpointRecord>, sqlx::Error>;
}
