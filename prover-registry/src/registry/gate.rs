//! 登録ゲート
//!
//! エンドポイントレコードの作成前に同期的にプローブし、
//! 生存確認とスキーマ適合を満たさない書き込みを中断する。

use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};

use crate::common::error::{ProbeError, RegistryError, RegistryResult};
use crate::health::probe::ProbeClient;
use crate::types::status::RegistrationSchema;

/// 登録時プローブのデフォルトタイムアウト（秒）
pub const DEFAULT_REGISTRATION_TIMEOUT_SECS: u64 = 120;

/// 登録ゲート
#[derive(Debug, Clone)]
pub struct RegistrationGate {
    probe: ProbeClient,
    schema: RegistrationSchema,
    timeout: Duration,
}

impl RegistrationGate {
    /// 新しい登録ゲートを作成
    pub fn new(probe: ProbeClient, schema: RegistrationSchema) -> Self {
        Self {
            probe,
            schema,
            timeout: Duration::from_secs(DEFAULT_REGISTRATION_TIMEOUT_SECS),
        }
    }

    /// タイムアウトを設定
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// 候補URLをプローブし、受け付け可否を判定する
    ///
    /// 成功時はプローブで得たボディを返す。失敗時の原因は呼び出し側に
    /// `ProbeError` として渡るが、外部へは固定メッセージのみ返す。
    pub async fn probe(&self, url: &str) -> Result<Value, ProbeError> {
        let response = self.probe.probe(url, self.timeout).await?;
        response.accept(self.schema)?;
        Ok(response.body)
    }

    /// 書き込み前フック: 失敗なら登録拒否エラーで書き込みを中断する
    pub async fn before_create(&self, url: &str) -> RegistryResult<()> {
        match self.probe(url).await {
            Ok(_) => {
                info!(url = %url, schema = %self.schema, "Prover endpoint passed registration probe");
                Ok(())
            }
            Err(e) => {
                warn!(
                    url = %url,
                    schema = %self.schema,
                    error = %e,
                    "Registration rejected: endpoint failed liveness/schema probe"
                );
                Err(RegistryError::RegistrationRejected(e))
            }
        }
    }
}
