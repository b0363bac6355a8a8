//! プローブクライアント
//!
//! `GET {url}/status` を1回だけ発行し、JSONボディを解釈する。
//! リトライは行わない。失敗原因は [`ProbeError`] に分類されるが、
//! 呼び出し側はすべて「probe failed」として扱う。

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::common::error::ProbeError;
use crate::types::status::BodySchema;

/// ステータス確認パス
pub const STATUS_PATH: &str = "/status";

/// `/status` ボディの最大サイズ（バイト）
pub const MAX_STATUS_BODY_BYTES: usize = 64 * 1024;

/// ベースURLから `/status` のURLを組み立てる
pub fn status_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), STATUS_PATH)
}

/// 1回のプローブ結果（永続化しない）
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResponse {
    /// HTTPステータスコード
    pub status_code: u16,
    /// 解釈済みJSONボディ
    pub body: Value,
}

impl ProbeResponse {
    /// ステータス200であることを確認し、ボディを返す
    pub fn require_ok(&self) -> Result<&Value, ProbeError> {
        if self.status_code == 200 {
            Ok(&self.body)
        } else {
            Err(ProbeError::BadStatus(self.status_code))
        }
    }

    /// ステータス200かつスキーマ適合であることを確認し、ボディを返す
    pub fn accept<S: BodySchema>(&self, schema: S) -> Result<&Value, ProbeError> {
        let body = self.require_ok()?;
        schema.check_body(body)?;
        Ok(body)
    }
}

/// プローブクライアント
///
/// 接続プールを共有する `reqwest::Client` を保持し、タイムアウトは
/// リクエストごとに指定する（登録時は長め、集計時は短め）。
#[derive(Debug, Clone)]
pub struct ProbeClient {
    client: Client,
}

impl ProbeClient {
    /// 共有HTTPクライアントからプローブクライアントを作成
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// `{base_url}/status` をプローブする
    ///
    /// タイムアウトは接続開始からボディ受信完了までに適用される。
    pub async fn probe(
        &self,
        base_url: &str,
        timeout: Duration,
    ) -> Result<ProbeResponse, ProbeError> {
        let url = status_url(base_url);

        let result = self.send(&url, timeout).await;
        if let Err(ref e) = result {
            debug!(url = %url, timeout_ms = timeout.as_millis() as u64, error = %e, "Probe failed");
        }
        result
    }

    async fn send(&self, url: &str, timeout: Duration) -> Result<ProbeResponse, ProbeError> {
        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .body("")
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ProbeError::from_reqwest(&e))?;

        let status_code = response.status().as_u16();
        let bytes = match read_body(response, MAX_STATUS_BODY_BYTES).await? {
            Some(bytes) => bytes,
            None if status_code != 200 => return Err(ProbeError::BadStatus(status_code)),
            None => {
                return Err(ProbeError::MalformedBody(format!(
                    "status body exceeds {} bytes",
                    MAX_STATUS_BODY_BYTES
                )))
            }
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(body) => Ok(ProbeResponse { status_code, body }),
            // 非200の非JSONボディ（エラーページ等）はステータス不正として扱う
            Err(_) if status_code != 200 => Err(ProbeError::BadStatus(status_code)),
            Err(e) => Err(ProbeError::MalformedBody(e.to_string())),
        }
    }
}

/// 上限付きでボディを読む（上限超過時は None）
async fn read_body(
    mut response: reqwest::Response,
    limit: usize,
) -> Result<Option<Vec<u8>>, ProbeError> {
    if response.content_length().is_some_and(|len| len > limit as u64) {
        return Ok(None);
    }

    let mut bytes = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| ProbeError::from_reqwest(&e))?
    {
        if bytes.len() + chunk.len() > limit {
            return Ok(None);
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(Some(bytes))
}

impl Default for ProbeClient {
    fn default() -> Self {
        Self::new(Client::new())
    }
}
