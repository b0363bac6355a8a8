//! probe サブコマンド
//!
//! 登録ゲートと同じ判定で1件のエンドポイントをプローブし、結果を表示する。
//! 判定が失敗なら非ゼロで終了する。

use clap::Args;
use std::time::Duration;

use crate::health::probe::ProbeClient;
use crate::registry::endpoints::validate_url;
use crate::registry::gate::RegistrationGate;
use crate::types::status::{sgx_tier_fee, RegistrationSchema};

/// probe サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct ProbeArgs {
    /// Prover base URL (`/status` is appended)
    pub url: String,

    /// Probe timeout in seconds
    #[arg(long, default_value_t = 4)]
    pub timeout_secs: u64,

    /// Accepted /status schema (sgx-tier, legacy, any)
    #[arg(long, default_value = "sgx-tier")]
    pub schema: RegistrationSchema,
}

/// プローブを実行し、判定結果を標準出力へ書き出す
pub async fn execute(args: &ProbeArgs) -> anyhow::Result<()> {
    let url = validate_url(&args.url)?;
    let gate = RegistrationGate::new(ProbeClient::default(), args.schema)
        .with_timeout(Duration::from_secs(args.timeout_secs));

    match gate.probe(&url).await {
        Ok(body) => {
            println!("OK {} (schema: {})", url, args.schema);
            if let Some(fee) = sgx_tier_fee(&body) {
                println!("minimumGas: {}", fee);
            }
            Ok(())
        }
        Err(e) => anyhow::bail!("probe failed for {}: {}", url, e),
    }
}
