//! ロギング初期化ユーティリティ
//!
//! 標準出力へのfmtレイヤーに加え、`PROVER_REGISTRY_LOG_DIR` が設定されていれば
//! 日次ローテーションのファイル出力を追加する。

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::common::error::{CommonError, CommonResult};
use crate::config::get_env_with_fallback;

/// ログファイル名のプレフィックス
pub const LOG_FILE_PREFIX: &str = "prover-registry.log";

/// デフォルトのログレベル
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// ログレベル指定を取得（`PROVER_REGISTRY_LOG_LEVEL` → `RUST_LOG` → info）
pub fn log_level() -> String {
    get_env_with_fallback("PROVER_REGISTRY_LOG_LEVEL", "RUST_LOG")
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// ファイル出力先ディレクトリ（未設定なら標準出力のみ）
pub fn log_dir() -> Option<PathBuf> {
    std::env::var("PROVER_REGISTRY_LOG_DIR")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}

/// ログレベル文字列からフィルタを作成
pub fn build_filter(level: &str) -> CommonResult<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|e| CommonError::Config(format!("invalid log filter '{}': {}", level, e)))
}

/// グローバルsubscriberを初期化する
///
/// ファイル出力を有効にした場合、返されたガードはプロセス終了まで保持すること。
pub fn init() -> CommonResult<Option<WorkerGuard>> {
    let filter = build_filter(&log_level())?;

    let (file_layer, guard) = match log_dir() {
        Some(dir) => {
            std::fs::create_dir_all(&dir).map_err(|e| {
                CommonError::Config(format!(
                    "failed to create log directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init()
        .map_err(|e| CommonError::Config(format!("failed to initialize logging: {}", e)))?;

    Ok(guard)
}
