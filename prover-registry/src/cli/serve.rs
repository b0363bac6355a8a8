//! serve サブコマンド
//!
//! レジストリサーバーを起動します。

use anyhow::Context;
use clap::Args;
use std::sync::Arc;
use tracing::info;

use crate::config::{
    get_database_url, get_env_with_fallback_or, get_env_with_fallback_parse, RegistryConfig,
};
use crate::db::endpoints::SqliteEndpointStore;
use crate::AppState;

/// serve サブコマンドの引数
///
/// 未指定の値は環境変数（旧名へのフォールバックを含む）から解決する。
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Bind address
    #[arg(short = 'H', long)]
    pub host: Option<String>,
}

impl ServeArgs {
    /// バインドアドレスを解決
    pub fn bind_addr(&self) -> String {
        let host = self.host.clone().unwrap_or_else(|| {
            get_env_with_fallback_or("PROVER_REGISTRY_HOST", "HOST", "0.0.0.0")
        });
        let port = self
            .port
            .unwrap_or_else(|| get_env_with_fallback_parse("PROVER_REGISTRY_PORT", "PORT", 8090));
        format!("{}:{}", host, port)
    }
}

/// サーバーを起動し、シャットダウンまで待機する
pub async fn execute(args: &ServeArgs) -> anyhow::Result<()> {
    info!("Prover registry v{}", env!("CARGO_PKG_VERSION"));

    let config = RegistryConfig::from_env().context("invalid registry configuration")?;
    info!(
        registration_schema = %config.registration_schema,
        registration_timeout_secs = config.registration_timeout_secs,
        probe_timeout_secs = config.probe_timeout_secs,
        list_limit = config.list_limit,
        cache_max_age_secs = config.cache_max_age_secs,
        "Registry configuration loaded"
    );

    let database_url = get_database_url();
    let pool = crate::db::init_db_pool(&database_url)
        .await
        .with_context(|| format!("failed to open database {}", database_url))?;

    let store = Arc::new(SqliteEndpointStore::new(pool));
    let state = AppState::new(store, reqwest::Client::new(), config);

    let bind_addr = args.bind_addr();
    crate::server::run(state, &bind_addr)
        .await
        .with_context(|| format!("server error on {}", bind_addr))?;

    Ok(())
}
