//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to deprecated variable names with warning logs, and the typed settings the
//! registration gate and live aggregator run with.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::common::error::{CommonError, CommonResult};
use crate::types::status::RegistrationSchema;

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use prover_registry::config::get_env_with_fallback;
///
/// let port = get_env_with_fallback("PROVER_REGISTRY_PORT", "PORT");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns `default` if neither variable is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Read a variable that has no deprecated name, parsing to a specific type
pub fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// プローブ・集計の設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistryConfig {
    /// 登録ゲートが受け付ける `/status` スキーマ (デフォルト: sgx-tier)
    #[serde(default)]
    pub registration_schema: RegistrationSchema,

    /// 登録時プローブのタイムアウト（秒）(デフォルト: 120)
    #[serde(default = "default_registration_timeout")]
    pub registration_timeout_secs: u64,

    /// 集計時プローブのタイムアウト（秒）(デフォルト: 4)
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,

    /// 集計対象の最大件数 (デフォルト: 100)
    #[serde(default = "default_list_limit")]
    pub list_limit: u32,

    /// 集計結果キャッシュの鮮度上限（秒）。0で無効 (デフォルト: 0)
    #[serde(default)]
    pub cache_max_age_secs: u64,
}

fn default_registration_timeout() -> u64 {
    120
}

fn default_probe_timeout() -> u64 {
    4
}

fn default_list_limit() -> u32 {
    100
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            registration_schema: RegistrationSchema::default(),
            registration_timeout_secs: default_registration_timeout(),
            probe_timeout_secs: default_probe_timeout(),
            list_limit: default_list_limit(),
            cache_max_age_secs: 0,
        }
    }
}

impl RegistryConfig {
    /// Load registry configuration from environment variables.
    ///
    /// An unrecognised registration schema is an error.
    pub fn from_env() -> CommonResult<Self> {
        let registration_schema = match get_env_with_fallback(
            "PROVER_REGISTRY_REGISTRATION_SCHEMA",
            "REGISTRATION_SCHEMA",
        ) {
            Some(value) => value.parse()?,
            None => RegistrationSchema::default(),
        };

        let config = Self {
            registration_schema,
            registration_timeout_secs: get_env_parse(
                "PROVER_REGISTRY_REGISTRATION_TIMEOUT_SECS",
                default_registration_timeout(),
            ),
            probe_timeout_secs: get_env_parse(
                "PROVER_REGISTRY_PROBE_TIMEOUT_SECS",
                default_probe_timeout(),
            ),
            list_limit: get_env_parse("PROVER_REGISTRY_LIST_LIMIT", default_list_limit()),
            cache_max_age_secs: get_env_parse("PROVER_REGISTRY_CACHE_MAX_AGE_SECS", 0),
        };
        config.validate()?;
        Ok(config)
    }

    /// 値の整合性チェック
    pub fn validate(&self) -> CommonResult<()> {
        if self.registration_timeout_secs == 0 || self.probe_timeout_secs == 0 {
            return Err(CommonError::Config(
                "probe timeouts must be greater than zero".to_string(),
            ));
        }
        if self.list_limit == 0 {
            return Err(CommonError::Config(
                "list limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// 登録時プローブのタイムアウト
    pub fn registration_timeout(&self) -> Duration {
        Duration::from_secs(self.registration_timeout_secs)
    }

    /// 集計時プローブのタイムアウト
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    /// キャッシュ鮮度上限（無効ならNone）
    pub fn cache_max_age(&self) -> Option<Duration> {
        (self.cache_max_age_secs > 0).then(|| Duration::from_secs(self.cache_max_age_secs))
    }
}

/// データベースURLを取得
///
/// 未設定の場合は `~/.prover-registry/registry.db` を使用する。
pub fn get_database_url() -> String {
    get_env_with_fallback("PROVER_REGISTRY_DATABASE_URL", "DATABASE_URL").unwrap_or_else(|| {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string());
        format!("sqlite:{}/.prover-registry/registry.db", home)
    })
}
