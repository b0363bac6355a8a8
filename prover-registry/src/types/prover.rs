//! プローバーエンドポイントの型定義

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::common::error::CommonError;

/// 登録先ネットワーク
///
/// mainnet / testnet はそれぞれ独立したレコード集合として扱う。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Network {
    /// 本番ネットワーク
    #[default]
    Mainnet,
    /// テストネット
    Testnet,
}

impl Network {
    /// Networkを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl FromStr for Network {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            other => Err(CommonError::Validation(format!(
                "unknown network '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Registry Storeに保存されるエンドポイントレコード
///
/// `id` と `created_at` はストア側が管理する。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EndpointRecord {
    /// 一意識別子
    pub id: Uuid,
    /// プローバーサービスのベースURL
    pub url: String,
    /// 登録先ネットワーク
    pub network: Network,
    /// 登録日時
    pub created_at: DateTime<Utc>,
}

impl EndpointRecord {
    /// 新しいレコードを作成（ID・登録日時を採番）
    pub fn new(url: String, network: Network) -> Self {
        Self {
            id: Uuid::new_v4(),
            url,
            network,
            created_at: Utc::now(),
        }
    }
}

/// 登録候補（書き込み前のレコード）
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct NewEndpoint {
    /// ベースURL
    pub url: String,
    /// 登録先ネットワーク（省略時はmainnet）
    #[serde(default)]
    pub network: Network,
}

/// ライブ集計の出力単位
///
/// `minimumGas` は `/status` の `minSgxTierFee` をそのまま転記する。
/// 整数の手数料は整数のままシリアライズされる。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidatedProver {
    /// レコードのURL
    pub url: String,
    /// 最低手数料
    #[serde(rename = "minimumGas")]
    pub minimum_gas: serde_json::Number,
}
