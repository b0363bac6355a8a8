//! `/status` レスポンスのスキーマ定義
//!
//! プローバーのプロトコル世代によってレスポンス形式が異なる。
//!
//! - 旧形式: `{"minProofFee": .., "currentCapacity": ..}`
//! - 現行形式: `{"minSgxTierFee": <number>}`
//!
//! ライブ集計は現行形式のみを受け付ける。登録ゲートが受け付ける形式は
//! [`RegistrationSchema`] で明示的に設定する。

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::common::error::{CommonError, ProbeError};

/// 旧形式の手数料フィールド
pub const FIELD_MIN_PROOF_FEE: &str = "minProofFee";
/// 旧形式の容量フィールド
pub const FIELD_CURRENT_CAPACITY: &str = "currentCapacity";
/// 現行形式の手数料フィールド
pub const FIELD_MIN_SGX_TIER_FEE: &str = "minSgxTierFee";

/// ボディ検証の共通インターフェース
pub trait BodySchema {
    /// ボディが適合するか検証する
    fn check_body(&self, body: &Value) -> Result<(), ProbeError>;
}

/// `/status` ボディのスキーマ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSchema {
    /// 旧形式（`minProofFee` + `currentCapacity`）
    ///
    /// 両フィールドとも存在かつ非nullであること。キーがあっても値がnullなら不適合。
    /// 値の型は問わない。
    ProofFeeCapacity,
    /// 現行形式（`minSgxTierFee`）
    SgxTierFee,
}

impl StatusSchema {
    /// 必須フィールド一覧
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Self::ProofFeeCapacity => &[FIELD_MIN_PROOF_FEE, FIELD_CURRENT_CAPACITY],
            Self::SgxTierFee => &[FIELD_MIN_SGX_TIER_FEE],
        }
    }

    /// ボディがこのスキーマに適合するか検証する
    ///
    /// フィールドは存在かつ非nullであること。`minSgxTierFee` は数値であること。
    pub fn check(&self, body: &Value) -> Result<(), ProbeError> {
        let object = body
            .as_object()
            .ok_or(ProbeError::SchemaMismatch("object"))?;

        for &field in self.required_fields() {
            match object.get(field) {
                None | Some(Value::Null) => return Err(ProbeError::SchemaMismatch(field)),
                Some(_) => {}
            }
        }

        if *self == Self::SgxTierFee && sgx_tier_fee(body).is_none() {
            return Err(ProbeError::SchemaMismatch(FIELD_MIN_SGX_TIER_FEE));
        }

        Ok(())
    }
}

impl BodySchema for StatusSchema {
    fn check_body(&self, body: &Value) -> Result<(), ProbeError> {
        self.check(body)
    }
}

/// `minSgxTierFee` を数値として取り出す
pub fn sgx_tier_fee(body: &Value) -> Option<serde_json::Number> {
    match body.get(FIELD_MIN_SGX_TIER_FEE) {
        Some(Value::Number(n)) => Some(n.clone()),
        _ => None,
    }
}

/// 登録ゲートが受け付けるスキーマの設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistrationSchema {
    /// 現行形式のみ（ライブ集計と同じ条件）
    #[default]
    SgxTier,
    /// 旧形式のみ
    Legacy,
    /// 両世代を同時に受け付ける（移行期間向けの明示的な選択）
    Any,
}

impl RegistrationSchema {
    /// 設定値の文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SgxTier => "sgx-tier",
            Self::Legacy => "legacy",
            Self::Any => "any",
        }
    }

    /// 受け付けるスキーマ一覧
    pub fn accepted(&self) -> &'static [StatusSchema] {
        match self {
            Self::SgxTier => &[StatusSchema::SgxTierFee],
            Self::Legacy => &[StatusSchema::ProofFeeCapacity],
            Self::Any => &[StatusSchema::SgxTierFee, StatusSchema::ProofFeeCapacity],
        }
    }

    /// いずれかの受け付けスキーマに適合すればOK
    ///
    /// すべて不適合の場合は最初のスキーマの不一致理由を返す。
    pub fn check(&self, body: &Value) -> Result<(), ProbeError> {
        let mut first_err = None;
        for schema in self.accepted() {
            match schema.check(body) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    first_err.get_or_insert(e);
                }
            }
        }
        Err(first_err.unwrap_or(ProbeError::SchemaMismatch("object")))
    }
}

impl BodySchema for RegistrationSchema {
    fn check_body(&self, body: &Value) -> Result<(), ProbeError> {
        self.check(body)
    }
}

impl FromStr for RegistrationSchema {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sgx-tier" | "sgx_tier" | "current" => Ok(Self::SgxTier),
            "legacy" | "proof-fee" => Ok(Self::Legacy),
            "any" | "both" => Ok(Self::Any),
            other => Err(CommonError::Config(format!(
                "unknown registration schema '{}' (expected sgx-tier, legacy or any)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for RegistrationSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
