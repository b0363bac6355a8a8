//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! プローブ失敗（`ProbeError`）は原因ごとに分類されるが、呼び出し側（登録ゲート・
//! ライブ集計）はすべて「probe failed」として一律に扱う。

use axum::http::StatusCode;
use thiserror::Error;

/// 登録ゲートが返す固定のユーザー向けメッセージ
pub const REGISTRATION_REJECTED_MESSAGE: &str =
    "registration rejected: endpoint failed liveness/schema probe";

/// プローブ失敗の原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// タイムアウト
    #[error("probe timed out")]
    Timeout,

    /// 接続エラー等のネットワーク障害
    #[error("network error: {0}")]
    Network(String),

    /// 200以外のHTTPステータス
    #[error("unexpected HTTP status: {0}")]
    BadStatus(u16),

    /// JSONとして解釈できないレスポンスボディ
    #[error("malformed response body: {0}")]
    MalformedBody(String),

    /// 必須フィールドの欠落
    #[error("status body does not match schema: {0}")]
    SchemaMismatch(&'static str),
}

impl ProbeError {
    /// reqwestのエラーをプローブ失敗に分類する
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::MalformedBody(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// prover registry error type
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// 登録ゲートのプローブに失敗した（原因はログのみに残す）
    #[error("registration rejected: endpoint failed liveness/schema probe ({0})")]
    RegistrationRejected(ProbeError),

    /// URL形式が不正
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Conflict error (duplicate endpoint)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),
}

impl RegistryError {
    /// Returns a safe error message for external clients.
    ///
    /// Probe causes, database details and internal addresses stay in the
    /// server logs; clients only see these fixed strings.
    pub fn external_message(&self) -> &'static str {
        match self {
            Self::Common(_) => "Request error",
            Self::RegistrationRejected(_) => REGISTRATION_REJECTED_MESSAGE,
            Self::InvalidUrl(_) => "Invalid URL",
            Self::Conflict(_) => "Endpoint already registered",
            Self::Database(_) => "Database error",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Common(CommonError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Common(CommonError::Config(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Common(_) => StatusCode::BAD_REQUEST,
            Self::RegistrationRejected(_) => StatusCode::BAD_REQUEST,
            Self::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for RegistryError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return Self::Conflict(db_err.message().to_string());
            }
        }
        Self::Database(err.to_string())
    }
}

/// Result type alias (Common)
pub type CommonResult<T> = Result<T, CommonError>;

/// Result type alias (registry)
pub type RegistryResult<T> = Result<T, RegistryError>;
