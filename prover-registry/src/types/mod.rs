//! 型定義モジュール
//!
//! ドメインエンティティの型定義を提供

/// プローバーエンドポイント関連の型定義
pub mod prover;

/// `/status` スキーマ定義
pub mod status;

pub use prover::{EndpointRecord, Network, NewEndpoint, ValidatedProver};
pub use status::{RegistrationSchema, StatusSchema};
