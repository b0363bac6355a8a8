//! エンドポイント登録
//!
//! 書き込み前に登録ゲートを通し、通過したレコードのみをストアへ保存する。

pub mod endpoints;
pub mod gate;

pub use endpoints::EndpointRegistry;
pub use gate::RegistrationGate;
