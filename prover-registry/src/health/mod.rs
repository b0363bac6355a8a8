//! プローバーのヘルスチェック
//!
//! 外部プローバーサービスの `/status` をプローブするクライアントと、
//! 登録済みエンドポイントを並列にプローブして健全なものだけを返す
//! ライブ集計を提供する。

pub mod aggregator;
pub mod cache;
pub mod probe;

pub use aggregator::LiveAggregator;
pub use cache::ProverCache;
pub use probe::{ProbeClient, ProbeResponse};
