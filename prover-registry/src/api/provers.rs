//! 健全なプローバー一覧API
//!
//! 呼び出しのたびに登録済みエンドポイントをライブ集計する
//! （キャッシュ有効時を除く）。

use axum::{extract::State, Json};

use super::error::AppError;
use crate::types::prover::{Network, ValidatedProver};
use crate::AppState;

async fn valid_provers_for(
    state: &AppState,
    network: Network,
) -> Result<Json<Vec<ValidatedProver>>, AppError> {
    let provers = state.aggregator.valid_provers(network).await?;
    Ok(Json(provers))
}

/// GET /validProvers - mainnetの健全なプローバー
pub async fn valid_provers(
    State(state): State<AppState>,
) -> Result<Json<Vec<ValidatedProver>>, AppError> {
    valid_provers_for(&state, Network::Mainnet).await
}

/// GET /validTestnetProvers - testnetの健全なプローバー
pub async fn valid_testnet_provers(
    State(state): State<AppState>,
) -> Result<Json<Vec<ValidatedProver>>, AppError> {
    valid_provers_for(&state, Network::Testnet).await
}
