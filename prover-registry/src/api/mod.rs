//! REST APIハンドラー
//!
//! ルーター定義とハンドラーモジュール

pub mod endpoints;
pub mod error;
pub mod provers;
pub mod system;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// APIルーターを作成
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route(
            "/api/endpoints",
            post(endpoints::create_endpoint).get(endpoints::list_endpoints),
        )
        .route("/validProvers", get(provers::valid_provers))
        .route("/validTestnetProvers", get(provers::valid_testnet_provers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
