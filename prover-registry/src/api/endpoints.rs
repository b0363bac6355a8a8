//! エンドポイント登録API
//!
//! `POST /api/endpoints` は登録ゲートを通過した場合のみレコードを作成する。

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::error::AppError;
use crate::common::error::{CommonError, RegistryError};
use crate::types::prover::{EndpointRecord, Network, NewEndpoint};
use crate::AppState;

/// 一覧取得のクエリパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct ListEndpointsQuery {
    /// 対象ネットワーク（省略時はmainnet）
    #[serde(default)]
    pub network: Network,
}

/// POST /api/endpoints - エンドポイント登録
pub async fn create_endpoint(
    State(state): State<AppState>,
    payload: Result<Json<NewEndpoint>, JsonRejection>,
) -> Result<(StatusCode, Json<EndpointRecord>), AppError> {
    let Json(req) = payload.map_err(|e| {
        RegistryError::Common(CommonError::Validation(e.body_text()))
    })?;
    let record = state.registry.register(req).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/endpoints - 登録済みエンドポイント一覧（プローブなし）
pub async fn list_endpoints(
    State(state): State<AppState>,
    query: Result<Query<ListEndpointsQuery>, QueryRejection>,
) -> Result<Json<Vec<EndpointRecord>>, AppError> {
    let Query(query) = query.map_err(|e| {
        RegistryError::Common(CommonError::Validation(e.body_text()))
    })?;
    let records = state.registry.list(query.network).await?;
    Ok(Json(records))
}
