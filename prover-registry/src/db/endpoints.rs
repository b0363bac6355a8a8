//! プローバーエンドポイントのデータベース操作

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::traits::EndpointStore;
use crate::types::prover::{EndpointRecord, Network};

/// エンドポイントを登録
pub async fn create_endpoint(pool: &SqlitePool, record: &EndpointRecord) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO prover_endpoints (id, url, network, created_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(record.id.to_string())
    .bind(&record.url)
    .bind(record.network.as_str())
    .bind(record.created_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// ネットワーク単位でエンドポイント一覧を取得（登録順、最大 `limit` 件）
pub async fn list_endpoints(
    pool: &SqlitePool,
    network: Network,
    limit: u32,
) -> Result<Vec<EndpointRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, EndpointRow>(
        r#"
        SELECT id, url, network, created_at
        FROM prover_endpoints
        WHERE network = ?
        ORDER BY created_at ASC, rowid ASC
        LIMIT ?
        "#,
    )
    .bind(network.as_str())
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

/// ネットワーク内の登録件数
pub async fn count_endpoints(pool: &SqlitePool, network: Network) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM prover_endpoints WHERE network = ?")
        .bind(network.as_str())
        .fetch_one(pool)
        .await
}

#[derive(sqlx::FromRow)]
struct EndpointRow {
    id: String,
    url: String,
    network: String,
    created_at: String,
}

impl From<EndpointRow> for EndpointRecord {
    fn from(row: EndpointRow) -> Self {
        EndpointRecord {
            id: Uuid::parse_str(&row.id).unwrap_or_default(),
            url: row.url,
            network: row.network.parse().unwrap_or_default(),
            created_at: chrono::DateTime::parse_from_rfc3339(&row.created_at)
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .unwrap_or_else(|_| chrono::Utc::now()),
        }
    }
}

/// SQLiteによるRegistry Store実装
#[derive(Debug, Clone)]
pub struct SqliteEndpointStore {
    pool: SqlitePool,
}

impl SqliteEndpointStore {
    /// SQLiteプールからストアを作成
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EndpointStore for SqliteEndpointStore {
    async fn create_endpoint(&self, record: &EndpointRecord) -> Result<(), sqlx::Error> {
        create_endpoint(&self.pool, record).await
    }

    async fn list_endpoints(
        &self,
        network: Network,
        limit: u32,
    ) -> Result<Vec<EndpointRecord>, sqlx::Error> {
        list_endpoints(&self.pool, network, limit).await
    }
}
