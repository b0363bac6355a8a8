//! データベースアクセス層
//!
//! SQLiteベースのRegistry Store

/// エンドポイント管理
pub mod endpoints;

/// Repository traitパターン（テスタビリティ向上）
pub mod traits;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

use crate::common::error::{RegistryError, RegistryResult};

/// データベース接続プールを作成し、マイグレーションを実行する
///
/// SQLiteファイルはディレクトリが存在しないと作成できないため、先に作成しておく。
pub async fn init_db_pool(database_url: &str) -> RegistryResult<SqlitePool> {
    if let Some(path) = database_url.strip_prefix("sqlite:") {
        // `sqlite::memory:` のような特殊指定はスキップ
        if !path.starts_with(':') {
            let normalized = path.trim_start_matches("//");
            let path_without_params = normalized.split('?').next().unwrap_or(normalized);
            if let Some(parent) = std::path::Path::new(path_without_params).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        RegistryError::Database(format!(
                            "Failed to create database directory {}: {}",
                            parent.display(),
                            e
                        ))
                    })?;
                }
            }
        }
    }

    let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| RegistryError::Database(format!("Migration failed: {}", e)))?;

    Ok(pool)
}
