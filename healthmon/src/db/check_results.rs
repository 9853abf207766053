//! ヘルスチェック結果のストレージ層
//!
//! SQLiteベースで `CheckResult` を1件1行で永続化する。
//! テーブル名は実行時に与えられるため、引用符付き識別子としてSQLに埋め込む。

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;

use crate::common::error::{MonitorError, MonitorResult};
use crate::db::traits::ResultStore;
use crate::types::health::{CheckOutcome, CheckResult, HealthStatus};

/// テーブル名を検証
///
/// 文字種は制限しない。空文字列とNUL文字のみ拒否する。
pub fn validate_table_name(table_name: &str) -> MonitorResult<()> {
    if table_name.is_empty() || table_name.contains('\0') {
        return Err(MonitorError::Config(format!(
            "Invalid table name {:?}: must be non-empty and must not contain NUL",
            table_name
        )));
    }
    Ok(())
}

/// SQL識別子として引用符で囲む（埋め込まれた `"` は二重化）
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// 保存済みのヘルスチェック結果
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StoredCheckResult {
    /// 行ID
    pub id: i64,
    /// 結果本体
    #[serde(flatten)]
    pub result: CheckResult,
}

/// SQLite結果ストア
#[derive(Clone)]
pub struct SqliteResultStore {
    pool: SqlitePool,
    table_name: String,
}

impl SqliteResultStore {
    /// 既存のプールからストアを作成
    ///
    /// テーブルの存在は確認しない（最初の書き込みで失敗が表面化する）。
    pub fn new(pool: SqlitePool, table_name: impl Into<String>) -> MonitorResult<Self> {
        let table_name = table_name.into();
        validate_table_name(&table_name)?;
        Ok(Self { pool, table_name })
    }

    /// データベースURLからストアを作成
    ///
    /// 接続は遅延させるため、この時点ではファイルにもテーブルにも触れない。
    /// 到達できないデータベースは最初の書き込みで `sqlx::Error` として表面化する。
    pub async fn connect(database_url: &str, table_name: &str) -> MonitorResult<Self> {
        validate_table_name(table_name)?;

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_lazy_with(options);

        tracing::debug!(database_url, table_name, "Result store configured");
        Self::new(pool, table_name)
    }

    /// データベース接続プール
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// テーブルを作成（存在すれば何もしない）
    ///
    /// データベースファイルの親ディレクトリもここで作成する。
    pub async fn provision(&self) -> Result<(), sqlx::Error> {
        ensure_parent_dir(self.pool.connect_options().get_filename())?;

        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                url TEXT NOT NULL,
                status_code INTEGER NOT NULL,
                latency_ms TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                status TEXT NOT NULL,
                error TEXT
            )
            "#,
            table = quote_identifier(&self.table_name)
        );
        sqlx::query(&ddl).execute(&self.pool).await?;

        let index = format!(
            "CREATE INDEX IF NOT EXISTS {index} ON {table} (name, id)",
            index = quote_identifier(&format!("idx_{}_name", self.table_name)),
            table = quote_identifier(&self.table_name)
        );
        sqlx::query(&index).execute(&self.pool).await?;

        tracing::info!(table_name = %self.table_name, "Result table provisioned");
        Ok(())
    }

    /// 保存済み結果を新しい順に取得
    pub async fn list_results(
        &self,
        name: Option<&str>,
        limit: i64,
    ) -> Result<Vec<StoredCheckResult>, sqlx::Error> {
        let sql = format!(
            r#"
            SELECT id, name, url, status_code, latency_ms, timestamp, status, error
            FROM {}
            WHERE (?1 IS NULL OR name = ?1)
            ORDER BY id DESC
            LIMIT ?2
            "#,
            quote_identifier(&self.table_name)
        );

        let rows = sqlx::query_as::<_, CheckResultRow>(&sql)
            .bind(name)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(StoredCheckResult::try_from).collect()
    }
}

#[async_trait]
impl ResultStore for SqliteResultStore {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn put_result(&self, result: &CheckResult) -> Result<(), sqlx::Error> {
        let sql = format!(
            r#"
            INSERT INTO {} (
                name, url, status_code, latency_ms, timestamp, status, error
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            quote_identifier(&self.table_name)
        );

        sqlx::query(&sql)
            .bind(&result.name)
            .bind(&result.url)
            .bind(i64::from(result.status_code))
            .bind(result.latency_ms.to_string())
            .bind(&result.timestamp)
            .bind(result.status().as_str())
            .bind(result.error())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// SQLiteファイルの親ディレクトリを作成する
///
/// `:memory:` のようにディレクトリを持たない指定は対象外。
fn ensure_parent_dir(filename: &Path) -> Result<(), sqlx::Error> {
    if let Some(parent) = filename.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

// --- Internal Row Types ---

#[derive(sqlx::FromRow)]
struct CheckResultRow {
    id: i64,
    name: String,
    url: String,
    status_code: i64,
    latency_ms: String,
    timestamp: String,
    status: String,
    error: Option<String>,
}

fn decode_error(message: String) -> sqlx::Error {
    sqlx::Error::Decode(message.into())
}

impl TryFrom<CheckResultRow> for StoredCheckResult {
    type Error = sqlx::Error;

    fn try_from(row: CheckResultRow) -> Result<Self, Self::Error> {
        let status_code = u16::try_from(row.status_code)
            .map_err(|_| decode_error(format!("invalid status_code: {}", row.status_code)))?;
        let latency_ms = Decimal::from_str(&row.latency_ms)
            .map_err(|e| decode_error(format!("invalid latency_ms: {}", e)))?;
        let status = HealthStatus::from_str(&row.status).map_err(decode_error)?;

        let outcome = match status {
            HealthStatus::Healthy => CheckOutcome::Healthy,
            HealthStatus::Unhealthy => CheckOutcome::Unhealthy,
            HealthStatus::Error => CheckOutcome::Error {
                error: row
                    .error
                    .ok_or_else(|| decode_error("missing error for ERROR row".to_string()))?,
            },
        };

        Ok(Self {
            id: row.id,
            result: CheckResult {
                name: row.name,
                url: row.url,
                status_code,
                latency_ms,
                timestamp: row.timestamp,
                outcome,
            },
        })
    }
}
