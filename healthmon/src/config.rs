//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to legacy variable names with warning logs.

use crate::common::error::{MonitorError, MonitorResult};
use crate::db::check_results::validate_table_name;
use crate::types::endpoint::{find_duplicate_name, Endpoint};

/// テーブル名（必須）
pub const TABLE_NAME_ENV: &str = "HEALTHMON_TABLE_NAME";
/// テーブル名（旧名）
pub const LEGACY_TABLE_NAME_ENV: &str = "TABLE_NAME";
/// データベースURL
pub const DATABASE_URL_ENV: &str = "HEALTHMON_DATABASE_URL";
/// 監視対象一覧（JSON配列）
pub const ENDPOINTS_ENV: &str = "HEALTHMON_ENDPOINTS";

/// データベースURLの既定値
pub const DEFAULT_DATABASE_URL: &str = "sqlite:healthmon.db";

/// Get an environment variable with fallback to a legacy name
///
/// If the new variable name is set, returns its value.
/// If only the old (legacy) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use healthmon::config::get_env_with_fallback;
///
/// let table = get_env_with_fallback("HEALTHMON_TABLE_NAME", "TABLE_NAME");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// 監視設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// ストア識別子（テーブル名）
    pub table_name: String,
    /// SQLiteデータベースURL
    pub database_url: String,
    /// 監視対象（設定順）
    pub endpoints: Vec<Endpoint>,
}

impl MonitorConfig {
    /// 環境変数から設定を読み込む
    ///
    /// テーブル名が未設定（または空）の場合は設定エラー。
    pub fn from_env() -> MonitorResult<Self> {
        let table_name = get_env_with_fallback(TABLE_NAME_ENV, LEGACY_TABLE_NAME_ENV)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                tracing::error!("{} environment variable not found", TABLE_NAME_ENV);
                MonitorError::Config(format!(
                    "{} (or {}) environment variable is required",
                    TABLE_NAME_ENV, LEGACY_TABLE_NAME_ENV
                ))
            })?;
        validate_table_name(&table_name)?;

        let database_url =
            get_env_with_fallback_or(DATABASE_URL_ENV, "DATABASE_URL", DEFAULT_DATABASE_URL);

        let endpoints = match std::env::var(ENDPOINTS_ENV) {
            Ok(raw) => parse_endpoints(&raw)?,
            Err(_) => Endpoint::defaults(),
        };

        Ok(Self {
            table_name,
            database_url,
            endpoints,
        })
    }
}

/// JSON配列から監視対象一覧を読み込む
///
/// 形式: `[{"name": "...", "url": "...", "expectedStatus": 200}, ...]`
pub fn parse_endpoints(raw: &str) -> MonitorResult<Vec<Endpoint>> {
    let endpoints: Vec<Endpoint> = serde_json::from_str(raw).map_err(|e| {
        MonitorError::Config(format!("{} is not a valid endpoint list: {}", ENDPOINTS_ENV, e))
    })?;

    if let Some(name) = find_duplicate_name(&endpoints) {
        return Err(MonitorError::Config(format!(
            "Duplicate endpoint name in {}: {}",
            ENDPOINTS_ENV, name
        )));
    }

    Ok(endpoints)
}
