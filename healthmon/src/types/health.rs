//! ヘルスチェック結果型定義
//!
//! 1回のチェックで1件の `CheckResult` が生成され、生成後は変更されない。

use chrono::Local;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

use super::endpoint::Endpoint;

/// トランスポートエラー時のステータスコード（実在するHTTPコードとは衝突しない）
pub const TRANSPORT_ERROR_STATUS_CODE: u16 = 0;

/// タイムスタンプの書式（ローカル時刻、マイクロ秒精度）
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// ヘルス判定
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    /// 期待どおりのステータスコード
    Healthy,
    /// 応答はあったが期待と異なるステータスコード
    Unhealthy,
    /// リクエスト自体が失敗
    Error,
}

impl HealthStatus {
    /// HealthStatusを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "HEALTHY",
            Self::Unhealthy => "UNHEALTHY",
            Self::Error => "ERROR",
        }
    }
}

impl FromStr for HealthStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HEALTHY" => Ok(Self::Healthy),
            "UNHEALTHY" => Ok(Self::Unhealthy),
            "ERROR" => Ok(Self::Error),
            other => Err(format!("unknown health status: {}", other)),
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// チェックの判定結果
///
/// エラー文字列は `Error` バリアントにしか存在しない。
/// JSONでは `status`（と `error`）フィールドに展開される。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "UPPERCASE")]
pub enum CheckOutcome {
    /// 正常
    Healthy,
    /// 異常（HTTP応答あり）
    Unhealthy,
    /// トランスポートエラー
    Error {
        /// `"<kind>: <message>"` 形式のエラー説明
        error: String,
    },
}

impl CheckOutcome {
    /// 対応するHealthStatus
    pub fn status(&self) -> HealthStatus {
        match self {
            Self::Healthy => HealthStatus::Healthy,
            Self::Unhealthy => HealthStatus::Unhealthy,
            Self::Error { .. } => HealthStatus::Error,
        }
    }
}

/// ヘルスチェック結果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    /// エンドポイント名
    pub name: String,
    /// エンドポイントURL
    pub url: String,
    /// HTTPステータスコード（トランスポートエラー時は0）
    pub status_code: u16,
    /// レイテンシ（ミリ秒、固定小数点）
    pub latency_ms: Decimal,
    /// 結果生成時刻（ローカル時刻）
    pub timestamp: String,
    /// 判定
    #[serde(flatten)]
    pub outcome: CheckOutcome,
}

impl CheckResult {
    /// HTTP応答を受け取った場合の結果を作成
    ///
    /// ステータスコードが期待値と一致すればHealthy、それ以外はUnhealthy。
    pub fn responded(endpoint: &Endpoint, status_code: u16, latency_ms: Decimal) -> Self {
        let outcome = if status_code == endpoint.expected_status {
            CheckOutcome::Healthy
        } else {
            CheckOutcome::Unhealthy
        };

        Self {
            name: endpoint.name.clone(),
            url: endpoint.url.clone(),
            status_code,
            latency_ms,
            timestamp: local_timestamp(),
            outcome,
        }
    }

    /// リクエスト自体が失敗した場合の結果を作成
    ///
    /// 失敗経路では経過時間を計測せず、レイテンシは常に0になる。
    pub fn failed(endpoint: &Endpoint, kind: &str, message: &str) -> Self {
        Self {
            name: endpoint.name.clone(),
            url: endpoint.url.clone(),
            status_code: TRANSPORT_ERROR_STATUS_CODE,
            latency_ms: Decimal::ZERO,
            timestamp: local_timestamp(),
            outcome: CheckOutcome::Error {
                error: format!("{}: {}", kind, message),
            },
        }
    }

    /// 判定ステータス
    pub fn status(&self) -> HealthStatus {
        self.outcome.status()
    }

    /// エラー説明（Errorの場合のみ）
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            CheckOutcome::Error { error } => Some(error),
            _ => None,
        }
    }
}

/// 現在のローカル時刻を文字列化
pub fn local_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// 経過時間をミリ秒の固定小数点数に変換
///
/// ナノ秒精度をそのまま保持し、末尾の0は取り除く。
pub fn latency_from_duration(elapsed: Duration) -> Decimal {
    let nanos = i128::try_from(elapsed.as_nanos()).unwrap_or(i128::MAX);
    Decimal::try_from_i128_with_scale(nanos, 6)
        .unwrap_or(Decimal::MAX)
        .normalize()
}
