//! HTTP endpoint health monitor
//!
//! 設定済みのHTTPエンドポイントを順番にチェックし、判定結果をSQLiteに記録する。

#![warn(missing_docs)]

/// 共通型定義（エラー型）
pub mod common;

/// ヘルスチェック
pub mod health;

/// データベースアクセス
pub mod db;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// 呼び出しラッパー
pub mod invocation;

/// CLIインターフェース
pub mod cli;

/// 型定義
pub mod types;

pub use common::error::{MonitorError, MonitorResult};
pub use health::EndpointHealthChecker;
pub use types::{CheckOutcome, CheckResult, Endpoint, HealthStatus};
