//! 型定義モジュール
//!
//! ドメインエンティティの型定義を提供

/// エンドポイント関連の型定義
pub mod endpoint;

/// ヘルスチェック結果の型定義
pub mod health;

pub use endpoint::Endpoint;
pub use health::{CheckOutcome, CheckResult, HealthStatus};
