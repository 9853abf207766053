//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! エンドポイントへのリクエスト失敗（トランスポートエラー）はここには含まれない。
//! それらは `CheckOutcome::Error` としてチェック結果に畳み込まれる。

use thiserror::Error;

/// ヘルスモニターのエラー型
#[derive(Debug, Error)]
pub enum MonitorError {
    /// 設定エラー（必須環境変数の欠落など）
    #[error("{0}")]
    Config(String),

    /// 結果ストアへの書き込み・読み出しエラー
    #[error(transparent)]
    Storage(#[from] sqlx::Error),

    /// HTTPクライアントの構築エラー
    #[error("{0}")]
    Http(String),

    /// Serialization error
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl MonitorError {
    /// エラー種別名を返す
    ///
    /// 呼び出し元への応答では `"<kind>: <message>"` 形式で使われる。
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "ConfigurationError",
            Self::Storage(_) => "StorageError",
            Self::Http(_) => "HttpClientError",
            Self::Serialization(_) => "SerializationError",
        }
    }

    /// 設定エラーかどうか
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// `"<kind>: <message>"` 形式の説明文
    pub fn describe(&self) -> String {
        format!("{}: {}", self.kind(), self)
    }
}

/// Result alias
pub type MonitorResult<T> = Result<T, MonitorError>;
