//! ロギング初期化ユーティリティ
//!
//! サブスクライバーはプロセス起動時に一度だけ構築・登録する。
//! 各コンポーネントはスパンを受け取ってその下にイベントを記録する。

use std::str::FromStr;
use tracing::Dispatch;
use tracing_subscriber::{fmt, fmt::MakeWriter, layer::SubscriberExt, EnvFilter};

use crate::config::get_env_with_fallback_or;

/// ログレベル
pub const LOG_LEVEL_ENV: &str = "HEALTHMON_LOG_LEVEL";
/// ログ形式（text / json）
pub const LOG_FORMAT_ENV: &str = "HEALTHMON_LOG_FORMAT";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 人間向けテキスト
    #[default]
    Text,
    /// 1行1JSON
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: {}", other)),
        }
    }
}

/// ロギング設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// EnvFilter形式のレベル指定（例: `info`, `healthmon=debug,sqlx=warn`）
    pub level: String,
    /// 出力形式
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

impl LoggingConfig {
    /// 環境変数から読み込む（不正な形式指定はテキストにフォールバック）
    pub fn from_env() -> Self {
        let level = get_env_with_fallback_or(LOG_LEVEL_ENV, "LOG_LEVEL", "info");
        let format = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        Self { level, format }
    }
}

/// 設定から標準出力向けのディスパッチャを構築する
pub fn build_dispatch(config: &LoggingConfig) -> Dispatch {
    build_dispatch_with_writer(config, std::io::stdout)
}

/// 出力先を指定してディスパッチャを構築する
///
/// レベル指定が解釈できない場合は `info` にフォールバックする。
pub fn build_dispatch_with_writer<W>(config: &LoggingConfig, writer: W) -> Dispatch
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let (text_layer, json_layer) = match config.format {
        LogFormat::Text => (
            Some(fmt::layer().with_target(false).with_writer(writer)),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(writer),
            ),
        ),
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer);

    Dispatch::new(subscriber)
}

/// グローバルサブスクライバーを登録する（プロセス起動時に一度だけ呼ぶ）
pub fn init(config: &LoggingConfig) -> Result<(), tracing::dispatcher::SetGlobalDefaultError> {
    tracing::dispatcher::set_global_default(build_dispatch(config))
}
