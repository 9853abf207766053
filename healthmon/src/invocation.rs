//! 呼び出しラッパー
//!
//! イベントとコンテキストを受け取り、設定読み込み → ストア接続 → 全エンドポイントのチェックを行い、
//! 結果を `{ statusCode, body }` 形式の応答にまとめる。
//! 失敗はすべて statusCode 500 の応答に変換され、呼び出し元へは伝播しない。

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, info_span, Instrument, Span};
use uuid::Uuid;

use crate::common::error::{MonitorError, MonitorResult};
use crate::config::MonitorConfig;
use crate::db::check_results::SqliteResultStore;
use crate::health::EndpointHealthChecker;
use crate::types::health::{local_timestamp, CheckResult};

/// 成功時のメッセージ
pub const SUCCESS_MESSAGE: &str = "Health checks completed";
/// 設定エラー時のメッセージ
pub const CONFIG_ERROR_MESSAGE: &str = "Configuration error";
/// その他の失敗時のメッセージ
pub const FAILURE_MESSAGE: &str = "Error executing health checks";

/// 呼び出しコンテキスト
#[derive(Debug, Clone)]
pub struct InvocationContext {
    /// リクエストID
    pub request_id: Uuid,
    /// 呼び出し元の関数名
    pub function_name: String,
}

impl InvocationContext {
    /// 新しいリクエストIDでコンテキストを作成
    pub fn new(function_name: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            function_name: function_name.into(),
        }
    }
}

impl Default for InvocationContext {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"))
    }
}

/// 呼び出し応答
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    /// 200（成功）または 500（失敗）
    pub status_code: u16,
    /// JSON文字列化された本文
    pub body: String,
}

impl InvocationResponse {
    /// 成功応答かどうか
    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }

    /// 本文をJSONとして解析する
    pub fn body_json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}

#[derive(Serialize)]
struct SuccessBody<'a> {
    message: &'static str,
    timestamp: String,
    results: &'a [CheckResult],
}

/// 環境変数の設定でヘルスチェックを1回実行する
pub async fn handle(event: &Value, context: &InvocationContext) -> InvocationResponse {
    let span = invocation_span(context);
    let config = span.in_scope(MonitorConfig::from_env);
    handle_in_span(event, config, span).await
}

/// 与えられた設定でヘルスチェックを1回実行する
pub async fn handle_with_config(
    event: &Value,
    context: &InvocationContext,
    config: MonitorResult<MonitorConfig>,
) -> InvocationResponse {
    handle_in_span(event, config, invocation_span(context)).await
}

fn invocation_span(context: &InvocationContext) -> Span {
    info_span!(
        "invocation",
        request_id = %context.request_id,
        function_name = %context.function_name
    )
}

async fn handle_in_span(
    event: &Value,
    config: MonitorResult<MonitorConfig>,
    span: Span,
) -> InvocationResponse {
    async move {
        info!("Handler started");
        info!(event = %event, "Event received");

        match run(config).await.and_then(|results| success_response(&results)) {
            Ok(response) => {
                info!("Health check process completed successfully");
                response
            }
            Err(e) => {
                error!(
                    kind = e.kind(),
                    error = %e,
                    "Critical error in health check execution"
                );
                failure_response(&e)
            }
        }
    }
    .instrument(span)
    .await
}

async fn run(config: MonitorResult<MonitorConfig>) -> MonitorResult<Vec<CheckResult>> {
    let config = config?;
    info!(table_name = %config.table_name, "Retrieved table name from configuration");

    let store = SqliteResultStore::connect(&config.database_url, &config.table_name).await?;
    let checker = EndpointHealthChecker::new(Arc::new(store))?
        .with_span(Span::current())
        .with_endpoints(config.endpoints);

    info!("Starting health check process");
    checker.check_all_endpoints().await
}

fn success_response(results: &[CheckResult]) -> MonitorResult<InvocationResponse> {
    let body = SuccessBody {
        message: SUCCESS_MESSAGE,
        timestamp: local_timestamp(),
        results,
    };

    Ok(InvocationResponse {
        status_code: 200,
        body: serde_json::to_string(&body)?,
    })
}

/// 失敗応答を作成
pub fn failure_response(err: &MonitorError) -> InvocationResponse {
    let message = if err.is_config() {
        CONFIG_ERROR_MESSAGE
    } else {
        FAILURE_MESSAGE
    };

    InvocationResponse {
        status_code: 500,
        body: json!({
            "message": message,
            "error": err.describe(),
        })
        .to_string(),
    }
}
