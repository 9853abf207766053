//! エンドポイントヘルスチェッカー
//!
//! 設定済みエンドポイントへ順番にGETを送り、判定結果を結果ストアへ記録する。
//!
//! - 応答を受け取れた場合はステータスコードで Healthy / Unhealthy を判定
//! - リクエスト自体が失敗した場合は Error 結果に畳み込み、呼び出し元へは伝播しない
//! - ストアへの書き込み失敗は伝播し、残りのエンドポイントはチェックしない

use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, info_span, warn, Instrument, Span};

use crate::common::error::{MonitorError, MonitorResult};
use crate::db::traits::ResultStore;
use crate::types::endpoint::Endpoint;
use crate::types::health::{latency_from_duration, CheckResult};

/// ヘルスチェックのタイムアウト（秒）
const HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;

/// リクエストに付与する識別用User-Agent
pub const USER_AGENT: &str = "HealthMonitor/1.0";

/// エンドポイントヘルスチェッカー
#[derive(Clone)]
pub struct EndpointHealthChecker {
    /// 結果ストア
    store: Arc<dyn ResultStore>,
    /// HTTPクライアント
    client: Client,
    /// 監視対象（設定順）
    endpoints: Vec<Endpoint>,
    /// ログ出力先スパン
    span: Span,
}

impl EndpointHealthChecker {
    /// 新しいヘルスチェッカーを作成
    ///
    /// ストアの到達性やテーブルの存在は検証しない。
    pub fn new(store: Arc<dyn ResultStore>) -> MonitorResult<Self> {
        let client = build_client(Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS))?;
        let span = info_span!("health_checker", table_name = %store.table_name());
        let endpoints = Endpoint::defaults();

        span.in_scope(|| {
            info!(
                count = endpoints.len(),
                table_name = %store.table_name(),
                "Health checker initialized"
            );
        });

        Ok(Self {
            store,
            client,
            endpoints,
            span,
        })
    }

    /// 監視対象を差し替える
    pub fn with_endpoints(mut self, endpoints: Vec<Endpoint>) -> Self {
        self.span.in_scope(|| {
            let names: Vec<&str> = endpoints.iter().map(|e| e.name.as_str()).collect();
            info!(count = endpoints.len(), ?names, "Configured endpoints");
        });
        self.endpoints = endpoints;
        self
    }

    /// リクエストタイムアウトを変更する
    pub fn with_timeout(mut self, timeout: Duration) -> MonitorResult<Self> {
        self.client = build_client(timeout)?;
        Ok(self)
    }

    /// ログ出力先スパンを差し替える
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// 監視対象一覧
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// 単一エンドポイントのヘルスチェック
    ///
    /// トランスポートエラーは `CheckOutcome::Error` の結果として返す。
    pub async fn check_single_endpoint(&self, endpoint: &Endpoint) -> CheckResult {
        self.send_check(endpoint).instrument(self.span.clone()).await
    }

    /// チェック結果をストアに記録
    pub async fn store_result(&self, result: &CheckResult) -> MonitorResult<()> {
        self.persist(result).instrument(self.span.clone()).await
    }

    /// 全エンドポイントを設定順にチェックして記録
    ///
    /// 記録に失敗した時点で中断し、以降のエンドポイントはチェックしない。
    pub async fn check_all_endpoints(&self) -> MonitorResult<Vec<CheckResult>> {
        let span = self.span.clone();
        async move {
            let total = self.endpoints.len();
            info!(count = total, "Beginning health checks");

            let mut results = Vec::with_capacity(total);
            for (index, endpoint) in self.endpoints.iter().enumerate() {
                info!(
                    position = index + 1,
                    total,
                    endpoint_name = %endpoint.name,
                    "Processing endpoint"
                );
                let result = self.send_check(endpoint).await;
                self.persist(&result).await?;
                results.push(result);
            }

            info!(processed = results.len(), "Completed all health checks");
            Ok(results)
        }
        .instrument(span)
        .await
    }

    async fn send_check(&self, endpoint: &Endpoint) -> CheckResult {
        info!(
            endpoint_name = %endpoint.name,
            url = %endpoint.url,
            "Starting health check"
        );

        let start = Instant::now();
        let response = self
            .client
            .get(&endpoint.url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await;

        match response {
            Ok(response) => {
                let latency_ms = latency_from_duration(start.elapsed());
                let status_code = response.status().as_u16();
                let result = CheckResult::responded(endpoint, status_code, latency_ms);

                info!(
                    endpoint_name = %endpoint.name,
                    status_code,
                    latency_ms = %latency_ms,
                    status = %result.status(),
                    "Health check completed"
                );
                result
            }
            Err(e) => {
                // 失敗経路ではレイテンシを計測しない
                let kind = transport_error_kind(&e);
                let result = CheckResult::failed(endpoint, kind, &e.to_string());

                warn!(
                    endpoint_name = %endpoint.name,
                    url = %endpoint.url,
                    error = result.error().unwrap_or_default(),
                    "Health check request failed"
                );
                result
            }
        }
    }

    async fn persist(&self, result: &CheckResult) -> MonitorResult<()> {
        match self.store.put_result(result).await {
            Ok(()) => {
                info!(
                    endpoint_name = %result.name,
                    table_name = %self.store.table_name(),
                    "Stored health check result"
                );
                Ok(())
            }
            Err(e) => {
                let err = MonitorError::Storage(e);
                error!(
                    endpoint_name = %result.name,
                    table_name = %self.store.table_name(),
                    error = %err.describe(),
                    "Failed to store health check result"
                );
                Err(err)
            }
        }
    }
}

fn build_client(timeout: Duration) -> MonitorResult<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| MonitorError::Http(format!("Failed to create HTTP client: {}", e)))
}

/// HTTPクライアントのエラーを種別名に分類
pub fn transport_error_kind(err: &reqwest::Error) -> &'static str {
    if err.is_timeout() {
        "Timeout"
    } else if err.is_builder() {
        "InvalidURL"
    } else if err.is_connect() {
        "ConnectionError"
    } else if err.is_redirect() {
        "TooManyRedirects"
    } else if err.is_decode() || err.is_body() {
        "ContentDecodingError"
    } else {
        "RequestException"
    }
}
