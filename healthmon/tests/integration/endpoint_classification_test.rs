//! Integration Test: 単一エンドポイントの判定
//!
//! 応答ステータスと期待値の比較、トランスポートエラーの Error 結果への変換

use std::sync::Arc;
use std::time::Duration;

use healthmon::{EndpointHealthChecker, Endpoint, HealthStatus};
use rust_decimal::Decimal;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::store::ScriptedStore;

fn checker() -> EndpointHealthChecker {
    EndpointHealthChecker::new(Arc::new(ScriptedStore::new())).unwrap()
}

async fn mock_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_expected_status_is_healthy() {
    let server = MockServer::start().await;
    mock_status(&server, "/ok", 200).await;

    let endpoint = Endpoint::new("ok", format!("{}/ok", server.uri()), 200);
    let result = checker().check_single_endpoint(&endpoint).await;

    assert_eq!(result.status(), HealthStatus::Healthy);
    assert_eq!(result.status_code, 200);
    assert_eq!(result.name, "ok");
    assert_eq!(result.url, endpoint.url);
    assert!(result.error().is_none());
    assert!(result.latency_ms > Decimal::ZERO);
}

#[tokio::test]
async fn test_non_200_expected_status_is_healthy() {
    let server = MockServer::start().await;
    mock_status(&server, "/no-content", 204).await;

    let endpoint = Endpoint::new("nc", format!("{}/no-content", server.uri()), 204);
    let result = checker().check_single_endpoint(&endpoint).await;

    assert_eq!(result.status(), HealthStatus::Healthy);
    assert_eq!(result.status_code, 204);
}

#[tokio::test]
async fn test_unexpected_status_is_unhealthy() {
    let server = MockServer::start().await;
    mock_status(&server, "/down", 503).await;
    mock_status(&server, "/missing", 404).await;

    for (route, code) in [("/down", 503u16), ("/missing", 404u16)] {
        let endpoint = Endpoint::new(route, format!("{}{}", server.uri(), route), 200);
        let result = checker().check_single_endpoint(&endpoint).await;

        assert_eq!(result.status(), HealthStatus::Unhealthy);
        assert_eq!(result.status_code, code);
        assert!(result.error().is_none());
        assert!(result.latency_ms > Decimal::ZERO);
    }
}

#[tokio::test]
async fn test_connection_refused_is_error() {
    // 空きポートを確保してすぐ解放し、接続拒否を起こす
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let endpoint = Endpoint::new("refused", format!("http://127.0.0.1:{}/", port), 200);
    let result = checker().check_single_endpoint(&endpoint).await;

    assert_eq!(result.status(), HealthStatus::Error);
    assert_eq!(result.status_code, 0);
    assert_eq!(result.latency_ms, Decimal::ZERO);
    let error = result.error().unwrap();
    assert!(error.starts_with("ConnectionError: "), "got {}", error);
    assert!(error.len() > "ConnectionError: ".len());
}

#[tokio::test]
async fn test_timeout_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let endpoint = Endpoint::new("slow", server.uri(), 200);
    let result = checker()
        .with_timeout(Duration::from_millis(200))
        .unwrap()
        .check_single_endpoint(&endpoint)
        .await;

    assert_eq!(result.status(), HealthStatus::Error);
    assert_eq!(result.status_code, 0);
    assert_eq!(result.latency_ms, Decimal::ZERO);
    assert!(result.error().unwrap().starts_with("Timeout: "));
}
