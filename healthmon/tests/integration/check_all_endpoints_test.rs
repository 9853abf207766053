//! Integration Test: 全エンドポイントの順次チェック
//!
//! 設定順での処理、ストア書き込み失敗時の中断

use std::sync::Arc;

use healthmon::{EndpointHealthChecker, Endpoint, HealthStatus, MonitorError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::store::ScriptedStore;

async fn mount_expecting(server: &MockServer, route: &str, status: u16, calls: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .expect(calls)
        .mount(server)
        .await;
}

fn endpoints(server: &MockServer) -> Vec<Endpoint> {
    vec![
        Endpoint::new("first", format!("{}/first", server.uri()), 200),
        Endpoint::new("second", format!("{}/second", server.uri()), 200),
        Endpoint::new("third", format!("{}/third", server.uri()), 200),
    ]
}

#[tokio::test]
async fn test_returns_all_results_in_configured_order() {
    let server = MockServer::start().await;
    mount_expecting(&server, "/first", 200, 1).await;
    mount_expecting(&server, "/second", 500, 1).await;
    mount_expecting(&server, "/third", 200, 1).await;

    let store = Arc::new(ScriptedStore::new());
    let checker = EndpointHealthChecker::new(store.clone())
        .unwrap()
        .with_endpoints(endpoints(&server));

    let results = checker.check_all_endpoints().await.unwrap();

    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["first", "second", "third"]);
    assert_eq!(results[1].status(), HealthStatus::Unhealthy);
    assert_eq!(store.call_count(), 3);
    assert_eq!(store.records(), results);

    server.verify().await;
}

#[tokio::test]
async fn test_store_failure_aborts_remaining_endpoints() {
    let server = MockServer::start().await;
    mount_expecting(&server, "/first", 200, 1).await;
    mount_expecting(&server, "/second", 200, 1).await;
    mount_expecting(&server, "/third", 200, 0).await;

    let store = Arc::new(ScriptedStore::failing_on(2));
    let checker = EndpointHealthChecker::new(store.clone())
        .unwrap()
        .with_endpoints(endpoints(&server));

    let err = checker.check_all_endpoints().await.unwrap_err();

    assert!(matches!(err, MonitorError::Storage(_)));
    assert_eq!(store.call_count(), 2);
    assert_eq!(store.records().len(), 1);
    assert_eq!(store.records()[0].name, "first");

    // 3番目のエンドポイントにはリクエストが送られていない
    server.verify().await;
}

#[tokio::test]
async fn test_transport_error_does_not_abort_batch() {
    let server = MockServer::start().await;
    mount_expecting(&server, "/first", 200, 1).await;

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let closed_port = listener.local_addr().unwrap().port();
    drop(listener);

    let store = Arc::new(ScriptedStore::new());
    let checker = EndpointHealthChecker::new(store.clone())
        .unwrap()
        .with_endpoints(vec![
            Endpoint::new("closed", format!("http://127.0.0.1:{}/", closed_port), 200),
            Endpoint::new("first", format!("{}/first", server.uri()), 200),
        ]);

    let results = checker.check_all_endpoints().await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].status(), HealthStatus::Error);
    assert_eq!(results[1].status(), HealthStatus::Healthy);
    // Error 結果もストアに記録される
    assert_eq!(store.records().len(), 2);
}
