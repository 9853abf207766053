use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use healthmon::db::traits::ResultStore;
use healthmon::db::SqliteResultStore;
use healthmon::CheckResult;
use tempfile::TempDir;

/// 書き込み回数を数え、指定回目の書き込みだけ失敗させるストア
#[allow(dead_code)]
#[derive(Default)]
pub struct ScriptedStore {
    calls: AtomicUsize,
    fail_on_call: Option<usize>,
    records: Mutex<Vec<CheckResult>>,
}

#[allow(dead_code)]
impl ScriptedStore {
    /// 常に成功するストア
    pub fn new() -> Self {
        Self::default()
    }

    /// `call`回目（1始まり）の書き込みで失敗するストア
    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Self::default()
        }
    }

    /// 書き込みが呼ばれた回数（失敗を含む）
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 書き込みに成功した結果
    pub fn records(&self) -> Vec<CheckResult> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResultStore for ScriptedStore {
    fn table_name(&self) -> &str {
        "scripted"
    }

    async fn put_result(&self, result: &CheckResult) -> Result<(), sqlx::Error> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_call == Some(call) {
            return Err(sqlx::Error::Protocol("simulated write failure".to_string()));
        }
        self.records.lock().unwrap().push(result.clone());
        Ok(())
    }
}

/// 一時ディレクトリ上のSQLiteデータベースURLを作成
#[allow(dead_code)]
pub fn temp_database_url() -> (TempDir, String) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let url = format!("sqlite:{}", dir.path().join("healthmon.db").display());
    (dir, url)
}

/// テーブル作成済みのSQLiteストアを用意
#[allow(dead_code)]
pub async fn provisioned_store(database_url: &str, table_name: &str) -> SqliteResultStore {
    let store = SqliteResultStore::connect(database_url, table_name)
        .await
        .expect("Failed to connect to result store");
    store.provision().await.expect("Failed to provision table");
    store
}
