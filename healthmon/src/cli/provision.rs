//! provision サブコマンド
//!
//! 設定されたテーブルを作成します。

use crate::config::MonitorConfig;
use crate::db::check_results::SqliteResultStore;

/// provision コマンドを実行
pub async fn execute() -> Result<(), anyhow::Error> {
    let config = MonitorConfig::from_env()?;
    let store = SqliteResultStore::connect(&config.database_url, &config.table_name).await?;
    store.provision().await?;

    println!(
        "Table '{}' is ready in {}",
        config.table_name, config.database_url
    );
    Ok(())
}
