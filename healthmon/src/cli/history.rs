//! history サブコマンド
//!
//! 保存済みのチェック結果を新しい順に表示します。

use clap::Args;

use crate::config::MonitorConfig;
use crate::db::check_results::SqliteResultStore;

/// history サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct HistoryArgs {
    /// Show results of this endpoint only
    #[arg(short, long)]
    pub name: Option<String>,

    /// Maximum number of results to show
    #[arg(short, long, default_value = "20", value_parser = clap::value_parser!(i64).range(1..))]
    pub limit: i64,
}

/// history コマンドを実行
pub async fn execute(args: &HistoryArgs) -> Result<(), anyhow::Error> {
    let config = MonitorConfig::from_env()?;
    let store = SqliteResultStore::connect(&config.database_url, &config.table_name).await?;

    let results = store
        .list_results(args.name.as_deref(), args.limit)
        .await?;
    if results.is_empty() {
        println!("No results stored in '{}'", config.table_name);
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
