//! run サブコマンド
//!
//! 全エンドポイントを1回チェックし、応答JSONを標準出力に書き出します。

use clap::Args;
use serde_json::Value;

use crate::invocation::{self, InvocationContext};

/// run サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Event payload passed to the invocation (JSON)
    #[arg(long, default_value = "{}")]
    pub event: String,
}

/// run コマンドを実行
///
/// 応答が成功（statusCode 200）なら `true` を返す。
pub async fn execute(args: &RunArgs) -> Result<bool, anyhow::Error> {
    let event: Value = serde_json::from_str(&args.event)?;
    let context = InvocationContext::default();

    let response = invocation::handle(&event, &context).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(response.is_success())
}
