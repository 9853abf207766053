//! Repository traitパターン定義
//!
//! 結果ストアへの書き込みを抽象化し、テスタビリティを向上させるためのtrait。

use async_trait::async_trait;

use crate::types::health::CheckResult;

/// ヘルスチェック結果の永続化先
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// ストア識別子（テーブル名）
    fn table_name(&self) -> &str;

    /// 結果を1レコードとして書き込む
    ///
    /// 各レコードは独立して取得でき、他のエンドポイントのレコードを上書きしない。
    async fn put_result(&self, result: &CheckResult) -> Result<(), sqlx::Error>;
}
