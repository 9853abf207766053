//! データベースアクセス層
//!
//! SQLiteベースのデータ永続化

/// ヘルスチェック結果ストア
pub mod check_results;

/// Repository traitパターン（テスタビリティ向上）
pub mod traits;

pub use check_results::{validate_table_name, SqliteResultStore, StoredCheckResult};
pub use traits::ResultStore;
