//! 統合テスト用の共通ユーティリティ

pub mod store;
