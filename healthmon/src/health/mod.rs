//! ヘルスチェック
//!
//! 監視対象へのGETリクエスト、判定、結果ストアへの記録を行う。
//! 再試行・並列実行は行わない。

pub mod endpoint_checker;

pub use endpoint_checker::EndpointHealthChecker;
