//! 共通型定義
//!
//! エラー型など、モジュール横断で使う定義

/// エラー型定義
pub mod error;

pub use error::{MonitorError, MonitorResult};
