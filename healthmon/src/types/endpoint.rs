//! エンドポイント型定義
//!
//! 監視対象の (名前, URL, 期待ステータス) の三つ組

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 既定の監視対象: 外部リファレンスAPI
pub const DEFAULT_REFERENCE_API_URL: &str = "https://api.github.com/zen";

/// 既定の監視対象: 一般的なWebエンドポイント
pub const DEFAULT_WEB_URL: &str = "https://www.google.com";

/// 監視対象エンドポイント
///
/// プロセスの生存期間中は変更されない。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// 表示名（設定内で一意）
    pub name: String,
    /// 完全修飾URL
    pub url: String,
    /// 正常とみなすHTTPステータスコード
    pub expected_status: u16,
}

impl Endpoint {
    /// 新しいエンドポイントを作成
    pub fn new(name: impl Into<String>, url: impl Into<String>, expected_status: u16) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            expected_status,
        }
    }

    /// 組み込みの監視対象一覧
    pub fn defaults() -> Vec<Endpoint> {
        vec![
            Endpoint::new("GitHub API", DEFAULT_REFERENCE_API_URL, 200),
            Endpoint::new("Google", DEFAULT_WEB_URL, 200),
        ]
    }
}

/// 名前の重複を検出する
///
/// 最初に見つかった重複名を返す。
pub fn find_duplicate_name(endpoints: &[Endpoint]) -> Option<&str> {
    let mut seen = HashSet::new();
    endpoints
        .iter()
        .map(|e| e.name.as_str())
        .find(|name| !seen.insert(*name))
}
