//! フラグメント識別子と作成時刻
//!
//! 識別子はメッセージ内でのみ一意な短い文字列。作成時刻はプロセス内で単調非減少。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// 識別子の文字数
const FRAGMENT_ID_LEN: usize = 8;

/// フラグメント識別子（コンテナ内でのみ一意）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FragmentId(String);

impl FragmentId {
    /// 新しい識別子を生成
    pub fn generate() -> Self {
        let mut raw = uuid::Uuid::new_v4().simple().to_string();
        raw.truncate(FRAGMENT_ID_LEN);
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FragmentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for FragmentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for FragmentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Blobストア内のアセット識別子（中身は不透明）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobAssetId(String);

impl BlobAssetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlobAssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

static LAST_CREATED_MS: AtomicU64 = AtomicU64::new(0);

/// 作成時刻（Unixエポックからのミリ秒）
///
/// 壁時計が巻き戻っても、直前に払い出した値より小さくはならない。
pub fn next_created_timestamp() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|dur| dur.as_millis() as u64)
        .unwrap_or_default();
    let previous = LAST_CREATED_MS.fetch_max(now, Ordering::SeqCst);
    previous.max(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_short_and_distinct() {
        let a = FragmentId::generate();
        let b = FragmentId::generate();

        assert_eq!(a.as_str().len(), FRAGMENT_ID_LEN);
        assert_ne!(a, b);
    }

    #[test]
    fn created_timestamps_never_decrease() {
        let mut last = next_created_timestamp();
        for _ in 0..1000 {
            let next = next_created_timestamp();
            assert!(next >= last);
            last = next;
        }
    }

    #[test]
    fn fragment_id_serializes_as_plain_string() {
        let id = FragmentId::from("abcd1234");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abcd1234\"");
    }
}
