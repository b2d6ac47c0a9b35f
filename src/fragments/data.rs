//! インラインデータとデータ参照
//!
//! 大きなデータ（画像など）はバイト列を持たず、URLかBlobアセットへの参照のみを保持する。

use super::id::BlobAssetId;
use serde::{Deserialize, Serialize};

/// パートに直接埋め込まれるデータ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "idt", rename_all = "snake_case")]
pub enum InlineData {
    /// テキスト（MIMEは上位層が持つ前提なので任意）
    Text {
        text: String,
        #[serde(rename = "mimeType", default, skip_serializing_if = "Option::is_none")]
        mime_type: Option<String>,
    },
}

impl InlineData {
    pub fn text(text: impl Into<String>, mime_type: Option<String>) -> Self {
        InlineData::Text {
            text: text.into(),
            mime_type,
        }
    }

    /// テキスト本体
    pub fn as_text(&self) -> &str {
        match self {
            InlineData::Text { text, .. } => text,
        }
    }

    pub fn mime_type(&self) -> Option<&str> {
        match self {
            InlineData::Text { mime_type, .. } => mime_type.as_deref(),
        }
    }
}

/// バイナリデータへの参照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reftype")]
pub enum DataRef {
    /// リモートURL
    #[serde(rename = "url")]
    Url { url: String },

    /// ローカルBlobストアのアセット
    #[serde(rename = "dblob")]
    DBlob {
        #[serde(rename = "dblobAssetId")]
        asset_id: BlobAssetId,
        #[serde(rename = "mimeType")]
        mime_type: String,
        #[serde(rename = "bytesSize")]
        bytes_size: u64,
    },
}

impl DataRef {
    pub fn url(url: impl Into<String>) -> Self {
        DataRef::Url { url: url.into() }
    }

    pub fn dblob(asset_id: BlobAssetId, mime_type: impl Into<String>, bytes_size: u64) -> Self {
        DataRef::DBlob {
            asset_id,
            mime_type: mime_type.into(),
            bytes_size,
        }
    }

    /// 参照先のMIMEタイプ（URLの場合は不明）
    pub fn mime_type(&self) -> Option<&str> {
        match self {
            DataRef::Url { .. } => None,
            DataRef::DBlob { mime_type, .. } => Some(mime_type),
        }
    }
}
