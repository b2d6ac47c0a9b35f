//! メッセージパート
//!
//! フラグメントの中身。コンテンツ用とアタッチメント用で許されるパートの集合が異なり、
//! それぞれ別のenumで表現する（画像参照は両方に現れる）。

use super::data::{DataRef, InlineData};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// パート種別（シリアライズ時のタグと同じ文字列を持つ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    Embed,
    Error,
    ImageRef,
    Placeholder,
    Text,
    ToolCall,
    ToolResponse,
}

impl PartKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            PartKind::Embed => "embed",
            PartKind::Error => "error",
            PartKind::ImageRef => "image_ref",
            PartKind::Placeholder => "ph",
            PartKind::Text => "text",
            PartKind::ToolCall => "tool_call",
            PartKind::ToolResponse => "tool_response",
        }
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 埋め込みデータのMIMEタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmbedMimeType {
    /// クリップボード貼り付けなど
    #[serde(rename = "text/plain")]
    TextPlain,
    #[serde(rename = "text/html")]
    TextHtml,
    #[serde(rename = "text/markdown")]
    TextMarkdown,
    /// 画像・PDFから抽出したテキスト
    #[serde(rename = "application/vnd.agi.ocr")]
    AgiOcr,
    /// 再添付されたメッセージ
    #[serde(rename = "application/vnd.agi.ego")]
    AgiEgo,
}

impl EmbedMimeType {
    pub const fn as_str(self) -> &'static str {
        match self {
            EmbedMimeType::TextPlain => "text/plain",
            EmbedMimeType::TextHtml => "text/html",
            EmbedMimeType::TextMarkdown => "text/markdown",
            EmbedMimeType::AgiOcr => "application/vnd.agi.ocr",
            EmbedMimeType::AgiEgo => "application/vnd.agi.ego",
        }
    }
}

impl fmt::Display for EmbedMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OCRの抽出元
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrSource {
    Image,
    Pdf,
}

/// 埋め込みの付帯情報
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedMeta {
    /// 名前付き参照（ファイル名など）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub named_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_source: Option<OcrSource>,
}

impl EmbedMeta {
    pub fn named(named_ref: impl Into<String>) -> Self {
        Self {
            named_ref: Some(named_ref.into()),
            ..Self::default()
        }
    }

    pub fn with_code_language(mut self, language: impl Into<String>) -> Self {
        self.code_language = Some(language.into());
        self
    }

    pub fn with_ocr_source(mut self, source: OcrSource) -> Self {
        self.ocr_source = Some(source);
        self
    }
}

/// 埋め込みパート
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedPart {
    pub data: InlineData,
    pub emime: EmbedMimeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emeta: Option<EmbedMeta>,
}

impl EmbedPart {
    pub fn new(data: InlineData, emime: EmbedMimeType, emeta: Option<EmbedMeta>) -> Self {
        Self { data, emime, emeta }
    }

    pub fn text(&self) -> &str {
        self.data.as_text()
    }

    pub fn named_ref(&self) -> Option<&str> {
        self.emeta.as_ref().and_then(|meta| meta.named_ref.as_deref())
    }
}

/// 画像参照パート
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRefPart {
    pub data_ref: DataRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl ImageRefPart {
    pub fn new(
        data_ref: DataRef,
        alt_text: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Self {
        Self {
            data_ref,
            alt_text,
            width,
            height,
        }
    }
}

/// ツール呼び出し（開発者向け表示）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallPart {
    pub function: String,
    pub args: Map<String, Value>,
}

/// ツール応答（開発者向け表示）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponsePart {
    pub function: String,
    pub response: Map<String, Value>,
}

/// コンテンツフラグメントのパート
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "pt")]
pub enum ContentPart {
    /// アプリケーション側の問題を示す赤いメッセージ
    #[serde(rename = "error")]
    Error { error: String },

    #[serde(rename = "image_ref")]
    ImageRef(ImageRefPart),

    /// 後で別のパートに置き換えられる仮表示
    #[serde(rename = "ph")]
    Placeholder {
        #[serde(rename = "pText")]
        p_text: String,
    },

    #[serde(rename = "text")]
    Text { text: String },

    #[serde(rename = "tool_call")]
    ToolCall(ToolCallPart),

    #[serde(rename = "tool_response")]
    ToolResponse(ToolResponsePart),
}

impl ContentPart {
    pub fn kind(&self) -> PartKind {
        match self {
            ContentPart::Error { .. } => PartKind::Error,
            ContentPart::ImageRef(_) => PartKind::ImageRef,
            ContentPart::Placeholder { .. } => PartKind::Placeholder,
            ContentPart::Text { .. } => PartKind::Text,
            ContentPart::ToolCall(_) => PartKind::ToolCall,
            ContentPart::ToolResponse(_) => PartKind::ToolResponse,
        }
    }

    pub fn is_image_ref(&self) -> bool {
        matches!(self, ContentPart::ImageRef(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ContentPart::Text { .. })
    }
}

/// アタッチメントフラグメントのパート
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "pt")]
pub enum AttachmentPart {
    #[serde(rename = "embed")]
    Embed(EmbedPart),

    #[serde(rename = "image_ref")]
    ImageRef(ImageRefPart),
}

impl AttachmentPart {
    pub fn kind(&self) -> PartKind {
        match self {
            AttachmentPart::Embed(_) => PartKind::Embed,
            AttachmentPart::ImageRef(_) => PartKind::ImageRef,
        }
    }

    pub fn is_image_ref(&self) -> bool {
        matches!(self, AttachmentPart::ImageRef(_))
    }

    pub fn as_embed(&self) -> Option<&EmbedPart> {
        match self {
            AttachmentPart::Embed(embed) => Some(embed),
            AttachmentPart::ImageRef(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn part_kind_strings_match_wire_tags() {
        let part = ContentPart::Placeholder {
            p_text: "thinking".to_string(),
        };
        let value = serde_json::to_value(&part).unwrap();

        assert_eq!(value["pt"], json!(part.kind().as_str()));
        assert_eq!(value["pText"], json!("thinking"));
    }

    #[test]
    fn embed_part_serializes_mime_and_meta() {
        let part = AttachmentPart::Embed(EmbedPart::new(
            InlineData::text("fn main() {}", None),
            EmbedMimeType::TextPlain,
            Some(EmbedMeta::named("main.rs").with_code_language("rust")),
        ));

        assert_eq!(
            serde_json::to_value(&part).unwrap(),
            json!({
                "pt": "embed",
                "data": { "idt": "text", "text": "fn main() {}" },
                "emime": "text/plain",
                "emeta": { "namedRef": "main.rs", "codeLanguage": "rust" }
            })
        );
    }

    #[test]
    fn image_guards() {
        let image = ImageRefPart::new(DataRef::url("https://example.com/a.png"), None, None, None);

        assert!(ContentPart::ImageRef(image.clone()).is_image_ref());
        assert!(AttachmentPart::ImageRef(image).is_image_ref());
        assert!(!ContentPart::Text { text: "x".into() }.is_image_ref());
    }
}
