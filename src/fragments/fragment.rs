//! メッセージフラグメント
//!
//! フラグメントはメッセージの最小単位で、パートに種別と付帯情報（タイトルなど）を付けたもの。
//! 変更は常に丸ごと置き換えで行い、既存のフラグメントを書き換えない。

use super::data::{DataRef, InlineData};
use super::id::{next_created_timestamp, FragmentId};
use super::part::{
    AttachmentPart, ContentPart, EmbedMeta, EmbedMimeType, EmbedPart, ImageRefPart, PartKind,
    ToolCallPart, ToolResponsePart,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// フラグメント
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "ft", rename_all = "snake_case")]
pub enum Fragment {
    /// 本文（1メッセージに1つ以上）
    Content(ContentFragment),
    /// メッセージ下部に表示される添付（0個以上）
    Attachment(AttachmentFragment),
}

/// コンテンツフラグメント
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentFragment {
    #[serde(rename = "fId")]
    pub f_id: FragmentId,
    pub part: ContentPart,
}

/// アタッチメントフラグメント
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentFragment {
    #[serde(rename = "fId")]
    pub f_id: FragmentId,
    /// ラベル（ファイル名、名前付き参照、内容の概要など）
    pub title: String,
    /// 補足情報（出所、プレビューなど）
    pub caption: String,
    /// 作成時刻（ミリ秒）
    pub created: u64,
    pub part: AttachmentPart,
}

impl Fragment {
    pub fn id(&self) -> &FragmentId {
        match self {
            Fragment::Content(fragment) => &fragment.f_id,
            Fragment::Attachment(fragment) => &fragment.f_id,
        }
    }

    pub fn part_kind(&self) -> PartKind {
        match self {
            Fragment::Content(fragment) => fragment.part.kind(),
            Fragment::Attachment(fragment) => fragment.part.kind(),
        }
    }

    pub fn is_content(&self) -> bool {
        matches!(self, Fragment::Content(_))
    }

    pub fn is_attachment(&self) -> bool {
        matches!(self, Fragment::Attachment(_))
    }

    pub fn as_content(&self) -> Option<&ContentFragment> {
        match self {
            Fragment::Content(fragment) => Some(fragment),
            Fragment::Attachment(_) => None,
        }
    }

    pub fn as_attachment(&self) -> Option<&AttachmentFragment> {
        match self {
            Fragment::Attachment(fragment) => Some(fragment),
            Fragment::Content(_) => None,
        }
    }

    /// 新しい識別子を持つ深いコピー
    pub fn duplicate(&self) -> Self {
        match self {
            Fragment::Content(fragment) => Fragment::Content(fragment.duplicate()),
            Fragment::Attachment(fragment) => Fragment::Attachment(fragment.duplicate()),
        }
    }
}

impl From<ContentFragment> for Fragment {
    fn from(fragment: ContentFragment) -> Self {
        Fragment::Content(fragment)
    }
}

impl From<AttachmentFragment> for Fragment {
    fn from(fragment: AttachmentFragment) -> Self {
        Fragment::Attachment(fragment)
    }
}

/// フラグメント列を複製する。すべての識別子が新しくなる。
///
/// ツール呼び出しの引数・応答もまるごと深くコピーされ、元と共有される値はない。
pub fn duplicate_fragments(fragments: &[Fragment]) -> Vec<Fragment> {
    fragments.iter().map(Fragment::duplicate).collect()
}

impl ContentFragment {
    fn with_part(part: ContentPart) -> Self {
        Self {
            f_id: FragmentId::generate(),
            part,
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self::with_part(ContentPart::Error {
            error: error.into(),
        })
    }

    pub fn image(
        data_ref: DataRef,
        alt_text: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Self {
        Self::with_part(ContentPart::ImageRef(ImageRefPart::new(
            data_ref, alt_text, width, height,
        )))
    }

    pub fn placeholder(placeholder_text: impl Into<String>) -> Self {
        Self::with_part(ContentPart::Placeholder {
            p_text: placeholder_text.into(),
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::with_part(ContentPart::Text { text: text.into() })
    }

    pub fn tool_call(function: impl Into<String>, args: Map<String, Value>) -> Self {
        Self::with_part(ContentPart::ToolCall(ToolCallPart {
            function: function.into(),
            args,
        }))
    }

    pub fn tool_response(function: impl Into<String>, response: Map<String, Value>) -> Self {
        Self::with_part(ContentPart::ToolResponse(ToolResponsePart {
            function: function.into(),
            response,
        }))
    }

    /// テキストを差し替えた新しいフラグメント
    pub fn shallow_replace_text(&self, text: impl Into<String>) -> Self {
        Self::text(text)
    }

    pub fn duplicate(&self) -> Self {
        Self::with_part(self.part.clone())
    }
}

impl AttachmentFragment {
    fn with_part(title: impl Into<String>, caption: impl Into<String>, part: AttachmentPart) -> Self {
        Self {
            f_id: FragmentId::generate(),
            title: title.into(),
            caption: caption.into(),
            created: next_created_timestamp(),
            part,
        }
    }

    pub fn embed(
        title: impl Into<String>,
        caption: impl Into<String>,
        data: InlineData,
        emime: EmbedMimeType,
        emeta: Option<EmbedMeta>,
    ) -> Self {
        Self::with_part(
            title,
            caption,
            AttachmentPart::Embed(EmbedPart::new(data, emime, emeta)),
        )
    }

    pub fn image(
        title: impl Into<String>,
        caption: impl Into<String>,
        data_ref: DataRef,
        alt_text: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Self {
        Self::with_part(
            title,
            caption,
            AttachmentPart::ImageRef(ImageRefPart::new(data_ref, alt_text, width, height)),
        )
    }

    /// コンテンツパートを添付に変換する
    ///
    /// テキストは埋め込みに、画像参照はそのまま複製される。それ以外のパートは
    /// 変換未対応であることを示すエラー埋め込みになる（黙って捨てない）。
    pub fn from_content_part(
        title: impl Into<String>,
        caption: impl Into<String>,
        part: &ContentPart,
        emeta: Option<EmbedMeta>,
    ) -> Self {
        match part {
            ContentPart::Text { text } => Self::embed(
                title,
                caption,
                InlineData::text(text.clone(), None),
                EmbedMimeType::AgiEgo,
                emeta,
            ),
            ContentPart::ImageRef(image) => {
                Self::with_part(title, caption, AttachmentPart::ImageRef(image.clone()))
            }
            ContentPart::Error { .. }
            | ContentPart::Placeholder { .. }
            | ContentPart::ToolCall(_)
            | ContentPart::ToolResponse(_) => {
                log::debug!("content part '{}' cannot become an attachment", part.kind());
                Self::embed(
                    "Error",
                    "Content to Attachment",
                    InlineData::text(
                        format!("Conversion of '{}' is not supported yet.", part.kind()),
                        None,
                    ),
                    EmbedMimeType::AgiEgo,
                    emeta,
                )
            }
        }
    }

    /// データだけを差し替えた新しい埋め込みフラグメント
    ///
    /// タイトル・キャプション・MIME・メタ情報は引き継ぎ、識別子は新しくなる。
    /// 元が埋め込みでなければ `text/plain` でメタ情報なしになる。
    pub fn shallow_replace_embed(&self, new_data: InlineData) -> Self {
        let (emime, emeta) = match &self.part {
            AttachmentPart::Embed(embed) => (embed.emime, embed.emeta.clone()),
            AttachmentPart::ImageRef(_) => (EmbedMimeType::TextPlain, None),
        };
        Self::embed(self.title.clone(), self.caption.clone(), new_data, emime, emeta)
    }

    pub fn embed_part(&self) -> Option<&EmbedPart> {
        self.part.as_embed()
    }

    /// 作成時刻は引き継ぐ
    pub fn duplicate(&self) -> Self {
        Self {
            f_id: FragmentId::generate(),
            title: self.title.clone(),
            caption: self.caption.clone(),
            created: self.created,
            part: self.part.clone(),
        }
    }
}
