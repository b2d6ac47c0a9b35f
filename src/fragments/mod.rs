//! メッセージフラグメントのデータモデル
//!
//! フラグメント・パート・データ参照の閉じた型体系と、生成・複製・変換ヘルパー。
//! すべて副作用のない純粋な関数で、どのスレッドからでも呼び出せる。

pub mod data;
pub mod fragment;
pub mod id;
pub mod part;

pub use data::{DataRef, InlineData};
pub use fragment::{duplicate_fragments, AttachmentFragment, ContentFragment, Fragment};
pub use id::{next_created_timestamp, BlobAssetId, FragmentId};
pub use part::{
    AttachmentPart, ContentPart, EmbedMeta, EmbedMimeType, EmbedPart, ImageRefPart, OcrSource,
    PartKind, ToolCallPart, ToolResponsePart,
};
