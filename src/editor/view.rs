//! エディタの描画内容
//!
//! 描画そのものは外部の部品に任せる。ここでは何を渡すかだけを決める。

use super::commands::CommandBar;
use super::EditorMode;
use crate::config::{ContentScaling, MessageRole};
use crate::fragments::FragmentId;

/// ブロック描画部品への依頼（Markdown・コード対応の閲覧表示）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlocksRequest {
    /// コードフェンスで包んだ本文
    pub text: String,
    pub from_role: MessageRole,
    pub content_scaling: ContentScaling,
    pub fit_screen: bool,
    pub special_code_plain: bool,
    pub render_text_as_markdown: bool,
}

/// テキスト編集部品への依頼
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEditRequest {
    pub fragment_id: FragmentId,
    /// 編集前のテキスト
    pub initial_text: String,
    /// ホストが保持している編集中テキスト
    pub edited_text: Option<String>,
    pub content_scaling: ContentScaling,
}

impl TextEditRequest {
    /// 表示すべき現在の値
    pub fn current_text(&self) -> &str {
        self.edited_text.as_deref().unwrap_or(&self.initial_text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorBody {
    Blocks(BlocksRequest),
    TextEditor(TextEditRequest),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorView {
    pub fragment_id: FragmentId,
    pub title: String,
    pub caption: String,
    pub mode: EditorMode,
    pub body: EditorBody,
    pub commands: CommandBar,
}
