//! 表示層
//!
//! ratatui によるフラグメントエディタの描画。

pub mod renderers;
pub mod widget;

pub use renderers::{BlockRenderer, PlainBlockRenderer, PlainTextEditorRenderer, TextEditorRenderer};
pub use widget::{button_label, FragmentEditorWidget};
