//! fragdoc - チャットメッセージのフラグメントモデルとドキュメントフラグメントエディタ
//!
//! モジュール構成とアーキテクチャ

// コアモジュール
pub mod config;
pub mod error;
pub mod logging;

// データ層
pub mod fragments;
pub mod message;

// 編集層
pub mod editor;
pub mod text;

// 表示層
pub mod frontend;
pub mod ui;

// 公開API
pub use config::{AppConfig, EditorConfig};
pub use editor::{DocumentFragmentEditor, EditOutcome, EditorMode, EditorSet, EditorSignal};
pub use error::{FragdocError, Result};
pub use fragments::{
    duplicate_fragments, AttachmentFragment, ContentFragment, Fragment, FragmentId,
};
pub use frontend::TuiApplication;
pub use message::{EditScratch, FragmentHost, FragmentStore, MessageFragments};
