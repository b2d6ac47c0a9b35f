//! ドキュメントフラグメントエディタ
//!
//! 埋め込みアタッチメント1つに対する 表示 / 編集 / 削除確認 の状態機械。
//! 変更はすべてホスト（`FragmentStore`）への置換・削除依頼として表現する。

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::fmt;

pub mod commands;
pub mod document;
pub mod set;
pub mod view;

pub use commands::{ButtonTone, CommandBar, CommandButton, EditorCommand};
pub use document::DocumentFragmentEditor;
pub use set::EditorSet;
pub use view::{BlocksRequest, EditorBody, EditorView, TextEditRequest};

use crate::fragments::FragmentId;

/// エディタの状態（編集中と削除確認中は排他）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EditorMode {
    #[default]
    Viewing,
    Editing,
    DeleteArmed,
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EditorMode::Viewing => "viewing",
            EditorMode::Editing => "editing",
            EditorMode::DeleteArmed => "delete armed",
        };
        f.write_str(label)
    }
}

/// テキスト編集部品から届く合図
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorSignal {
    /// 確定
    Enter,
    /// 取り消し
    Escape,
}

impl EditorSignal {
    /// キーイベントを合図に変換（Shift+Enterは改行入力として扱うので対象外）
    pub fn from_key_event(event: &KeyEvent) -> Option<Self> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        match event.code {
            KeyCode::Enter if !event.modifiers.contains(KeyModifiers::SHIFT) => {
                Some(EditorSignal::Enter)
            }
            KeyCode::Esc => Some(EditorSignal::Escape),
            _ => None,
        }
    }
}

/// 操作の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// 状態が変わった
    ModeChanged(EditorMode),
    /// 編集テキストがないため何もしなかった
    Unchanged,
    /// その状態では意味のない合図
    Ignored,
    /// フラグメントが削除された
    Deleted { fragment_id: FragmentId },
    /// 新しい識別子のフラグメントに置き換えられた
    Replaced {
        fragment_id: FragmentId,
        new_fragment_id: FragmentId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_and_escape_become_signals() {
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        let escape = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        let shift_enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT);
        let letter = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);

        assert_eq!(EditorSignal::from_key_event(&enter), Some(EditorSignal::Enter));
        assert_eq!(EditorSignal::from_key_event(&escape), Some(EditorSignal::Escape));
        assert_eq!(EditorSignal::from_key_event(&shift_enter), None);
        assert_eq!(EditorSignal::from_key_event(&letter), None);
    }

    #[test]
    fn mode_display() {
        assert_eq!(EditorMode::DeleteArmed.to_string(), "delete armed");
    }
}
