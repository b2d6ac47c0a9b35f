//! コマンドバー
//!
//! 状態ごとに表示するボタンと、ボタンが発行するコマンド。

use super::EditorMode;

/// エディタに対するコマンド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorCommand {
    ToggleDeleteArmed,
    ConfirmDelete,
    ToggleEdit,
    ConfirmEdit,
}

/// ボタンの見た目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonTone {
    Neutral,
    /// 強調（取り消しボタン）
    NeutralSolid,
    Danger,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandButton {
    pub label: &'static str,
    pub command: EditorCommand,
    pub tone: ButtonTone,
}

impl CommandButton {
    const fn new(label: &'static str, command: EditorCommand, tone: ButtonTone) -> Self {
        Self {
            label,
            command,
            tone,
        }
    }
}

/// 左側に削除系、右側に編集系
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBar {
    pub left: Vec<CommandButton>,
    pub right: Vec<CommandButton>,
}

impl CommandBar {
    pub fn for_mode(mode: EditorMode) -> Self {
        use ButtonTone::*;
        use EditorCommand::*;

        let left = if mode == EditorMode::DeleteArmed {
            vec![
                CommandButton::new("Cancel", ToggleDeleteArmed, NeutralSolid),
                CommandButton::new("Delete", ConfirmDelete, Danger),
            ]
        } else {
            vec![CommandButton::new("Delete", ToggleDeleteArmed, Neutral)]
        };

        let right = if mode == EditorMode::Editing {
            vec![
                CommandButton::new("Cancel", ToggleEdit, Neutral),
                CommandButton::new("Save", ConfirmEdit, Success),
            ]
        } else {
            vec![CommandButton::new("Edit", ToggleEdit, Neutral)]
        };

        Self { left, right }
    }

    pub fn buttons(&self) -> impl Iterator<Item = &CommandButton> {
        self.left.iter().chain(self.right.iter())
    }

    /// そのコマンドが現在のバーに出ているか
    pub fn offers(&self, command: EditorCommand) -> bool {
        self.buttons().any(|button| button.command == command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewing_offers_delete_and_edit_only() {
        let bar = CommandBar::for_mode(EditorMode::Viewing);

        assert!(bar.offers(EditorCommand::ToggleDeleteArmed));
        assert!(bar.offers(EditorCommand::ToggleEdit));
        assert!(!bar.offers(EditorCommand::ConfirmDelete));
        assert!(!bar.offers(EditorCommand::ConfirmEdit));
    }

    #[test]
    fn armed_offers_danger_delete() {
        let bar = CommandBar::for_mode(EditorMode::DeleteArmed);

        assert_eq!(bar.left.len(), 2);
        assert_eq!(bar.left[1].tone, ButtonTone::Danger);
        assert_eq!(bar.right[0].label, "Edit");
    }

    #[test]
    fn editing_offers_save() {
        let bar = CommandBar::for_mode(EditorMode::Editing);

        assert_eq!(
            bar.right.iter().map(|b| b.label).collect::<Vec<_>>(),
            vec!["Cancel", "Save"]
        );
    }
}
