//! フラグメントエディタのウィジェット
//!
//! 枠（タイトル・キャプション付き）、本文、コマンドバーの3段構成。

use super::renderers::{BlockRenderer, PlainBlockRenderer, PlainTextEditorRenderer, TextEditorRenderer};
use crate::editor::{ButtonTone, CommandButton, EditorBody, EditorMode, EditorView};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Widget},
};
use unicode_width::UnicodeWidthStr;

/// ボタン間の空白
const BUTTON_GAP: u16 = 1;

/// エディタ1つ分の描画
pub struct FragmentEditorWidget<'a> {
    view: &'a EditorView,
    blocks: &'a dyn BlockRenderer,
    text_editor: &'a dyn TextEditorRenderer,
    focused: bool,
}

impl<'a> FragmentEditorWidget<'a> {
    pub fn new(view: &'a EditorView) -> Self {
        Self {
            view,
            blocks: &PlainBlockRenderer,
            text_editor: &PlainTextEditorRenderer,
            focused: false,
        }
    }

    /// 本文の描画部品を差し替える
    pub fn with_renderers(
        mut self,
        blocks: &'a dyn BlockRenderer,
        text_editor: &'a dyn TextEditorRenderer,
    ) -> Self {
        self.blocks = blocks;
        self.text_editor = text_editor;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn border_style(&self) -> Style {
        match (self.view.mode, self.focused) {
            (EditorMode::DeleteArmed, _) => Style::default().fg(Color::Red),
            (EditorMode::Editing, _) => Style::default().fg(Color::Yellow),
            (EditorMode::Viewing, true) => Style::default().fg(Color::Cyan),
            (EditorMode::Viewing, false) => Style::default().fg(Color::DarkGray),
        }
    }
}

/// ボタンの表示文字列
pub fn button_label(button: &CommandButton) -> String {
    format!("[{}]", button.label)
}

fn button_style(tone: ButtonTone) -> Style {
    match tone {
        ButtonTone::Neutral => Style::default(),
        ButtonTone::NeutralSolid => Style::default().add_modifier(Modifier::REVERSED),
        ButtonTone::Danger => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ButtonTone::Success => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    }
}

fn group_width(buttons: &[CommandButton]) -> u16 {
    let labels: u16 = buttons
        .iter()
        .map(|button| button_label(button).width() as u16)
        .sum();
    labels + BUTTON_GAP * buttons.len().saturating_sub(1) as u16
}

fn render_group(buttons: &[CommandButton], mut x: u16, area: Rect, buf: &mut Buffer) {
    for button in buttons {
        if x >= area.right() {
            break;
        }
        let label = button_label(button);
        let max_width = (area.right() - x) as usize;
        let (next_x, _) = buf.set_stringn(x, area.y, &label, max_width, button_style(button.tone));
        x = next_x + BUTTON_GAP;
    }
}

impl Widget for FragmentEditorWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.border_style())
            .title(Line::from(format!(" {} ", self.view.title)));
        if !self.view.caption.is_empty() {
            block = block.title_bottom(Line::from(format!(" {} ", self.view.caption)).right_aligned());
        }

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let [body, bar] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

        match &self.view.body {
            EditorBody::Blocks(request) => self.blocks.render_blocks(request, body, buf),
            EditorBody::TextEditor(request) => self.text_editor.render_editor(request, body, buf),
        }

        let commands = &self.view.commands;
        render_group(&commands.left, bar.x, bar, buf);
        let right_width = group_width(&commands.right);
        let right_x = bar.right().saturating_sub(right_width).max(bar.x);
        render_group(&commands.right, right_x, bar, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{CommandBar, EditorCommand};

    #[test]
    fn group_width_counts_gaps() {
        let bar = CommandBar::for_mode(EditorMode::Editing);
        // "[Cancel]" + " " + "[Save]"
        assert_eq!(group_width(&bar.right), 8 + 1 + 6);
    }

    #[test]
    fn label_wraps_in_brackets() {
        let bar = CommandBar::for_mode(EditorMode::Viewing);
        let edit = bar
            .buttons()
            .find(|b| b.command == EditorCommand::ToggleEdit)
            .unwrap();
        assert_eq!(button_label(edit), "[Edit]");
    }
}
