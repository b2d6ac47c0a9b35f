//! 本文の描画部品
//!
//! ブロック描画とテキスト編集は差し替え可能な部品として扱う。

use crate::config::ContentScaling;
use crate::editor::{BlocksRequest, TextEditRequest};
use crate::text::is_fence_line;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Padding, Paragraph, Widget, Wrap},
};

/// 閲覧表示の描画部品
pub trait BlockRenderer {
    fn render_blocks(&self, request: &BlocksRequest, area: Rect, buf: &mut Buffer);
}

/// 編集表示の描画部品
pub trait TextEditorRenderer {
    fn render_editor(&self, request: &TextEditRequest, area: Rect, buf: &mut Buffer);
}

fn horizontal_padding(scaling: ContentScaling, fit_screen: bool) -> u16 {
    if fit_screen {
        return 0;
    }
    match scaling {
        ContentScaling::Xs => 0,
        ContentScaling::Sm => 1,
        ContentScaling::Md => 2,
    }
}

/// フェンス行を淡色にするだけの単純なブロック描画
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainBlockRenderer;

impl BlockRenderer for PlainBlockRenderer {
    fn render_blocks(&self, request: &BlocksRequest, area: Rect, buf: &mut Buffer) {
        let fence_style = Style::default().fg(Color::DarkGray);
        let lines: Vec<Line<'_>> = request
            .text
            .lines()
            .map(|line| {
                if is_fence_line(line) {
                    Line::styled(line, fence_style)
                } else {
                    Line::raw(line)
                }
            })
            .collect();

        let padding = horizontal_padding(request.content_scaling, request.fit_screen);
        Paragraph::new(lines)
            .block(Block::default().padding(Padding::horizontal(padding)))
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

/// 現在値の末尾にカーソルを付けて表示する編集描画
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextEditorRenderer;

const CURSOR: &str = "▏";

impl TextEditorRenderer for PlainTextEditorRenderer {
    fn render_editor(&self, request: &TextEditRequest, area: Rect, buf: &mut Buffer) {
        let cursor_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::SLOW_BLINK);

        let text = request.current_text();
        let mut lines: Vec<Line<'_>> = text.split('\n').map(Line::raw).collect();
        if let Some(last) = lines.pop() {
            let mut spans = last.spans;
            spans.push(Span::styled(CURSOR, cursor_style));
            lines.push(Line::from(spans));
        }

        let padding = horizontal_padding(request.content_scaling, false);
        Paragraph::new(lines)
            .block(Block::default().padding(Padding::horizontal(padding)))
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
