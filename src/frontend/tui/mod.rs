use crate::config::EditorConfig;
use crate::editor::{EditOutcome, EditorCommand, EditorSet, EditorSignal};
use crate::error::{ErrorDisplay, ErrorLevel, FragdocError, Result, UiError};
use crate::fragments::{
    AttachmentFragment, BlobAssetId, ContentFragment, DataRef, EmbedMeta, EmbedMimeType,
    Fragment, InlineData, OcrSource,
};
use crate::message::{EditScratch, MessageFragments};
use crate::ui::FragmentEditorWidget;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io::stdout;
use std::time::Duration;

const HELP: &str = "↑/↓ select  e edit  d delete  y confirm  Enter save  Esc cancel  q quit";

/// メッセージの添付を編集するTUIアプリケーション
pub struct TuiApplication {
    message: MessageFragments,
    editors: EditorSet,
    selected: usize,
    status: Option<ErrorDisplay>,
    running: bool,
}

impl TuiApplication {
    pub fn new(config: EditorConfig, message: MessageFragments) -> Self {
        let mut editors = EditorSet::new(config);
        editors.sync(message.fragments());
        Self {
            message,
            editors,
            selected: 0,
            status: None,
            running: true,
        }
    }

    pub fn message(&self) -> &MessageFragments {
        &self.message
    }

    pub fn editors(&self) -> &EditorSet {
        &self.editors
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn status(&self) -> Option<&ErrorDisplay> {
        self.status.as_ref()
    }

    pub fn run(&mut self) -> Result<()> {
        enter_terminal()?;

        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend).map_err(|err| terminal_error("terminal init", err))?;
        terminal.hide_cursor().map_err(|err| terminal_error("hide cursor", err))?;

        let loop_result = self.event_loop(&mut terminal);
        let show_cursor_result = terminal.show_cursor().map_err(|err| terminal_error("show cursor", err));
        drop(terminal);
        let cleanup_result = leave_terminal();

        loop_result.and(show_cursor_result).and(cleanup_result)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while self.running {
            if self.status.as_ref().is_some_and(ErrorDisplay::is_expired) {
                self.status = None;
            }
            terminal
                .draw(|frame| self.render(frame))
                .map_err(|err| terminal_error("render", err))?;

            if event::poll(Duration::from_millis(16)).map_err(|err| terminal_error("event poll", err))? {
                match event::read().map_err(|err| terminal_error("event read", err))? {
                    Event::Key(key_event) => self.handle_key_event(key_event),
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// キー入力を処理（エラーはステータス行に表示して継続）
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return;
        }

        match self.apply_key(key) {
            Ok(Some(outcome)) => self.report(outcome),
            Ok(None) => {}
            Err(err) => {
                log::warn!("{}", err);
                self.status = Some(ErrorDisplay::new(&err));
            }
        }

        self.editors.sync(self.message.fragments());
        self.selected = self.selected.min(self.editors.len().saturating_sub(1));
    }

    fn apply_key(&mut self, key: KeyEvent) -> Result<Option<EditOutcome>> {
        let last_index = self.editors.len().saturating_sub(1);
        let Some(editor) = self.editors.get_index_mut(self.selected) else {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                self.running = false;
            }
            return Ok(None);
        };

        if editor.is_editing() {
            if let Some(signal) = EditorSignal::from_key_event(&key) {
                return Ok(Some(editor.handle_signal(signal, &mut self.message)?));
            }
            let fragment_id = editor.fragment_id().clone();
            let mut text = self
                .message
                .edited_text(&fragment_id)
                .map(str::to_string)
                .unwrap_or_else(|| editor.original_text().to_string());
            match key.code {
                KeyCode::Char(ch) => text.push(ch),
                KeyCode::Enter => text.push('\n'),
                KeyCode::Backspace => {
                    text.pop();
                }
                _ => return Ok(None),
            }
            editor.set_edited_text(&mut self.message, text);
            return Ok(None);
        }

        let command = match key.code {
            KeyCode::Char('q') => {
                self.running = false;
                return Ok(None);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                return Ok(None);
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.selected = (self.selected + 1).min(last_index);
                return Ok(None);
            }
            KeyCode::Char('e') => EditorCommand::ToggleEdit,
            KeyCode::Char('d') => EditorCommand::ToggleDeleteArmed,
            KeyCode::Char('y') => EditorCommand::ConfirmDelete,
            KeyCode::Esc if editor.is_delete_armed() => EditorCommand::ToggleDeleteArmed,
            _ => return Ok(None),
        };

        Ok(Some(editor.dispatch(command, &mut self.message)?))
    }

    fn report(&mut self, outcome: EditOutcome) {
        match outcome {
            EditOutcome::Deleted { fragment_id } => {
                self.status = Some(ErrorDisplay::info(format!("Deleted {}", fragment_id)));
            }
            EditOutcome::Replaced { new_fragment_id, .. } => {
                self.status = Some(ErrorDisplay::info(format!("Saved as {}", new_fragment_id)));
            }
            EditOutcome::ModeChanged(_) | EditOutcome::Unchanged | EditOutcome::Ignored => {}
        }
    }

    pub fn render(&self, frame: &mut Frame<'_>) {
        let [list, status, help] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_editors(frame, list);

        if let Some(display) = &self.status {
            let style = match display.level {
                ErrorLevel::Info => Style::default().fg(Color::Green),
                ErrorLevel::Warning => Style::default().fg(Color::Yellow),
                ErrorLevel::Error | ErrorLevel::Fatal => Style::default().fg(Color::Red),
            };
            frame.render_widget(Paragraph::new(Line::styled(display.message.as_str(), style)), status);
        }
        frame.render_widget(
            Paragraph::new(Line::styled(HELP, Style::default().fg(Color::DarkGray))),
            help,
        );
    }

    fn render_editors(&self, frame: &mut Frame<'_>, area: Rect) {
        if self.editors.is_empty() {
            frame.render_widget(Paragraph::new("No document attachments"), area);
            return;
        }

        let constraints = self
            .editors
            .iter()
            .map(|_| Constraint::Ratio(1, self.editors.len() as u32));
        let areas = Layout::vertical(constraints).split(area);

        for (index, (editor, slot)) in self.editors.iter().zip(areas.iter()).enumerate() {
            let view = editor.view(&self.message);
            frame.render_widget(
                FragmentEditorWidget::new(&view).focused(index == self.selected),
                *slot,
            );
        }
    }
}

/// デモ用のメッセージ
pub fn sample_message() -> MessageFragments {
    let fragments: Vec<Fragment> = vec![
        ContentFragment::text("Here are the files you attached.").into(),
        AttachmentFragment::embed(
            "notes.md",
            "Pasted from clipboard",
            InlineData::text("# Release notes\n\n- fragment editor\n- duplication", None),
            EmbedMimeType::TextMarkdown,
            Some(EmbedMeta::named("notes.md")),
        )
        .into(),
        AttachmentFragment::embed(
            "main.rs",
            "src/main.rs",
            InlineData::text("fn main() {\n    println!(\"hello\");\n}", None),
            EmbedMimeType::TextPlain,
            Some(EmbedMeta::named("main.rs").with_code_language("rust")),
        )
        .into(),
        AttachmentFragment::embed(
            "scan.pdf",
            "OCR",
            InlineData::text("Invoice #42\nTotal: 12.00", None),
            EmbedMimeType::AgiOcr,
            Some(EmbedMeta::default().with_ocr_source(OcrSource::Pdf)),
        )
        .into(),
        AttachmentFragment::image(
            "diagram.png",
            "",
            DataRef::dblob(BlobAssetId::new("asset-diagram"), "image/png", 48_213),
            Some("Architecture diagram".to_string()),
            Some(800),
            Some(600),
        )
        .into(),
    ];

    let mut message = MessageFragments::new();
    for fragment in fragments {
        // 生成直後の識別子は重複しない
        if let Err(err) = message.push(fragment) {
            log::error!("sample message: {}", err);
        }
    }
    message
}

fn enter_terminal() -> Result<()> {
    enable_raw_mode().map_err(|_| FragdocError::Ui(UiError::TerminalInit))?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen).map_err(|err| terminal_error("enter alternate screen", err))?;
    Ok(())
}

fn leave_terminal() -> Result<()> {
    let mut out = stdout();
    execute!(out, LeaveAlternateScreen).map_err(|err| terminal_error("leave alternate screen", err))?;
    disable_raw_mode().map_err(|err| terminal_error("disable raw mode", err))?;
    Ok(())
}

fn terminal_error(context: &str, err: impl std::fmt::Display) -> FragdocError {
    FragdocError::Ui(UiError::RenderingFailed {
        component: format!("{}: {}", context, err),
    })
}
