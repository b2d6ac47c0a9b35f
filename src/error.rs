//! エラーハンドリングシステム
//!
//! クレート全体で使用するエラー型。プログラミング上の契約違反（誤ったパート種別での
//! エディタ構築など）は即座にエラーとして返し、黙って劣化させない。

use crate::editor::EditorMode;
use crate::fragments::{FragmentId, PartKind};
use std::time::{Duration, Instant};
use thiserror::Error;

/// クレート全体のエラー型
#[derive(Error, Debug, Clone)]
pub enum FragdocError {
    /// エディタ操作エラー
    #[error("Editor operation failed: {0}")]
    Editor(#[from] EditorError),

    /// フラグメントストアエラー
    #[error("Fragment store operation failed: {0}")]
    Store(#[from] StoreError),

    /// 設定エラー
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// UI操作エラー
    #[error("UI operation failed: {0}")]
    Ui(#[from] UiError),
}

/// エディタ固有のエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// 埋め込み以外のパートに対してエディタを構築しようとした
    #[error("Unexpected part type: {kind}")]
    UnexpectedPart { kind: PartKind },

    /// 現在の状態からは到達できない操作
    #[error("Cannot {action} while {mode}")]
    InvalidTransition {
        action: &'static str,
        mode: EditorMode,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// フラグメントストア固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Fragment not found: {id}")]
    NotFound { id: FragmentId },

    #[error("Duplicate fragment id: {id}")]
    DuplicateId { id: FragmentId },
}

/// 設定固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration file {path}: {message}")]
    InvalidFile { path: String, message: String },

    #[error("Cannot read configuration {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Logger already initialized")]
    LoggerAlreadySet,
}

/// UI操作固有のエラー
#[derive(Error, Debug, Clone)]
pub enum UiError {
    #[error("Terminal initialization failed")]
    TerminalInit,

    #[error("Rendering failed: {component}")]
    RenderingFailed { component: String },
}

/// エラーレベル分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorLevel {
    Info,
    Warning,
    Error,
    Fatal,
}

/// ステータス行に表示するエラー情報
#[derive(Debug, Clone)]
pub struct ErrorDisplay {
    pub message: String,
    pub level: ErrorLevel,
    pub start_time: Instant,
    pub duration: Duration,
}

impl ErrorDisplay {
    pub fn new(error: &FragdocError) -> Self {
        let (message, level) = Self::format_error(error);
        Self {
            message,
            level,
            start_time: Instant::now(),
            duration: Duration::from_secs(5),
        }
    }

    /// 任意の情報メッセージ
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: ErrorLevel::Info,
            start_time: Instant::now(),
            duration: Duration::from_secs(3),
        }
    }

    fn format_error(error: &FragdocError) -> (String, ErrorLevel) {
        match error {
            FragdocError::Editor(EditorError::InvalidTransition { action, mode }) => {
                (format!("{} is not available while {}", action, mode), ErrorLevel::Warning)
            }
            FragdocError::Editor(EditorError::UnexpectedPart { kind }) => {
                (format!("Cannot edit a '{}' part", kind), ErrorLevel::Error)
            }
            FragdocError::Store(StoreError::NotFound { id })
            | FragdocError::Editor(EditorError::Store(StoreError::NotFound { id })) => {
                (format!("Fragment {} no longer exists", id), ErrorLevel::Error)
            }
            FragdocError::Ui(UiError::TerminalInit) => {
                ("Terminal initialization failed".to_string(), ErrorLevel::Fatal)
            }
            _ => (error.to_string(), ErrorLevel::Error),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.start_time.elapsed() >= self.duration
    }
}

/// パニックハンドラの設定（端末を復元してから終了）
pub fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut out = std::io::stdout();
        let _ = crossterm::execute!(out, crossterm::terminal::LeaveAlternateScreen);

        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            *s
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.as_str()
        } else {
            "Unknown panic payload"
        };

        log::error!("PANIC at {}: {}", location, message);
        eprintln!("PANIC at {}: {}", location, message);
        std::process::exit(1);
    }));
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, FragdocError>;
