//! 設定
//!
//! JSONファイルから読み込む。すべての項目にデフォルト値があり、ファイルがなくても動作する。

use crate::error::ConfigError;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// メッセージの送信者ロール
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    #[default]
    Assistant,
    System,
    User,
}

/// 表示の密度
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentScaling {
    Xs,
    #[default]
    Sm,
    Md,
}

/// フラグメントエディタの表示設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub message_role: MessageRole,
    pub content_scaling: ContentScaling,
    /// 狭い画面向けに表示を詰める
    pub is_mobile: bool,
    pub render_text_as_markdown: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            message_role: MessageRole::Assistant,
            content_scaling: ContentScaling::Sm,
            is_mobile: false,
            render_text_as_markdown: true,
        }
    }
}

/// ログ設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `off` / `error` / `warn` / `info` / `debug` / `trace`
    pub level: String,
    /// 追記先ファイル（`~` 展開あり）
    pub file: Option<String>,
    pub stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            stderr: true,
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.level).map_err(|_| ConfigError::InvalidValue {
            key: "logging.level".to_string(),
            value: self.level.clone(),
        })
    }

    pub fn resolved_file(&self) -> Option<PathBuf> {
        self.file
            .as_deref()
            .map(|path| PathBuf::from(shellexpand::tilde(path).into_owned()))
    }
}

/// アプリケーション設定
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub editor: EditorConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// 既定の設定ファイルパス（`<config_dir>/fragdoc/config.json`）
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fragdoc").join("config.json"))
    }

    pub fn from_json_str(source: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: AppConfig =
            serde_json::from_str(source).map_err(|err| ConfigError::InvalidFile {
                path: origin.to_string(),
                message: err.to_string(),
            })?;
        config.logging.level_filter()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
        let source = std::fs::read_to_string(&expanded).map_err(|err| ConfigError::Io {
            path: expanded.clone(),
            message: err.to_string(),
        })?;
        Self::from_json_str(&source, &expanded)
    }

    /// 既定パスにファイルがあれば読み込み、なければデフォルト
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}
