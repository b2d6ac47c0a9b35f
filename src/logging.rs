//! ロギングシステム
//!
//! `log` ファサードの出力先。stderrへの出力とファイルへの追記に対応する。
//! TUI実行中はstderrが画面を壊すため、ファイルのみに出力する。

use crate::config::LoggingConfig;
use crate::error::ConfigError;
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// ロガー
#[derive(Debug, Clone)]
pub struct Logger {
    level: LevelFilter,
    output_stderr: bool,
    output_file: Option<PathBuf>,
}

impl Logger {
    pub fn new(level: LevelFilter) -> Self {
        Self {
            level,
            output_stderr: true,
            output_file: None,
        }
    }

    /// 開発者向けロガー
    pub fn for_development() -> Self {
        Self::new(LevelFilter::Debug)
    }

    pub fn from_config(config: &LoggingConfig) -> Result<Self, ConfigError> {
        let mut logger = Self::new(config.level_filter()?).with_stderr(config.stderr);
        if let Some(path) = config.resolved_file() {
            logger = logger.with_file_output(path);
        }
        Ok(logger)
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    pub fn with_file_output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_file = Some(path.into());
        self
    }

    pub fn with_stderr(mut self, enabled: bool) -> Self {
        self.output_stderr = enabled;
        self
    }

    fn format_line(record: &Record<'_>) -> String {
        format!("{}: {} in {}", record.level(), record.args(), record.target())
    }

    fn write_line(&self, line: &str) {
        if self.output_stderr {
            eprintln!("{}", line);
        }

        if let Some(path) = &self.output_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
                let _ = writeln!(file, "{}", line);
            }
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            self.write_line(&Self::format_line(record));
        }
    }

    fn flush(&self) {}
}

/// 設定からロガーを組み立ててグローバルに登録する（1回だけ）
pub fn init(config: &LoggingConfig) -> Result<(), ConfigError> {
    let logger = Logger::from_config(config)?;
    let level = logger.level();
    log::set_boxed_logger(Box::new(logger)).map_err(|_| ConfigError::LoggerAlreadySet)?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    fn metadata(level: Level) -> Metadata<'static> {
        Metadata::builder().level(level).target("fragdoc").build()
    }

    #[test]
    fn logger_respects_log_level() {
        let logger = Logger::for_development().with_stderr(false);
        assert!(logger.enabled(&metadata(Level::Debug)));
        assert!(logger.enabled(&metadata(Level::Error)));

        let info_logger = logger.with_level(LevelFilter::Info);
        assert!(!info_logger.enabled(&metadata(Level::Debug)));
        assert!(info_logger.enabled(&metadata(Level::Warn)));
    }

    #[test]
    fn writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("fragdoc.log");
        let logger = Logger::new(LevelFilter::Info)
            .with_stderr(false)
            .with_file_output(&path);

        logger.log(
            &Record::builder()
                .args(format_args!("fragment replaced"))
                .level(Level::Info)
                .target("fragdoc::editor")
                .build(),
        );

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "INFO: fragment replaced in fragdoc::editor\n");
    }

    #[test]
    fn rejects_invalid_level() {
        let config = LoggingConfig {
            level: "chatty".to_string(),
            ..LoggingConfig::default()
        };
        assert!(Logger::from_config(&config).is_err());
    }
}
