use anyhow::Context;
use fragdoc::frontend::sample_message;
use fragdoc::{error, logging, AppConfig, TuiApplication};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    error::setup_panic_handler();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match parse_config_path(&args) {
        Some(path) => AppConfig::load(&path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => AppConfig::load_or_default().context("failed to load configuration")?,
    };

    // TUI実行中はstderrに書かない
    let mut logging_config = config.logging.clone();
    logging_config.stderr = false;
    logging::init(&logging_config).context("failed to initialize logging")?;

    log::info!("fragdoc {} starting", env!("CARGO_PKG_VERSION"));
    let mut app = TuiApplication::new(config.editor.clone(), sample_message());
    app.run().context("terminal session failed")?;

    let remaining = app.message().len();
    println!("fragdoc - {} fragment(s) left in the message", remaining);
    Ok(())
}

fn parse_config_path(args: &[String]) -> Option<PathBuf> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => return iter.next().map(PathBuf::from),
            other => {
                if let Some(path) = other.strip_prefix("--config=") {
                    return Some(PathBuf::from(path));
                }
            }
        }
    }
    None
}
