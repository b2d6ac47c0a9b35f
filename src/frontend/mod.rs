//! フロントエンド
//!
//! 端末上でフラグメントエディタを動かすアプリケーション。

pub mod tui;

pub use tui::{sample_message, TuiApplication};
