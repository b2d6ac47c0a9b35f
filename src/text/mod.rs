//! 表示用テキストの整形
//!
//! ブロック描画に渡す前に、埋め込みテキストを言語タグ付きのコードフェンスで包む。

use regex::Regex;
use std::sync::OnceLock;

/// 包み方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapStyle {
    /// そのまま
    Plain,
    /// Markdownのコードフェンス
    MarkdownCode,
}

const MIN_FENCE_LEN: usize = 3;

fn backtick_runs() -> &'static Regex {
    static RUNS: OnceLock<Regex> = OnceLock::new();
    RUNS.get_or_init(|| Regex::new("`+").expect("backtick pattern is valid"))
}

fn fence_line() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"^\s*`{3,}[^`]*$").expect("fence pattern is valid"))
}

/// テキストをラベル付きで包む
///
/// フェンスは本文中の最長のバッククォート列より長くするので、本文がフェンスを
/// 含んでいても閉じ位置がずれない。
pub fn wrap_text(text: &str, label: &str, style: WrapStyle) -> String {
    match style {
        WrapStyle::Plain => text.to_string(),
        WrapStyle::MarkdownCode => {
            let fence = "`".repeat(fence_len(text));
            let body = text.strip_suffix('\n').unwrap_or(text);
            let label = info_string(label);
            format!("{fence}{label}\n{body}\n{fence}")
        }
    }
}

/// 開始行に置けるラベル。改行は空白に、バッククォートは取り除く。
fn info_string(label: &str) -> String {
    let cleaned: String = label
        .chars()
        .filter(|c| *c != '`')
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    cleaned.trim().to_string()
}

fn fence_len(text: &str) -> usize {
    let longest = backtick_runs()
        .find_iter(text)
        .map(|run| run.as_str().len())
        .max()
        .unwrap_or(0);
    MIN_FENCE_LEN.max(longest + 1)
}

/// コードフェンスの開始・終了行か
pub fn is_fence_line(line: &str) -> bool {
    fence_line().is_match(line)
}
