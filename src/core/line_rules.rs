//! 過濾清單的逐行轉換規則。
//!
//! 每一行獨立處理，依序套用：空行丟棄、含 `#` 的行丟棄、去掉行尾換行、
//! （metadata 變體）`0.0.0.0 ` 改寫為 `||`、網域封鎖規則補上 `^$document`。

use crate::domain::model::{TransformStats, Variant};

pub const HOSTS_PREFIX: &str = "0.0.0.0 ";
pub const DOMAIN_ANCHOR: &str = "||";
pub const DOCUMENT_SUFFIX: &str = "^$document";
pub const COMMENT_MARKER: char = '#';

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// 單行的處理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Blank,
    Comment,
    Emit(String),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LineTransform {
    variant: Variant,
}

impl LineTransform {
    pub fn new(variant: Variant) -> Self {
        Self { variant }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn apply_with_stats(&self, line: &str, stats: &mut TransformStats) -> LineOutcome {
        stats.lines_read += 1;

        let trimmed = line.trim();
        if trimmed.is_empty() {
            stats.blank_dropped += 1;
            return LineOutcome::Blank;
        }

        // 任何位置出現 `#` 都視為註解，不只行首
        if trimmed.contains(COMMENT_MARKER) {
            stats.comment_dropped += 1;
            return LineOutcome::Comment;
        }

        let mut rule = strip_terminator(line).to_string();

        if self.variant.rewrites_hosts() && rule.contains(HOSTS_PREFIX) {
            rule = rule.replace(HOSTS_PREFIX, DOMAIN_ANCHOR);
            stats.hosts_rewritten += 1;
        }

        let check = rule.trim();
        if check.contains(DOMAIN_ANCHOR) && !check.contains(DOCUMENT_SUFFIX) {
            rule.push_str(DOCUMENT_SUFFIX);
            stats.suffix_appended += 1;
        }

        stats.lines_emitted += 1;
        LineOutcome::Emit(rule)
    }
}

/// 去掉一個行尾換行（`\r\n`、`\n` 或 `\r`）
pub fn strip_terminator(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .or_else(|| line.strip_suffix('\r'))
        .unwrap_or(line)
}

/// 把來源內容切成保留換行符的行；`\r\n`、`\n`、單獨的 `\r` 都算一個換行
pub fn split_lines_inclusive(content: &str) -> impl Iterator<Item = &str> {
    let mut rest = content;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let end = match rest.find(&['\r', '\n'][..]) {
            Some(i) if rest[i..].starts_with("\r\n") => i + 2,
            Some(i) => i + 1,
            None => rest.len(),
        };
        let (line, tail) = rest.split_at(end);
        rest = tail;
        Some(line)
    })
}
