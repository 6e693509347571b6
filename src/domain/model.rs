use serde::{Deserialize, Serialize};
use std::fmt;

/// 轉換變體：plain 只做清理與後綴，metadata 另外改寫 `0.0.0.0 ` 並寫入標頭
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Variant {
    #[default]
    Plain,
    Metadata,
}

impl Variant {
    pub fn rewrites_hosts(&self) -> bool {
        matches!(self, Variant::Metadata)
    }

    pub fn writes_header(&self) -> bool {
        matches!(self, Variant::Metadata)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Plain => write!(f, "plain"),
            Variant::Metadata => write!(f, "metadata"),
        }
    }
}

/// 來源檔的一行，`raw` 保留行尾換行符
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    pub number: usize,
    pub raw: String,
}

/// 標頭區塊的八個欄位，依輸出順序排列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderBlock {
    pub checksum: String,
    pub title: String,
    pub description: String,
    pub version: String,
    pub time_updated: String,
    pub expires: String,
    pub homepage: String,
    pub license: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformStats {
    pub lines_read: usize,
    pub blank_dropped: usize,
    pub comment_dropped: usize,
    pub hosts_rewritten: usize,
    pub suffix_appended: usize,
    pub lines_emitted: usize,
}

impl TransformStats {
    pub fn dropped(&self) -> usize {
        self.blank_dropped + self.comment_dropped
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub lines: Vec<String>,
    pub header: Option<HeaderBlock>,
    pub stats: TransformStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_display() {
        assert_eq!(Variant::Plain.to_string(), "plain");
        assert_eq!(Variant::Metadata.to_string(), "metadata");
    }

    #[test]
    fn test_only_metadata_variant_adds_header() {
        assert!(!Variant::Plain.writes_header());
        assert!(!Variant::Plain.rewrites_hosts());
        assert!(Variant::Metadata.writes_header());
        assert!(Variant::Metadata.rewrites_hosts());
    }
}
