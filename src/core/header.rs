use crate::core::line_rules::LINE_ENDING;
use crate::domain::model::HeaderBlock;
use chrono::{DateTime, SecondsFormat, Utc};

pub const DEFAULT_CHECKSUM: &str = "! Checksum: hJ2Z1zvS2cP0hQ3Kx6O4vA";
pub const DEFAULT_TITLE: &str = "! Title: CyberPurify Explicit Content Filter";
pub const DEFAULT_DESCRIPTION: &str =
    "! Description: Blocks top-level documents served by domains hosting explicit content";
pub const DEFAULT_VERSION: &str = "! Version: 1.0.0";
pub const DEFAULT_TIME_UPDATED: &str = "! TimeUpdated: 2020-06-01T00:00:00+00:00";
pub const DEFAULT_EXPIRES: &str = "! Expires: 4 days (update frequency)";
pub const DEFAULT_HOMEPAGE: &str = "! Homepage: https://github.com/cyberpurify/CyberPurify";
pub const DEFAULT_LICENSE: &str =
    "! License: https://github.com/cyberpurify/CyberPurify/blob/main/LICENSE";

/// 標頭區塊的行數（不含結尾空行）
pub const HEADER_LINE_COUNT: usize = 8;

impl Default for HeaderBlock {
    fn default() -> Self {
        Self {
            checksum: DEFAULT_CHECKSUM.to_string(),
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            version: DEFAULT_VERSION.to_string(),
            time_updated: DEFAULT_TIME_UPDATED.to_string(),
            expires: DEFAULT_EXPIRES.to_string(),
            homepage: DEFAULT_HOMEPAGE.to_string(),
            license: DEFAULT_LICENSE.to_string(),
        }
    }
}

impl HeaderBlock {
    /// 依固定順序回傳八行
    pub fn lines(&self) -> [&str; HEADER_LINE_COUNT] {
        [
            self.checksum.as_str(),
            self.title.as_str(),
            self.description.as_str(),
            self.version.as_str(),
            self.time_updated.as_str(),
            self.expires.as_str(),
            self.homepage.as_str(),
            self.license.as_str(),
        ]
    }

    pub fn stamped_at(mut self, at: DateTime<Utc>) -> Self {
        self.time_updated = format!(
            "! TimeUpdated: {}",
            at.to_rfc3339_opts(SecondsFormat::Secs, false)
        );
        self
    }

    pub fn stamped_now(self) -> Self {
        self.stamped_at(Utc::now())
    }

    /// 八行標頭加一個空行
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in self.lines() {
            out.push_str(line);
            out.push_str(LINE_ENDING);
        }
        out.push_str(LINE_ENDING);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_header_order() {
        let header = HeaderBlock::default();
        let lines = header.lines();
        assert!(lines[0].starts_with("! Checksum:"));
        assert!(lines[1].starts_with("! Title:"));
        assert!(lines[2].starts_with("! Description:"));
        assert!(lines[3].starts_with("! Version:"));
        assert!(lines[4].starts_with("! TimeUpdated:"));
        assert!(lines[5].starts_with("! Expires:"));
        assert!(lines[6].starts_with("! Homepage:"));
        assert!(lines[7].starts_with("! License:"));
        assert_eq!(
            lines[7],
            "! License: https://github.com/cyberpurify/CyberPurify/blob/main/LICENSE"
        );
    }

    #[test]
    fn test_render_ends_with_blank_line() {
        let rendered = HeaderBlock::default().render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), HEADER_LINE_COUNT + 1);
        assert_eq!(lines[HEADER_LINE_COUNT], "");
        assert!(rendered.ends_with(&format!("{}{}", LINE_ENDING, LINE_ENDING)));
    }

    #[test]
    fn test_stamped_at_replaces_only_time_updated() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 12, 30, 0).unwrap();
        let header = HeaderBlock::default().stamped_at(at);
        assert_eq!(header.time_updated, "! TimeUpdated: 2024-03-09T12:30:00+00:00");
        assert_eq!(header.title, DEFAULT_TITLE);
    }
}
