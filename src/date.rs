//! Localized display dates.
//!
//! Renders a timestamp as a medium-length date in the style of the reader's
//! language. Chinese dates use `-` separators instead of the 年/月/日 glyphs.

use chrono::{DateTime, NaiveDate, Utc};

/// Date style selected from a language tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `Jan 5, 2024`
    English,
    /// `2024-1-5`
    Chinese,
    /// `2024年1月5日`
    Japanese,
}

impl DateStyle {
    /// Pick a style from a BCP-47-ish tag (`en-US`, `zh-CN`, `ja`, `jp`).
    ///
    /// Unknown languages fall back to English.
    pub fn for_lang(lang: &str) -> Self {
        let primary: String = lang.chars().take(2).collect::<String>().to_lowercase();
        match primary.as_str() {
            "zh" => Self::Chinese,
            "ja" | "jp" => Self::Japanese,
            _ => Self::English,
        }
    }
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 (`2024-01-05T00:00:00Z`), naive date-times
/// (`2024-01-05T00:00:00`, read as UTC) and plain dates.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Format a timestamp for display in `lang`.
pub fn format_display_date(at: &DateTime<Utc>, lang: &str) -> String {
    let pattern = match DateStyle::for_lang(lang) {
        DateStyle::English => "%b %-d, %Y",
        DateStyle::Chinese => "%Y-%-m-%-d",
        DateStyle::Japanese => "%Y年%-m月%-d日",
    };
    at.format(pattern).to_string()
}

/// Parse and format in one step; `None` for absent or malformed input.
pub fn display_date(raw: Option<&str>, lang: &str) -> Option<String> {
    raw.and_then(parse_timestamp)
        .map(|at| format_display_date(&at, lang))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_format() {
        assert_eq!(
            display_date(Some("2024-01-05T00:00:00Z"), "en-US"),
            Some("Jan 5, 2024".to_string())
        );
    }

    #[test]
    fn test_chinese_uses_dashes() {
        assert_eq!(
            display_date(Some("2024-01-05T00:00:00Z"), "zh-CN"),
            Some("2024-1-5".to_string())
        );
        assert_eq!(
            display_date(Some("2024-12-25T10:00:00Z"), "ZH"),
            Some("2024-12-25".to_string())
        );
    }

    #[test]
    fn test_japanese_keeps_glyphs() {
        assert_eq!(
            display_date(Some("2024-01-05"), "ja-JP"),
            Some("2024年1月5日".to_string())
        );
    }

    #[test]
    fn test_styles_are_unpadded() {
        let at = parse_timestamp("2023-09-09T12:00:00Z").unwrap();
        assert_eq!(format_display_date(&at, "en-GB"), "Sep 9, 2023");
        assert_eq!(format_display_date(&at, "zh-TW"), "2023-9-9");
        assert_eq!(format_display_date(&at, "jp"), "2023年9月9日");
    }

    #[test]
    fn test_offset_converted_to_utc() {
        assert_eq!(
            display_date(Some("2024-01-05T23:30:00-02:00"), "en"),
            Some("Jan 6, 2024".to_string())
        );
    }

    #[test]
    fn test_naive_datetime_accepted() {
        assert!(parse_timestamp("2024-01-05T08:15:00.123").is_some());
        assert!(parse_timestamp("2024-01-05 08:15:00").is_some());
    }

    #[test]
    fn test_malformed_is_none() {
        assert_eq!(display_date(None, "en"), None);
        assert_eq!(display_date(Some("yesterday"), "en"), None);
        assert_eq!(display_date(Some(""), "en"), None);
        assert_eq!(display_date(Some("2024-13-45"), "en"), None);
    }

    #[test]
    fn test_unknown_lang_falls_back_to_english() {
        assert_eq!(DateStyle::for_lang("fr-FR"), DateStyle::English);
        assert_eq!(DateStyle::for_lang(""), DateStyle::English);
    }
}
