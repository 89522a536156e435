//! Resolver configuration.
//!
//! ## Environment
//!
//! [`ResolverConfig::from_env`] reads:
//! - `LOCALE_TAGS`: comma-separated locale prefixes (default: `en,zh,jp,ja`)
//! - `SITE_LANG`: display-date language when the request has none (default: `en-US`)
//! - `BACKEND_API_URL`: content API base URL (default: `http://localhost:8000`)
//! - `NEXT_REVALIDATE_SECOND`: revalidation interval in seconds (default: 5)
//! - `EXPORT`: any non-empty value selects static export (no revalidation)

use serde::{Deserialize, Serialize};

use crate::types::RoutePath;

/// Locale prefixes recognized out of the box.
pub const DEFAULT_LOCALE_TAGS: [&str; 4] = ["en", "zh", "jp", "ja"];

/// Explicit configuration passed to the resolver at call time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Path prefixes treated as language markers.
    pub locale_tags: Vec<String>,
    /// Language for display dates when the request carries none.
    pub default_lang: String,
    /// Base URL of the external content API.
    pub backend_url: String,
    /// Revalidation interval handed to the renderer.
    pub revalidate_seconds: u64,
    /// Fully static export: no periodic revalidation.
    pub static_export: bool,
}

impl ResolverConfig {
    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            locale_tags: std::env::var("LOCALE_TAGS")
                .ok()
                .map(|s| parse_tags(&s))
                .filter(|tags| !tags.is_empty())
                .unwrap_or(defaults.locale_tags),
            default_lang: std::env::var("SITE_LANG")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.default_lang),
            backend_url: std::env::var("BACKEND_API_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.backend_url),
            revalidate_seconds: std::env::var("NEXT_REVALIDATE_SECOND")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.revalidate_seconds),
            static_export: std::env::var("EXPORT")
                .map(|s| !s.is_empty())
                .unwrap_or(false),
        }
    }

    /// Whether `tag` is a recognized locale prefix (case-insensitive).
    pub fn is_locale_tag(&self, tag: &str) -> bool {
        self.locale_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Revalidation hint, `None` under static export.
    pub fn revalidate(&self) -> Option<u64> {
        if self.static_export {
            None
        } else {
            Some(self.revalidate_seconds)
        }
    }

    /// Language for a request.
    ///
    /// The explicit request locale wins; a locale-tag prefix comes next;
    /// the configured default is the fallback.
    pub fn effective_lang(&self, path: &RoutePath, locale: Option<&str>) -> String {
        match locale.map(str::trim).filter(|l| !l.is_empty()) {
            Some(locale) => locale.to_string(),
            None if self.is_locale_tag(path.prefix()) => path.prefix().to_string(),
            None => self.default_lang.clone(),
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            locale_tags: DEFAULT_LOCALE_TAGS.iter().map(|s| s.to_string()).collect(),
            default_lang: "en-US".to_string(),
            backend_url: "http://localhost:8000".to_string(),
            revalidate_seconds: 5,
            static_export: false,
        }
    }
}

fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tags() {
        let config = ResolverConfig::default();
        assert!(config.is_locale_tag("en"));
        assert!(config.is_locale_tag("JA"));
        assert!(!config.is_locale_tag("article"));
    }

    #[test]
    fn test_revalidate_static_export() {
        let mut config = ResolverConfig::default();
        assert_eq!(config.revalidate(), Some(5));
        config.static_export = true;
        assert_eq!(config.revalidate(), None);
    }

    #[test]
    fn test_effective_lang() {
        let config = ResolverConfig::default();
        let localized = RoutePath::parse("zh/article/x").unwrap();
        let plain = RoutePath::parse("article/x").unwrap();

        assert_eq!(config.effective_lang(&localized, Some("ja-JP")), "ja-JP");
        assert_eq!(config.effective_lang(&localized, None), "zh");
        assert_eq!(config.effective_lang(&plain, Some("  ")), "en-US");
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags(" EN, fr ,,de"), vec!["en", "fr", "de"]);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ResolverConfig = serde_json::from_str(r#"{"static_export": true}"#).unwrap();
        assert!(config.static_export);
        assert_eq!(config.default_lang, "en-US");
    }
}
