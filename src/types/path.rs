//! Route paths as delivered by the routing layer.

use serde::Serialize;
use std::fmt;

/// Error when a route path violates its shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// A segment was empty.
    #[error("Empty path segment at position {0}")]
    EmptySegment(usize),
    /// Fewer than two segments were given.
    #[error("Route path needs at least a prefix and a primary segment")]
    TooShort,
}

/// URL path split into `prefix / primary / trailing...`.
///
/// All segments are non-empty and already URL-decoded. Only
/// [`RoutePath::new`] and [`RoutePath::parse`] build one, so the check holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RoutePath {
    prefix: String,
    primary: String,
    trailing: Vec<String>,
}

impl RoutePath {
    /// Create a path from its three parts.
    pub fn new(
        prefix: impl Into<String>,
        primary: impl Into<String>,
        trailing: Vec<String>,
    ) -> Result<Self, PathError> {
        let path = Self {
            prefix: prefix.into(),
            primary: primary.into(),
            trailing,
        };
        if let Some(pos) = path.segments().position(str::is_empty) {
            return Err(PathError::EmptySegment(pos));
        }
        Ok(path)
    }

    /// Split a `/`-separated path (`article/2023/10/hello`).
    ///
    /// Leading and trailing slashes are ignored.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        let trimmed = path.trim_matches('/');
        let mut parts = trimmed.split('/');
        let prefix = parts.next().unwrap_or_default();
        let primary = parts.next().ok_or(PathError::TooShort)?;
        Self::new(prefix, primary, parts.map(str::to_string).collect())
    }

    /// First segment (category or locale tag).
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Second segment.
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// Segments after the primary one (empty for two-segment routes).
    pub fn trailing(&self) -> &[String] {
        &self.trailing
    }

    /// Whether this is a deep (catch-all) route.
    pub fn is_deep(&self) -> bool {
        !self.trailing.is_empty()
    }

    /// All segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        [self.prefix.as_str(), self.primary.as_str()]
            .into_iter()
            .chain(self.trailing.iter().map(String::as_str))
    }

    /// Trailing segments joined by `/` (empty string for two-segment routes).
    pub fn trailing_joined(&self) -> String {
        self.trailing.join("/")
    }

    /// The last segment of the full path.
    pub fn last_segment(&self) -> &str {
        self.trailing
            .last()
            .map(String::as_str)
            .unwrap_or(&self.primary)
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.segments().collect();
        write!(f, "{}", joined.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_deep_path() {
        let path = RoutePath::parse("/article/2023/10/29/test/").unwrap();
        assert_eq!(path.prefix(), "article");
        assert_eq!(path.primary(), "2023");
        assert_eq!(path.trailing(), &["10", "29", "test"]);
        assert_eq!(path.last_segment(), "test");
        assert_eq!(path.to_string(), "article/2023/10/29/test");
    }

    #[test]
    fn test_two_segment_path() {
        let path = RoutePath::parse("article/about").unwrap();
        assert!(!path.is_deep());
        assert_eq!(path.trailing_joined(), "");
        assert_eq!(path.last_segment(), "about");
    }

    #[test]
    fn test_rejects_empty_segments() {
        assert_eq!(RoutePath::parse("article"), Err(PathError::TooShort));
        assert_eq!(
            RoutePath::parse("article//x"),
            Err(PathError::EmptySegment(1))
        );
        assert!(RoutePath::new("en", "a", vec![String::new()]).is_err());
        assert_eq!(
            RoutePath::new("article", "2024", vec![String::new(), "x".to_string()]),
            Err(PathError::EmptySegment(2))
        );
    }
}
