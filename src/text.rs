//! Flat-text normalization for paragraph splitting.
//!
//! ## Paragraph Rules
//!
//! ```text
//! paragraphs(text) = [line | line <- lines(normalize_newlines(text)), trim(line) != ""]
//! ```
//!
//! Where:
//! - `normalize_newlines`: CRLF → LF, CR → LF
//! - lines keep their inner and edge whitespace; only blank lines are dropped
//!
//! The paragraph order is the document order.

/// Normalize newlines: CRLF → LF, isolated CR → LF.
///
/// # Example
///
/// ```rust
/// use slug_resolver::text::normalize_newlines;
///
/// assert_eq!(normalize_newlines("a\r\nb\rc"), "a\nb\nc");
/// ```
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Split text into its non-blank lines, preserving order.
///
/// # Example
///
/// ```rust
/// use slug_resolver::text::paragraphs;
///
/// assert_eq!(paragraphs("Line1\n\n  \nLine2"), vec!["Line1", "Line2"]);
/// ```
pub fn paragraphs(text: &str) -> Vec<String> {
    normalize_newlines(text)
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
