//! Canonical page identifiers for the hierarchical document store.
//!
//! The store addresses pages by a 128-bit identifier written as a dashed,
//! lowercase UUID (`8-4-4-4-12`). URLs carry the same identifier either
//! dash-less (32 hex chars) or appended to a human title
//! (`my-first-post-0123456789abcdef0123456789abcdef`).

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Number of hex digits in a dash-less identifier.
pub const RAW_ID_LEN: usize = 32;

/// Error returned when a string cannot be read as a page identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    /// Input is not a dash-less, dashed, or URL-style identifier.
    #[error("Invalid identifier format: {0}")]
    InvalidFormat(String),
}

/// Canonical (dashed, lowercase) page identifier.
///
/// Wraps a UUID and implements `Ord` for deterministic ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CanonicalId(Uuid);

impl CanonicalId {
    /// Create a new CanonicalId from a UUID.
    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Whether `other` names this identifier (dashed or not, any case).
    pub fn matches(&self, other: &str) -> bool {
        to_canonical_id(other).map(|id| id == *self).unwrap_or(false)
    }
}

impl fmt::Display for CanonicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl From<Uuid> for CanonicalId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl std::str::FromStr for CanonicalId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        to_canonical_id(s)
    }
}

/// Convert a raw path fragment into a canonical identifier.
///
/// Accepted forms:
/// - dash-less: `0123456789abcdef0123456789abcdef`
/// - canonical: `01234567-89ab-cdef-0123-456789abcdef`
/// - URL-style: `<title words>-0123456789abcdef0123456789abcdef`
///
/// Fragments containing `/` are never identifiers. The function is
/// idempotent: feeding its output back in yields the same value.
pub fn to_canonical_id(raw: &str) -> Result<CanonicalId, IdentifierError> {
    let invalid = || IdentifierError::InvalidFormat(raw.to_string());
    let trimmed = raw.trim();

    if trimmed.is_empty() || trimmed.contains('/') {
        return Err(invalid());
    }

    if let Some(uuid) = parse_exact(trimmed) {
        return Ok(CanonicalId(uuid));
    }

    // URL-style: trailing 32 hex chars separated from the title by a dash
    if trimmed.len() > RAW_ID_LEN + 1 && trimmed.is_char_boundary(trimmed.len() - RAW_ID_LEN) {
        let (head, tail) = trimmed.split_at(trimmed.len() - RAW_ID_LEN);
        if head.ends_with('-') {
            if let Some(uuid) = parse_simple(tail) {
                return Ok(CanonicalId(uuid));
            }
        }
    }

    Err(invalid())
}

/// Dash-less or dashed form only (no braces, no `urn:` prefix).
fn parse_exact(s: &str) -> Option<Uuid> {
    match s.len() {
        RAW_ID_LEN => parse_simple(s),
        36 => Uuid::try_parse(s).ok(),
        _ => None,
    }
}

fn parse_simple(s: &str) -> Option<Uuid> {
    if s.len() != RAW_ID_LEN || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    Uuid::try_parse(s).ok()
}
