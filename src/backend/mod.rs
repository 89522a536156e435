//! External content API backends.
//!
//! The content API serves flat posts by slug:
//!
//! ```text
//! GET /api/post/slug/{slug}
//! → { id, title, content, summary, tags, slug, type, status, created_at, date }
//! ```
//!
//! Backends report "no such post" as `Ok(None)` and transport trouble as
//! `Err`; the adapter above them treats both as absence.

pub mod memory;

#[cfg(feature = "http")]
pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Raw post record as returned by the content API.
///
/// Every field except `id` is optional on the wire and may be `null`; a
/// record with no `content` is treated as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendPost {
    /// Numeric record id.
    pub id: i64,
    /// Title.
    #[serde(default)]
    pub title: Option<String>,
    /// Flat text, paragraphs separated by newlines.
    #[serde(default)]
    pub content: Option<String>,
    /// Short summary.
    #[serde(default)]
    pub summary: Option<String>,
    /// Tags.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Slug.
    #[serde(default)]
    pub slug: Option<String>,
    /// Document kind.
    #[serde(default, rename = "type")]
    pub post_type: Option<String>,
    /// Publication status.
    #[serde(default)]
    pub status: Option<String>,
    /// Creation time, ISO-8601.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Free-form date object.
    #[serde(default)]
    pub date: Option<serde_json::Value>,
}

/// Trait for the external content API.
#[async_trait]
pub trait ContentBackend: Send + Sync {
    /// Error type for transport failures.
    type Error: std::error::Error + Send + Sync;

    /// Fetch a post by slug. Non-success responses are `Ok(None)`.
    async fn fetch_post(&self, slug: &str) -> Result<Option<BackendPost>, Self::Error>;
}

pub use memory::StaticContentBackend;

#[cfg(feature = "http")]
pub use http::{HttpContentBackend, HttpBackendError};
