//! Uniform document representation handed to the rendering layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::block::{BlockGraph, NodeId};

/// Marker in `document_type` that flags navigational (menu) entries.
pub const NAVIGATION_MARKER: &str = "Menu";

/// Summary of a catalog document.
///
/// This is the subset of a [`Document`] used for slug/identifier matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Store identifier.
    pub id: String,
    /// Human slug (may contain `/`).
    pub slug: String,
    /// Document kind (`Post`, `Page`, `Menu`, `SubMenu`, ...).
    #[serde(rename = "type")]
    pub document_type: String,
    /// Publication status.
    pub status: String,
}

impl CatalogEntry {
    /// Whether this entry is a navigational item.
    pub fn is_navigation(&self) -> bool {
        self.document_type.contains(NAVIGATION_MARKER)
    }
}

/// One entry of a derived table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Heading node.
    pub id: NodeId,
    /// Heading text.
    pub text: String,
    /// Nesting depth, 0 for top-level headings.
    pub indent_level: u8,
}

/// Resolved content unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Globally unique identifier.
    pub id: String,
    /// Title.
    pub title: String,
    /// Human slug.
    pub slug: String,
    /// Short summary.
    #[serde(default)]
    pub summary: Option<String>,
    /// Tags, deduplicated, in source order.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Document kind.
    #[serde(rename = "type")]
    pub document_type: String,
    /// Publication status.
    pub status: String,
    /// Creation time.
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
    /// Last edit time.
    #[serde(default)]
    pub last_edited_time: Option<DateTime<Utc>>,
    /// Creation time in epoch milliseconds.
    #[serde(default)]
    pub publish_date: Option<i64>,
    /// Localized creation date for display.
    #[serde(default)]
    pub publish_day: Option<String>,
    /// Localized last-edit date for display.
    #[serde(default)]
    pub last_edited_day: Option<String>,
    /// Free-form date object passed through to the renderer.
    #[serde(default)]
    pub date: Option<serde_json::Value>,
    /// Raw flat text, when the document was built from one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Table of contents, filled by post-processing.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub toc: Vec<TocEntry>,
    /// Content graph.
    #[serde(default)]
    pub block_graph: BlockGraph,
}

impl Document {
    /// Catalog view of this document.
    pub fn entry(&self) -> CatalogEntry {
        CatalogEntry {
            id: self.id.clone(),
            slug: self.slug.clone(),
            document_type: self.document_type.clone(),
            status: self.status.clone(),
        }
    }

    /// Whether this document is a navigational item.
    pub fn is_navigation(&self) -> bool {
        self.document_type.contains(NAVIGATION_MARKER)
    }
}

/// Where a resolved document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentOrigin {
    /// Natively structured, from the document store.
    Native,
    /// Built from flat text returned by the content API.
    Synthesized,
}

/// Resolution result.
///
/// Both variants expose the same [`Document`] contract and serialize
/// identically, so renderers need not branch on origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResolvedDocument {
    /// From the catalog or a direct store lookup.
    Native(Document),
    /// From the external content API.
    Synthesized(Document),
}

impl ResolvedDocument {
    /// Borrow the document.
    pub fn document(&self) -> &Document {
        match self {
            Self::Native(doc) | Self::Synthesized(doc) => doc,
        }
    }

    /// Take the document.
    pub fn into_document(self) -> Document {
        match self {
            Self::Native(doc) | Self::Synthesized(doc) => doc,
        }
    }

    /// Source of the document.
    pub fn origin(&self) -> DocumentOrigin {
        match self {
            Self::Native(_) => DocumentOrigin::Native,
            Self::Synthesized(_) => DocumentOrigin::Synthesized,
        }
    }
}
