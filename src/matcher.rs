//! First-match catalog search.

use crate::candidates::CandidateSet;
use crate::types::{CatalogEntry, Document, NAVIGATION_MARKER};

/// Anything that can be matched against candidates.
pub trait CatalogItem {
    /// Store identifier.
    fn item_id(&self) -> &str;
    /// Human slug.
    fn item_slug(&self) -> &str;
    /// Document kind.
    fn item_type(&self) -> &str;
}

impl CatalogItem for CatalogEntry {
    fn item_id(&self) -> &str {
        &self.id
    }
    fn item_slug(&self) -> &str {
        &self.slug
    }
    fn item_type(&self) -> &str {
        &self.document_type
    }
}

impl CatalogItem for Document {
    fn item_id(&self) -> &str {
        &self.id
    }
    fn item_slug(&self) -> &str {
        &self.slug
    }
    fn item_type(&self) -> &str {
        &self.document_type
    }
}

/// Scans a catalog for the first entry named by a candidate set.
///
/// ## Policy
///
/// First match in **catalog order** wins, not the most specific candidate.
/// Two entries whose slugs both appear among the candidates resolve to
/// whichever the catalog lists first. Navigational entries never match.
pub struct CatalogMatcher;

impl CatalogMatcher {
    /// Find the first non-navigational entry whose slug or id is a candidate.
    pub fn find<'c, T: CatalogItem>(catalog: &'c [T], candidates: &CandidateSet) -> Option<&'c T> {
        catalog.iter().find(|entry| Self::matches(*entry, candidates))
    }

    /// Position of the first match, for callers that need to take ownership.
    pub fn position<T: CatalogItem>(catalog: &[T], candidates: &CandidateSet) -> Option<usize> {
        catalog.iter().position(|entry| Self::matches(entry, candidates))
    }

    fn matches<T: CatalogItem>(entry: &T, candidates: &CandidateSet) -> bool {
        if entry.item_type().contains(NAVIGATION_MARKER) {
            return false;
        }
        candidates.has_slug(entry.item_slug()) || candidates.has_id(entry.item_id())
    }
}
