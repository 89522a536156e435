//! Direct identifier lookup against the document store.

use crate::store::DocumentStore;
use crate::types::{Document, RAW_ID_LEN};

/// Fetches a single document when the path tail looks like a raw identifier.
///
/// Tails shorter than [`RAW_ID_LEN`] characters are never identifiers and
/// short-circuit without touching the store. Store errors propagate: the
/// store is trusted infrastructure and its failure fails the request.
pub struct DirectFetcher<'a, S: DocumentStore> {
    store: &'a S,
}

impl<'a, S: DocumentStore> DirectFetcher<'a, S> {
    /// Create a fetcher over a store.
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Whether `tail` is long enough to be an identifier.
    pub fn is_candidate(tail: &str) -> bool {
        tail.chars().count() >= RAW_ID_LEN
    }

    /// Look up `tail` by identifier.
    pub async fn fetch_by_id(&self, tail: &str) -> Result<Option<Document>, S::Error> {
        if !Self::is_candidate(tail) {
            tracing::debug!(tail = tail, "tail too short for an identifier, skipping store lookup");
            return Ok(None);
        }
        let doc = self.store.get_by_id(tail).await?;
        tracing::debug!(tail = tail, found = doc.is_some(), "direct store lookup");
        Ok(doc)
    }
}
