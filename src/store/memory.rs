//! In-memory document store for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use async_trait::async_trait;

use crate::types::{to_canonical_id, Document};
use super::DocumentStore;

/// Error type for in-memory store.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InMemoryStoreError {
    /// Injected failure, for exercising error propagation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// In-memory document store.
///
/// Keeps documents in insertion order, which is the catalog order.
/// Documents added with [`add_hidden`](Self::add_hidden) are reachable by id
/// but absent from the catalog, like pages outside the published listing.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    /// Listed documents, in catalog order.
    catalog: Vec<Document>,
    /// Documents reachable only by id.
    hidden: Vec<Document>,
    /// When set, every call fails with this message.
    failure: Option<String>,
    /// Number of `get_by_id` calls served.
    lookups: AtomicUsize,
}

impl InMemoryDocumentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document to the end of the catalog.
    pub fn add(&mut self, doc: Document) {
        self.catalog.push(doc);
    }

    /// Add a document reachable only through `get_by_id`.
    pub fn add_hidden(&mut self, doc: Document) {
        self.hidden.push(doc);
    }

    /// Make every subsequent call fail.
    pub fn fail_with(&mut self, message: impl Into<String>) {
        self.failure = Some(message.into());
    }

    /// Number of catalog documents.
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Number of direct lookups performed so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), InMemoryStoreError> {
        match &self.failure {
            Some(message) => Err(InMemoryStoreError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    type Error = InMemoryStoreError;

    async fn list_catalog(&self) -> Result<Vec<Document>, Self::Error> {
        self.check()?;
        Ok(self.catalog.clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Document>, Self::Error> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        let wanted = to_canonical_id(id).ok();
        let found = self.catalog.iter().chain(self.hidden.iter()).find(|doc| match wanted {
            Some(wanted) => wanted.matches(&doc.id),
            None => doc.id == id,
        });
        Ok(found.cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BlockGraph;

    fn make_doc(id: &str, slug: &str) -> Document {
        Document {
            id: id.to_string(),
            title: slug.to_string(),
            slug: slug.to_string(),
            summary: None,
            tags: vec![],
            document_type: "Post".to_string(),
            status: "Published".to_string(),
            created_time: None,
            last_edited_time: None,
            publish_date: None,
            publish_day: None,
            last_edited_day: None,
            date: None,
            content: None,
            toc: vec![],
            block_graph: BlockGraph::default(),
        }
    }

    #[tokio::test]
    async fn test_catalog_preserves_order() {
        let mut store = InMemoryDocumentStore::new();
        store.add(make_doc("b", "second"));
        store.add(make_doc("a", "first"));

        let catalog = store.list_catalog().await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].slug, "second");
    }

    #[tokio::test]
    async fn test_get_by_id_accepts_dashless() {
        let mut store = InMemoryDocumentStore::new();
        store.add_hidden(make_doc("01234567-89ab-cdef-0123-456789abcdef", "hidden"));

        let found = store.get_by_id("0123456789abcdef0123456789abcdef").await.unwrap();
        assert_eq!(found.unwrap().slug, "hidden");
        assert!(store.list_catalog().await.unwrap().is_empty());
        assert_eq!(store.lookup_count(), 1);
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let mut store = InMemoryDocumentStore::new();
        store.fail_with("connection reset");
        assert!(store.list_catalog().await.is_err());
        assert!(store.get_by_id("x").await.is_err());
    }
}
