//! Document store backends.

pub mod memory;

#[cfg(feature = "snapshot")]
pub mod snapshot;

use async_trait::async_trait;
use crate::types::Document;

/// Trait for the hierarchical document store.
///
/// Implementations must return the catalog in a stable order; catalog
/// matching is first-match-wins over that order.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Error type for store operations.
    type Error: std::error::Error + Send + Sync;

    /// Load every known document, in catalog order.
    async fn list_catalog(&self) -> Result<Vec<Document>, Self::Error>;

    /// Fetch a single document by a raw identifier (dashed, dash-less or URL-style).
    async fn get_by_id(&self, id: &str) -> Result<Option<Document>, Self::Error>;
}

pub use memory::InMemoryDocumentStore;

#[cfg(feature = "snapshot")]
pub use snapshot::FileSnapshotStore;
