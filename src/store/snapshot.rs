//! File-backed document store.
//!
//! Reads a JSON snapshot exported from the document store:
//!
//! ```json
//! {
//!   "catalog": [ { "id": "...", "slug": "article/hello", "type": "Post", ... } ],
//!   "pages":   [ { "id": "...", ... } ]
//! }
//! ```
//!
//! `catalog` is the published listing, in order; `pages` holds documents that
//! are reachable by id only. The file is re-read on every call so a fresh
//! export is picked up without a restart; nothing is cached.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use crate::types::{to_canonical_id, Document};
use super::DocumentStore;

/// Error type for the snapshot store.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotStoreError {
    /// The snapshot file could not be read.
    #[error("Failed to read snapshot {path}: {source}")]
    Io {
        /// Snapshot path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The snapshot is not valid JSON of the expected shape.
    #[error("Malformed snapshot {path}: {source}")]
    Parse {
        /// Snapshot path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    catalog: Vec<Document>,
    #[serde(default)]
    pages: Vec<Document>,
}

/// Document store reading a JSON snapshot from disk.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    /// Create a store over a snapshot file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Snapshot location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the snapshot can currently be read and parsed.
    pub async fn is_healthy(&self) -> bool {
        self.load().await.is_ok()
    }

    async fn load(&self) -> Result<SnapshotFile, SnapshotStoreError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|source| SnapshotStoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| SnapshotStoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

#[async_trait]
impl DocumentStore for FileSnapshotStore {
    type Error = SnapshotStoreError;

    async fn list_catalog(&self) -> Result<Vec<Document>, Self::Error> {
        let snapshot = self.load().await?;
        tracing::debug!(
            path = %self.path.display(),
            documents = snapshot.catalog.len(),
            "loaded catalog snapshot"
        );
        Ok(snapshot.catalog)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Document>, Self::Error> {
        let snapshot = self.load().await?;
        let wanted = to_canonical_id(id).ok();
        Ok(snapshot
            .catalog
            .into_iter()
            .chain(snapshot.pages)
            .find(|doc| match wanted {
                Some(wanted) => wanted.matches(&doc.id),
                None => doc.id == id,
            }))
    }
}
