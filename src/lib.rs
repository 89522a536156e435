//! # slug-resolver
//!
//! Route-path resolution for a content site backed by two sources.
//!
//! The resolver answers one question:
//!
//! > Given the segments of a request path, which document should be rendered?
//!
//! ## Core Contract
//!
//! 1. Expand the path into an ordered list of candidate slugs and identifiers
//! 2. Match candidates against the hierarchical store's catalog (first match wins)
//! 3. Fall back to a direct identifier lookup, then to the flat content API
//! 4. Shape content API posts into the same block-graph document the renderer expects
//!
//! ## Architecture
//!
//! ```text
//! RoutePath → CandidateGenerator → CatalogMatcher → DirectFetcher → ExternalContentAdapter
//!                                        ↓                ↓                  ↓
//!                                 DocumentStore (Snapshot or Memory)   ContentBackend (HTTP or Static)
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same path + same config → identical candidate list, in identical order
//! - Same post → identical synthesized graph (ids derived from the record id)
//! - Catalog order decides ties; navigational entries never match

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod text;
pub mod date;
pub mod config;
pub mod candidates;
pub mod matcher;
pub mod synth;
pub mod store;
pub mod fetcher;
pub mod backend;
pub mod adapter;
pub mod post_process;
pub mod resolver;

#[cfg(feature = "service")]
pub mod service;

// Re-exports
pub use types::{
    CanonicalId, IdentifierError, to_canonical_id, RAW_ID_LEN, RoutePath, PathError,
    BlockGraph, BlockGraphBuilder, BlockNode, BlockType, GraphError, NodeId,
    CatalogEntry, Document, DocumentOrigin, ResolvedDocument, TocEntry,
};
pub use config::ResolverConfig;
pub use candidates::{CandidateGenerator, CandidateSet};
pub use matcher::{CatalogItem, CatalogMatcher};
pub use synth::GraphSynthesizer;
pub use store::{DocumentStore, InMemoryDocumentStore};
#[cfg(feature = "snapshot")]
pub use store::FileSnapshotStore;
pub use fetcher::DirectFetcher;
pub use backend::{BackendPost, ContentBackend, StaticContentBackend};
#[cfg(feature = "http")]
pub use backend::HttpContentBackend;
pub use adapter::ExternalContentAdapter;
pub use post_process::{NoopPostProcessor, PostProcessError, PostProcessor, TocPostProcessor};
pub use resolver::{PageProps, Resolution, ResolutionStage, ResolveError, SlugResolver};

#[cfg(feature = "service")]
pub use service::{create_router, ServiceState};
