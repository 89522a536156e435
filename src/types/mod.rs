//! Core types for slug resolution.

pub mod identifier;
pub mod path;
pub mod block;
pub mod document;

pub use identifier::{CanonicalId, IdentifierError, to_canonical_id, RAW_ID_LEN};
pub use path::{RoutePath, PathError};
pub use block::{BlockGraph, BlockGraphBuilder, BlockNode, BlockType, GraphError, NodeId};
pub use document::{
    CatalogEntry, Document, DocumentOrigin, ResolvedDocument, TocEntry, NAVIGATION_MARKER,
};
