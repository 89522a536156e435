//! Block-graph synthesis from flat text.
//!
//! ## Algorithm
//!
//! 1. Split content into non-blank lines (see [`crate::text::paragraphs`])
//! 2. Create the page root holding the title
//! 3. Append one text node per line, in order
//! 4. Link each node forward to the next; the root lists all of them
//!
//! Node ids are derived from the root id and the paragraph position, so the
//! same input always yields the same graph.

use crate::text::paragraphs;
use crate::types::{BlockGraph, BlockGraphBuilder, GraphError, NodeId};

/// Prefix of synthesized page ids.
pub const PAGE_ID_PREFIX: &str = "page-";

/// Prefix of synthesized block ids.
pub const BLOCK_ID_PREFIX: &str = "block-";

/// Root id for a source record id: `page-<id>`.
pub fn page_id(source_id: impl std::fmt::Display) -> NodeId {
    NodeId::new(format!("{}{}", PAGE_ID_PREFIX, source_id))
}

/// Id of the `index`-th paragraph under `root`.
///
/// `page-7` yields `block-7-0`, `block-7-1`, ...; other roots yield
/// `block-<root>-<index>`.
pub fn block_id(root: &NodeId, index: usize) -> NodeId {
    let stem = root.as_str().strip_prefix(PAGE_ID_PREFIX).unwrap_or(root.as_str());
    NodeId::new(format!("{}{}-{}", BLOCK_ID_PREFIX, stem, index))
}

/// Builds minimal block graphs from plain text.
pub struct GraphSynthesizer;

impl GraphSynthesizer {
    /// Synthesize a graph. `None` content yields a root-only graph.
    pub fn synthesize(root_id: NodeId, title: &str, content: Option<&str>) -> Result<BlockGraph, GraphError> {
        let lines = content.map(paragraphs).unwrap_or_default();
        let mut builder = BlockGraphBuilder::new(root_id.clone(), title);
        for (index, line) in lines.into_iter().enumerate() {
            builder.push_text(block_id(&root_id, index), line)?;
        }
        let graph = builder.build()?;

        tracing::debug!(root = %root_id, nodes = graph.len(), "synthesized block graph");
        Ok(graph)
    }
}
