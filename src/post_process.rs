//! Post-processing of native documents.
//!
//! Runs only on natively structured documents whose graph holds more than a
//! lone root; synthesized graphs are already in final shape.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::types::{BlockGraph, Document, NodeId, TocEntry};

/// Error raised by a post-processor.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PostProcessError {
    /// The document could not be enriched.
    #[error("Post-processing failed for {id}: {reason}")]
    Failed {
        /// Document id.
        id: String,
        /// Reason.
        reason: String,
    },
}

/// Enriches a resolved document with derived fields.
#[async_trait]
pub trait PostProcessor: Send + Sync {
    /// Enrich `doc` in place.
    async fn process(&self, doc: &mut Document) -> Result<(), PostProcessError>;
}

/// Leaves documents untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPostProcessor;

#[async_trait]
impl PostProcessor for NoopPostProcessor {
    async fn process(&self, _doc: &mut Document) -> Result<(), PostProcessError> {
        Ok(())
    }
}

/// Derives a table of contents from header nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TocPostProcessor;

#[async_trait]
impl PostProcessor for TocPostProcessor {
    async fn process(&self, doc: &mut Document) -> Result<(), PostProcessError> {
        if doc.block_graph.root().is_none() {
            return Err(PostProcessError::Failed {
                id: doc.id.clone(),
                reason: "graph has no single page root".to_string(),
            });
        }
        doc.toc = table_of_contents(&doc.block_graph);
        Ok(())
    }
}

/// Headers in document order, indented relative to the shallowest one.
pub fn table_of_contents(graph: &BlockGraph) -> Vec<TocEntry> {
    let Some(root) = graph.root() else {
        return Vec::new();
    };

    // Depth-first over `content`, in order.
    let mut headers: Vec<(NodeId, String, u8)> = Vec::new();
    let mut visited: HashSet<&NodeId> = HashSet::new();
    let mut stack: Vec<&NodeId> = root.children().iter().rev().collect();
    visited.insert(&root.id);

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let Some(node) = graph.get(id) else {
            continue;
        };
        if let Some(level) = node.block_type.heading_level() {
            headers.push((node.id.clone(), node.title.clone().unwrap_or_default(), level));
        }
        stack.extend(node.content.iter().rev());
    }

    let base = headers.iter().map(|(_, _, level)| *level).min().unwrap_or(1);
    headers
        .into_iter()
        .map(|(id, text, level)| TocEntry {
            id,
            text,
            indent_level: level - base,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BlockNode, BlockType};

    fn native_graph() -> BlockGraph {
        let root = NodeId::from("root");
        let mut graph = BlockGraph::default();
        let mut page = BlockNode::page(root.clone(), "Doc");
        let kids = [
            ("h1", BlockType::SubHeader, "Intro"),
            ("p1", BlockType::Text, "Body"),
            ("h2", BlockType::SubSubHeader, "Detail"),
            ("h3", BlockType::SubHeader, "Outro"),
        ];
        for (id, kind, text) in kids {
            page.content.push(NodeId::from(id));
            graph.nodes.insert(
                NodeId::from(id),
                BlockNode::child(NodeId::from(id), kind, text, root.clone()),
            );
        }
        graph.nodes.insert(root, page);
        graph
    }

    #[test]
    fn test_toc_order_and_indent() {
        let toc = table_of_contents(&native_graph());
        let summary: Vec<_> = toc.iter().map(|e| (e.text.as_str(), e.indent_level)).collect();
        assert_eq!(summary, vec![("Intro", 0), ("Detail", 1), ("Outro", 0)]);
    }

    #[test]
    fn test_toc_empty_without_headers() {
        let mut graph = BlockGraph::default();
        graph.nodes.insert(NodeId::from("r"), BlockNode::page(NodeId::from("r"), "T"));
        assert!(table_of_contents(&graph).is_empty());
    }

    #[tokio::test]
    async fn test_processor_fills_toc() {
        let mut doc: Document = serde_json::from_value(serde_json::json!({
            "id": "root", "title": "Doc", "slug": "doc", "type": "Post", "status": "Published"
        }))
        .unwrap();
        doc.block_graph = native_graph();

        TocPostProcessor.process(&mut doc).await.unwrap();
        assert_eq!(doc.toc.len(), 3);
    }

    #[tokio::test]
    async fn test_processor_rejects_rootless_graph() {
        let mut doc: Document = serde_json::from_value(serde_json::json!({
            "id": "x", "title": "X", "slug": "x", "type": "Post", "status": "Published"
        }))
        .unwrap();
        assert!(TocPostProcessor.process(&mut doc).await.is_err());
    }
}
