//! Block graph: the node-graph representation of page content.
//!
//! A graph is a map of nodes keyed by [`NodeId`]. One node of type
//! [`BlockType::Page`] is the root; its `content` lists the direct content
//! nodes in document order. In synthesized graphs each content node also
//! carries a forward link (`content` of length 1) to the node that follows
//! it, so the root's children and the `next` chain describe the same order.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Identifier of a node within a block graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    /// Page root.
    Page,
    /// Plain paragraph.
    Text,
    /// Level-1 heading.
    Header,
    /// Level-2 heading.
    SubHeader,
    /// Level-3 heading.
    SubSubHeader,
    /// Any kind this crate does not interpret.
    #[serde(other)]
    Other,
}

impl BlockType {
    /// Heading depth (1-3) for header kinds.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Self::Header => Some(1),
            Self::SubHeader => Some(2),
            Self::SubSubHeader => Some(3),
            _ => None,
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page => write!(f, "page"),
            Self::Text => write!(f, "text"),
            Self::Header => write!(f, "header"),
            Self::SubHeader => write!(f, "sub_header"),
            Self::SubSubHeader => write!(f, "sub_sub_header"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// A single node in the block graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockNode {
    /// Node identifier (also the map key).
    pub id: NodeId,
    /// Node kind.
    #[serde(rename = "type")]
    pub block_type: BlockType,
    /// Display text (page title or paragraph text).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Parent node, absent on the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,
    /// Children of a page; forward link (at most one) of a content node.
    #[serde(default)]
    pub content: Vec<NodeId>,
}

impl BlockNode {
    /// Create a page root.
    pub fn page(id: NodeId, title: impl Into<String>) -> Self {
        Self {
            id,
            block_type: BlockType::Page,
            title: Some(title.into()),
            parent_id: None,
            content: Vec::new(),
        }
    }

    /// Create a content node under `parent`.
    pub fn child(id: NodeId, block_type: BlockType, text: impl Into<String>, parent: NodeId) -> Self {
        Self {
            id,
            block_type,
            title: Some(text.into()),
            parent_id: Some(parent),
            content: Vec::new(),
        }
    }

    /// Ordered children, meaningful on page nodes.
    pub fn children(&self) -> &[NodeId] {
        &self.content
    }

    /// Forward link, meaningful on content nodes of a synthesized graph.
    pub fn next(&self) -> Option<&NodeId> {
        match self.block_type {
            BlockType::Page => None,
            _ => self.content.first(),
        }
    }
}

/// Structural violation found while building or validating a graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Two nodes share an id.
    #[error("Duplicate node id: {0}")]
    DuplicateNode(NodeId),
    /// No page node, or more than one.
    #[error("Expected exactly one page node, found {0}")]
    RootCount(usize),
    /// A node's parent does not resolve to the root.
    #[error("Node {node} has dangling parent {parent:?}")]
    DanglingParent {
        /// Offending node.
        node: NodeId,
        /// Parent it points at.
        parent: Option<NodeId>,
    },
    /// A node is referenced from more than one place.
    #[error("Node {0} is referenced more than once")]
    SharedTarget(NodeId),
    /// A content node links forward to more than one node.
    #[error("Node {0} has more than one forward link")]
    BranchingLink(NodeId),
    /// Following forward links does not reproduce the root's children.
    #[error("Forward chain diverges from page children at position {0}")]
    ChainMismatch(usize),
    /// A referenced node is missing from the map.
    #[error("Referenced node {0} is missing")]
    MissingNode(NodeId),
}

/// Node graph keyed by id.
///
/// Uses BTreeMap for deterministic serialization order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockGraph {
    /// All nodes.
    pub nodes: BTreeMap<NodeId, BlockNode>,
}

impl BlockGraph {
    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node by id.
    pub fn get(&self, id: &NodeId) -> Option<&BlockNode> {
        self.nodes.get(id)
    }

    /// The page node, if exactly one exists.
    pub fn root(&self) -> Option<&BlockNode> {
        let mut pages = self.nodes.values().filter(|n| n.block_type == BlockType::Page);
        match (pages.next(), pages.next()) {
            (Some(root), None) => Some(root),
            _ => None,
        }
    }

    /// Whether the graph holds more than a lone root.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Content nodes reached by following forward links from the first child.
    pub fn chain(&self) -> Vec<&BlockNode> {
        let mut out = Vec::new();
        let mut seen = BTreeSet::new();
        let mut cursor = self.root().and_then(|r| r.children().first());
        while let Some(id) = cursor {
            if !seen.insert(id) {
                break;
            }
            match self.nodes.get(id) {
                Some(node) => {
                    out.push(node);
                    cursor = node.next();
                }
                None => break,
            }
        }
        out
    }

    /// Check the linked-chain invariants of a synthesized graph.
    ///
    /// - exactly one page node
    /// - every other node has `parent_id` equal to the root
    /// - no node is a child/next target more than once
    /// - each content node has at most one forward link
    /// - the root's children equal the forward chain from the first child
    pub fn validate_chain(&self) -> Result<(), GraphError> {
        let pages = self.nodes.values().filter(|n| n.block_type == BlockType::Page).count();
        let root = match self.root() {
            Some(root) => root,
            None => return Err(GraphError::RootCount(pages)),
        };

        let mut targets: BTreeSet<&NodeId> = BTreeSet::new();
        for child in root.children() {
            if !self.nodes.contains_key(child) {
                return Err(GraphError::MissingNode(child.clone()));
            }
        }

        for node in self.nodes.values().filter(|n| n.block_type != BlockType::Page) {
            if node.parent_id.as_ref() != Some(&root.id) {
                return Err(GraphError::DanglingParent {
                    node: node.id.clone(),
                    parent: node.parent_id.clone(),
                });
            }
            if node.content.len() > 1 {
                return Err(GraphError::BranchingLink(node.id.clone()));
            }
            if let Some(next) = node.next() {
                if !self.nodes.contains_key(next) {
                    return Err(GraphError::MissingNode(next.clone()));
                }
                if !targets.insert(next) {
                    return Err(GraphError::SharedTarget(next.clone()));
                }
            }
        }

        // Children are a separate reference list; duplicates within it are shared targets.
        let mut child_set: BTreeSet<&NodeId> = BTreeSet::new();
        for child in root.children() {
            if !child_set.insert(child) {
                return Err(GraphError::SharedTarget(child.clone()));
            }
        }

        let chain = self.chain();
        if chain.len() != root.children().len() {
            return Err(GraphError::ChainMismatch(chain.len().min(root.children().len())));
        }
        for (pos, (linked, listed)) in chain.iter().zip(root.children()).enumerate() {
            if &linked.id != listed {
                return Err(GraphError::ChainMismatch(pos));
            }
        }

        Ok(())
    }
}

/// Builder for synthesized graphs.
///
/// Nodes are appended in document order; `build` wires parent and forward
/// links and validates the result, so an ill-formed graph never escapes.
#[derive(Debug)]
pub struct BlockGraphBuilder {
    root: BlockNode,
    order: Vec<NodeId>,
    nodes: BTreeMap<NodeId, BlockNode>,
}

impl BlockGraphBuilder {
    /// Start a graph with a page root.
    pub fn new(root_id: NodeId, title: impl Into<String>) -> Self {
        Self {
            root: BlockNode::page(root_id, title),
            order: Vec::new(),
            nodes: BTreeMap::new(),
        }
    }

    /// Append a content node after the last one pushed.
    pub fn push(&mut self, id: NodeId, block_type: BlockType, text: impl Into<String>) -> Result<&mut Self, GraphError> {
        if id == self.root.id || self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }
        if block_type == BlockType::Page {
            return Err(GraphError::RootCount(2));
        }
        let node = BlockNode::child(id.clone(), block_type, text, self.root.id.clone());
        self.nodes.insert(id.clone(), node);
        self.order.push(id);
        Ok(self)
    }

    /// Append a paragraph.
    pub fn push_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<&mut Self, GraphError> {
        self.push(id, BlockType::Text, text)
    }

    /// Link nodes, validate, and return the graph.
    pub fn build(self) -> Result<BlockGraph, GraphError> {
        let Self { mut root, order, mut nodes } = self;

        for pair in order.windows(2) {
            if let Some(node) = nodes.get_mut(&pair[0]) {
                node.content = vec![pair[1].clone()];
            }
        }
        root.content = order;
        nodes.insert(root.id.clone(), root);

        let graph = BlockGraph { nodes };
        graph.validate_chain()?;
        Ok(graph)
    }
}
