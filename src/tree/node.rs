use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a node inside a [`Tree`](super::Tree) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single node of an externally constructed tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Row of the input table holding this node's features.
    pub(crate) idx: usize,
    /// Parent node (None for root).
    #[serde(default)]
    pub(crate) parent: Option<NodeId>,
    /// Ordered children.
    #[serde(default)]
    pub(crate) children: Vec<NodeId>,
}

impl TreeNode {
    pub(crate) fn new(idx: usize, parent: Option<NodeId>) -> Self {
        Self {
            idx,
            parent,
            children: Vec::new(),
        }
    }

    /// Input row of this node.
    pub fn idx(&self) -> usize {
        self.idx
    }

    /// Get the parent, `None` for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Get the children, left to right
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Get the number of children
    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// True if the node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
