//! # Arena Trees
//!
//! Trees consumed by the Tree-LSTM layer. Nodes live in a flat arena and
//! reference their children by [`NodeId`]; every node points at one row of the
//! caller's input table through its `idx`.
//!
//! Two traversal orders are exposed and they are deliberately distinct:
//!
//! | Method | Order | Used for |
//! |--------|-------|----------|
//! | [`Tree::post_order`] | children before parent, left to right | dependency order of the recurrence |
//! | [`Tree::data`] | pre-order: node, then its children left to right | stacking per-node outputs |
//!
//! ## Building Trees
//!
//! ```rust
//! use treelstm::tree::Tree;
//!
//! // root(0) -> [leaf(1), leaf(2)]
//! let mut tree = Tree::new(0);
//! let root = tree.root();
//! tree.add_child(root, 1).unwrap();
//! tree.add_child(root, 2).unwrap();
//! assert_eq!(tree.len(), 3);
//!
//! // Same shape from a parser's parent pointers (1-based, 0 = root)
//! let parsed = Tree::from_parents(&[0, 1, 1]).unwrap();
//! assert_eq!(parsed.num_children(parsed.root()), 2);
//! ```

mod node;
mod parents;

pub use node::{NodeId, TreeNode};

use crate::error::TreeError;
use serde::{Deserialize, Serialize};

/// Rooted, ordered tree of unbounded arity stored as an arena.
///
/// Trees built through [`Tree::new`]/[`Tree::add_child`] or
/// [`Tree::from_parents`] are finite and acyclic. Deserialized trees are
/// validated before use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "parents::RawTree")]
pub struct Tree {
    nodes: Vec<TreeNode>,
    root: NodeId,
}

impl Tree {
    /// Create a tree holding a single root node that reads input row `idx`.
    pub fn new(idx: usize) -> Self {
        Self {
            nodes: vec![TreeNode::new(idx, None)],
            root: NodeId(0),
        }
    }

    /// Append a new node reading input row `idx` as the last child of `parent`.
    ///
    /// # Returns
    /// The id of the new node, or [`TreeError::InvalidNode`] if `parent` is
    /// not in this tree.
    pub fn add_child(&mut self, parent: NodeId, idx: usize) -> Result<NodeId, TreeError> {
        if parent.0 >= self.nodes.len() {
            return Err(TreeError::InvalidNode(parent));
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode::new(idx, Some(parent)));
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    /// Get the root node
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node by id, `None` if it is not in this tree
    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    /// All nodes in arena (insertion) order.
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Ordered children of `id`.
    ///
    /// # Panics
    /// If `id` is not a node of this tree.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Get the number of children of `id`
    pub fn num_children(&self, id: NodeId) -> usize {
        self.nodes[id.0].children.len()
    }

    /// Get the input row read by `id`
    pub fn idx(&self, id: NodeId) -> usize {
        self.nodes[id.0].idx
    }

    /// Get the parent of `id`, `None` for the root
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Leaves in pre-order.
    pub fn leaves(&self) -> Vec<NodeId> {
        self.data()
            .into_iter()
            .filter(|&id| self.nodes[id.0].is_leaf())
            .collect()
    }

    /// Length of the longest root-to-leaf path in edges. A lone root has depth 0.
    pub fn depth(&self) -> usize {
        let mut depths = vec![0usize; self.nodes.len()];
        for id in self.post_order() {
            depths[id.0] = self.nodes[id.0]
                .children
                .iter()
                .map(|c| depths[c.0] + 1)
                .max()
                .unwrap_or(0);
        }
        depths[self.root.0]
    }

    /// The tree's native flat order: depth-first pre-order.
    pub fn data(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        order
    }

    /// Post-order traversal: every node appears after all of its children.
    ///
    /// Uses an explicit stack, so arbitrarily deep trees do not grow the call stack.
    pub fn post_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        // (node, next child to visit)
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, next)) = stack.pop() {
            let children = &self.nodes[id.0].children;
            if next < children.len() {
                stack.push((id, next + 1));
                stack.push((children[next], 0));
            } else {
                order.push(id);
            }
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0 -> [1 -> [3, 4], 2]
    fn sample_tree() -> Tree {
        let mut tree = Tree::new(10);
        let root = tree.root();
        let a = tree.add_child(root, 11).unwrap();
        tree.add_child(root, 12).unwrap();
        tree.add_child(a, 13).unwrap();
        tree.add_child(a, 14).unwrap();
        tree
    }

    #[test]
    fn test_single_node_tree() {
        let tree = Tree::new(3);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.idx(tree.root()), 3);
        assert_eq!(tree.data(), vec![NodeId(0)]);
        assert_eq!(tree.post_order(), vec![NodeId(0)]);
    }

    #[test]
    fn test_add_child_links_parent() {
        let tree = sample_tree();
        assert_eq!(tree.num_children(NodeId(0)), 2);
        assert_eq!(tree.children(NodeId(1)), &[NodeId(3), NodeId(4)]);
        assert_eq!(tree.parent(NodeId(4)), Some(NodeId(1)));
        assert_eq!(tree.parent(NodeId(0)), None);
    }

    #[test]
    fn test_add_child_invalid_parent() {
        let mut tree = Tree::new(0);
        assert_eq!(
            tree.add_child(NodeId(7), 1),
            Err(TreeError::InvalidNode(NodeId(7)))
        );
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_pre_order_and_post_order_differ() {
        let tree = sample_tree();
        let pre: Vec<usize> = tree.data().into_iter().map(NodeId::index).collect();
        let post: Vec<usize> = tree.post_order().into_iter().map(NodeId::index).collect();
        assert_eq!(pre, vec![0, 1, 3, 4, 2]);
        assert_eq!(post, vec![3, 4, 1, 2, 0]);
    }

    #[test]
    fn test_depth_and_leaves() {
        let tree = sample_tree();
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.leaves(), vec![NodeId(3), NodeId(4), NodeId(2)]);
    }

    #[test]
    fn test_deep_chain_traversal() {
        let mut tree = Tree::new(0);
        let mut tip = tree.root();
        for i in 1..100_000 {
            tip = tree.add_child(tip, i).unwrap();
        }
        let post = tree.post_order();
        assert_eq!(post.len(), 100_000);
        assert_eq!(post[0], tip);
        assert_eq!(post[post.len() - 1], tree.root());
        assert_eq!(tree.depth(), 99_999);
    }
}
