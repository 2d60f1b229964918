//! Tree construction from parent pointers and arena validation.

use super::{NodeId, Tree, TreeNode};
use crate::error::TreeError;
use serde::Deserialize;

impl Tree {
    /// Build a tree from a parent-pointer list, the format dependency and
    /// constituency parsers emit.
    ///
    /// `parents[i]` is the 1-based position of node `i`'s parent, `0` marks
    /// the root. Node `i` becomes `NodeId(i)` with `idx == i`, and children are
    /// ordered by position.
    ///
    /// # Example
    /// ```rust
    /// use treelstm::tree::{NodeId, Tree};
    ///
    /// // "the cat sat": the <- cat <- sat (root)
    /// let tree = Tree::from_parents(&[2, 3, 0]).unwrap();
    /// assert_eq!(tree.root(), NodeId(2));
    /// assert_eq!(tree.children(NodeId(1)), &[NodeId(0)]);
    /// ```
    pub fn from_parents(parents: &[usize]) -> Result<Self, TreeError> {
        let len = parents.len();
        if len == 0 {
            return Err(TreeError::Empty);
        }

        let mut root = None;
        let mut nodes: Vec<TreeNode> = Vec::with_capacity(len);
        for (node, &parent) in parents.iter().enumerate() {
            let parent = match parent {
                0 => {
                    if let Some(NodeId(first)) = root {
                        return Err(TreeError::MultipleRoots {
                            first,
                            second: node,
                        });
                    }
                    root = Some(NodeId(node));
                    None
                }
                p if p > len => {
                    return Err(TreeError::ParentOutOfRange {
                        node,
                        parent: p,
                        len,
                    })
                }
                p if p - 1 == node => return Err(TreeError::SelfParent(node)),
                p => Some(NodeId(p - 1)),
            };
            nodes.push(TreeNode::new(node, parent));
        }
        let root = root.ok_or(TreeError::NoRoot)?;

        for node in 0..len {
            if let Some(NodeId(p)) = nodes[node].parent {
                nodes[p].children.push(NodeId(node));
            }
        }

        validate(&nodes, root)?;
        Ok(Self { nodes, root })
    }
}

/// Unvalidated wire form of a [`Tree`].
#[derive(Deserialize)]
pub(super) struct RawTree {
    nodes: Vec<TreeNode>,
    root: NodeId,
}

impl TryFrom<RawTree> for Tree {
    type Error = TreeError;

    fn try_from(raw: RawTree) -> Result<Self, Self::Error> {
        validate(&raw.nodes, raw.root)?;
        Ok(Self {
            nodes: raw.nodes,
            root: raw.root,
        })
    }
}

/// Check that `nodes` form one finite tree hanging off `root`.
fn validate(nodes: &[TreeNode], root: NodeId) -> Result<(), TreeError> {
    if nodes.is_empty() {
        return Err(TreeError::Empty);
    }
    if root.0 >= nodes.len() {
        return Err(TreeError::InvalidNode(root));
    }
    if nodes[root.0].parent.is_some() {
        return Err(TreeError::InconsistentParent { node: root });
    }

    let mut linked = vec![false; nodes.len()];
    for (i, node) in nodes.iter().enumerate() {
        for &child in &node.children {
            if child.0 >= nodes.len() {
                return Err(TreeError::InvalidNode(child));
            }
            if child == root || linked[child.0] || nodes[child.0].parent != Some(NodeId(i)) {
                return Err(TreeError::InconsistentParent { node: child });
            }
            linked[child.0] = true;
        }
    }
    if let Some(orphan) = (0..nodes.len()).find(|&i| i != root.0 && !linked[i]) {
        return Err(TreeError::InconsistentParent {
            node: NodeId(orphan),
        });
    }

    // Every node has exactly one parent here, so anything the root cannot
    // reach sits on a cycle.
    let mut visited = vec![false; nodes.len()];
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if std::mem::replace(&mut visited[id.0], true) {
            continue;
        }
        stack.extend(nodes[id.0].children.iter().copied());
    }
    match visited.iter().position(|&v| !v) {
        Some(i) => Err(TreeError::Unreachable(NodeId(i))),
        None => Ok(()),
    }
}
