//! Error types for tree construction and the tree walker.

use thiserror::Error;

use crate::tree::NodeId;

/// Result type alias for Tree-LSTM operations.
pub type Result<T> = std::result::Result<T, TreeLstmError>;

/// Errors raised while building or decoding a [`Tree`](crate::tree::Tree).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A node id that does not exist in the arena.
    #[error("invalid node id: {0}")]
    InvalidNode(NodeId),

    /// Parent-pointer encoding with no positions.
    #[error("parent list is empty")]
    Empty,

    /// No position was marked as the root.
    #[error("no root node (expected exactly one parent entry equal to 0)")]
    NoRoot,

    /// More than one position was marked as the root.
    #[error("multiple root nodes: {first} and {second}")]
    MultipleRoots { first: usize, second: usize },

    /// A parent pointer outside `0..=len`.
    #[error("node {node} has parent {parent}, but only {len} nodes exist")]
    ParentOutOfRange { node: usize, parent: usize, len: usize },

    /// A node listed as its own parent.
    #[error("node {0} is its own parent")]
    SelfParent(usize),

    /// A node that cannot be reached from the root (cycle or detached subtree).
    #[error("node {0} is not reachable from the root")]
    Unreachable(NodeId),

    /// A node referenced as a child by more than one parent, or by none.
    #[error("node {node} has inconsistent parent links")]
    InconsistentParent { node: NodeId },
}

/// Errors raised by the Tree-LSTM layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeLstmError {
    /// A node references a row the input table does not have.
    #[error("node {node} references input row {idx}, but the input table has {rows} rows")]
    IndexOutOfRange { node: NodeId, idx: usize, rows: usize },

    /// Input rows do not have `in_dim` features.
    #[error("shape mismatch: input rows have {actual} features, expected {expected}")]
    InputWidthMismatch { expected: usize, actual: usize },

    /// A layer handed to a cell has the wrong weight shape (`[d_input, d_output]`).
    #[error("shape mismatch: {layer} weight is {actual:?}, expected {expected:?}")]
    LayerShape {
        layer: &'static str,
        expected: [usize; 2],
        actual: [usize; 2],
    },

    /// Structural error in the tree.
    #[error("tree error: {0}")]
    Tree(#[from] TreeError),
}
