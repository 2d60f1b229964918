//! # TreeLSTM - Child-Sum Tree-LSTM (Rust)
//!
//! Recursive neural network cell that encodes every node of an arbitrary-arity
//! tree from its own input features and the summed states of its children,
//! built on the Burn framework.
//!
//! ## Features
//!
//! - **Child-Sum cell**: order-invariant aggregation of any number of children
//! - **Per-child forget gates**: each child's memory is gated separately
//! - **Arena trees**: flat node storage, parent-pointer construction, serde support
//! - **Stack-based traversal**: deep trees do not grow the call stack
//! - **Alpha dropout**: one mask over the whole input table per pass
//!
//! ## Quick Start
//!
//! ```rust
//! use treelstm::prelude::*;
//!
//! // root(0) -> [leaf(1), leaf(2)]
//! let mut tree = Tree::new(0);
//! let root = tree.root();
//! tree.add_child(root, 1).unwrap();
//! tree.add_child(root, 2).unwrap();
//!
//! assert_eq!(tree.len(), 3);
//! assert_eq!(tree.depth(), 1);
//! ```
//!
//! ## Layer Usage
//!
//! ```ignore
//! use treelstm::prelude::*;
//!
//! let layer = ChildSumTreeLSTMConfig::new(300, 150).init::<Backend>(&device);
//! let output = layer.forward(&tree, embeddings)?;
//! // output.root_hidden: [150], output.hiddens: [num_nodes, 150]
//! ```

pub mod cells;
pub mod dropout;
pub mod error;
pub mod rnn;
pub mod tree;

pub use error::{Result, TreeError, TreeLstmError};

pub mod prelude {
    pub use crate::cells::{ChildSumTreeLSTMCell, NodeState};
    pub use crate::dropout::{AlphaDropout, AlphaDropoutConfig};
    pub use crate::error::{TreeError, TreeLstmError};
    pub use crate::rnn::{ChildSumTreeLSTM, ChildSumTreeLSTMConfig, TreeOutput, TreeStates};
    pub use crate::tree::{NodeId, Tree};
}
