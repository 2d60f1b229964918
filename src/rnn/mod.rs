//! # Recursive Layers for Tree Processing
//!
//! This module provides the layer that encodes a whole tree. **This is the
//! primary API most users should use.**
//!
//! ## Quick Start
//!
//! ```rust
//! use burn::backend::NdArray;
//! use burn::tensor::Tensor;
//! use treelstm::prelude::*;
//!
//! type Backend = NdArray<f32>;
//! let device = Default::default();
//!
//! let layer = ChildSumTreeLSTMConfig::new(4, 8).init::<Backend>(&device);
//!
//! // "the cat sat": the <- cat <- sat (root)
//! let tree = Tree::from_parents(&[2, 3, 0]).unwrap();
//! let inputs = Tensor::<Backend, 2>::ones([3, 4], &device);
//!
//! let output = layer.forward(&tree, inputs).unwrap();
//! assert_eq!(output.root_hidden.dims(), [8]);
//! assert_eq!(output.hiddens.dims(), [3, 8]);
//! ```
//!
//! ## Tensor Shapes
//!
//! | Tensor | Shape | Description |
//! |--------|-------|-------------|
//! | `inputs` | `[num_rows, in_dim]` | Input table, node `n` reads row `tree.idx(n)` |
//! | `root_hidden` | `[mem_dim]` | Root hidden state |
//! | `hiddens` | `[num_nodes, mem_dim]` | All hidden states in [`Tree::data`](crate::tree::Tree::data) order |
//!
//! Per-node cell and hidden states (`[1, mem_dim]` each) are available from
//! [`TreeOutput::states`].
//!
//! ## Order of Evaluation
//!
//! Nodes are combined in post-order so every child is finished before its
//! parent. The stacked `hiddens` follow the tree's own pre-order instead; the
//! two orders are independent.
//!
//! ## Dropout
//!
//! With `p_dropout > 0` and an autodiff backend, the input table goes through
//! [`AlphaDropout`](crate::dropout::AlphaDropout) once per forward pass. Every
//! node sees the same mask. Hidden states are not dropped.
//!
//! ```ignore
//! type Train = Autodiff<NdArray<f32>>;
//! let layer = ChildSumTreeLSTMConfig::new(300, 150)
//!     .with_p_dropout(0.1)
//!     .init::<Train>(&device);
//! ```

pub mod child_sum;

pub use child_sum::{ChildSumTreeLSTM, ChildSumTreeLSTMConfig, TreeOutput, TreeStates};
