//! # Tree Cell Implementations
//!
//! This module provides the single-node cell of the Child-Sum Tree-LSTM.
//! A cell combines one node's input with the states of its children; the
//! layer in [`crate::rnn`] drives it over a whole tree.
//!
//! ## When to Use Cells Directly
//!
//! Most users should use [`ChildSumTreeLSTM`](crate::rnn::ChildSumTreeLSTM),
//! which handles traversal order, leaf padding and output collection. Use the
//! cell directly when you need:
//!
//! - Custom traversal (e.g. incremental re-encoding of one subtree)
//! - Integration with a different tree representation
//! - Fine-grained control over state management
//!
//! ## Recurrence
//!
//! ```text
//! h̃ = Σ_k h_k
//! i = σ(W_i x + U_i h̃ + b_i)      o = σ(W_o x + U_o h̃ + b_o)
//! u = tanh(W_u x + U_u h̃ + b_u)
//! f_k = σ(W_f x + U_f h_k + b_f)   (one forget gate per child)
//! c = i ⊙ u + Σ_k f_k ⊙ c_k
//! h = o ⊙ tanh(c)
//! ```
//!
//! ## Tensor Shapes
//!
//! | Tensor | Shape | Description |
//! |--------|-------|-------------|
//! | `input` | `[1, in_dim]` | Node input features |
//! | `child_c` | `[num_children, mem_dim]` | Children's cell states |
//! | `child_h` | `[num_children, mem_dim]` | Children's hidden states |
//! | `cell` | `[1, mem_dim]` | New cell state |
//! | `hidden` | `[1, mem_dim]` | New hidden state |
//!
//! Leaves have no children; they pass one zero row for `child_c`/`child_h`
//! (see [`ChildSumTreeLSTMCell::leaf_children`]).
//!
//! ## Example: Using the Cell Directly
//!
//! ```rust
//! use burn::backend::NdArray;
//! use burn::tensor::Tensor;
//! use treelstm::cells::ChildSumTreeLSTMCell;
//!
//! type Backend = NdArray<f32>;
//! let device = Default::default();
//! let cell = ChildSumTreeLSTMCell::<Backend>::new(16, 32, &device);
//!
//! let x: Tensor<Backend, 2> = Tensor::ones([1, 16], &device);
//! let (c0, h0) = cell.leaf_children(&device);
//! let leaf = cell.forward(x.clone(), c0, h0);
//!
//! // Parent with two copies of that leaf as children
//! let parent = cell.forward(
//!     x,
//!     Tensor::cat(vec![leaf.cell.clone(), leaf.cell], 0),
//!     Tensor::cat(vec![leaf.hidden.clone(), leaf.hidden], 0),
//! );
//! assert_eq!(parent.hidden.dims(), [1, 32]);
//! ```

pub mod child_sum_cell;

pub use child_sum_cell::{ChildSumTreeLSTMCell, NodeState};
