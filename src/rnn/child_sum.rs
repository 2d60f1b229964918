//! Child-Sum Tree-LSTM Layer
//!
//! Drives a [`ChildSumTreeLSTMCell`] over a whole [`Tree`], children before
//! parents, and collects the per-node hidden states.

use crate::cells::{ChildSumTreeLSTMCell, NodeState};
use crate::dropout::{AlphaDropout, AlphaDropoutConfig};
use crate::error::{TreeError, TreeLstmError};
use crate::tree::{NodeId, Tree};
use burn::config::Config;
use burn::module::Module;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use log::{debug, trace};

/// Configuration to create a [`ChildSumTreeLSTM`] layer.
#[derive(Config, Debug)]
pub struct ChildSumTreeLSTMConfig {
    /// Width of a node's input features.
    pub in_dim: usize,
    /// Width of the cell and hidden states.
    pub mem_dim: usize,
    /// Alpha dropout applied once to the whole input table (0 disables it).
    #[config(default = 0.0)]
    pub p_dropout: f64,
}

impl ChildSumTreeLSTMConfig {
    /// Initialize the layer.
    pub fn init<B: Backend>(&self, device: &B::Device) -> ChildSumTreeLSTM<B> {
        ChildSumTreeLSTM::new(self.in_dim, self.mem_dim, device).with_dropout(self.p_dropout)
    }
}

/// Per-node result slots, indexed by [`NodeId`].
///
/// Each slot is written exactly once per forward pass, after all of the
/// node's children.
#[derive(Debug, Clone)]
pub struct TreeStates<B: Backend> {
    slots: Vec<Option<NodeState<B>>>,
}

impl<B: Backend> TreeStates<B> {
    fn with_len(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    fn set(&mut self, id: NodeId, state: NodeState<B>) {
        debug_assert!(self.slots[id.0].is_none(), "node {} combined twice", id);
        self.slots[id.0] = Some(state);
    }

    /// State of node `id`, if it was computed.
    pub fn get(&self, id: NodeId) -> Option<&NodeState<B>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Cell state of node `id`, shape `[1, mem_dim]`.
    pub fn cell(&self, id: NodeId) -> Option<Tensor<B, 2>> {
        self.get(id).map(|s| s.cell.clone())
    }

    /// Hidden state of node `id`, shape `[1, mem_dim]`.
    pub fn hidden(&self, id: NodeId) -> Option<Tensor<B, 2>> {
        self.get(id).map(|s| s.hidden.clone())
    }

    /// Get the number of slots, one per tree node
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if there are no slots
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Computed states in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &NodeState<B>)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|s| (NodeId(i), s)))
    }
}

/// Result of running the layer over one tree.
#[derive(Debug, Clone)]
pub struct TreeOutput<B: Backend> {
    /// Hidden state of the root, shape `[mem_dim]`.
    pub root_hidden: Tensor<B, 1>,
    /// Hidden state of every node in [`Tree::data`] order, shape `[num_nodes, mem_dim]`.
    pub hiddens: Tensor<B, 2>,
    /// Cell and hidden state of every node.
    pub states: TreeStates<B>,
}

/// Child-Sum Tree-LSTM layer
///
/// Processes one tree at a time. Input rows are addressed by each node's
/// `idx`; the whole table goes through alpha dropout once before the walk.
///
/// # Type Parameters
/// * `B` - The backend type
#[derive(Module, Debug)]
pub struct ChildSumTreeLSTM<B: Backend> {
    /// The cell combining one node with its children
    cell: ChildSumTreeLSTMCell<B>,
    /// Dropout on the input table
    dropout: AlphaDropout,
}

impl<B: Backend> ChildSumTreeLSTM<B> {
    /// Create a new Child-Sum Tree-LSTM layer with dropout disabled
    ///
    /// # Arguments
    /// * `in_dim` - Width of a node's input features
    /// * `mem_dim` - Width of the cell and hidden states
    /// * `device` - Device to create the module on
    pub fn new(in_dim: usize, mem_dim: usize, device: &B::Device) -> Self {
        Self::from_cell(ChildSumTreeLSTMCell::new(in_dim, mem_dim, device))
    }

    /// Wrap an existing cell, e.g. one built with [`ChildSumTreeLSTMCell::from_layers`]
    pub fn from_cell(cell: ChildSumTreeLSTMCell<B>) -> Self {
        Self {
            cell,
            dropout: AlphaDropoutConfig::new().init(),
        }
    }

    /// Set the input dropout probability (default: 0)
    ///
    /// # Panics
    /// If `p_dropout` is outside `[0, 1)`.
    pub fn with_dropout(mut self, p_dropout: f64) -> Self {
        self.dropout = AlphaDropoutConfig::new().with_prob(p_dropout).init();
        self
    }

    /// Get the underlying cell
    pub fn cell(&self) -> &ChildSumTreeLSTMCell<B> {
        &self.cell
    }

    /// Get the input feature width
    pub fn in_dim(&self) -> usize {
        self.cell.in_dim()
    }

    /// Get the cell/hidden state width
    pub fn mem_dim(&self) -> usize {
        self.cell.mem_dim()
    }

    /// Get the input dropout probability
    pub fn dropout_prob(&self) -> f64 {
        self.dropout.prob()
    }

    /// Forward pass over a whole tree
    ///
    /// # Arguments
    /// * `tree` - The tree to encode
    /// * `inputs` - Input table of shape `[num_rows, in_dim]`; node `n` reads row `tree.idx(n)`
    ///
    /// # Returns
    /// [`TreeOutput`] with the root hidden state, the stacked hidden states in
    /// [`Tree::data`] order and every node's state.
    ///
    /// # Errors
    /// [`TreeLstmError::InputWidthMismatch`] if the rows are not `in_dim`
    /// wide, [`TreeLstmError::IndexOutOfRange`] if a node's `idx` is not a
    /// row of `inputs`. Both are checked before any computation.
    pub fn forward(&self, tree: &Tree, inputs: Tensor<B, 2>) -> crate::Result<TreeOutput<B>> {
        let [rows, width] = inputs.dims();
        if width != self.in_dim() {
            return Err(TreeLstmError::InputWidthMismatch {
                expected: self.in_dim(),
                actual: width,
            });
        }
        if let Some((node, n)) = tree
            .nodes()
            .iter()
            .enumerate()
            .find(|(_, n)| n.idx() >= rows)
        {
            return Err(TreeLstmError::IndexOutOfRange {
                node: NodeId(node),
                idx: n.idx(),
                rows,
            });
        }

        debug!(
            "Child-sum walk over {} nodes (depth {}), {} input rows, in_dim={}, mem_dim={}, dropout={}",
            tree.len(),
            tree.depth(),
            rows,
            width,
            self.mem_dim(),
            self.dropout.prob()
        );

        let device = inputs.device();
        // One mask for the whole table, shared by every node
        let inputs = self.dropout.forward(inputs);

        let mut states = TreeStates::with_len(tree.len());
        for id in tree.post_order() {
            let (child_c, child_h) = if tree.num_children(id) == 0 {
                self.cell.leaf_children(&device)
            } else {
                let mut cells = Vec::with_capacity(tree.num_children(id));
                let mut hiddens = Vec::with_capacity(tree.num_children(id));
                for &child in tree.children(id) {
                    let state = states.get(child).ok_or(TreeError::Unreachable(child))?;
                    cells.push(state.cell.clone());
                    hiddens.push(state.hidden.clone());
                }
                (Tensor::cat(cells, 0), Tensor::cat(hiddens, 0))
            };

            let input = inputs.clone().narrow(0, tree.idx(id), 1);
            let state = self.cell.forward(input, child_c, child_h);
            trace!(
                "combined node {} (row {}, {} children)",
                id,
                tree.idx(id),
                tree.num_children(id)
            );
            states.set(id, state);
        }

        let root_hidden = states
            .hidden(tree.root())
            .ok_or(TreeError::Unreachable(tree.root()))?
            .squeeze_dim::<1>(0);

        let hiddens = tree
            .data()
            .into_iter()
            .map(|id| states.hidden(id).ok_or(TreeError::Unreachable(id)))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let hiddens = Tensor::cat(hiddens, 0);

        Ok(TreeOutput {
            root_hidden,
            hiddens,
            states,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::tensor::backend::Backend as BurnBackend;
    use burn::tensor::Distribution;

    type TestBackend = NdArray<f32>;
    type TestDevice = <TestBackend as BurnBackend>::Device;

    fn get_test_device() -> TestDevice {
        Default::default()
    }

    fn random_inputs(rows: usize, in_dim: usize, device: &TestDevice) -> Tensor<TestBackend, 2> {
        Tensor::random([rows, in_dim], Distribution::Uniform(-1.0, 1.0), device)
    }

    // 0 -> [1 -> [3, 4, 5], 2]
    fn sample_tree() -> Tree {
        let mut tree = Tree::new(0);
        let root = tree.root();
        let a = tree.add_child(root, 1).unwrap();
        tree.add_child(root, 2).unwrap();
        for idx in 3..6 {
            tree.add_child(a, idx).unwrap();
        }
        tree
    }

    #[test]
    fn test_tree_lstm_creation() {
        let device = get_test_device();
        let layer = ChildSumTreeLSTM::<TestBackend>::new(20, 50, &device);

        assert_eq!(layer.in_dim(), 20);
        assert_eq!(layer.mem_dim(), 50);
        assert_eq!(layer.dropout_prob(), 0.0);
    }

    #[test]
    fn test_tree_lstm_from_config() {
        let device = get_test_device();
        let config = ChildSumTreeLSTMConfig::new(8, 16).with_p_dropout(0.1);
        let layer = config.init::<TestBackend>(&device);

        assert_eq!(layer.in_dim(), 8);
        assert_eq!(layer.mem_dim(), 16);
        assert_eq!(layer.dropout_prob(), 0.1);
    }

    #[test]
    fn test_tree_lstm_config_json_round_trip() {
        let device = get_test_device();
        let config = ChildSumTreeLSTMConfig::new(4, 3).with_p_dropout(0.25);

        let json = serde_json::to_string(&config).unwrap();
        let decoded: ChildSumTreeLSTMConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.in_dim, 4);
        assert_eq!(decoded.mem_dim, 3);
        assert_eq!(decoded.p_dropout, 0.25);

        let layer = decoded.init::<TestBackend>(&device);
        let output = layer.forward(&sample_tree(), random_inputs(6, 4, &device)).unwrap();
        assert_eq!(output.hiddens.dims(), [6, 3]);
    }

    #[test]
    fn test_tree_lstm_output_shapes() {
        let device = get_test_device();
        let layer = ChildSumTreeLSTM::<TestBackend>::new(4, 3, &device);
        let tree = sample_tree();

        let output = layer.forward(&tree, random_inputs(6, 4, &device)).unwrap();

        assert_eq!(output.root_hidden.dims(), [3]);
        assert_eq!(output.hiddens.dims(), [6, 3]);
        assert_eq!(output.states.len(), 6);
        assert_eq!(output.states.iter().count(), 6);
    }

    #[test]
    fn test_tree_lstm_single_node() {
        let device = get_test_device();
        let layer = ChildSumTreeLSTM::<TestBackend>::new(4, 3, &device);
        let tree = Tree::new(1);

        let output = layer.forward(&tree, random_inputs(2, 4, &device)).unwrap();

        assert_eq!(output.root_hidden.dims(), [3]);
        assert_eq!(output.hiddens.dims(), [1, 3]);
    }

    #[test]
    fn test_hiddens_follow_data_order() {
        let device = get_test_device();
        let layer = ChildSumTreeLSTM::<TestBackend>::new(4, 3, &device);
        let tree = sample_tree();

        let output = layer.forward(&tree, random_inputs(6, 4, &device)).unwrap();

        for (row, id) in tree.data().into_iter().enumerate() {
            let stacked = output.hiddens.clone().narrow(0, row, 1);
            let slot = output.states.hidden(id).unwrap();
            let diff = (stacked - slot).abs().max().into_scalar();
            assert_eq!(diff, 0.0, "row {} should hold node {}", row, id);
        }

        let root = output.states.hidden(tree.root()).unwrap().squeeze_dim::<1>(0);
        let diff = (root - output.root_hidden).abs().max().into_scalar();
        assert_eq!(diff, 0.0);
    }

    #[test]
    fn test_walk_matches_manual_composition() {
        let device = get_test_device();
        let layer = ChildSumTreeLSTM::<TestBackend>::new(4, 3, &device);
        let cell = layer.cell();

        // 0 -> [1, 2], rows picked out of order
        let mut tree = Tree::new(2);
        let root = tree.root();
        let left = tree.add_child(root, 0).unwrap();
        let right = tree.add_child(root, 1).unwrap();

        let inputs = random_inputs(3, 4, &device);
        let output = layer.forward(&tree, inputs.clone()).unwrap();

        let row = |i: usize| inputs.clone().narrow(0, i, 1);
        let (zc, zh) = cell.leaf_children(&device);
        let l = cell.forward(row(0), zc.clone(), zh.clone());
        let r = cell.forward(row(1), zc, zh);
        let top = cell.forward(
            row(2),
            Tensor::cat(vec![l.cell.clone(), r.cell.clone()], 0),
            Tensor::cat(vec![l.hidden.clone(), r.hidden.clone()], 0),
        );

        let close = |a: Tensor<TestBackend, 2>, b: Tensor<TestBackend, 2>| {
            (a - b).abs().max().into_scalar() < 1e-6
        };
        assert!(close(output.states.hidden(left).unwrap(), l.hidden));
        assert!(close(output.states.cell(right).unwrap(), r.cell));
        assert!(close(output.states.cell(root).unwrap(), top.cell));
        assert!(close(output.states.hidden(root).unwrap(), top.hidden));
    }

    #[test]
    fn test_tree_lstm_deterministic_without_dropout() {
        let device = get_test_device();
        let layer = ChildSumTreeLSTM::<TestBackend>::new(4, 3, &device);
        let tree = sample_tree();
        let inputs = random_inputs(6, 4, &device);

        let a = layer.forward(&tree, inputs.clone()).unwrap();
        let b = layer.forward(&tree, inputs).unwrap();

        let a: Vec<f32> = a.hiddens.into_data().to_vec().unwrap();
        let b: Vec<f32> = b.hiddens.into_data().to_vec().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_tree_lstm_rejects_out_of_range_idx() {
        let device = get_test_device();
        let layer = ChildSumTreeLSTM::<TestBackend>::new(4, 3, &device);
        let tree = sample_tree();

        let err = layer.forward(&tree, random_inputs(5, 4, &device)).unwrap_err();
        assert_eq!(
            err,
            TreeLstmError::IndexOutOfRange {
                node: NodeId(5),
                idx: 5,
                rows: 5
            }
        );
    }

    #[test]
    fn test_tree_lstm_rejects_wrong_width() {
        let device = get_test_device();
        let layer = ChildSumTreeLSTM::<TestBackend>::new(4, 3, &device);
        let tree = sample_tree();

        let err = layer.forward(&tree, random_inputs(6, 5, &device)).unwrap_err();
        assert_eq!(
            err,
            TreeLstmError::InputWidthMismatch {
                expected: 4,
                actual: 5
            }
        );
    }
}
