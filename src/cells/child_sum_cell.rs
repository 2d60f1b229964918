use burn::module::Module;
use burn::nn::{Initializer, Linear, LinearConfig};
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use crate::error::{Result, TreeLstmError};

/// Cell and hidden state of one tree node, each of shape `[1, mem_dim]`.
#[derive(Debug, Clone)]
pub struct NodeState<B: Backend> {
    pub cell: Tensor<B, 2>,
    pub hidden: Tensor<B, 2>,
}

/// Child-Sum Tree-LSTM cell
///
/// Combines one node's input with the states of an arbitrary number of
/// children:
/// - h̃ = Σ_k h_k
/// - i, o, u = split(W_ioux @ x + W_iouh @ h̃)
/// - f_k = sigmoid(W_fh @ h_k + W_fx @ x)
/// - c = sigmoid(i) * tanh(u) + Σ_k f_k * c_k
/// - h = sigmoid(o) * tanh(c)
///
/// Both reductions are sums, so the result does not depend on child order.
#[derive(Module, Debug)]
pub struct ChildSumTreeLSTMCell<B: Backend> {
    in_dim: usize,
    mem_dim: usize,
    ioux: Linear<B>, // x -> 3 * mem_dim (i, o, u)
    iouh: Linear<B>, // h̃ -> 3 * mem_dim (i, o, u)
    fx: Linear<B>,   // x -> mem_dim, shared by every child
    fh: Linear<B>,   // h_k -> mem_dim, per child
}

impl<B: Backend> ChildSumTreeLSTMCell<B> {
    /// Create a new Child-Sum Tree-LSTM cell
    ///
    /// Input-side weights are drawn uniformly from `[0, 1)`, hidden-side
    /// weights are orthogonal. Biases keep Burn's default initialization.
    ///
    /// # Arguments
    /// * `in_dim` - Width of a node's input features
    /// * `mem_dim` - Width of the cell and hidden states
    /// * `device` - Device to create the module on
    pub fn new(in_dim: usize, mem_dim: usize, device: &B::Device) -> Self {
        let uniform = Initializer::Uniform { min: 0.0, max: 1.0 };
        let orthogonal = Initializer::Orthogonal { gain: 1.0 };

        let ioux = init_linear(in_dim, 3 * mem_dim, &uniform, device);
        let iouh = init_linear(mem_dim, 3 * mem_dim, &orthogonal, device);
        let fx = init_linear(in_dim, mem_dim, &uniform, device);
        let fh = init_linear(mem_dim, mem_dim, &orthogonal, device);

        Self {
            in_dim,
            mem_dim,
            ioux,
            iouh,
            fx,
            fh,
        }
    }

    /// Assemble a cell from existing layers, e.g. pretrained weights.
    ///
    /// The dimensions are read from the layer weights (`[d_input, d_output]`)
    /// and must agree: `ioux: in -> 3m`, `iouh: m -> 3m`, `fx: in -> m`,
    /// `fh: m -> m`.
    pub fn from_layers(
        ioux: Linear<B>,
        iouh: Linear<B>,
        fx: Linear<B>,
        fh: Linear<B>,
    ) -> Result<Self> {
        let [in_dim, iou_width] = ioux.weight.dims();
        let [mem_dim, fh_out] = fh.weight.dims();

        let expected = [
            ("ioux", [in_dim, 3 * mem_dim], [in_dim, iou_width]),
            ("iouh", [mem_dim, 3 * mem_dim], iouh.weight.dims()),
            ("fx", [in_dim, mem_dim], fx.weight.dims()),
            ("fh", [mem_dim, mem_dim], [mem_dim, fh_out]),
        ];
        for (layer, expected, actual) in expected {
            if expected != actual {
                return Err(TreeLstmError::LayerShape {
                    layer,
                    expected,
                    actual,
                });
            }
        }

        Ok(Self {
            in_dim,
            mem_dim,
            ioux,
            iouh,
            fx,
            fh,
        })
    }

    /// Get the input feature width
    pub fn in_dim(&self) -> usize {
        self.in_dim
    }

    /// Get the cell/hidden state width
    pub fn mem_dim(&self) -> usize {
        self.mem_dim
    }

    /// Zero `(child_c, child_h)` pair, each `[1, mem_dim]`, standing in for
    /// the children of a leaf.
    pub fn leaf_children(&self, device: &B::Device) -> (Tensor<B, 2>, Tensor<B, 2>) {
        (
            Tensor::zeros([1, self.mem_dim], device),
            Tensor::zeros([1, self.mem_dim], device),
        )
    }

    /// Combine a node's input with its children's states
    ///
    /// # Arguments
    /// * `input` - Node input of shape `[1, in_dim]`
    /// * `child_c` - Children's cell states stacked as `[num_children, mem_dim]`
    /// * `child_h` - Children's hidden states stacked as `[num_children, mem_dim]`
    ///
    /// Leaves pass a single zero row (see [`Self::leaf_children`]), so
    /// `num_children` is always at least 1.
    ///
    /// # Returns
    /// The node's [`NodeState`], cell and hidden each `[1, mem_dim]`
    pub fn forward(
        &self,
        input: Tensor<B, 2>,
        child_c: Tensor<B, 2>,
        child_h: Tensor<B, 2>,
    ) -> NodeState<B> {
        let num_children = child_h.dims()[0];

        // Child-sum of hidden states
        let child_h_sum = child_h.clone().sum_dim(0);

        let iou = self.ioux.forward(input.clone()) + self.iouh.forward(child_h_sum);
        let chunks = iou.chunk(3, 1);
        let input_gate = activation::sigmoid(chunks[0].clone());
        let output_gate = activation::sigmoid(chunks[1].clone());
        let update = chunks[2].clone().tanh();

        // One forget gate per child; the input term is shared
        let fx = self.fx.forward(input).repeat_dim(0, num_children);
        let forget_gate = activation::sigmoid(self.fh.forward(child_h) + fx);
        let forgotten = (forget_gate * child_c).sum_dim(0);

        let cell = input_gate * update + forgotten;
        let hidden = output_gate * cell.clone().tanh();

        NodeState { cell, hidden }
    }
}

/// Linear layer with Burn's default bias and `weight_init` for the weight.
fn init_linear<B: Backend>(
    d_input: usize,
    d_output: usize,
    weight_init: &Initializer,
    device: &B::Device,
) -> Linear<B> {
    let mut linear = LinearConfig::new(d_input, d_output)
        .with_bias(true)
        .init(device);
    linear.weight = weight_init.init([d_input, d_output], device);
    linear
}
