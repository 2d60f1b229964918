//! Alpha dropout for Tree-LSTM inputs
//!
//! Burn only ships plain [`Dropout`](burn::nn::Dropout), which zeroes dropped
//! units. Alpha dropout instead pushes them to the negative saturation value
//! of SELU and applies an affine correction so that zero-mean, unit-variance
//! inputs keep their mean and variance.

use burn::config::Config;
use burn::module::Module;
use burn::tensor::{backend::Backend, Distribution, Tensor};

/// Negative saturation of SELU: `-scale * alpha`.
const ALPHA_PRIME: f64 = -1.758_099_340_847_376_6;

/// Configuration to create an [`AlphaDropout`] layer.
#[derive(Config, Debug)]
pub struct AlphaDropoutConfig {
    /// Probability of dropping an element, in `[0, 1)`.
    #[config(default = 0.0)]
    pub prob: f64,
}

/// Alpha dropout layer.
///
/// Only active while gradients are tracked (an autodiff backend); on an
/// inference backend, or with `prob == 0`, it is the identity.
///
/// # Example
///
/// ```rust
/// use burn::backend::NdArray;
/// use burn::tensor::Tensor;
/// use treelstm::dropout::AlphaDropoutConfig;
///
/// type Backend = NdArray<f32>;
/// let device = Default::default();
///
/// let dropout = AlphaDropoutConfig::new().with_prob(0.1).init();
/// let x = Tensor::<Backend, 2>::ones([3, 4], &device);
/// let y = dropout.forward(x);
/// assert_eq!(y.dims(), [3, 4]);
/// ```
#[derive(Module, Clone, Debug)]
pub struct AlphaDropout {
    prob: f64,
}

impl AlphaDropoutConfig {
    /// Initialize a new alpha dropout layer.
    ///
    /// # Panics
    /// If `prob` is outside `[0, 1)`.
    pub fn init(&self) -> AlphaDropout {
        if !(0.0..1.0).contains(&self.prob) {
            panic!(
                "Dropout probability should be in [0, 1), got {}",
                self.prob
            );
        }
        AlphaDropout { prob: self.prob }
    }
}

impl AlphaDropout {
    /// Drop probability.
    pub fn prob(&self) -> f64 {
        self.prob
    }

    /// Applies alpha dropout with one mask sampled for the whole tensor.
    ///
    /// # Arguments
    ///
    /// * `input` - Tensor of any dimension
    pub fn forward<B: Backend, const D: usize>(&self, input: Tensor<B, D>) -> Tensor<B, D> {
        if !B::ad_enabled() || self.prob == 0.0 {
            return input;
        }

        let p = self.prob;
        let a = ((1.0 - p) * (1.0 + p * ALPHA_PRIME * ALPHA_PRIME)).powf(-0.5);
        let b = -a * ALPHA_PRIME * p;

        let keep = input.random_like(Distribution::Bernoulli(1.0 - p));
        let dropped = keep.clone().neg().add_scalar(1.0);

        let x = input * keep + dropped.mul_scalar(ALPHA_PRIME);
        x.mul_scalar(a).add_scalar(b)
    }
}
