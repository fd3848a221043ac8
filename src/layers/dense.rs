//! Dense (fully connected) layer implementation
//!
//! This module provides a DenseLayer that performs the transformation
//! `output = activation(W · input + b)`, or a softmax over the logits when the
//! layer is configured as a probability output.

use crate::error::{NetworkError, Result};
use crate::layers::Layer;
use crate::utils::activations::{softmax, xavier_limit, Activation};
use crate::utils::SimpleRng;

/// How a dense layer turns its logits into outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerActivation {
    /// Apply an activation to every logit independently.
    Elementwise(Activation),
    /// Normalize the whole logit vector into a probability distribution.
    ///
    /// Backward treats the upstream signal as `dL/dlogit` directly, which is
    /// what the combined softmax + cross-entropy gradient provides.
    Softmax,
}

impl LayerActivation {
    fn init_limit(self, fan_in: usize, fan_out: usize) -> f64 {
        match self {
            LayerActivation::Elementwise(activation) => activation.init_limit(fan_in, fan_out),
            LayerActivation::Softmax => xavier_limit(fan_in, fan_out),
        }
    }
}

impl From<Activation> for LayerActivation {
    fn from(activation: Activation) -> Self {
        LayerActivation::Elementwise(activation)
    }
}

/// Dense (fully connected) layer with weights, biases and an activation.
///
/// # Fields
///
/// * `weights` - Weight matrix stored row-major (output_size × input_size),
///   so `weights[i * input_size + j]` connects input `j` to output `i`
/// * `biases` - Bias vector (output_size)
/// * `last_input` / `last_output` - Forward cache used by the gradient calls
///
/// # Example
///
/// ```
/// use rust_feedforward_nn::layers::{DenseLayer, Layer};
/// use rust_feedforward_nn::utils::Activation;
///
/// let mut layer = DenseLayer::new(2, 3, Activation::Sigmoid, 42);
/// let output = layer.forward(&[0.5, -0.3]);
/// assert_eq!(output.len(), 3);
/// assert!(output.iter().all(|&v| (0.0..=1.0).contains(&v)));
/// ```
#[derive(Debug, Clone)]
pub struct DenseLayer {
    input_size: usize,
    output_size: usize,
    weights: Vec<f64>,
    biases: Vec<f64>,
    activation: LayerActivation,
    last_input: Option<Vec<f64>>,
    last_output: Option<Vec<f64>>,
}

impl DenseLayer {
    /// Create a dense layer with an element-wise activation.
    ///
    /// A `seed` of zero draws the initial weights from system entropy; any
    /// other value makes initialization reproducible.
    pub fn new(input_size: usize, output_size: usize, activation: Activation, seed: u64) -> Self {
        let mut rng = SimpleRng::new(seed);
        Self::with_rng(input_size, output_size, activation.into(), &mut rng)
    }

    /// Create a softmax output layer.
    pub fn softmax(input_size: usize, output_size: usize, seed: u64) -> Self {
        let mut rng = SimpleRng::new(seed);
        Self::with_rng(input_size, output_size, LayerActivation::Softmax, &mut rng)
    }

    /// Create a layer drawing its weights from a caller-owned RNG.
    ///
    /// Weights are sampled uniformly from `[-limit, limit]` in row-major order,
    /// where `limit` is `sqrt(6 / input_size)` for ReLU and
    /// `sqrt(6 / (input_size + output_size))` otherwise. Biases start at zero.
    ///
    /// # Panics
    ///
    /// Panics if either size is zero.
    pub fn with_rng(
        input_size: usize,
        output_size: usize,
        activation: LayerActivation,
        rng: &mut SimpleRng,
    ) -> Self {
        assert!(
            input_size > 0 && output_size > 0,
            "Layer sizes must be greater than 0"
        );

        let limit = activation.init_limit(input_size, output_size);
        let weights = (0..input_size * output_size)
            .map(|_| rng.gen_range_f64(-limit, limit))
            .collect();

        Self {
            input_size,
            output_size,
            weights,
            biases: vec![0.0; output_size],
            activation,
            last_input: None,
            last_output: None,
        }
    }

    /// Create a layer from explicit parameters.
    ///
    /// `weights` must hold `output_size * input_size` values in row-major order
    /// and `biases` must hold `output_size` values.
    pub fn from_parameters(
        input_size: usize,
        output_size: usize,
        activation: LayerActivation,
        weights: Vec<f64>,
        biases: Vec<f64>,
    ) -> Result<Self> {
        if input_size == 0 || output_size == 0 {
            return Err(NetworkError::InvalidLayerSizes {
                message: "layer sizes must be greater than 0".to_string(),
            });
        }
        if weights.len() != input_size * output_size {
            return Err(NetworkError::ShapeMismatch {
                context: "layer weights",
                expected: input_size * output_size,
                actual: weights.len(),
            });
        }
        if biases.len() != output_size {
            return Err(NetworkError::ShapeMismatch {
                context: "layer biases",
                expected: output_size,
                actual: biases.len(),
            });
        }

        Ok(Self {
            input_size,
            output_size,
            weights,
            biases,
            activation,
            last_input: None,
            last_output: None,
        })
    }

    pub fn activation(&self) -> LayerActivation {
        self.activation
    }

    /// Weight connecting input `input` to output `output`.
    pub fn weight(&self, output: usize, input: usize) -> f64 {
        self.weights[output * self.input_size + input]
    }

    /// Output of the most recent forward call, if any.
    pub fn last_output(&self) -> Option<&[f64]> {
        self.last_output.as_deref()
    }

    /// Per-output error terms after the activation derivative.
    fn deltas(&self, upstream: &[f64]) -> Vec<f64> {
        assert_eq!(
            upstream.len(),
            self.output_size,
            "Upstream gradient length must match layer output size"
        );
        let output = self
            .last_output
            .as_ref()
            .expect("backward called before forward");

        match self.activation {
            LayerActivation::Softmax => upstream.to_vec(),
            LayerActivation::Elementwise(activation) => upstream
                .iter()
                .zip(output)
                .map(|(&g, &o)| g * activation.derivative_from_output(o))
                .collect(),
        }
    }

    fn cached_input(&self) -> &[f64] {
        self.last_input
            .as_deref()
            .expect("backward called before forward")
    }
}

impl Layer for DenseLayer {
    fn forward(&mut self, input: &[f64]) -> Vec<f64> {
        assert_eq!(
            input.len(),
            self.input_size,
            "Input length must match layer input size"
        );

        let logits: Vec<f64> = self
            .weights
            .chunks_exact(self.input_size)
            .zip(&self.biases)
            .map(|(row, &bias)| {
                row.iter()
                    .zip(input)
                    .fold(bias, |acc, (&w, &x)| acc + w * x)
            })
            .collect();

        let output = match self.activation {
            LayerActivation::Softmax => softmax(&logits),
            LayerActivation::Elementwise(activation) => activation.apply_vec(&logits),
        };

        self.last_input = Some(input.to_vec());
        self.last_output = Some(output.clone());
        output
    }

    fn backward(&self, upstream: &[f64]) -> Vec<f64> {
        let deltas = self.deltas(upstream);
        let mut grad_input = vec![0.0; self.input_size];

        for (row, &delta) in self.weights.chunks_exact(self.input_size).zip(&deltas) {
            for (g, &w) in grad_input.iter_mut().zip(row) {
                *g += w * delta;
            }
        }

        grad_input
    }

    fn compute_weight_gradients(&self, upstream: &[f64]) -> Vec<f64> {
        let deltas = self.deltas(upstream);
        let input = self.cached_input();

        deltas
            .iter()
            .flat_map(|&delta| input.iter().map(move |&x| delta * x))
            .collect()
    }

    fn compute_bias_gradients(&self, upstream: &[f64]) -> Vec<f64> {
        self.deltas(upstream)
    }

    fn weights(&self) -> &[f64] {
        &self.weights
    }

    fn biases(&self) -> &[f64] {
        &self.biases
    }

    fn weights_mut(&mut self) -> &mut [f64] {
        &mut self.weights
    }

    fn biases_mut(&mut self) -> &mut [f64] {
        &mut self.biases
    }

    fn input_size(&self) -> usize {
        self.input_size
    }

    fn output_size(&self) -> usize {
        self.output_size
    }

    fn is_softmax(&self) -> bool {
        matches!(self.activation, LayerActivation::Softmax)
    }
}
