//! Layer trait definition for network layers
//!
//! This module defines the Layer trait the network drives during prediction
//! and training. Layers work on one sample at a time and cache what they need
//! from the forward pass for the gradient calls that follow it.

/// Core trait for network layers.
///
/// A layer computes gradients but never applies them: the network hands the
/// weight and bias gradients to its optimizer, which mutates the parameters
/// through [`Layer::weights_mut`] and [`Layer::biases_mut`].
///
/// # Example
///
/// ```ignore
/// let output = layer.forward(&input);
///
/// let weight_grads = layer.compute_weight_gradients(&upstream);
/// let bias_grads = layer.compute_bias_gradients(&upstream);
/// optimizer.update_weights(slot, layer.weights_mut(), &weight_grads, learning_rate);
/// optimizer.update_biases(slot, layer.biases_mut(), &bias_grads, learning_rate);
///
/// let upstream_for_previous = layer.backward(&upstream);
/// ```
pub trait Layer {
    /// Forward propagation for a single sample.
    ///
    /// Caches the input and the returned output for the next gradient calls.
    ///
    /// # Panics
    ///
    /// Implementations panic if `input.len() != self.input_size()`.
    fn forward(&mut self, input: &[f64]) -> Vec<f64>;

    /// Propagated gradient with respect to the cached input.
    ///
    /// `upstream` holds one error signal per output unit: `dL/doutput` for an
    /// element-wise layer, or `dL/dlogit` for a softmax layer fed the combined
    /// softmax + cross-entropy gradient. The returned vector has `input_size`
    /// entries and is computed from the current weights.
    ///
    /// # Panics
    ///
    /// Implementations panic if called before `forward`, or if
    /// `upstream.len() != self.output_size()`.
    fn backward(&self, upstream: &[f64]) -> Vec<f64>;

    /// Weight gradients `dW[i][j] = delta_i * input[j]`, laid out like the weights.
    fn compute_weight_gradients(&self, upstream: &[f64]) -> Vec<f64>;

    /// Bias gradients `db_i = delta_i`.
    fn compute_bias_gradients(&self, upstream: &[f64]) -> Vec<f64>;

    /// Read-only view of the flat weight matrix.
    fn weights(&self) -> &[f64];

    /// Read-only view of the bias vector.
    fn biases(&self) -> &[f64];

    /// Mutable weights for the optimizer to adjust in place.
    fn weights_mut(&mut self) -> &mut [f64];

    /// Mutable biases for the optimizer to adjust in place.
    fn biases_mut(&mut self) -> &mut [f64];

    /// Expected number of input features per sample.
    fn input_size(&self) -> usize;

    /// Number of output features per sample.
    fn output_size(&self) -> usize;

    /// Whether the layer normalizes its logits with softmax.
    fn is_softmax(&self) -> bool;

    /// Total count of weights and biases.
    fn parameter_count(&self) -> usize {
        self.weights().len() + self.biases().len()
    }
}
