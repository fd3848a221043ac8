//! Feed-forward network orchestration
//!
//! This module provides [`NeuralNetwork`], which owns an ordered stack of
//! layers, one loss function and one optimizer, and drives prediction, online
//! training and evaluation over them.

use crate::config::{validate_layer_sizes, NetworkConfig};
use crate::error::{NetworkError, Result};
use crate::layers::{DenseLayer, Layer, LayerActivation};
use crate::optimizers::{Optimizer, OptimizerType, SGD};
use crate::utils::activations::argmax;
use crate::utils::{Activation, Loss, SimpleRng};
use tracing::{debug, info};

/// Prediction threshold for single-output binary targets.
const BINARY_THRESHOLD: f64 = 0.5;

/// A fully connected feed-forward network.
///
/// The network starts *unconfigured* when created with [`NeuralNetwork::default`]
/// or [`NeuralNetwork::new`] and becomes usable once layers are attached with
/// [`NeuralNetwork::add_layer`]. [`NeuralNetwork::from_layer_sizes`] and
/// [`NeuralNetwork::from_config`] build a configured network in one step.
///
/// # Example
///
/// ```
/// use rust_feedforward_nn::network::NeuralNetwork;
/// use rust_feedforward_nn::optimizers::OptimizerType;
/// use rust_feedforward_nn::utils::{Activation, Loss};
///
/// let mut nn = NeuralNetwork::from_layer_sizes(
///     &[2, 8, 1],
///     Activation::Sigmoid,
///     Loss::MeanSquaredError,
///     OptimizerType::Sgd,
///     42,
/// )
/// .unwrap();
///
/// let inputs = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]];
/// let targets = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];
/// let losses = nn.train(&inputs, &targets, 10, 0.5).unwrap();
/// assert_eq!(losses.len(), 10);
/// ```
pub struct NeuralNetwork {
    layers: Vec<Box<dyn Layer>>,
    loss: Loss,
    optimizer: Box<dyn Optimizer>,
}

impl Default for NeuralNetwork {
    /// An unconfigured network: no layers, mean squared error, SGD.
    fn default() -> Self {
        Self::new(Loss::MeanSquaredError, Box::new(SGD::new()))
    }
}

impl NeuralNetwork {
    /// Create a network without layers for explicit assembly.
    pub fn new(loss: Loss, optimizer: Box<dyn Optimizer>) -> Self {
        Self {
            layers: Vec::new(),
            loss,
            optimizer,
        }
    }

    /// Build a network from a list of layer sizes.
    ///
    /// Every layer except the last uses `activation`. The last layer is a
    /// softmax layer when `loss` is cross-entropy and uses `activation`
    /// otherwise. One RNG seeded with `seed` initializes all layers in order,
    /// so a non-zero seed makes the whole network reproducible.
    ///
    /// # Errors
    ///
    /// Fails if fewer than two sizes are given, any size is zero, or
    /// cross-entropy is requested with a single output unit.
    pub fn from_layer_sizes(
        layer_sizes: &[usize],
        activation: Activation,
        loss: Loss,
        optimizer: OptimizerType,
        seed: u64,
    ) -> Result<Self> {
        validate_layer_sizes(layer_sizes)?;
        let output_size = layer_sizes[layer_sizes.len() - 1];
        if loss.requires_softmax_output() && output_size < 2 {
            return Err(NetworkError::InvalidConfig {
                message: format!(
                    "{} needs at least 2 output units for its softmax layer, got {}",
                    loss, output_size
                ),
            });
        }

        let mut rng = SimpleRng::new(seed);
        let mut network = Self::new(loss, optimizer.build());
        let last = layer_sizes.len() - 2;

        for (index, pair) in layer_sizes.windows(2).enumerate() {
            let layer_activation = if index == last && loss.requires_softmax_output() {
                LayerActivation::Softmax
            } else {
                LayerActivation::Elementwise(activation)
            };
            network.add_layer(DenseLayer::with_rng(
                pair[0],
                pair[1],
                layer_activation,
                &mut rng,
            ))?;
        }

        info!(
            layers = ?layer_sizes,
            %activation,
            %loss,
            %optimizer,
            seed,
            "built network"
        );
        Ok(network)
    }

    /// Build a network from a declarative configuration.
    pub fn from_config(config: &NetworkConfig) -> Result<Self> {
        config.validate()?;
        Self::from_layer_sizes(
            &config.layer_sizes,
            config.activation()?,
            config.loss()?,
            config.optimizer()?,
            config.seed,
        )
    }

    /// Append a layer to the end of the network.
    ///
    /// # Errors
    ///
    /// Fails with [`NetworkError::LayerChainMismatch`] if the layer's input
    /// size differs from the current output size.
    pub fn add_layer<L: Layer + 'static>(&mut self, layer: L) -> Result<()> {
        if let Some(previous) = self.layers.last() {
            if previous.output_size() != layer.input_size() {
                return Err(NetworkError::LayerChainMismatch {
                    index: self.layers.len(),
                    expected: layer.input_size(),
                    actual: previous.output_size(),
                });
            }
        }
        self.layers.push(Box::new(layer));
        Ok(())
    }

    pub fn layers(&self) -> &[Box<dyn Layer>] {
        &self.layers
    }

    pub fn loss(&self) -> Loss {
        self.loss
    }

    pub fn optimizer(&self) -> &dyn Optimizer {
        self.optimizer.as_ref()
    }

    /// Clear the optimizer's accumulated state.
    pub fn reset_optimizer(&mut self) {
        self.optimizer.reset();
    }

    /// Input size of the first layer, or `None` while unconfigured.
    pub fn input_size(&self) -> Option<usize> {
        self.layers.first().map(|layer| layer.input_size())
    }

    /// Output size of the last layer, or `None` while unconfigured.
    pub fn output_size(&self) -> Option<usize> {
        self.layers.last().map(|layer| layer.output_size())
    }

    pub fn parameter_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.parameter_count()).sum()
    }

    /// Run a sample through every layer and return the final output.
    ///
    /// Only the layers' forward caches change; weights are untouched.
    pub fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        let expected = self.input_size().ok_or(NetworkError::NoLayers)?;
        check_len("prediction input", expected, input.len())?;
        Ok(self.forward(input))
    }

    /// Online gradient descent over `inputs` for `epochs` passes.
    ///
    /// Samples are visited in the given order. After each sample the layers
    /// are walked from last to first: the layer's weight and bias gradients go
    /// to the optimizer, which updates that layer in place, and the gradient
    /// propagated to the previous layer is then taken from the updated layer.
    ///
    /// Returns the mean loss of every epoch.
    ///
    /// # Errors
    ///
    /// Fails before touching any weights if the network has no layers, the
    /// dataset is empty, rows are missing or mis-sized, or cross-entropy is
    /// paired with a non-softmax output layer.
    pub fn train(
        &mut self,
        inputs: &[Vec<f64>],
        targets: &[Vec<f64>],
        epochs: usize,
        learning_rate: f64,
    ) -> Result<Vec<f64>> {
        self.check_trainable()?;
        self.check_dataset(inputs, targets)?;

        info!(
            samples = inputs.len(),
            epochs,
            learning_rate,
            optimizer = self.optimizer.name(),
            "starting training"
        );

        let mut epoch_losses = Vec::with_capacity(epochs);
        for epoch in 0..epochs {
            let mut total_loss = 0.0;
            for (input, target) in inputs.iter().zip(targets) {
                total_loss += self.train_sample(input, target, learning_rate);
            }

            let mean_loss = total_loss / inputs.len() as f64;
            debug!("Epoch {}: loss = {:.6}", epoch + 1, mean_loss);
            epoch_losses.push(mean_loss);
        }

        if let Some(&final_loss) = epoch_losses.last() {
            info!(final_loss, "training finished");
        }
        Ok(epoch_losses)
    }

    /// Fraction of samples the network gets right.
    ///
    /// How a sample is judged depends on its target:
    ///
    /// - one-hot with more than one entry: argmax of prediction and target agree
    /// - a single 0 or 1: the prediction thresholded at 0.5 matches
    /// - a single other value: the prediction is within `tolerance`
    /// - anything else: every component is within `tolerance`
    pub fn evaluate(
        &mut self,
        inputs: &[Vec<f64>],
        targets: &[Vec<f64>],
        tolerance: f64,
    ) -> Result<f64> {
        if self.layers.is_empty() {
            return Err(NetworkError::NoLayers);
        }
        self.check_dataset(inputs, targets)?;

        let mut correct = 0usize;
        for (input, target) in inputs.iter().zip(targets) {
            let prediction = self.forward(input);
            if is_correct(&prediction, target, tolerance) {
                correct += 1;
            }
        }

        let accuracy = correct as f64 / inputs.len() as f64;
        debug!(correct, total = inputs.len(), accuracy, "evaluated");
        Ok(accuracy)
    }

    fn forward(&mut self, input: &[f64]) -> Vec<f64> {
        let mut activations = input.to_vec();
        for layer in &mut self.layers {
            activations = layer.forward(&activations);
        }
        activations
    }

    /// One forward/backward/update step; returns the sample's loss.
    fn train_sample(&mut self, input: &[f64], target: &[f64], learning_rate: f64) -> f64 {
        let output = self.forward(input);
        let loss = self.loss.compute(&output, target);
        let mut upstream = self.loss.gradient(&output, target);

        for (slot, layer) in self.layers.iter_mut().enumerate().rev() {
            let weight_gradients = layer.compute_weight_gradients(&upstream);
            let bias_gradients = layer.compute_bias_gradients(&upstream);

            self.optimizer
                .update_weights(slot, layer.weights_mut(), &weight_gradients, learning_rate);
            self.optimizer
                .update_biases(slot, layer.biases_mut(), &bias_gradients, learning_rate);

            upstream = layer.backward(&upstream);
        }

        loss
    }

    fn check_trainable(&self) -> Result<()> {
        let last = self.layers.last().ok_or(NetworkError::NoLayers)?;
        if self.loss.requires_softmax_output() && !last.is_softmax() {
            return Err(NetworkError::LossRequiresSoftmax);
        }
        Ok(())
    }

    fn check_dataset(&self, inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<()> {
        if inputs.is_empty() {
            return Err(NetworkError::EmptyDataset);
        }
        check_len("target rows", inputs.len(), targets.len())?;

        let input_size = self.input_size().ok_or(NetworkError::NoLayers)?;
        let output_size = self.output_size().ok_or(NetworkError::NoLayers)?;
        for (input, target) in inputs.iter().zip(targets) {
            check_len("sample", input_size, input.len())?;
            check_len("target", output_size, target.len())?;
        }
        Ok(())
    }
}

fn check_len(context: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(NetworkError::ShapeMismatch {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Exactly one entry equal to 1, all others 0, and more than one entry.
fn is_one_hot(target: &[f64]) -> bool {
    target.len() > 1
        && target.iter().filter(|&&v| v == 1.0).count() == 1
        && target.iter().all(|&v| v == 0.0 || v == 1.0)
}

fn is_correct(prediction: &[f64], target: &[f64], tolerance: f64) -> bool {
    if is_one_hot(target) {
        return argmax(prediction) == argmax(target);
    }

    if let ([predicted], [expected]) = (prediction, target) {
        if *expected == 0.0 || *expected == 1.0 {
            let class = if *predicted >= BINARY_THRESHOLD { 1.0 } else { 0.0 };
            return class == *expected;
        }
        return (predicted - expected).abs() <= tolerance;
    }

    prediction
        .iter()
        .zip(target)
        .all(|(p, t)| (p - t).abs() <= tolerance)
}
