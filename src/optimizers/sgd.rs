//! Stochastic Gradient Descent (SGD) optimizer implementation
//!
//! This module provides a vanilla SGD optimizer that performs the basic
//! gradient descent update: `parameter = parameter - learning_rate * gradient`

use crate::optimizers::{assert_same_len, Optimizer};

/// Stochastic Gradient Descent optimizer.
///
/// Implements the basic gradient descent update rule without momentum or
/// adaptive learning rates:
///
/// `w = w - η * ∇L/∂w`
///
/// where w is the parameter, η (eta) is the learning rate, and ∇L/∂w is the gradient.
/// SGD keeps no state, so the `slot` argument is ignored.
///
/// # Example
///
/// ```
/// use rust_feedforward_nn::optimizers::{Optimizer, SGD};
///
/// let mut optimizer = SGD::new();
/// let mut weights = vec![1.0, 2.0, 3.0];
/// optimizer.update_weights(0, &mut weights, &[0.1, 0.2, 0.3], 0.1);
/// assert!((weights[0] - 0.99).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SGD;

impl SGD {
    pub fn new() -> Self {
        Self
    }

    fn step(parameters: &mut [f64], gradients: &[f64], learning_rate: f64) {
        assert_same_len(parameters, gradients);

        for (param, grad) in parameters.iter_mut().zip(gradients) {
            *param -= learning_rate * grad;
        }
    }
}

impl Optimizer for SGD {
    fn update_weights(
        &mut self,
        _slot: usize,
        weights: &mut [f64],
        gradients: &[f64],
        learning_rate: f64,
    ) {
        Self::step(weights, gradients, learning_rate);
    }

    fn update_biases(
        &mut self,
        _slot: usize,
        biases: &mut [f64],
        gradients: &[f64],
        learning_rate: f64,
    ) {
        Self::step(biases, gradients, learning_rate);
    }

    fn reset(&mut self) {
        // Vanilla SGD has no state to reset
    }

    fn name(&self) -> &'static str {
        "SGD"
    }
}
