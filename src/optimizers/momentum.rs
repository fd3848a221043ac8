//! Momentum optimizer implementation
//!
//! Gradient descent with a velocity term that accumulates past gradients.

use crate::optimizers::{assert_same_len, Optimizer, SlotBuffers};

/// Coefficient used when none is configured.
pub const DEFAULT_MOMENTUM: f64 = 0.9;

/// Gradient descent with momentum.
///
/// ```text
/// v = μ * v - learning_rate * gradient
/// parameter = parameter + v
/// ```
///
/// One velocity tensor is kept per slot for weights and one for biases, each
/// allocated to zero the first time the slot is updated.
#[derive(Debug, Clone)]
pub struct Momentum {
    momentum: f64,
    weight_velocities: SlotBuffers,
    bias_velocities: SlotBuffers,
}

impl Momentum {
    pub fn new(momentum: f64) -> Self {
        Self {
            momentum,
            weight_velocities: SlotBuffers::default(),
            bias_velocities: SlotBuffers::default(),
        }
    }

    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    /// Weight velocity of `slot`, if that slot has been updated.
    pub fn weight_velocity(&self, slot: usize) -> Option<&[f64]> {
        self.weight_velocities.get(slot)
    }

    /// Bias velocity of `slot`, if that slot has been updated.
    pub fn bias_velocity(&self, slot: usize) -> Option<&[f64]> {
        self.bias_velocities.get(slot)
    }

    fn step(
        momentum: f64,
        velocity: &mut [f64],
        parameters: &mut [f64],
        gradients: &[f64],
        learning_rate: f64,
    ) {
        for ((param, v), grad) in parameters.iter_mut().zip(velocity).zip(gradients) {
            *v = momentum * *v - learning_rate * grad;
            *param += *v;
        }
    }
}

impl Default for Momentum {
    fn default() -> Self {
        Self::new(DEFAULT_MOMENTUM)
    }
}

impl Optimizer for Momentum {
    fn update_weights(
        &mut self,
        slot: usize,
        weights: &mut [f64],
        gradients: &[f64],
        learning_rate: f64,
    ) {
        assert_same_len(weights, gradients);
        let velocity = self.weight_velocities.get_or_init(slot, weights.len());
        Self::step(self.momentum, velocity, weights, gradients, learning_rate);
    }

    fn update_biases(
        &mut self,
        slot: usize,
        biases: &mut [f64],
        gradients: &[f64],
        learning_rate: f64,
    ) {
        assert_same_len(biases, gradients);
        let velocity = self.bias_velocities.get_or_init(slot, biases.len());
        Self::step(self.momentum, velocity, biases, gradients, learning_rate);
    }

    fn reset(&mut self) {
        self.weight_velocities.clear();
        self.bias_velocities.clear();
    }

    fn name(&self) -> &'static str {
        "Momentum"
    }
}
