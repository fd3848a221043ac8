//! Optimizer abstractions for network parameter updates
//!
//! This module provides the Optimizer trait and its three implementations.
//!
//! # Overview
//!
//! Optimizers define how to use gradients to update model parameters. The basic
//! gradient descent update is `weight = weight - learning_rate * gradient`;
//! Momentum and Adam keep per-parameter state between calls.
//!
//! One optimizer instance is shared by every layer of a network. Callers pass a
//! `slot` (the layer's position) with each update so per-layer state stays
//! separate inside the optimizer.
//!
//! # Available Optimizers
//!
//! - SGD: Vanilla stochastic gradient descent
//! - Momentum: Gradient descent with a velocity term
//! - Adam: Adaptive moment estimation with bias correction
//!
//! # Example
//!
//! ```
//! use rust_feedforward_nn::optimizers::{Optimizer, OptimizerType};
//!
//! let mut optimizer = OptimizerType::ADAM.build();
//! let mut weights = vec![1.0, 2.0, 3.0];
//! optimizer.update_weights(0, &mut weights, &[0.1, 0.2, 0.3], 0.01);
//! assert!(weights[0] < 1.0);
//! ```

pub mod adam;
pub mod momentum;
pub mod sgd;

pub use adam::Adam;
pub use momentum::Momentum;
pub use sgd::SGD;

use crate::error::NetworkError;
use crate::utils::activations::normalize_name;
use std::fmt;
use std::str::FromStr;

/// Core trait for parameter-update rules.
///
/// # State Management
///
/// Stateful optimizers allocate their accumulators lazily, sized to the first
/// tensor they see in a given slot. From then on that slot's shape is fixed;
/// call [`Optimizer::reset`] before reusing the optimizer on a differently
/// shaped network.
pub trait Optimizer {
    /// Update a weight tensor in place.
    ///
    /// # Panics
    ///
    /// Panics if `weights` and `gradients` have different lengths, or if the
    /// slot was previously used with a different shape.
    fn update_weights(
        &mut self,
        slot: usize,
        weights: &mut [f64],
        gradients: &[f64],
        learning_rate: f64,
    );

    /// Update a bias vector in place. Same preconditions as `update_weights`.
    fn update_biases(
        &mut self,
        slot: usize,
        biases: &mut [f64],
        gradients: &[f64],
        learning_rate: f64,
    );

    /// Clear all accumulated state.
    ///
    /// For stateless optimizers like vanilla SGD, this is a no-op.
    fn reset(&mut self);

    /// Configuration name of the update rule.
    fn name(&self) -> &'static str;
}

/// The closed set of optimizers a network can be configured with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptimizerType {
    Sgd,
    Momentum { momentum: f64 },
    Adam { beta1: f64, beta2: f64, epsilon: f64 },
}

impl OptimizerType {
    /// Momentum with the usual coefficient of 0.9.
    pub const MOMENTUM: OptimizerType = OptimizerType::Momentum {
        momentum: momentum::DEFAULT_MOMENTUM,
    };

    /// Adam with the hyperparameters recommended in the original paper.
    pub const ADAM: OptimizerType = OptimizerType::Adam {
        beta1: adam::DEFAULT_BETA1,
        beta2: adam::DEFAULT_BETA2,
        epsilon: adam::DEFAULT_EPSILON,
    };

    /// Instantiate the optimizer with fresh state.
    pub fn build(self) -> Box<dyn Optimizer> {
        match self {
            OptimizerType::Sgd => Box::new(SGD::new()),
            OptimizerType::Momentum { momentum } => Box::new(Momentum::new(momentum)),
            OptimizerType::Adam {
                beta1,
                beta2,
                epsilon,
            } => Box::new(Adam::new(beta1, beta2, epsilon)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OptimizerType::Sgd => "SGD",
            OptimizerType::Momentum { .. } => "Momentum",
            OptimizerType::Adam { .. } => "Adam",
        }
    }
}

impl fmt::Display for OptimizerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OptimizerType {
    type Err = NetworkError;

    /// Parses `SGD`, `Momentum` or `Adam` (case-insensitive) with default
    /// hyperparameters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "sgd" => Ok(OptimizerType::Sgd),
            "momentum" => Ok(OptimizerType::MOMENTUM),
            "adam" => Ok(OptimizerType::ADAM),
            _ => Err(NetworkError::UnknownOptimizer {
                name: s.to_string(),
            }),
        }
    }
}

pub(crate) fn assert_same_len(parameters: &[f64], gradients: &[f64]) {
    assert_eq!(
        parameters.len(),
        gradients.len(),
        "Parameters and gradients must have the same length"
    );
}

/// Per-slot accumulator storage shared by the stateful optimizers.
#[derive(Debug, Clone, Default)]
pub(crate) struct SlotBuffers {
    slots: Vec<Option<Vec<f64>>>,
}

impl SlotBuffers {
    /// Accumulator for `slot`, allocated to zeros of length `len` on first use.
    pub(crate) fn get_or_init(&mut self, slot: usize, len: usize) -> &mut Vec<f64> {
        if self.slots.len() <= slot {
            self.slots.resize(slot + 1, None);
        }
        let buffer = self.slots[slot].get_or_insert_with(|| {
            tracing::trace!(slot, len, "allocating optimizer state");
            vec![0.0; len]
        });
        assert_eq!(
            buffer.len(),
            len,
            "Optimizer state shape changed for slot {}; call reset() before reuse",
            slot
        );
        buffer
    }

    pub(crate) fn get(&self, slot: usize) -> Option<&[f64]> {
        self.slots.get(slot).and_then(|s| s.as_deref())
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}
