//! Configuration structures for building networks
//!
//! This module provides the declarative network configuration: layer sizes plus
//! named activation, loss and optimizer choices, loadable from JSON.

use crate::error::{NetworkError, Result};
use crate::optimizers::OptimizerType;
use crate::utils::{Activation, Loss};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Declarative description of a fully connected network.
///
/// Names are matched case-insensitively and ignore `_` and `-`, so both
/// `"crossEntropy"` and `"cross_entropy"` are accepted.
///
/// Optimizer hyperparameters are optional and only consulted by the optimizer
/// they belong to:
///
/// - **Momentum**: `momentum` (default 0.9)
/// - **Adam**: `beta1` (default 0.9), `beta2` (default 0.999), `epsilon` (default 1e-8)
///
/// # Example
///
/// ```json
/// {
///   "layer_sizes": [4, 8, 3],
///   "activation": "relu",
///   "loss": "crossEntropy",
///   "optimizer": "Adam",
///   "seed": 42
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkConfig {
    /// Neurons per layer, input first: `[2, 8, 1]` builds two dense layers
    pub layer_sizes: Vec<usize>,

    /// Hidden-layer activation: "sigmoid" or "relu"
    pub activation: String,

    /// Loss function: "crossEntropy" or "meanSquaredError"
    pub loss: String,

    /// Optimizer: "SGD", "Momentum" or "Adam"
    pub optimizer: String,

    /// Weight initialization seed (0 = non-deterministic)
    #[serde(default)]
    pub seed: u64,

    /// Momentum coefficient for the Momentum optimizer
    pub momentum: Option<f64>,

    /// First-moment decay rate for Adam
    pub beta1: Option<f64>,

    /// Second-moment decay rate for Adam
    pub beta2: Option<f64>,

    /// Numerical stability constant for Adam
    pub epsilon: Option<f64>,
}

impl NetworkConfig {
    /// Configuration with default optimizer hyperparameters.
    pub fn new(
        layer_sizes: Vec<usize>,
        activation: &str,
        loss: &str,
        optimizer: &str,
        seed: u64,
    ) -> Self {
        Self {
            layer_sizes,
            activation: activation.to_string(),
            loss: loss.to_string(),
            optimizer: optimizer.to_string(),
            seed,
            momentum: None,
            beta1: None,
            beta2: None,
            epsilon: None,
        }
    }

    pub fn activation(&self) -> Result<Activation> {
        let activation: Activation = self.activation.parse()?;
        // Linear is only available to hand-assembled layers
        if activation == Activation::Linear {
            return Err(NetworkError::UnknownActivation {
                name: self.activation.clone(),
            });
        }
        Ok(activation)
    }

    pub fn loss(&self) -> Result<Loss> {
        self.loss.parse()
    }

    /// Resolve the optimizer name and apply any configured hyperparameters.
    pub fn optimizer(&self) -> Result<OptimizerType> {
        let optimizer = match self.optimizer.parse::<OptimizerType>()? {
            OptimizerType::Momentum { momentum } => OptimizerType::Momentum {
                momentum: self.momentum.unwrap_or(momentum),
            },
            OptimizerType::Adam {
                beta1,
                beta2,
                epsilon,
            } => OptimizerType::Adam {
                beta1: self.beta1.unwrap_or(beta1),
                beta2: self.beta2.unwrap_or(beta2),
                epsilon: self.epsilon.unwrap_or(epsilon),
            },
            OptimizerType::Sgd => OptimizerType::Sgd,
        };
        Ok(optimizer)
    }

    /// Check names, layer sizes and hyperparameter ranges.
    pub fn validate(&self) -> Result<()> {
        validate_layer_sizes(&self.layer_sizes)?;
        self.activation()?;
        let loss = self.loss()?;
        self.optimizer()?;

        if loss.requires_softmax_output() && self.layer_sizes.last().copied().unwrap_or(0) < 2 {
            return Err(NetworkError::InvalidConfig {
                message: "crossEntropy needs at least 2 output units for its softmax layer"
                    .to_string(),
            });
        }

        if let Some(momentum) = self.momentum {
            if !(0.0..1.0).contains(&momentum) {
                return Err(invalid("momentum must be in [0, 1)"));
            }
        }
        for (name, beta) in [("beta1", self.beta1), ("beta2", self.beta2)] {
            if let Some(beta) = beta {
                if !(0.0..1.0).contains(&beta) {
                    return Err(invalid(&format!("{} must be in [0, 1)", name)));
                }
            }
        }
        if let Some(epsilon) = self.epsilon {
            if epsilon <= 0.0 {
                return Err(invalid("epsilon must be positive"));
            }
        }

        Ok(())
    }
}

fn invalid(message: &str) -> NetworkError {
    NetworkError::InvalidConfig {
        message: message.to_string(),
    }
}

/// At least an input and an output size, none of them zero.
pub(crate) fn validate_layer_sizes(layer_sizes: &[usize]) -> Result<()> {
    if layer_sizes.len() < 2 {
        return Err(NetworkError::InvalidLayerSizes {
            message: format!(
                "need at least an input and an output size, got {}",
                layer_sizes.len()
            ),
        });
    }
    if let Some(index) = layer_sizes.iter().position(|&size| size == 0) {
        return Err(NetworkError::InvalidLayerSizes {
            message: format!("size at position {} must be greater than 0", index),
        });
    }
    Ok(())
}

/// Loads a network configuration from a JSON file.
///
/// Reads the file at `path`, deserializes it into a `NetworkConfig` and
/// validates it.
///
/// # Examples
///
/// ```no_run
/// use rust_feedforward_nn::config::load_network_config;
///
/// let cfg = load_network_config("config/xor.json").unwrap();
/// assert_eq!(cfg.layer_sizes, vec![2, 8, 1]);
/// ```
pub fn load_network_config<P: AsRef<Path>>(path: P) -> Result<NetworkConfig> {
    let contents = fs::read_to_string(path)?;
    let config: NetworkConfig = serde_json::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}
