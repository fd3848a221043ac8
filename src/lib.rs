//! Rust Feed-Forward Network Library
//!
//! A minimal feed-forward neural network trainer: dense layers with pluggable
//! activations, losses and optimizers, trained one sample at a time by
//! backpropagation with hand-coded derivatives.
//!
//! # Modules
//!
//! - `layers`: Layer trait and the dense layer implementation
//! - `optimizers`: Optimizer trait and implementations (SGD, Momentum, Adam)
//! - `utils`: Activation functions, loss functions and the seeded RNG
//! - `network`: The network that wires layers, loss and optimizer together
//! - `config`: Declarative network configuration loaded from JSON
//! - `error`: Error type shared by the crate

pub mod config;
pub mod error;
pub mod layers;
pub mod network;
pub mod optimizers;
pub mod utils;

pub use error::{NetworkError, Result};
pub use network::NeuralNetwork;
