//! Shared numeric utilities for the network
//!
//! This module provides the seeded random number generator, the activation
//! functions and the loss functions used by layers and the network.

pub mod activations;
pub mod loss;
pub mod rng;

pub use activations::{softmax, Activation};
pub use loss::Loss;
pub use rng::SimpleRng;
