//! Layer abstractions for the network
//!
//! This module provides the Layer trait and the dense layer implementation.

mod r#trait;
pub mod dense;

// Re-export the Layer trait for convenience
pub use dense::{DenseLayer, LayerActivation};
pub use r#trait::Layer;
