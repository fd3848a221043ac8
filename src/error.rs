//! Error types for network construction, configuration and training.

use thiserror::Error;

/// Errors surfaced to callers of the network API.
///
/// Numeric kernels (layers, losses, optimizers) treat shape mismatches as
/// precondition violations and panic; the network validates its inputs up
/// front and reports them through this type instead.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Unknown activation function '{name}'. Must be one of: sigmoid, relu")]
    UnknownActivation { name: String },

    #[error("Unknown loss function '{name}'. Must be one of: crossEntropy, meanSquaredError")]
    UnknownLoss { name: String },

    #[error("Unknown optimizer '{name}'. Must be one of: SGD, Momentum, Adam")]
    UnknownOptimizer { name: String },

    #[error("Invalid layer sizes: {message}")]
    InvalidLayerSizes { message: String },

    #[error(
        "Layer connection mismatch: layer {index} expects {expected} inputs but previous layer produces {actual}"
    )]
    LayerChainMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Cross-entropy loss requires a softmax output layer")]
    LossRequiresSoftmax,

    #[error("Network has no layers")]
    NoLayers,

    #[error("Shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Dataset is empty")]
    EmptyDataset,

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NetworkError>;
