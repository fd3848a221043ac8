//! Activation functions for neural networks
//!
//! This module provides the activation functions used by dense layers together
//! with their derivatives:
//! - Sigmoid
//! - ReLU
//! - Linear (identity, for regression outputs)
//! - Softmax (vector-only, for probability outputs)
//!
//! Derivatives come in two forms. The `*_derivative` functions take the value
//! the activation already produced (the cached layer output), which is what the
//! backward pass has at hand. The `*_derivative_from_input` functions take the
//! pre-activation value instead.

use crate::error::NetworkError;
use std::fmt;
use std::str::FromStr;

/// Element-wise activation functions selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Sigmoid,
    Relu,
    Linear,
}

impl Activation {
    /// Apply the activation to a single pre-activation value.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => sigmoid(x),
            Activation::Relu => relu(x),
            Activation::Linear => x,
        }
    }

    /// Apply the activation element-wise.
    pub fn apply_vec(self, x: &[f64]) -> Vec<f64> {
        x.iter().map(|&v| self.apply(v)).collect()
    }

    /// Derivative given the activation's own output.
    pub fn derivative_from_output(self, output: f64) -> f64 {
        match self {
            Activation::Sigmoid => sigmoid_derivative(output),
            Activation::Relu => relu_derivative_from_output(output),
            Activation::Linear => 1.0,
        }
    }

    /// Derivative given the pre-activation input.
    pub fn derivative_from_input(self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => sigmoid_derivative_from_input(x),
            Activation::Relu => relu_derivative(x),
            Activation::Linear => 1.0,
        }
    }

    /// Half-width of the uniform weight initialization range.
    ///
    /// ReLU uses the He-style `sqrt(6 / fan_in)`; everything else uses
    /// Xavier/Glorot `sqrt(6 / (fan_in + fan_out))`.
    pub fn init_limit(self, fan_in: usize, fan_out: usize) -> f64 {
        match self {
            Activation::Relu => (6.0 / fan_in as f64).sqrt(),
            Activation::Sigmoid | Activation::Linear => xavier_limit(fan_in, fan_out),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Activation::Sigmoid => "sigmoid",
            Activation::Relu => "relu",
            Activation::Linear => "linear",
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Activation {
    type Err = NetworkError;

    /// Parses the configuration names `sigmoid` and `relu` (case-insensitive).
    ///
    /// `linear` is accepted too, for layers assembled by hand.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "sigmoid" => Ok(Activation::Sigmoid),
            "relu" => Ok(Activation::Relu),
            "linear" | "identity" => Ok(Activation::Linear),
            _ => Err(NetworkError::UnknownActivation {
                name: s.to_string(),
            }),
        }
    }
}

/// Xavier/Glorot uniform limit.
pub fn xavier_limit(fan_in: usize, fan_out: usize) -> f64 {
    (6.0 / (fan_in + fan_out) as f64).sqrt()
}

/// Lowercase and drop `_`, `-` and spaces so `crossEntropy`, `cross_entropy`
/// and `Cross-Entropy` compare equal.
pub(crate) fn normalize_name(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Sigmoid activation function.
///
/// Returns the sigmoid of the input: 1 / (1 + exp(-x))
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Sigmoid derivative assuming x = sigmoid(z).
///
/// Returns the derivative: x * (1 - x)
pub fn sigmoid_derivative(x: f64) -> f64 {
    x * (1.0 - x)
}

/// Sigmoid derivative recomputed from the pre-activation input.
pub fn sigmoid_derivative_from_input(x: f64) -> f64 {
    sigmoid_derivative(sigmoid(x))
}

/// Sigmoid applied element-wise.
pub fn sigmoid_vec(x: &[f64]) -> Vec<f64> {
    Activation::Sigmoid.apply_vec(x)
}

/// ReLU activation function: max(0, x).
pub fn relu(x: f64) -> f64 {
    x.max(0.0)
}

/// ReLU derivative from the pre-activation input. Zero counts as non-positive.
pub fn relu_derivative(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else {
        0.0
    }
}

/// ReLU derivative from the output. `relu(x) > 0` exactly when `x > 0`.
pub fn relu_derivative_from_output(output: f64) -> f64 {
    relu_derivative(output)
}

/// ReLU applied element-wise.
pub fn relu_vec(x: &[f64]) -> Vec<f64> {
    Activation::Relu.apply_vec(x)
}

/// Softmax over a whole vector.
///
/// Subtracts the maximum before exponentiating. If the exponentials sum to
/// zero (or the sum is otherwise unusable, e.g. every entry is `-inf`), the
/// result is a uniform distribution instead of a division by zero.
pub fn softmax(logits: &[f64]) -> Vec<f64> {
    if logits.is_empty() {
        return Vec::new();
    }

    let max_value = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|&v| (v - max_value).exp()).collect();
    let sum: f64 = exps.iter().sum();

    if !(sum > 0.0 && sum.is_finite()) {
        tracing::warn!(
            len = logits.len(),
            "softmax exponential sum degenerate, falling back to uniform"
        );
        let uniform = 1.0 / logits.len() as f64;
        return vec![uniform; logits.len()];
    }

    let inv_sum = 1.0 / sum;
    exps.into_iter().map(|v| v * inv_sum).collect()
}

/// Index of the largest element (first one on ties). `None` for empty input.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_sigmoid_zero() {
        let result = sigmoid(0.0);
        assert!((result - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_sigmoid_positive() {
        let result = sigmoid(2.0);
        assert!(result > 0.5 && result < 1.0);
    }

    #[test]
    fn test_sigmoid_negative() {
        let result = sigmoid(-2.0);
        assert!(result > 0.0 && result < 0.5);
    }

    #[test]
    fn test_sigmoid_derivative_at_half() {
        let result = sigmoid_derivative(0.5);
        assert!((result - 0.25).abs() < EPSILON);
    }

    #[test]
    fn test_sigmoid_derivative_conventions_agree() {
        for &x in &[-3.0, -0.5, 0.0, 0.7, 4.0] {
            let from_output = sigmoid_derivative(sigmoid(x));
            assert!((from_output - sigmoid_derivative_from_input(x)).abs() < EPSILON);
        }
    }

    #[test]
    fn test_relu_values() {
        assert_eq!(relu(-2.0), 0.0);
        assert_eq!(relu(0.0), 0.0);
        assert_eq!(relu(3.5), 3.5);
    }

    #[test]
    fn test_relu_derivative_at_zero() {
        assert_eq!(relu_derivative(0.0), 0.0);
        assert_eq!(relu_derivative(1e-12), 1.0);
        assert_eq!(relu_derivative(-1.0), 0.0);
    }

    #[test]
    fn test_vector_overloads_preserve_order() {
        let input = [-1.0, 0.0, 2.0];
        assert_eq!(relu_vec(&input), vec![0.0, 0.0, 2.0]);
        let s = sigmoid_vec(&input);
        assert_eq!(s.len(), 3);
        assert!(s[0] < s[1] && s[1] < s[2]);
    }

    #[test]
    fn test_softmax_sum() {
        let result = softmax(&[1.0, 2.0, 3.0]);
        let sum: f64 = result.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_softmax_numerical_stability() {
        let result = softmax(&[1000.0, 1001.0, 1002.0]);
        let sum: f64 = result.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(!result.iter().any(|x| x.is_nan() || x.is_infinite()));
    }

    #[test]
    fn test_softmax_degenerate_falls_back_to_uniform() {
        let result = softmax(&[f64::NEG_INFINITY; 4]);
        for &v in &result {
            assert!((v - 0.25).abs() < EPSILON);
        }
    }

    #[test]
    fn test_softmax_empty() {
        assert!(softmax(&[]).is_empty());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("sigmoid".parse::<Activation>().unwrap(), Activation::Sigmoid);
        assert_eq!("ReLU".parse::<Activation>().unwrap(), Activation::Relu);
        assert!(matches!(
            "tanh".parse::<Activation>(),
            Err(NetworkError::UnknownActivation { .. })
        ));
    }

    #[test]
    fn test_init_limits() {
        assert!((Activation::Relu.init_limit(6, 3) - 1.0).abs() < EPSILON);
        assert!((Activation::Sigmoid.init_limit(3, 3) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_argmax() {
        assert_eq!(argmax(&[0.1, 0.7, 0.2]), Some(1));
        assert_eq!(argmax(&[0.5, 0.5]), Some(0));
        assert_eq!(argmax(&[]), None);
    }
}
