//! Loss functions and their per-output gradients.
//!
//! Both losses require `predicted` and `actual` to have the same length and
//! panic otherwise.

use crate::error::NetworkError;
use crate::utils::activations::normalize_name;
use std::fmt;
use std::str::FromStr;

/// Added inside the cross-entropy logarithm so `ln(0)` never happens.
pub const CROSS_ENTROPY_EPSILON: f64 = 1e-15;

/// Loss functions selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loss {
    MeanSquaredError,
    /// Categorical cross-entropy. Its gradient is the combined
    /// softmax + cross-entropy shortcut, so the final layer must be softmax.
    CrossEntropy,
}

impl Loss {
    pub fn compute(self, predicted: &[f64], actual: &[f64]) -> f64 {
        match self {
            Loss::MeanSquaredError => mean_squared_error(predicted, actual),
            Loss::CrossEntropy => cross_entropy(predicted, actual),
        }
    }

    /// Error signal handed to the final layer's backward step.
    pub fn gradient(self, predicted: &[f64], actual: &[f64]) -> Vec<f64> {
        match self {
            Loss::MeanSquaredError => mean_squared_error_derivative(predicted, actual),
            Loss::CrossEntropy => cross_entropy_derivative(predicted, actual),
        }
    }

    /// Whether the gradient is only meaningful after a softmax output layer.
    pub fn requires_softmax_output(self) -> bool {
        matches!(self, Loss::CrossEntropy)
    }

    pub fn name(self) -> &'static str {
        match self {
            Loss::MeanSquaredError => "meanSquaredError",
            Loss::CrossEntropy => "crossEntropy",
        }
    }
}

impl fmt::Display for Loss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Loss {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "meansquarederror" | "mse" => Ok(Loss::MeanSquaredError),
            "crossentropy" => Ok(Loss::CrossEntropy),
            _ => Err(NetworkError::UnknownLoss {
                name: s.to_string(),
            }),
        }
    }
}

fn assert_same_len(predicted: &[f64], actual: &[f64]) {
    assert_eq!(
        predicted.len(),
        actual.len(),
        "Predicted and actual must have the same length"
    );
}

/// Mean squared error: (1/n) * Σ (p_i - a_i)².
pub fn mean_squared_error(predicted: &[f64], actual: &[f64]) -> f64 {
    assert_same_len(predicted, actual);
    if predicted.is_empty() {
        return 0.0;
    }
    let sum: f64 = predicted
        .iter()
        .zip(actual)
        .map(|(p, a)| (p - a) * (p - a))
        .sum();
    sum / predicted.len() as f64
}

/// Gradient of MSE with respect to each prediction: 2 * (p_i - a_i) / n.
pub fn mean_squared_error_derivative(predicted: &[f64], actual: &[f64]) -> Vec<f64> {
    assert_same_len(predicted, actual);
    let n = predicted.len() as f64;
    predicted
        .iter()
        .zip(actual)
        .map(|(p, a)| 2.0 * (p - a) / n)
        .collect()
}

/// Cross-entropy: -Σ a_i * ln(p_i + ε).
pub fn cross_entropy(predicted: &[f64], actual: &[f64]) -> f64 {
    assert_same_len(predicted, actual);
    -predicted
        .iter()
        .zip(actual)
        .map(|(p, a)| a * (p + CROSS_ENTROPY_EPSILON).ln())
        .sum::<f64>()
}

/// Combined softmax + cross-entropy gradient with respect to the logits: p_i - a_i.
pub fn cross_entropy_derivative(predicted: &[f64], actual: &[f64]) -> Vec<f64> {
    assert_same_len(predicted, actual);
    predicted.iter().zip(actual).map(|(p, a)| p - a).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mse_perfect_prediction() {
        assert_eq!(mean_squared_error(&[0.5, 0.25], &[0.5, 0.25]), 0.0);
    }

    #[test]
    fn test_mse_gradient_sign() {
        let grad = mean_squared_error_derivative(&[1.0, 0.0], &[0.0, 1.0]);
        assert_eq!(grad, vec![1.0, -1.0]);
    }

    #[test]
    fn test_cross_entropy_zero_probability_is_finite() {
        let loss = cross_entropy(&[0.0, 1.0], &[1.0, 0.0]);
        assert!(loss.is_finite());
        assert!(loss > 30.0);
    }

    #[test]
    #[should_panic(expected = "Predicted and actual must have the same length")]
    fn test_mismatched_lengths_panic() {
        mean_squared_error(&[0.1, 0.2], &[0.1]);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("crossEntropy".parse::<Loss>().unwrap(), Loss::CrossEntropy);
        assert_eq!("cross_entropy".parse::<Loss>().unwrap(), Loss::CrossEntropy);
        assert_eq!(
            "meanSquaredError".parse::<Loss>().unwrap(),
            Loss::MeanSquaredError
        );
        assert_eq!("MSE".parse::<Loss>().unwrap(), Loss::MeanSquaredError);
        assert!("hinge".parse::<Loss>().is_err());
    }

    #[test]
    fn test_requires_softmax_output() {
        assert!(Loss::CrossEntropy.requires_softmax_output());
        assert!(!Loss::MeanSquaredError.requires_softmax_output());
    }
}
