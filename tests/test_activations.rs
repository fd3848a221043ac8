//! Tests for activation functions: sigmoid, relu, linear and softmax.
//!
//! Covers the scalar functions, both derivative conventions, the vector
//! overloads and softmax's stability and degenerate-input behavior.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use rust_feedforward_nn::utils::activations::{
    relu, relu_derivative, relu_derivative_from_output, relu_vec, sigmoid, sigmoid_derivative,
    sigmoid_derivative_from_input, sigmoid_vec, softmax, Activation,
};

// ============================================================================
// Sigmoid Tests
// ============================================================================

mod sigmoid_tests {
    use super::*;

    #[test]
    fn test_sigmoid_at_zero() {
        assert_relative_eq!(sigmoid(0.0), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_sigmoid_open_unit_interval() {
        for i in -300..=300 {
            let x = i as f64 * 0.1;
            let y = sigmoid(x);
            assert!(y > 0.0 && y < 1.0, "sigmoid({}) = {} outside (0, 1)", x, y);
        }
    }

    #[test]
    fn test_sigmoid_symmetry() {
        for &x in &[0.3, 1.0, 2.5, 7.0] {
            assert_relative_eq!(sigmoid(x) + sigmoid(-x), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_sigmoid_derivative_of_output_at_zero() {
        assert_relative_eq!(sigmoid_derivative(sigmoid(0.0)), 0.25, epsilon = 1e-12);
        assert_relative_eq!(sigmoid_derivative_from_input(0.0), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_sigmoid_derivative_matches_finite_difference() {
        let h = 1e-6;
        for &x in &[-2.0, -0.5, 0.0, 0.8, 3.0] {
            let numeric = (sigmoid(x + h) - sigmoid(x - h)) / (2.0 * h);
            assert_abs_diff_eq!(sigmoid_derivative_from_input(x), numeric, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_sigmoid_vec_elementwise() {
        let input = [-1.0, 0.0, 1.0];
        let output = sigmoid_vec(&input);
        assert_eq!(output.len(), input.len());
        for (y, &x) in output.iter().zip(&input) {
            assert_eq!(*y, sigmoid(x));
        }
    }
}

// ============================================================================
// ReLU Tests
// ============================================================================

mod relu_tests {
    use super::*;

    #[test]
    fn test_relu_is_max_with_zero() {
        for &x in &[-5.0, -0.1, 0.0, 0.1, 2.0, 100.0] {
            assert_eq!(relu(x), f64::max(0.0, x));
        }
    }

    #[test]
    fn test_relu_derivative_positive_only() {
        assert_eq!(relu_derivative(2.0), 1.0);
        assert_eq!(relu_derivative(-2.0), 0.0);
        assert_eq!(relu_derivative(0.0), 0.0);
    }

    #[test]
    fn test_relu_derivative_from_output_agrees() {
        for &x in &[-3.0, 0.0, 0.5, 4.0] {
            assert_eq!(relu_derivative_from_output(relu(x)), relu_derivative(x));
        }
    }

    #[test]
    fn test_relu_vec() {
        assert_eq!(relu_vec(&[-2.0, -1.0, 0.0, 1.0, 2.0]), vec![0.0, 0.0, 0.0, 1.0, 2.0]);
    }
}

// ============================================================================
// Activation Enum Tests
// ============================================================================

mod activation_enum_tests {
    use super::*;

    #[test]
    fn test_linear_is_identity() {
        assert_eq!(Activation::Linear.apply(-3.5), -3.5);
        assert_eq!(Activation::Linear.derivative_from_output(123.0), 1.0);
        assert_eq!(Activation::Linear.derivative_from_input(-7.0), 1.0);
    }

    #[test]
    fn test_enum_dispatch_matches_free_functions() {
        for &x in &[-1.5, 0.0, 2.0] {
            assert_eq!(Activation::Sigmoid.apply(x), sigmoid(x));
            assert_eq!(Activation::Relu.apply(x), relu(x));
            assert_eq!(
                Activation::Sigmoid.derivative_from_output(sigmoid(x)),
                sigmoid_derivative(sigmoid(x))
            );
        }
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for activation in [Activation::Sigmoid, Activation::Relu, Activation::Linear] {
            let parsed: Activation = activation.to_string().parse().unwrap();
            assert_eq!(parsed, activation);
        }
    }
}

// ============================================================================
// Softmax Tests
// ============================================================================

mod softmax_tests {
    use super::*;

    #[test]
    fn test_softmax_sums_to_one() {
        let inputs: [&[f64]; 4] = [
            &[1.0, 2.0, 3.0],
            &[-10.0, 0.0, 10.0, 20.0],
            &[0.0],
            &[1e-3, -1e-3],
        ];
        for input in inputs {
            let sum: f64 = softmax(input).iter().sum();
            assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_softmax_shift_invariant() {
        let base = [0.5, -1.0, 2.0, 0.0];
        let shifted: Vec<f64> = base.iter().map(|v| v + 37.25).collect();

        let a = softmax(&base);
        let b = softmax(&shifted);
        for (x, y) in a.iter().zip(&b) {
            assert_abs_diff_eq!(x, y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_softmax_large_values_are_finite() {
        let result = softmax(&[1000.0, 1001.0, 1002.0]);
        assert!(result.iter().all(|v| v.is_finite()));
        assert!(result[2] > result[1] && result[1] > result[0]);
    }

    #[test]
    fn test_softmax_uniform_input() {
        for v in softmax(&[3.0, 3.0, 3.0]) {
            assert_relative_eq!(v, 1.0 / 3.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_softmax_all_negative_infinity_is_uniform() {
        let result = softmax(&[f64::NEG_INFINITY, f64::NEG_INFINITY]);
        assert_eq!(result, vec![0.5, 0.5]);
    }
}
