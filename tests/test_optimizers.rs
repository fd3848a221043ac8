//! Integration tests for the SGD, Momentum and Adam update rules.

use approx::assert_abs_diff_eq;
use rust_feedforward_nn::optimizers::{Adam, Momentum, Optimizer, OptimizerType, SGD};

/// Minimize f(x) = Σ (x_i - 3)² and return the final parameters.
fn minimize_quadratic(optimizer: &mut dyn Optimizer, learning_rate: f64, steps: usize) -> Vec<f64> {
    let mut params = vec![0.0, 10.0, -4.0];
    for _ in 0..steps {
        let grads: Vec<f64> = params.iter().map(|x| 2.0 * (x - 3.0)).collect();
        optimizer.update_weights(0, &mut params, &grads, learning_rate);
    }
    params
}

mod sgd_tests {
    use super::*;

    #[test]
    fn test_sgd_single_step() {
        let mut optimizer = SGD::new();
        let mut biases = vec![0.5, -0.5];
        optimizer.update_biases(3, &mut biases, &[1.0, -2.0], 0.1);

        assert_abs_diff_eq!(biases[0], 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(biases[1], -0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_sgd_converges_on_quadratic() {
        let params = minimize_quadratic(&mut SGD::new(), 0.1, 200);
        for x in params {
            assert_abs_diff_eq!(x, 3.0, epsilon = 1e-6);
        }
    }

    #[test]
    #[should_panic(expected = "Parameters and gradients must have the same length")]
    fn test_sgd_length_mismatch_panics() {
        SGD::new().update_weights(0, &mut [1.0, 2.0], &[0.1], 0.1);
    }
}

mod momentum_tests {
    use super::*;

    #[test]
    fn test_velocity_accumulates() {
        let mut optimizer = Momentum::new(0.9);
        let mut weights = vec![0.0];

        optimizer.update_weights(0, &mut weights, &[1.0], 0.1);
        assert_abs_diff_eq!(weights[0], -0.1, epsilon = 1e-12);

        // v = 0.9 * -0.1 - 0.1 = -0.19
        optimizer.update_weights(0, &mut weights, &[1.0], 0.1);
        assert_abs_diff_eq!(weights[0], -0.29, epsilon = 1e-12);
        assert_abs_diff_eq!(optimizer.weight_velocity(0).unwrap()[0], -0.19, epsilon = 1e-12);
    }

    #[test]
    fn test_weight_and_bias_velocities_are_separate() {
        let mut optimizer = Momentum::default();
        let mut weights = vec![0.0, 0.0];
        let mut biases = vec![0.0];

        optimizer.update_weights(0, &mut weights, &[1.0, 1.0], 0.1);
        optimizer.update_biases(0, &mut biases, &[1.0], 0.1);

        assert_abs_diff_eq!(biases[0], -0.1, epsilon = 1e-12);
        assert_eq!(optimizer.weight_velocity(0).map(<[f64]>::len), Some(2));
        assert_eq!(optimizer.bias_velocity(0).map(<[f64]>::len), Some(1));
    }

    #[test]
    fn test_reset_clears_velocity() {
        let mut optimizer = Momentum::default();
        let mut weights = vec![0.0];
        optimizer.update_weights(0, &mut weights, &[1.0], 0.1);

        optimizer.reset();
        assert!(optimizer.weight_velocity(0).is_none());

        let mut fresh = vec![0.0];
        optimizer.update_weights(0, &mut fresh, &[1.0], 0.1);
        assert_abs_diff_eq!(fresh[0], -0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_momentum_converges_on_quadratic() {
        let params = minimize_quadratic(&mut Momentum::new(0.9), 0.01, 1000);
        for x in params {
            assert_abs_diff_eq!(x, 3.0, epsilon = 1e-3);
        }
    }

    #[test]
    #[should_panic(expected = "Optimizer state shape changed")]
    fn test_reused_slot_with_new_shape_panics() {
        let mut optimizer = Momentum::default();
        optimizer.update_weights(0, &mut [0.0, 0.0], &[1.0, 1.0], 0.1);
        optimizer.update_weights(0, &mut [0.0, 0.0, 0.0], &[1.0, 1.0, 1.0], 0.1);
    }
}

mod adam_tests {
    use super::*;

    #[test]
    fn test_first_step_moves_by_learning_rate() {
        let mut optimizer = Adam::default();
        let mut weights = vec![1.0, 1.0, 1.0];
        optimizer.update_weights(0, &mut weights, &[0.5, -3.0, 1e-3], 0.01);

        // Bias-corrected first step is lr * g / (|g| + ε)
        assert_abs_diff_eq!(weights[0], 0.99, epsilon = 1e-6);
        assert_abs_diff_eq!(weights[1], 1.01, epsilon = 1e-6);
        assert_abs_diff_eq!(weights[2], 0.99, epsilon = 1e-4);
    }

    #[test]
    fn test_time_step_counts_every_call() {
        let mut optimizer = Adam::default();
        let mut weights = vec![0.0; 4];
        let mut biases = vec![0.0; 2];

        for layer in 0..3 {
            optimizer.update_weights(layer, &mut weights, &[0.1; 4], 0.01);
            optimizer.update_biases(layer, &mut biases, &[0.1; 2], 0.01);
        }
        assert_eq!(optimizer.time_step(), 6);

        optimizer.reset();
        assert_eq!(optimizer.time_step(), 0);
    }

    #[test]
    fn test_slots_keep_independent_moments() {
        let mut shared = Adam::default();
        let mut a = vec![0.0, 0.0];
        let mut b = vec![0.0, 0.0, 0.0];
        shared.update_weights(0, &mut a, &[1.0, 1.0], 0.01);
        shared.update_weights(1, &mut b, &[1.0, 1.0, 1.0], 0.01);

        // Slot 1 saw t = 2 but its moments start from zero, so the
        // bias-corrected step is still exactly lr.
        for x in b {
            assert_abs_diff_eq!(x, -0.01, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_adam_converges_on_quadratic() {
        let params = minimize_quadratic(&mut Adam::default(), 0.1, 2000);
        for x in params {
            assert_abs_diff_eq!(x, 3.0, epsilon = 1e-2);
        }
    }

    #[test]
    fn test_custom_hyperparameters_from_type() {
        let optimizer = OptimizerType::Adam {
            beta1: 0.8,
            beta2: 0.99,
            epsilon: 1e-6,
        }
        .build();
        assert_eq!(optimizer.name(), "Adam");
    }
}
