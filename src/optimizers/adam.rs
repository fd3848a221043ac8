//! Adam (Adaptive Moment Estimation) optimizer implementation
//!
//! This module provides the Adam optimizer, which combines momentum and
//! adaptive learning rates with bias correction for improved convergence.

use crate::optimizers::{assert_same_len, Optimizer, SlotBuffers};

pub const DEFAULT_BETA1: f64 = 0.9;
pub const DEFAULT_BETA2: f64 = 0.999;
pub const DEFAULT_EPSILON: f64 = 1e-8;

/// Adam (Adaptive Moment Estimation) optimizer.
///
/// The update rule is:
///
/// ```text
/// m_t = β1 * m_{t-1} + (1 - β1) * gradient
/// v_t = β2 * v_{t-1} + (1 - β2) * gradient²
/// m_hat = m_t / (1 - β1^t)
/// v_hat = v_t / (1 - β2^t)
/// parameter = parameter - α * m_hat / (√v_hat + ε)
/// ```
///
/// # Time step
///
/// A single counter `t` is shared by every slot and by weights and biases
/// alike. It advances once per `update_weights` call and once per
/// `update_biases` call, so a network with `L` layers advances it `2L` times
/// per training sample and a layer's weights and biases see different values
/// of `t`.
///
/// # Reference
///
/// Kingma, D. P., & Ba, J. (2014). Adam: A method for stochastic optimization.
/// arXiv preprint arXiv:1412.6980.
#[derive(Debug, Clone)]
pub struct Adam {
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    /// First moment estimates for weight tensors
    m_weights: SlotBuffers,
    /// Second moment estimates for weight tensors
    v_weights: SlotBuffers,
    m_biases: SlotBuffers,
    v_biases: SlotBuffers,
    /// Time step counter for bias correction
    t: u64,
}

impl Adam {
    /// Creates a new Adam optimizer with the specified hyperparameters.
    ///
    /// # Arguments
    ///
    /// * `beta1` - Exponential decay rate for first moment estimates (0 < β1 < 1)
    /// * `beta2` - Exponential decay rate for second moment estimates (0 < β2 < 1)
    /// * `epsilon` - Small constant for numerical stability (must be positive)
    pub fn new(beta1: f64, beta2: f64, epsilon: f64) -> Self {
        Self {
            beta1,
            beta2,
            epsilon,
            m_weights: SlotBuffers::default(),
            v_weights: SlotBuffers::default(),
            m_biases: SlotBuffers::default(),
            v_biases: SlotBuffers::default(),
            t: 0,
        }
    }

    /// Number of updates applied since creation or the last reset.
    pub fn time_step(&self) -> u64 {
        self.t
    }

    pub fn beta1(&self) -> f64 {
        self.beta1
    }

    pub fn beta2(&self) -> f64 {
        self.beta2
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

/// One Adam step over a tensor using moment buffers `m` and `v`.
#[allow(clippy::too_many_arguments)]
fn adam_step(
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    t: u64,
    m: &mut [f64],
    v: &mut [f64],
    parameters: &mut [f64],
    gradients: &[f64],
    learning_rate: f64,
) {
    // Compute bias correction factors
    let bias_correction1 = 1.0 - beta1.powf(t as f64);
    let bias_correction2 = 1.0 - beta2.powf(t as f64);

    for i in 0..parameters.len() {
        let g = gradients[i];
        m[i] = beta1 * m[i] + (1.0 - beta1) * g;
        v[i] = beta2 * v[i] + (1.0 - beta2) * g * g;

        let m_hat = m[i] / bias_correction1;
        let v_hat = v[i] / bias_correction2;

        parameters[i] -= learning_rate * m_hat / (v_hat.sqrt() + epsilon);
    }
}

impl Default for Adam {
    fn default() -> Self {
        Self::new(DEFAULT_BETA1, DEFAULT_BETA2, DEFAULT_EPSILON)
    }
}

impl Optimizer for Adam {
    fn update_weights(
        &mut self,
        slot: usize,
        weights: &mut [f64],
        gradients: &[f64],
        learning_rate: f64,
    ) {
        assert_same_len(weights, gradients);
        self.t += 1;

        let m = self.m_weights.get_or_init(slot, weights.len());
        let v = self.v_weights.get_or_init(slot, weights.len());
        adam_step(
            self.beta1,
            self.beta2,
            self.epsilon,
            self.t,
            m,
            v,
            weights,
            gradients,
            learning_rate,
        );
    }

    fn update_biases(
        &mut self,
        slot: usize,
        biases: &mut [f64],
        gradients: &[f64],
        learning_rate: f64,
    ) {
        assert_same_len(biases, gradients);
        self.t += 1;

        let m = self.m_biases.get_or_init(slot, biases.len());
        let v = self.v_biases.get_or_init(slot, biases.len());
        adam_step(
            self.beta1,
            self.beta2,
            self.epsilon,
            self.t,
            m,
            v,
            biases,
            gradients,
            learning_rate,
        );
    }

    /// Clears all moment estimates and resets the time step counter.
    fn reset(&mut self) {
        self.m_weights.clear();
        self.v_weights.clear();
        self.m_biases.clear();
        self.v_biases.clear();
        self.t = 0;
    }

    fn name(&self) -> &'static str {
        "Adam"
    }
}
