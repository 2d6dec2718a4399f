//! Adam optimizer.
//!
//! Adam (Adaptive Moment Estimation) keeps exponential moving averages of
//! the gradients (first moment) and squared gradients (second moment) for
//! every parameter tensor it updates.
//!
//! ```text
//! m = beta1 * m + (1 - beta1) * g
//! v = beta2 * v + (1 - beta2) * g^2
//! m_hat = m / (1 - beta1^t)
//! v_hat = v / (1 - beta2^t)
//! p = p - learning_rate * m_hat / (sqrt(v_hat) + epsilon)
//! ```

use crate::gradients::Gradients;
use forecaster_spi::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Adam hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdamConfig {
    pub learning_rate: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub epsilon: f64,
}

impl Default for AdamConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.001,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-7,
        }
    }
}

impl AdamConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ForecastError::InvalidParameter {
                name: "learning_rate".to_string(),
                reason: format!("must be a positive finite number, got {}", self.learning_rate),
            });
        }
        for (name, beta) in [("beta1", self.beta1), ("beta2", self.beta2)] {
            if !(0.0..1.0).contains(&beta) {
                return Err(ForecastError::InvalidParameter {
                    name: name.to_string(),
                    reason: format!("must be in [0, 1), got {}", beta),
                });
            }
        }
        if self.epsilon.is_nan() || self.epsilon <= 0.0 {
            return Err(ForecastError::InvalidParameter {
                name: "epsilon".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Adam optimizer over a fixed list of parameter tensors
#[derive(Debug, Clone)]
pub struct Adam {
    config: AdamConfig,
    first_moments: Vec<Vec<f64>>,
    second_moments: Vec<Vec<f64>>,
    /// Number of updates applied, used for bias correction
    timestep: u64,
}

impl Adam {
    pub fn new(config: AdamConfig) -> Self {
        Self {
            config,
            first_moments: Vec::new(),
            second_moments: Vec::new(),
            timestep: 0,
        }
    }

    pub fn config(&self) -> &AdamConfig {
        &self.config
    }

    pub fn timestep(&self) -> u64 {
        self.timestep
    }

    /// Applies one update step to every parameter tensor
    ///
    /// `params` and `grads` must list the same tensors in the same order on
    /// every call; moment buffers are allocated on the first call.
    pub fn apply_gradients(&mut self, mut params: Vec<&mut [f64]>, grads: &Gradients) -> Result<()> {
        if params.len() != grads.len() {
            return Err(ForecastError::ShapeMismatch {
                expected: params.len(),
                actual: grads.len(),
            });
        }
        for (p, g) in params.iter().zip(grads.tensors()) {
            if p.len() != g.len() {
                return Err(ForecastError::ShapeMismatch {
                    expected: p.len(),
                    actual: g.len(),
                });
            }
        }

        if self.first_moments.len() != params.len() {
            self.first_moments = params.iter().map(|p| vec![0.0; p.len()]).collect();
            self.second_moments = self.first_moments.clone();
        }

        self.timestep += 1;
        let AdamConfig {
            learning_rate,
            beta1,
            beta2,
            epsilon,
        } = self.config;
        let bias_correction1 = 1.0 - beta1.powi(self.timestep as i32);
        let bias_correction2 = 1.0 - beta2.powi(self.timestep as i32);

        for (slot, (param, grad)) in params.iter_mut().zip(grads.tensors()).enumerate() {
            let m = &mut self.first_moments[slot];
            let v = &mut self.second_moments[slot];
            for i in 0..param.len() {
                let g = grad[i];
                m[i] = beta1 * m[i] + (1.0 - beta1) * g;
                v[i] = beta2 * v[i] + (1.0 - beta2) * g * g;

                let m_hat = m[i] / bias_correction1;
                let v_hat = v[i] / bias_correction2;
                param[i] -= learning_rate * m_hat / (v_hat.sqrt() + epsilon);
            }
        }

        Ok(())
    }
}
