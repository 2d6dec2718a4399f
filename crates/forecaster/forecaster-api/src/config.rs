//! Forecast configuration
//!
//! The service runs with fixed hyperparameters. They are collected here as
//! named constants and gathered into [`ForecastConfig::default`].

use forecaster_core::{AdamConfig, ModelConfig};
use forecaster_spi::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Trailing observations fed to the model (T)
///
/// Larger windows give the recurrent layer more context and raise the
/// minimum history a request must carry.
pub const WINDOW_SIZE: usize = 6;

/// Features per time step. Only univariate series are supported.
pub const FEATURES: usize = 1;

/// Width of the LSTM layer
pub const HIDDEN_UNITS: usize = 50;

/// Training passes over the single (window, target) example
pub const EPOCHS: usize = 10;

/// Examples per optimizer step
pub const BATCH_SIZE: usize = 1;

/// Values produced per forecast (N)
pub const HORIZON: usize = 6;

/// Adam step size
pub const LEARNING_RATE: f64 = 0.001;

/// Decimal places kept in each forecast value
pub const DECIMAL_PLACES: u32 = 2;

/// Hyperparameters of [`LstmForecaster`](crate::LstmForecaster)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    pub window_size: usize,
    pub features: usize,
    pub hidden_units: usize,
    pub epochs: usize,
    pub batch_size: usize,
    pub horizon: usize,
    pub learning_rate: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            window_size: WINDOW_SIZE,
            features: FEATURES,
            hidden_units: HIDDEN_UNITS,
            epochs: EPOCHS,
            batch_size: BATCH_SIZE,
            horizon: HORIZON,
            learning_rate: LEARNING_RATE,
        }
    }
}

impl ForecastConfig {
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_hidden_units(mut self, hidden_units: usize) -> Self {
        self.hidden_units = hidden_units;
        self
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Check every field, reporting the first invalid one
    pub fn validate(&self) -> Result<()> {
        let at_least_one = [
            ("window_size", self.window_size),
            ("hidden_units", self.hidden_units),
            ("epochs", self.epochs),
            ("batch_size", self.batch_size),
            ("horizon", self.horizon),
        ];
        for (name, value) in at_least_one {
            if value == 0 {
                return Err(ForecastError::InvalidParameter {
                    name: name.to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
        }
        if self.features != 1 {
            return Err(ForecastError::InvalidParameter {
                name: "features".to_string(),
                reason: format!("only univariate series are supported, got {}", self.features),
            });
        }
        self.adam().validate()
    }

    fn adam(&self) -> AdamConfig {
        AdamConfig::default().with_learning_rate(self.learning_rate)
    }

    /// Topology handed to the numeric core
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            input_dim: self.features,
            hidden_units: self.hidden_units,
            optimizer: self.adam(),
        }
    }
}
