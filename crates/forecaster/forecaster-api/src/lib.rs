//! Per-request recurrent forecasting
//!
//! This crate provides the forecasting procedure served by the HTTP layer:
//!
//! - [`config`]: named hyperparameter constants and [`ForecastConfig`]
//! - [`lstm_forecaster`]: train-once, predict-N-steps-with-feedback
//! - [`window`]: fixed-length sliding observation window
//! - [`rounding`]: output rounding

pub mod config;
pub mod lstm_forecaster;
pub mod rounding;
pub mod window;

// Re-export from core
pub use forecaster_core::{FitReport, ModelConfig, SequenceModel};

// Re-export traits and errors from SPI
pub use forecaster_spi::{ForecastError, Forecaster, Result};

// Re-export implementations for convenience
pub use config::ForecastConfig;
pub use lstm_forecaster::{training_target, LstmForecaster};
pub use rounding::{round2, round_to};
pub use window::SlidingWindow;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::Forecaster;
    pub use crate::{ForecastConfig, LstmForecaster, SlidingWindow};
    // Error types
    pub use crate::{ForecastError, Result};
}
