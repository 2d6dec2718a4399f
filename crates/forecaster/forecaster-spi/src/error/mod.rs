//! Error types for forecasting operations
//!
//! This module provides the [`ForecastError`] enum and [`Result`] type alias
//! used across all forecaster crates.

mod forecast_error;

pub use forecast_error::{ForecastError, Result};
