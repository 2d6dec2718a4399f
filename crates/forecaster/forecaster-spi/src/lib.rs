//! Forecaster Service Provider Interface
//!
//! Defines the contract every forecaster implements and the error type
//! shared by the numeric core, the forecasting procedure and the HTTP layer:
//!
//! - [`Forecaster`]: turns a history of scalar observations into a forecast
//! - [`ForecastError`]: standardized error type for all forecasting operations
//! - [`Result`]: convenient result type alias

pub mod contract;
pub mod error;

// Re-export all public items at crate root for convenience
pub use contract::Forecaster;
pub use error::{ForecastError, Result};
