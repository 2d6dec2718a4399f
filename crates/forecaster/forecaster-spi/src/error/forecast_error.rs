//! Forecast error types

use thiserror::Error;

/// Result type alias for forecasting operations
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while building, fitting or running a forecaster
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Fewer observations than the model window
    #[error("Need at least {required} values, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Observation data that cannot be used
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Buffer length does not match the layer it is fed to
    #[error("Shape mismatch: expected {expected} elements, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Numerical computation error (NaN or overflow)
    #[error("Numerical error: {0}")]
    NumericalError(String),
}

impl ForecastError {
    /// Whether the caller supplied too little input.
    ///
    /// Every other variant is a processing failure on our side of the
    /// boundary.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}
