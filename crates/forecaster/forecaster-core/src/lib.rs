//! Forecaster Core
//!
//! Numeric building blocks for per-request recurrent forecasting:
//!
//! - [`initializer`]: Glorot-uniform and orthogonal weight initialization
//! - [`lstm`]: single LSTM layer with backpropagation through time
//! - [`dense`]: linear regression head
//! - [`optimizer`]: Adam
//! - [`model`]: the LSTM -> Dense(1) [`SequenceModel`] and its training loop
//!
//! Everything works on `f64` slices in row-major order.

pub mod activation;
pub mod dense;
pub mod gradients;
pub mod initializer;
pub mod loss;
pub mod lstm;
pub mod model;
pub mod optimizer;

// Re-export SPI types for implementations
pub use forecaster_spi::{ForecastError, Forecaster, Result};

// Re-export main types
pub use dense::DenseLayer;
pub use gradients::Gradients;
pub use lstm::{LstmCache, LstmLayer};
pub use model::{FitReport, ModelConfig, SequenceModel};
pub use optimizer::{Adam, AdamConfig};
