//! Forecaster Facade
//!
//! High-level API for per-request LSTM forecasting. Re-exports all public
//! types from the forecaster stack for convenient usage.

// Re-export everything from API (which includes SPI and core)
pub use forecaster_api::*;

// Explicit re-exports for documentation
pub use forecaster_api::prelude;

// Re-export core modules for direct access
pub use forecaster_core::{dense, initializer, loss, lstm, model, optimizer};
