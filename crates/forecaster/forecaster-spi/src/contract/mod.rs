//! Contracts implemented by forecasting models

mod forecaster;

pub use forecaster::Forecaster;
