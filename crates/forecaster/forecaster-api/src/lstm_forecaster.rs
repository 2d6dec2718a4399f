//! Per-call LSTM forecaster
//!
//! Every call to [`LstmForecaster::forecast`] builds a brand new
//! [`SequenceModel`], fits it on the most recent window of the history and
//! then predicts `horizon` values one step at a time, feeding each
//! prediction back into the window. Nothing survives the call.
//!
//! ## Training signal
//!
//! The model is fitted on a single example whose target is the newest value
//! of the input window itself, not the value that follows it. The model is
//! therefore taught to echo an observation it has already seen; see
//! [`training_target`].

use crate::config::ForecastConfig;
use crate::rounding::round2;
use crate::window::SlidingWindow;
use forecaster_core::SequenceModel;
use forecaster_spi::{ForecastError, Forecaster, Result};
use rand::Rng;
use tracing::debug;

/// Window-in, horizon-out forecaster backed by a freshly trained LSTM
///
/// @algorithm LSTM
/// @category MachineLearning
/// @complexity O(e*t*h^2) fit, O(n*t*h^2) predict
/// @thread_safe true
/// @since 0.1.0
///
/// # Example
///
/// ```rust
/// use forecaster_api::{Forecaster, LstmForecaster};
///
/// let forecaster = LstmForecaster::default();
/// let forecast = forecaster.forecast(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// assert_eq!(forecast.len(), 6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LstmForecaster {
    config: ForecastConfig,
}

impl LstmForecaster {
    /// Creates a forecaster, rejecting invalid hyperparameters up front
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Same as [`Forecaster::forecast`] with caller-supplied randomness
    ///
    /// A seeded generator makes the result reproducible.
    pub fn forecast_with_rng<R: Rng + ?Sized>(&self, history: &[f64], rng: &mut R) -> Result<Vec<f64>> {
        self.ensure_sufficient(history.len())?;

        let mut window = SlidingWindow::from_tail(history, self.config.window_size)?;
        if let Some((index, value)) = window.find_non_finite() {
            return Err(ForecastError::InvalidData(format!(
                "window value at position {} is not finite: {}",
                index, value
            )));
        }
        let target = training_target(&window)?;

        let mut model = SequenceModel::new(&self.config.model_config(), rng)?;
        let report = model.fit(
            &[window.as_slice().to_vec()],
            &[target],
            self.config.epochs,
            self.config.batch_size,
        )?;
        debug!(
            epochs = report.epochs,
            final_loss = ?report.final_loss(),
            "fitted forecasting model"
        );

        let mut forecast = Vec::with_capacity(self.config.horizon);
        for step in 0..self.config.horizon {
            let next = model.predict(window.as_slice())?;
            if !next.is_finite() {
                return Err(ForecastError::NumericalError(format!(
                    "prediction at step {} is not finite",
                    step + 1
                )));
            }
            forecast.push(round2(next));
            // The unrounded value is what the next step sees
            window.push(next);
        }

        Ok(forecast)
    }
}

impl Forecaster for LstmForecaster {
    fn forecast(&self, history: &[f64]) -> Result<Vec<f64>> {
        self.forecast_with_rng(history, &mut rand::thread_rng())
    }

    fn window_size(&self) -> usize {
        self.config.window_size
    }

    fn horizon(&self) -> usize {
        self.config.horizon
    }
}

/// Target the model is fitted on: the newest value of the input window
///
/// This asks the model to reproduce a value it was just given rather than
/// the next one, which makes for a weak training signal. Clients depend on
/// the forecasts this produces, so changing it changes the API.
pub fn training_target(window: &SlidingWindow) -> Result<f64> {
    window
        .latest()
        .ok_or_else(|| ForecastError::InvalidData("empty window".to_string()))
}
