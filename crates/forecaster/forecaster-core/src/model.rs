//! Sequence regression model: one LSTM layer feeding a single linear unit
//!
//! A `SequenceModel` owns its weights and optimizer state outright. There is
//! no global session or graph; constructing a model is the only way to get
//! one, and dropping it releases everything.

use crate::dense::DenseLayer;
use crate::gradients::Gradients;
use crate::loss::{mse, mse_grad};
use crate::lstm::LstmLayer;
use crate::optimizer::{Adam, AdamConfig};
use forecaster_spi::{ForecastError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Topology and optimizer settings for [`SequenceModel`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Features per time step
    pub input_dim: usize,
    /// Width of the recurrent layer
    pub hidden_units: usize,
    pub optimizer: AdamConfig,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            input_dim: 1,
            hidden_units: 50,
            optimizer: AdamConfig::default(),
        }
    }
}

/// Loss history of a [`SequenceModel::fit`] run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    pub epochs: usize,
    /// Mean training loss of each epoch, measured before that epoch's updates
    pub losses: Vec<f64>,
}

impl FitReport {
    pub fn final_loss(&self) -> Option<f64> {
        self.losses.last().copied()
    }
}

/// LSTM -> Dense(1) regressor trained with mean squared error and Adam
#[derive(Debug, Clone)]
pub struct SequenceModel {
    lstm: LstmLayer,
    dense: DenseLayer,
    optimizer: Adam,
}

impl SequenceModel {
    /// Builds a freshly initialized model
    pub fn new<R: Rng + ?Sized>(config: &ModelConfig, rng: &mut R) -> Result<Self> {
        config.optimizer.validate()?;
        let lstm = LstmLayer::new(config.input_dim, config.hidden_units, rng)?;
        let dense = DenseLayer::new(config.hidden_units, 1, rng)?;

        Ok(Self {
            lstm,
            dense,
            optimizer: Adam::new(config.optimizer),
        })
    }

    pub fn input_dim(&self) -> usize {
        self.lstm.input_dim()
    }

    pub fn hidden_units(&self) -> usize {
        self.lstm.hidden_dim()
    }

    /// Total number of trainable scalars
    pub fn parameter_count(&self) -> usize {
        self.lstm
            .parameter_shapes()
            .into_iter()
            .chain(self.dense.parameter_shapes())
            .sum()
    }

    /// Number of optimizer updates applied so far
    pub fn updates(&self) -> u64 {
        self.optimizer.timestep()
    }

    /// Predicts one scalar from a window of `steps * input_dim` values
    pub fn predict(&self, window: &[f64]) -> Result<f64> {
        let (hidden, _) = self.lstm.forward(window)?;
        self.head(&hidden)
    }

    /// Squared error of the prediction for `window` against `target`
    pub fn evaluate(&self, window: &[f64], target: f64) -> Result<f64> {
        let prediction = self.predict(window)?;
        Ok(mse(&[prediction], &[target]))
    }

    fn head(&self, hidden: &[f64]) -> Result<f64> {
        let output = self.dense.forward(hidden)?;
        output.first().copied().ok_or(ForecastError::ShapeMismatch {
            expected: 1,
            actual: 0,
        })
    }

    /// Loss and parameter gradients for a single example
    fn loss_and_gradients(&self, window: &[f64], target: f64) -> Result<(f64, Gradients)> {
        let (hidden, cache) = self.lstm.forward(window)?;
        let prediction = self.head(&hidden)?;

        let loss = mse(&[prediction], &[target]);
        let d_output = mse_grad(&[prediction], &[target]);

        let (dense_grads, d_hidden) = self.dense.backward(&hidden, &d_output)?;
        let mut grads = self.lstm.backward(&cache, &d_hidden)?;
        grads.extend(dense_grads);
        Ok((loss, grads))
    }

    fn parameter_shapes(&self) -> Vec<usize> {
        let mut shapes = self.lstm.parameter_shapes();
        shapes.extend(self.dense.parameter_shapes());
        shapes
    }

    /// One optimizer step on a batch, gradients averaged over the batch
    ///
    /// Returns the mean batch loss measured before the update.
    pub fn train_on_batch(&mut self, windows: &[Vec<f64>], targets: &[f64]) -> Result<f64> {
        if windows.len() != targets.len() {
            return Err(ForecastError::ShapeMismatch {
                expected: windows.len(),
                actual: targets.len(),
            });
        }
        if windows.is_empty() {
            return Err(ForecastError::InvalidData("empty training batch".to_string()));
        }

        let mut total = Gradients::zeros_like(&self.parameter_shapes());
        let mut loss_sum = 0.0;
        for (window, &target) in windows.iter().zip(targets) {
            let (loss, grads) = self.loss_and_gradients(window, target)?;
            loss_sum += loss;
            total.accumulate(&grads)?;
        }

        let n = windows.len() as f64;
        let loss = loss_sum / n;
        if !loss.is_finite() {
            return Err(ForecastError::NumericalError(format!(
                "training loss is not finite: {}",
                loss
            )));
        }
        total.scale(1.0 / n);
        if !total.is_finite() {
            return Err(ForecastError::NumericalError(
                "gradients are not finite".to_string(),
            ));
        }

        let Self {
            lstm,
            dense,
            optimizer,
        } = self;
        let mut params = lstm.parameters_mut();
        params.extend(dense.parameters_mut());
        optimizer.apply_gradients(params, &total)?;

        Ok(loss)
    }

    /// Trains for exactly `epochs` passes over the examples
    ///
    /// Examples are visited in order, `batch_size` at a time. There is no
    /// early stopping.
    pub fn fit(
        &mut self,
        windows: &[Vec<f64>],
        targets: &[f64],
        epochs: usize,
        batch_size: usize,
    ) -> Result<FitReport> {
        if batch_size == 0 {
            return Err(ForecastError::InvalidParameter {
                name: "batch_size".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if windows.len() != targets.len() {
            return Err(ForecastError::ShapeMismatch {
                expected: windows.len(),
                actual: targets.len(),
            });
        }
        if windows.is_empty() {
            return Err(ForecastError::InvalidData("no training examples".to_string()));
        }

        let mut losses = Vec::with_capacity(epochs);
        for epoch in 0..epochs {
            let mut epoch_loss = 0.0;
            let mut batches = 0usize;
            for (batch, batch_targets) in windows.chunks(batch_size).zip(targets.chunks(batch_size)) {
                epoch_loss += self.train_on_batch(batch, batch_targets)?;
                batches += 1;
            }
            let loss = epoch_loss / batches as f64;
            trace!(epoch = epoch + 1, loss, "epoch finished");
            losses.push(loss);
        }

        Ok(FitReport { epochs, losses })
    }
}
