//! Fixed-length observation window with sliding-window feedback

use forecaster_spi::{ForecastError, Result};

/// The most recent observations in chronological order (oldest first)
///
/// The length is fixed at construction; [`push`](Self::push) drops the oldest
/// value to make room for the newest.
#[derive(Debug, Clone, PartialEq)]
pub struct SlidingWindow {
    values: Vec<f64>,
}

impl SlidingWindow {
    /// Takes the last `len` values of `history`
    pub fn from_tail(history: &[f64], len: usize) -> Result<Self> {
        if len == 0 {
            return Err(ForecastError::InvalidParameter {
                name: "window_size".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if history.len() < len {
            return Err(ForecastError::InsufficientData {
                required: len,
                actual: history.len(),
            });
        }
        Ok(Self {
            values: history[history.len() - len..].to_vec(),
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Most recent value
    pub fn latest(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Drops the oldest value and appends `value` as the newest
    pub fn push(&mut self, value: f64) {
        self.values.rotate_left(1);
        if let Some(last) = self.values.last_mut() {
            *last = value;
        }
    }

    /// First non-finite value and its position, if any
    pub fn find_non_finite(&self) -> Option<(usize, f64)> {
        self.values
            .iter()
            .copied()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
    }
}
