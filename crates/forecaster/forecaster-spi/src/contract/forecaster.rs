//! Forecaster trait definition

use crate::error::{ForecastError, Result};

/// Common trait for window-based forecasters
///
/// A forecaster looks at the most recent `window_size()` observations of a
/// scalar series and produces `horizon()` future values, oldest first.
pub trait Forecaster {
    /// Forecast the values following `history` (oldest observation first)
    fn forecast(&self, history: &[f64]) -> Result<Vec<f64>>;

    /// Number of trailing observations the model consumes
    fn window_size(&self) -> usize;

    /// Number of values produced per forecast
    fn horizon(&self) -> usize;

    /// Fail with [`ForecastError::InsufficientData`] when `actual` is shorter
    /// than the window.
    ///
    /// Callers holding raw, not yet converted input can use this to reject a
    /// short payload before touching its contents.
    fn ensure_sufficient(&self, actual: usize) -> Result<()> {
        let required = self.window_size();
        if actual < required {
            return Err(ForecastError::InsufficientData { required, actual });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Repeat {
        window: usize,
        horizon: usize,
    }

    impl Forecaster for Repeat {
        fn forecast(&self, history: &[f64]) -> Result<Vec<f64>> {
            self.ensure_sufficient(history.len())?;
            let last = history[history.len() - 1];
            Ok(vec![last; self.horizon])
        }

        fn window_size(&self) -> usize {
            self.window
        }

        fn horizon(&self) -> usize {
            self.horizon
        }
    }

    #[test]
    fn test_ensure_sufficient_accepts_exact_window() {
        let model = Repeat { window: 3, horizon: 2 };
        assert!(model.ensure_sufficient(3).is_ok());
        assert!(model.ensure_sufficient(10).is_ok());
    }

    #[test]
    fn test_ensure_sufficient_reports_required_and_actual() {
        let model = Repeat { window: 6, horizon: 6 };
        let err = model.ensure_sufficient(2).unwrap_err();
        assert_eq!(
            err,
            ForecastError::InsufficientData {
                required: 6,
                actual: 2
            }
        );
    }

    #[test]
    fn test_trait_object_forecast() {
        let model: Box<dyn Forecaster> = Box::new(Repeat { window: 2, horizon: 3 });
        let forecast = model.forecast(&[1.0, 2.0]).unwrap();
        assert_eq!(forecast, vec![2.0, 2.0, 2.0]);
        assert!(model.forecast(&[1.0]).is_err());
    }
}
