//! Mean squared error

/// Mean squared error between `predictions` and `targets`
///
/// Returns NaN for empty or mismatched inputs.
pub fn mse(predictions: &[f64], targets: &[f64]) -> f64 {
    if predictions.len() != targets.len() || predictions.is_empty() {
        return f64::NAN;
    }
    let sum: f64 = predictions
        .iter()
        .zip(targets)
        .map(|(p, t)| (p - t).powi(2))
        .sum();
    sum / predictions.len() as f64
}

/// Gradient of [`mse`] with respect to each prediction
pub fn mse_grad(predictions: &[f64], targets: &[f64]) -> Vec<f64> {
    let n = predictions.len().max(1) as f64;
    predictions
        .iter()
        .zip(targets)
        .map(|(p, t)| 2.0 * (p - t) / n)
        .collect()
}
