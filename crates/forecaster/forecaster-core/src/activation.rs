//! Gate activations and their derivatives expressed through outputs

/// Logistic sigmoid
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Derivative of the sigmoid given its output `y = sigmoid(x)`
#[inline]
pub fn sigmoid_grad(y: f64) -> f64 {
    y * (1.0 - y)
}

/// Derivative of tanh given its output `y = tanh(x)`
#[inline]
pub fn tanh_grad(y: f64) -> f64 {
    1.0 - y * y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid_midpoint_and_saturation() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(-1000.0) >= 0.0);
        assert!(sigmoid(1000.0) <= 1.0);
        assert!(sigmoid(-1000.0).is_finite());
    }

    #[test]
    fn test_sigmoid_grad_matches_finite_difference() {
        let x = 0.3;
        let eps = 1e-6;
        let numeric = (sigmoid(x + eps) - sigmoid(x - eps)) / (2.0 * eps);
        assert!((sigmoid_grad(sigmoid(x)) - numeric).abs() < 1e-8);
    }

    #[test]
    fn test_tanh_grad_matches_finite_difference() {
        let x = -0.7_f64;
        let eps = 1e-6;
        let numeric = ((x + eps).tanh() - (x - eps).tanh()) / (2.0 * eps);
        assert!((tanh_grad(x.tanh()) - numeric).abs() < 1e-8);
    }
}
