//! Fully connected linear layer
//!
//! Computes `y = x W + b` with no activation, used as the regression head
//! on top of the recurrent layer.

use crate::gradients::Gradients;
use crate::initializer::{glorot_uniform, zeros};
use forecaster_spi::{ForecastError, Result};
use rand::Rng;

/// Linear layer with weights `[in_features, out_features]`
#[derive(Debug, Clone)]
pub struct DenseLayer {
    in_features: usize,
    out_features: usize,
    weights: Vec<f64>,
    bias: Vec<f64>,
}

impl DenseLayer {
    /// Creates a layer with Glorot-uniform weights and zero bias
    pub fn new<R: Rng + ?Sized>(in_features: usize, out_features: usize, rng: &mut R) -> Result<Self> {
        if in_features == 0 || out_features == 0 {
            return Err(ForecastError::InvalidParameter {
                name: "features".to_string(),
                reason: format!(
                    "dense layer needs non-zero dimensions, got {}x{}",
                    in_features, out_features
                ),
            });
        }

        Ok(Self {
            in_features,
            out_features,
            weights: glorot_uniform(in_features, out_features, rng),
            bias: zeros(out_features),
        })
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }

    pub fn forward(&self, input: &[f64]) -> Result<Vec<f64>> {
        if input.len() != self.in_features {
            return Err(ForecastError::ShapeMismatch {
                expected: self.in_features,
                actual: input.len(),
            });
        }

        let mut out = self.bias.clone();
        for (k, &xk) in input.iter().enumerate() {
            let row = &self.weights[k * self.out_features..(k + 1) * self.out_features];
            out.iter_mut().zip(row).for_each(|(o, w)| *o += xk * w);
        }
        Ok(out)
    }

    /// Returns parameter gradients (weights, bias) and the gradient with
    /// respect to `input`
    pub fn backward(&self, input: &[f64], d_output: &[f64]) -> Result<(Gradients, Vec<f64>)> {
        if input.len() != self.in_features {
            return Err(ForecastError::ShapeMismatch {
                expected: self.in_features,
                actual: input.len(),
            });
        }
        if d_output.len() != self.out_features {
            return Err(ForecastError::ShapeMismatch {
                expected: self.out_features,
                actual: d_output.len(),
            });
        }

        let mut d_weights = zeros(self.weights.len());
        let mut d_input = zeros(self.in_features);
        for (k, &xk) in input.iter().enumerate() {
            let offset = k * self.out_features;
            for (j, &dy) in d_output.iter().enumerate() {
                d_weights[offset + j] = xk * dy;
                d_input[k] += self.weights[offset + j] * dy;
            }
        }

        Ok((
            Gradients::new(vec![d_weights, d_output.to_vec()]),
            d_input,
        ))
    }

    pub fn parameter_shapes(&self) -> Vec<usize> {
        vec![self.weights.len(), self.bias.len()]
    }

    pub fn parameters_mut(&mut self) -> Vec<&mut [f64]> {
        vec![self.weights.as_mut_slice(), self.bias.as_mut_slice()]
    }

    pub fn bias(&self) -> &[f64] {
        &self.bias
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dense(in_features: usize, out_features: usize) -> DenseLayer {
        let mut rng = StdRng::seed_from_u64(5);
        DenseLayer::new(in_features, out_features, &mut rng).unwrap()
    }

    #[test]
    fn test_dimensions() {
        let layer = dense(4, 3);
        assert_eq!(layer.in_features(), 4);
        assert_eq!(layer.out_features(), 3);
        assert_eq!(layer.parameter_shapes(), vec![12, 3]);
    }

    #[test]
    fn test_zero_input_yields_bias() {
        let layer = dense(4, 1);
        let y = layer.forward(&[0.0; 4]).unwrap();
        assert_eq!(y, vec![0.0]);
    }

    #[test]
    fn test_forward_rejects_wrong_width() {
        let layer = dense(4, 1);
        assert!(matches!(
            layer.forward(&[1.0, 2.0]),
            Err(ForecastError::ShapeMismatch {
                expected: 4,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_backward_gradients() {
        let mut layer = dense(2, 1);
        layer.parameters_mut()[0].copy_from_slice(&[0.5, -1.0]);

        let (grads, d_input) = layer.backward(&[2.0, 3.0], &[0.1]).unwrap();
        let tensors = grads.tensors();

        assert!((tensors[0][0] - 0.2).abs() < 1e-12);
        assert!((tensors[0][1] - 0.3).abs() < 1e-12);
        assert!((tensors[1][0] - 0.1).abs() < 1e-12);
        assert!((d_input[0] - 0.05).abs() < 1e-12);
        assert!((d_input[1] + 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!(DenseLayer::new(0, 1, &mut rng).is_err());
    }
}
