//! Long Short-Term Memory layer
//!
//! Single-layer LSTM returning the final hidden state, with full
//! backpropagation through time over the whole input sequence.
//!
//! For each time step:
//! - i_t = sigmoid(x_t W_i + h_{t-1} U_i + b_i)  (input gate)
//! - f_t = sigmoid(x_t W_f + h_{t-1} U_f + b_f)  (forget gate)
//! - g_t = tanh(x_t W_g + h_{t-1} U_g + b_g)     (candidate cell)
//! - o_t = sigmoid(x_t W_o + h_{t-1} U_o + b_o)  (output gate)
//! - c_t = f_t * c_{t-1} + i_t * g_t
//! - h_t = o_t * tanh(c_t)
//!
//! Gate blocks are packed `[i | f | g | o]` along the last axis of the
//! kernels, the same layout Keras uses.

use crate::activation::{sigmoid, sigmoid_grad, tanh_grad};
use crate::gradients::Gradients;
use crate::initializer::{glorot_uniform, orthogonal, zeros};
use forecaster_spi::{ForecastError, Result};
use rand::Rng;

/// Number of gate blocks packed into each kernel
const GATES: usize = 4;

/// LSTM layer over a sequence of `input_dim`-wide steps
#[derive(Debug, Clone)]
pub struct LstmLayer {
    input_dim: usize,
    hidden_dim: usize,
    /// `[input_dim, 4 * hidden_dim]`
    kernel: Vec<f64>,
    /// `[hidden_dim, 4 * hidden_dim]`
    recurrent_kernel: Vec<f64>,
    /// `[4 * hidden_dim]`
    bias: Vec<f64>,
}

/// Activations of one time step, kept for the backward pass
#[derive(Debug, Clone)]
struct StepCache {
    input: Vec<f64>,
    h_prev: Vec<f64>,
    c_prev: Vec<f64>,
    input_gate: Vec<f64>,
    forget_gate: Vec<f64>,
    candidate: Vec<f64>,
    output_gate: Vec<f64>,
    cell: Vec<f64>,
    cell_tanh: Vec<f64>,
    hidden: Vec<f64>,
}

/// Forward-pass record needed by [`LstmLayer::backward`]
#[derive(Debug, Clone, Default)]
pub struct LstmCache {
    steps: Vec<StepCache>,
}

impl LstmCache {
    /// Number of time steps processed
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl LstmLayer {
    /// Creates a freshly initialized layer
    ///
    /// Input kernel is Glorot-uniform, recurrent kernel orthogonal, bias zero
    /// except the forget-gate block which starts at one.
    pub fn new<R: Rng + ?Sized>(input_dim: usize, hidden_dim: usize, rng: &mut R) -> Result<Self> {
        if input_dim == 0 {
            return Err(ForecastError::InvalidParameter {
                name: "input_dim".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if hidden_dim == 0 {
            return Err(ForecastError::InvalidParameter {
                name: "hidden_dim".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let width = GATES * hidden_dim;
        let mut bias = zeros(width);
        bias[hidden_dim..2 * hidden_dim].fill(1.0);

        Ok(Self {
            input_dim,
            hidden_dim,
            kernel: glorot_uniform(input_dim, width, rng),
            recurrent_kernel: orthogonal(hidden_dim, width, rng),
            bias,
        })
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    pub fn hidden_dim(&self) -> usize {
        self.hidden_dim
    }

    /// Runs the sequence and returns the final hidden state with its cache
    ///
    /// `sequence` holds `steps * input_dim` values, oldest step first.
    pub fn forward(&self, sequence: &[f64]) -> Result<(Vec<f64>, LstmCache)> {
        if sequence.is_empty() || sequence.len() % self.input_dim != 0 {
            return Err(ForecastError::ShapeMismatch {
                expected: (sequence.len() / self.input_dim).max(1) * self.input_dim,
                actual: sequence.len(),
            });
        }

        let mut h = zeros(self.hidden_dim);
        let mut c = zeros(self.hidden_dim);
        let mut steps = Vec::with_capacity(sequence.len() / self.input_dim);

        for x in sequence.chunks(self.input_dim) {
            let step = self.step(x, &h, &c);
            h.copy_from_slice(&step.hidden);
            c.copy_from_slice(&step.cell);
            steps.push(step);
        }

        Ok((h, LstmCache { steps }))
    }

    fn step(&self, x: &[f64], h_prev: &[f64], c_prev: &[f64]) -> StepCache {
        let hd = self.hidden_dim;
        let width = GATES * hd;

        let mut z = self.bias.clone();
        for (k, &xk) in x.iter().enumerate() {
            let row = &self.kernel[k * width..(k + 1) * width];
            z.iter_mut().zip(row).for_each(|(zj, w)| *zj += xk * w);
        }
        for (k, &hk) in h_prev.iter().enumerate() {
            let row = &self.recurrent_kernel[k * width..(k + 1) * width];
            z.iter_mut().zip(row).for_each(|(zj, u)| *zj += hk * u);
        }

        let input_gate: Vec<f64> = z[..hd].iter().map(|&v| sigmoid(v)).collect();
        let forget_gate: Vec<f64> = z[hd..2 * hd].iter().map(|&v| sigmoid(v)).collect();
        let candidate: Vec<f64> = z[2 * hd..3 * hd].iter().map(|v| v.tanh()).collect();
        let output_gate: Vec<f64> = z[3 * hd..].iter().map(|&v| sigmoid(v)).collect();

        let cell: Vec<f64> = (0..hd)
            .map(|j| forget_gate[j] * c_prev[j] + input_gate[j] * candidate[j])
            .collect();
        let cell_tanh: Vec<f64> = cell.iter().map(|c| c.tanh()).collect();
        let hidden: Vec<f64> = (0..hd).map(|j| output_gate[j] * cell_tanh[j]).collect();

        StepCache {
            input: x.to_vec(),
            h_prev: h_prev.to_vec(),
            c_prev: c_prev.to_vec(),
            input_gate,
            forget_gate,
            candidate,
            output_gate,
            cell,
            cell_tanh,
            hidden,
        }
    }

    /// Backpropagates `d_hidden` (gradient w.r.t. the final hidden state)
    /// through every cached step
    ///
    /// Returns gradients in parameter order: kernel, recurrent kernel, bias.
    pub fn backward(&self, cache: &LstmCache, d_hidden: &[f64]) -> Result<Gradients> {
        let hd = self.hidden_dim;
        if d_hidden.len() != hd {
            return Err(ForecastError::ShapeMismatch {
                expected: hd,
                actual: d_hidden.len(),
            });
        }

        let width = GATES * hd;
        let mut d_kernel = zeros(self.kernel.len());
        let mut d_recurrent = zeros(self.recurrent_kernel.len());
        let mut d_bias = zeros(width);

        let mut dh_next = d_hidden.to_vec();
        let mut dc_next = zeros(hd);
        let mut dz = zeros(width);

        for s in cache.steps.iter().rev() {
            for j in 0..hd {
                let dh = dh_next[j];
                let d_out = dh * s.cell_tanh[j];
                let dc = dc_next[j] + dh * s.output_gate[j] * tanh_grad(s.cell_tanh[j]);

                dz[j] = dc * s.candidate[j] * sigmoid_grad(s.input_gate[j]);
                dz[hd + j] = dc * s.c_prev[j] * sigmoid_grad(s.forget_gate[j]);
                dz[2 * hd + j] = dc * s.input_gate[j] * tanh_grad(s.candidate[j]);
                dz[3 * hd + j] = d_out * sigmoid_grad(s.output_gate[j]);

                dc_next[j] = dc * s.forget_gate[j];
            }

            for (k, &xk) in s.input.iter().enumerate() {
                let row = &mut d_kernel[k * width..(k + 1) * width];
                row.iter_mut().zip(&dz).for_each(|(g, d)| *g += xk * d);
            }
            for (k, &hk) in s.h_prev.iter().enumerate() {
                let row = &mut d_recurrent[k * width..(k + 1) * width];
                row.iter_mut().zip(&dz).for_each(|(g, d)| *g += hk * d);
            }
            d_bias.iter_mut().zip(&dz).for_each(|(g, d)| *g += d);

            for (k, dh) in dh_next.iter_mut().enumerate() {
                let row = &self.recurrent_kernel[k * width..(k + 1) * width];
                *dh = row.iter().zip(&dz).map(|(u, d)| u * d).sum();
            }
        }

        Ok(Gradients::new(vec![d_kernel, d_recurrent, d_bias]))
    }

    /// Lengths of the parameter tensors, in parameter order
    pub fn parameter_shapes(&self) -> Vec<usize> {
        vec![
            self.kernel.len(),
            self.recurrent_kernel.len(),
            self.bias.len(),
        ]
    }

    /// Mutable views of the parameters, in the order [`backward`](Self::backward)
    /// reports gradients
    pub fn parameters_mut(&mut self) -> Vec<&mut [f64]> {
        vec![
            self.kernel.as_mut_slice(),
            self.recurrent_kernel.as_mut_slice(),
            self.bias.as_mut_slice(),
        ]
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

    fn layer(input_dim: usize, hidden_dim: usize) -> LstmLayer {
        let mut rng = StdRng::seed_from_u64(42);
        LstmLayer::new(input_dim, hidden_dim, &mut rng).unwrap()
    }

    #[test]
    fn test_parameter_shapes() {
        let lstm = layer(1, 50);
        assert_eq!(lstm.parameter_shapes(), vec![200, 50 * 200, 200]);
    }

    #[test]
    fn test_forget_bias_starts_at_one() {
        let lstm = layer(1, 4);
        assert_eq!(&lstm.bias()[..4], &[0.0; 4]);
        assert_eq!(&lstm.bias()[4..8], &[1.0; 4]);
        assert_eq!(&lstm.bias()[8..], &[0.0; 8]);
    }

    #[test]
    fn test_forward_one_step_per_input_chunk() {
        let lstm = layer(2, 3);
        let (h, cache) = lstm.forward(&[0.1, 0.2, 0.3, 0.4, 0.5, 0.6]).unwrap();
        assert_eq!(h.len(), 3);
        assert_eq!(cache.len(), 3);
        assert!(h.iter().all(|v| v.abs() < 1.0));
    }

    #[test]
    fn test_forward_rejects_ragged_sequence() {
        let lstm = layer(2, 3);
        assert!(matches!(
            lstm.forward(&[0.1, 0.2, 0.3]),
            Err(ForecastError::ShapeMismatch { .. })
        ));
        assert!(lstm.forward(&[]).is_err());
    }

    #[test]
    fn test_zero_sized_layer_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(LstmLayer::new(0, 3, &mut rng).is_err());
        assert!(LstmLayer::new(1, 0, &mut rng).is_err());
    }

    #[test]
    fn test_backward_rejects_wrong_gradient_width() {
        let lstm = layer(1, 3);
        let (_, cache) = lstm.forward(&[1.0, 2.0]).unwrap();
        assert!(lstm.backward(&cache, &[1.0, 1.0]).is_err());
    }

    #[test]
    fn test_backward_matches_finite_differences() {
        let mut lstm = layer(1, 3);
        let sequence = [0.5, -0.2, 0.9, 0.1];
        // Loss = sum(h_T), so dL/dh_T is all ones
        let loss = |l: &LstmLayer| -> f64 { l.forward(&sequence).unwrap().0.iter().sum() };

        let (_, cache) = lstm.forward(&sequence).unwrap();
        let grads = lstm.backward(&cache, &[1.0, 1.0, 1.0]).unwrap();

        let eps = 1e-6;
        for (slot, analytic) in grads.tensors().iter().enumerate() {
            for idx in 0..analytic.len() {
                lstm.parameters_mut()[slot][idx] += eps;
                let plus = loss(&lstm);
                lstm.parameters_mut()[slot][idx] -= 2.0 * eps;
                let minus = loss(&lstm);
                lstm.parameters_mut()[slot][idx] += eps;

                let numeric = (plus - minus) / (2.0 * eps);
                assert!(
                    (numeric - analytic[idx]).abs() < 1e-6,
                    "slot {} idx {}: numeric {} vs analytic {}",
                    slot,
                    idx,
                    numeric,
                    analytic[idx]
                );
            }
        }
    }
}
