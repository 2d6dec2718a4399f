//! Weight initializers
//!
//! Matrices are returned flattened in row-major order. The defaults mirror
//! what a Keras `LSTM` + `Dense` stack starts from: Glorot-uniform input
//! kernels, an orthogonal recurrent kernel and zero biases.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Glorot (Xavier) uniform initialization for a `[fan_in, fan_out]` matrix
///
/// Samples from `U(-limit, limit)` with `limit = sqrt(6 / (fan_in + fan_out))`.
pub fn glorot_uniform<R: Rng + ?Sized>(fan_in: usize, fan_out: usize, rng: &mut R) -> Vec<f64> {
    let len = fan_in * fan_out;
    if len == 0 {
        return Vec::new();
    }
    let limit = (6.0 / (fan_in + fan_out) as f64).sqrt();
    (0..len).map(|_| rng.gen_range(-limit..limit)).collect()
}

/// Orthogonal initialization for a `[rows, cols]` matrix
///
/// When `rows <= cols` the rows are orthonormal, otherwise the columns are.
/// Vectors are drawn from a standard normal and orthonormalized with
/// Gram-Schmidt.
pub fn orthogonal<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Vec<f64> {
    if rows == 0 || cols == 0 {
        return Vec::new();
    }
    let count = rows.min(cols);
    let dim = rows.max(cols);
    let basis = orthonormal_vectors(count, dim, rng);

    let mut out = vec![0.0; rows * cols];
    for r in 0..rows {
        for c in 0..cols {
            out[r * cols + c] = if rows <= cols { basis[r][c] } else { basis[c][r] };
        }
    }
    out
}

/// Zero-filled buffer
pub fn zeros(len: usize) -> Vec<f64> {
    vec![0.0; len]
}

fn orthonormal_vectors<R: Rng + ?Sized>(count: usize, dim: usize, rng: &mut R) -> Vec<Vec<f64>> {
    let mut basis: Vec<Vec<f64>> = Vec::with_capacity(count);
    while basis.len() < count {
        let mut v: Vec<f64> = (0..dim)
            .map(|_| -> f64 { StandardNormal.sample(&mut *rng) })
            .collect();
        for u in &basis {
            let proj: f64 = v.iter().zip(u).map(|(a, b)| a * b).sum();
            for (vi, ui) in v.iter_mut().zip(u) {
                *vi -= proj * ui;
            }
        }
        let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
        // Resample the (vanishingly rare) draw that lies in the current span
        if norm > 1e-10 {
            v.iter_mut().for_each(|x| *x /= norm);
            basis.push(v);
        }
    }
    basis
}
