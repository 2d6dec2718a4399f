//! Gradient buffers aligned with a model's parameter list

use forecaster_spi::{ForecastError, Result};

/// One gradient buffer per parameter tensor, in parameter order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Gradients {
    tensors: Vec<Vec<f64>>,
}

impl Gradients {
    pub fn new(tensors: Vec<Vec<f64>>) -> Self {
        Self { tensors }
    }

    /// Zero gradients shaped like the given parameter lengths
    pub fn zeros_like(lengths: &[usize]) -> Self {
        Self {
            tensors: lengths.iter().map(|&len| vec![0.0; len]).collect(),
        }
    }

    /// Number of parameter tensors covered
    pub fn len(&self) -> usize {
        self.tensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tensors.is_empty()
    }

    pub fn tensors(&self) -> &[Vec<f64>] {
        &self.tensors
    }

    /// Append another layer's gradients after this one's
    pub fn extend(&mut self, other: Gradients) {
        self.tensors.extend(other.tensors);
    }

    /// Element-wise `self += other`
    pub fn accumulate(&mut self, other: &Gradients) -> Result<()> {
        if self.tensors.len() != other.tensors.len() {
            return Err(ForecastError::ShapeMismatch {
                expected: self.tensors.len(),
                actual: other.tensors.len(),
            });
        }
        for (dst, src) in self.tensors.iter_mut().zip(&other.tensors) {
            if dst.len() != src.len() {
                return Err(ForecastError::ShapeMismatch {
                    expected: dst.len(),
                    actual: src.len(),
                });
            }
            dst.iter_mut().zip(src).for_each(|(d, s)| *d += s);
        }
        Ok(())
    }

    /// Multiply every element by `factor`
    pub fn scale(&mut self, factor: f64) {
        self.tensors
            .iter_mut()
            .flatten()
            .for_each(|g| *g *= factor);
    }

    /// True when no element is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.tensors.iter().flatten().all(|g| g.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulate_and_scale() {
        let mut total = Gradients::zeros_like(&[2, 1]);
        total
            .accumulate(&Gradients::new(vec![vec![1.0, 2.0], vec![3.0]]))
            .unwrap();
        total
            .accumulate(&Gradients::new(vec![vec![1.0, 0.0], vec![1.0]]))
            .unwrap();
        total.scale(0.5);

        assert_eq!(total.tensors(), &[vec![1.0, 1.0], vec![2.0]]);
    }

    #[test]
    fn test_accumulate_rejects_mismatched_layout() {
        let mut total = Gradients::zeros_like(&[2]);
        let err = total
            .accumulate(&Gradients::new(vec![vec![1.0, 2.0, 3.0]]))
            .unwrap_err();
        assert_eq!(
            err,
            ForecastError::ShapeMismatch {
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_extend_keeps_order() {
        let mut grads = Gradients::new(vec![vec![1.0]]);
        grads.extend(Gradients::new(vec![vec![2.0], vec![3.0]]));
        assert_eq!(grads.len(), 3);
        assert_eq!(grads.tensors()[2], vec![3.0]);
    }

    #[test]
    fn test_is_finite() {
        assert!(Gradients::new(vec![vec![1.0]]).is_finite());
        assert!(!Gradients::new(vec![vec![f64::NAN]]).is_finite());
    }
}
