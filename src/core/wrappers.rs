//! Implementations of the core traits for `faer::Mat` and plain slices.
//!
//! These let the update rules treat the stored matrix and the iterate
//! vectors through the same small vocabulary (`matvec`, `dot`, `norm`)
//! regardless of the scalar type.

use crate::core::traits::{InnerProduct, MatVec};
use faer::Mat;
use num_traits::Float;

/// Computes `y = A * x` for a dense `faer::Mat`.
impl<T: Float> MatVec<T> for Mat<T> {
    fn matvec(&self, x: &[T], y: &mut [T]) {
        assert_eq!(self.nrows(), y.len(), "Output vector y has incorrect length");
        assert_eq!(self.ncols(), x.len(), "Input vector x has incorrect length");
        for i in 0..self.nrows() {
            let mut acc = T::zero();
            for j in 0..self.ncols() {
                acc = acc + self[(i, j)] * x[j];
            }
            y[i] = acc;
        }
    }
}

impl<T: Float> InnerProduct<T> for [T] {
    fn dot(&self, other: &[T]) -> T {
        assert_eq!(self.len(), other.len(), "Vectors must have the same length");
        self.iter()
            .zip(other.iter())
            .fold(T::zero(), |acc, (&xi, &yi)| acc + xi * yi)
    }

    fn norm(&self) -> T {
        self.iter().fold(T::zero(), |acc, &xi| acc + xi * xi).sqrt()
    }

    fn norm_inf(&self) -> T {
        // NaN propagates so a poisoned delta never looks converged
        self.iter().fold(T::zero(), |acc, &xi| {
            let a = xi.abs();
            if a.is_nan() || a > acc { a } else { acc }
        })
    }
}
