//! Dense‐matrix helpers on top of Faer.
//!
//! The `DenseMatrix` trait gives `faer::Mat<T>` row-major construction and the
//! magnitude queries the solvers use to decide when a pivot or diagonal entry
//! is numerically zero.

use crate::core::traits::MatVec;
use faer::Mat;
use num_traits::Float;

pub trait DenseMatrix<T>: MatVec<T> {
    /// Construct from raw row-major storage.
    fn from_row_major(nrows: usize, ncols: usize, data: &[T]) -> Self;
    /// Largest absolute entry of row `i`.
    fn row_max_abs(&self, i: usize) -> T;
    /// Largest absolute entry of the whole matrix.
    fn max_abs(&self) -> T;
}

impl<T: Float> DenseMatrix<T> for Mat<T> {
    fn from_row_major(nrows: usize, ncols: usize, data: &[T]) -> Self {
        Mat::from_fn(nrows, ncols, |i, j| data[i * ncols + j])
    }

    fn row_max_abs(&self, i: usize) -> T {
        (0..self.ncols()).fold(T::zero(), |acc, j| acc.max(self[(i, j)].abs()))
    }

    fn max_abs(&self) -> T {
        (0..self.nrows()).fold(T::zero(), |acc, i| acc.max(self.row_max_abs(i)))
    }
}
