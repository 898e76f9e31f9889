//! Immutable snapshot of a square linear system `A x = b`.

use crate::core::traits::{InnerProduct, MatVec};
use crate::error::ConfigurationError;
use crate::matrix::dense::DenseMatrix;
use faer::Mat;
use num_traits::Float;

/// A validated, owned copy of `(A, b)`.
///
/// Construction copies the caller's data, so later changes to the caller's
/// buffers never reach a solver holding this snapshot.
#[derive(Clone, Debug)]
pub struct LinearSystem<T> {
    a: Mat<T>,
    b: Vec<T>,
}

impl<T: Float> LinearSystem<T> {
    /// Build from a row-major matrix and a right-hand side.
    ///
    /// Fails with [`ConfigurationError::InvalidDimensions`] unless `a` is a
    /// non-empty square matrix (all rows of equal length) and `b` matches it.
    pub fn new(a: &[Vec<T>], b: &[T]) -> Result<Self, ConfigurationError> {
        let rows = a.len();
        let cols = a.first().map_or(0, Vec::len);
        let ragged = a.iter().any(|row| row.len() != cols);
        if rows == 0 || ragged || rows != cols || b.len() != rows {
            return Err(ConfigurationError::InvalidDimensions { rows, cols, rhs: b.len() });
        }
        let data: Vec<T> = a.iter().flatten().copied().collect();
        Ok(Self {
            a: DenseMatrix::from_row_major(rows, cols, &data),
            b: b.to_vec(),
        })
    }

    /// Build from an existing Faer matrix, applying the same checks as [`LinearSystem::new`].
    pub fn from_mat(a: &Mat<T>, b: &[T]) -> Result<Self, ConfigurationError> {
        let (rows, cols) = (a.nrows(), a.ncols());
        if rows == 0 || rows != cols || b.len() != rows {
            return Err(ConfigurationError::InvalidDimensions { rows, cols, rhs: b.len() });
        }
        Ok(Self {
            a: Mat::from_fn(rows, cols, |i, j| a[(i, j)]),
            b: b.to_vec(),
        })
    }

    pub fn a(&self) -> &Mat<T> {
        &self.a
    }

    pub fn b(&self) -> &[T] {
        &self.b
    }

    /// Size `n` of the system.
    pub fn dim(&self) -> usize {
        self.b.len()
    }

    /// Residual vector `b - A x`.
    pub fn residual(&self, x: &[T]) -> Vec<T> {
        let mut ax = vec![T::zero(); self.dim()];
        self.a.matvec(x, &mut ax);
        self.b.iter().zip(ax).map(|(&bi, axi)| bi - axi).collect()
    }

    /// ‖b - A x‖₂.
    pub fn residual_norm(&self, x: &[T]) -> T {
        self.residual(x).norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_square() {
        let err = LinearSystem::new(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]], &[1.0, 2.0]).unwrap_err();
        assert_eq!(err, ConfigurationError::InvalidDimensions { rows: 2, cols: 3, rhs: 2 });
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = LinearSystem::new(&[vec![1.0, 2.0], vec![4.0]], &[1.0, 2.0]);
        assert!(matches!(err, Err(ConfigurationError::InvalidDimensions { .. })));
    }

    #[test]
    fn rejects_mismatched_rhs() {
        let err = LinearSystem::new(&[vec![1.0, 0.0], vec![0.0, 1.0]], &[1.0, 2.0, 3.0]);
        assert!(matches!(err, Err(ConfigurationError::InvalidDimensions { rhs: 3, .. })));
    }

    #[test]
    fn rejects_empty() {
        let err = LinearSystem::<f64>::new(&[], &[]);
        assert!(err.is_err());
    }

    #[test]
    fn copies_caller_data() {
        let mut a = vec![vec![4.0, 1.0], vec![1.0, 3.0]];
        let mut b = vec![1.0, 2.0];
        let sys = LinearSystem::new(&a, &b).unwrap();
        a[0][0] = 100.0;
        b[1] = -7.0;
        assert_eq!(sys.a()[(0, 0)], 4.0);
        assert_eq!(sys.b(), &[1.0, 2.0]);
    }

    #[test]
    fn residual_of_exact_solution_is_zero() {
        let sys = LinearSystem::new(&[vec![2.0, 0.0], vec![0.0, 4.0]], &[2.0, 8.0]).unwrap();
        assert_eq!(sys.residual(&[1.0, 2.0]), vec![0.0, 0.0]);
        assert_eq!(sys.residual_norm(&[0.0, 0.0]), (4.0f64 + 64.0).sqrt());
    }
}
