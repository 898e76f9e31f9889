//! Jacobi iteration.
//!
//! `x_{k+1}[i] = (b[i] - Σ_{j≠i} A[i][j] x_k[j]) / A[i][i]`, every component
//! computed from the previous full iterate. Converges for strictly diagonally
//! dominant `A`.

use crate::config::SolverOptions;
use crate::error::{ComputationError, ConfigurationError, Result, SolverError};
use crate::matrix::{DenseMatrix, LinearSystem};
use crate::solver::UpdateRule;
use crate::utils::convergence::{Convergence, Termination};
use faer::Mat;
use num_traits::Float;

/// Checked diagonal of `a`.
///
/// An entry is degenerate when it is zero or no larger than machine epsilon
/// times the largest entry of its row.
pub(crate) fn checked_diagonal<T: Float>(a: &Mat<T>) -> Result<Vec<T>> {
    (0..a.nrows())
        .map(|i| {
            let aii = a[(i, i)];
            if aii == T::zero() || aii.abs() <= T::epsilon() * a.row_max_abs(i) {
                Err(SolverError::from(ComputationError::DegenerateDiagonal { row: i }))
            } else {
                Ok(aii)
            }
        })
        .collect()
}

pub struct Jacobi<T> {
    pub conv: Convergence<T>,
    x: Vec<T>,
    diag: Vec<T>,
}

impl<T: Float> Jacobi<T> {
    pub fn new(conv: Convergence<T>) -> Self {
        Self { conv, x: Vec::new(), diag: Vec::new() }
    }

    pub fn from_options(options: &SolverOptions<T>) -> std::result::Result<Self, ConfigurationError> {
        Ok(Self::new(options.convergence()?))
    }
}

impl<T: Float> UpdateRule<T> for Jacobi<T> {
    fn name(&self) -> &'static str {
        "Jacobi"
    }

    fn compute_next(&mut self, system: &LinearSystem<T>) -> Result<Vec<T>> {
        let a = system.a();
        let n = system.dim();
        if self.diag.is_empty() {
            self.diag = checked_diagonal(a)?;
            self.x = vec![T::zero(); n];
        }
        let next: Vec<T> = (0..n)
            .map(|i| {
                let sigma = (0..n)
                    .filter(|&j| j != i)
                    .fold(T::zero(), |acc, j| acc + a[(i, j)] * self.x[j]);
                (system.b()[i] - sigma) / self.diag[i]
            })
            .collect();
        self.x.clone_from(&next);
        Ok(next)
    }

    fn check_convergence(&self, delta: &[T], iteration: usize) -> Option<Termination> {
        self.conv.check(delta, iteration)
    }
}
