//! Direct dense solvers: hand-written Gaussian elimination and Faer's LU.
//!
//! Both plug into the same engine as the iterative methods, but their
//! sequences have exactly one element: the first step returns the exact
//! solution and the convergence check ends the run right after it with
//! [`Termination::Exact`].
//!
//! - `Gauss` is the comparison entrant, elimination with partial pivoting.
//! - `FaerLu` wraps `faer::linalg::solvers::FullPivLu` and serves as the
//!   library-backed reference the other methods are measured against.
//!
//! # References
//! - Faer documentation: https://github.com/sarah-ek/faer-rs
//! - Golub & Van Loan, Matrix Computations, §3.4

use crate::error::{ComputationError, Result};
use crate::matrix::{DenseMatrix, LinearSystem};
use crate::solver::UpdateRule;
use crate::utils::convergence::Termination;
use faer::linalg::solvers::{FullPivLu, SolveCore};
use faer::traits::RealField;
use faer::{Conj, MatMut};
use num_traits::Float;

/// One-shot elimination solver.
#[derive(Clone, Debug, Default)]
pub struct Gauss<T> {
    /// Cached solution (once computed)
    solution: Option<Vec<T>>,
}

impl<T: Float> Gauss<T> {
    pub fn new() -> Self {
        Self { solution: None }
    }

    /// Solve `A x = b` by forward elimination and back substitution.
    ///
    /// A pivot is treated as zero when it is no larger than machine epsilon
    /// times the largest entry of `A`.
    pub fn eliminate(system: &LinearSystem<T>) -> Result<Vec<T>> {
        let n = system.dim();
        let a = system.a();
        let threshold = T::epsilon() * a.max_abs();
        let mut rows: Vec<Vec<T>> = (0..n)
            .map(|i| (0..n).map(|j| a[(i, j)]).collect())
            .collect();
        let mut rhs = system.b().to_vec();

        for k in 0..n {
            // partial pivoting: largest magnitude in column k at or below the diagonal
            let p = (k..n)
                .max_by(|&i, &j| {
                    rows[i][k]
                        .abs()
                        .partial_cmp(&rows[j][k].abs())
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .unwrap_or(k);
            let pivot = rows[p][k];
            if pivot == T::zero() || pivot.abs() <= threshold {
                return Err(ComputationError::SingularSystem { column: k }.into());
            }
            rows.swap(k, p);
            rhs.swap(k, p);

            for i in (k + 1)..n {
                let factor = rows[i][k] / pivot;
                if factor == T::zero() {
                    continue;
                }
                for j in k..n {
                    rows[i][j] = rows[i][j] - factor * rows[k][j];
                }
                rhs[i] = rhs[i] - factor * rhs[k];
            }
        }

        let mut x = vec![T::zero(); n];
        for i in (0..n).rev() {
            let tail = ((i + 1)..n).fold(T::zero(), |acc, j| acc + rows[i][j] * x[j]);
            x[i] = (rhs[i] - tail) / rows[i][i];
        }
        Ok(x)
    }
}

impl<T: Float> UpdateRule<T> for Gauss<T> {
    fn name(&self) -> &'static str {
        "Gauss"
    }

    fn compute_next(&mut self, system: &LinearSystem<T>) -> Result<Vec<T>> {
        if let Some(x) = &self.solution {
            return Ok(x.clone());
        }
        let x = Self::eliminate(system)?;
        self.solution = Some(x.clone());
        Ok(x)
    }

    fn check_convergence(&self, _delta: &[T], iteration: usize) -> Option<Termination> {
        (iteration >= 1).then_some(Termination::Exact)
    }
}

/// LU solver using full pivoting from Faer.
#[derive(Clone, Debug, Default)]
pub struct FaerLu<T> {
    solution: Option<Vec<T>>,
}

impl<T: Float + RealField> FaerLu<T> {
    pub fn new() -> Self {
        Self { solution: None }
    }

    /// Factor `A = P L U Q` and solve in place.
    ///
    /// Fails with [`ComputationError::SingularSystem`] when a diagonal entry
    /// of `U` is no larger than machine epsilon times the largest entry of
    /// `A`, the same threshold [`Gauss::eliminate`] applies to its pivots.
    pub fn factor_solve(system: &LinearSystem<T>) -> Result<Vec<T>> {
        let n = system.dim();
        let a = system.a();
        let threshold = <T as Float>::epsilon() * a.max_abs();
        let factor = FullPivLu::new(a.as_ref());
        let u = factor.U();
        if let Some(column) = (0..n).find(|&k| {
            let pivot = Float::abs(u[(k, k)]);
            pivot <= threshold || Float::is_nan(pivot)
        }) {
            return Err(ComputationError::SingularSystem { column }.into());
        }
        let mut x = system.b().to_vec();
        let x_mat = MatMut::from_column_major_slice_mut(&mut x, n, 1);
        factor.solve_in_place_with_conj(Conj::No, x_mat);
        Ok(x)
    }
}

impl<T: Float + RealField> UpdateRule<T> for FaerLu<T> {
    fn name(&self) -> &'static str {
        "Lu"
    }

    fn compute_next(&mut self, system: &LinearSystem<T>) -> Result<Vec<T>> {
        if let Some(x) = &self.solution {
            return Ok(x.clone());
        }
        let x = Self::factor_solve(system)?;
        self.solution = Some(x.clone());
        Ok(x)
    }

    fn check_convergence(&self, _delta: &[T], iteration: usize) -> Option<Termination> {
        (iteration >= 1).then_some(Termination::Exact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolverError;
    use crate::solver::{IterativeSolver, LinearSolver};

    #[test]
    fn gauss_solves_dense_system() {
        // 3x3 system: [[2,1,1],[1,3,2],[1,0,0]] x = [4,5,6]
        // True solution: [6,15,-23]
        let a = vec![
            vec![2.0, 1.0, 1.0],
            vec![1.0, 3.0, 2.0],
            vec![1.0, 0.0, 0.0],
        ];
        let b = vec![4.0, 5.0, 6.0];
        let mut solver = IterativeSolver::new(&a, &b, Gauss::new()).unwrap();
        let (x, stats) = solver.solve_with_stats().unwrap();
        let expected = vec![6.0, 15.0, -23.0];
        for (xi, ei) in x.iter().zip(expected.iter()) {
            assert!((xi - ei).abs() < 1e-10, "xi = {}, expected = {}", xi, ei);
        }
        assert_eq!(stats.iterations, 1);
        assert_eq!(stats.termination, Termination::Exact);
    }

    #[test]
    fn gauss_needs_pivoting_for_zero_leading_entry() {
        let a = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        let mut solver = IterativeSolver::new(&a, &[2.0, 3.0], Gauss::new()).unwrap();
        assert_eq!(solver.solve().unwrap(), vec![3.0, 2.0]);
    }

    #[test]
    fn gauss_reports_singular_system() {
        let a = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
        let mut solver = IterativeSolver::new(&a, &[1.0, 1.0], Gauss::new()).unwrap();
        assert_eq!(
            solver.solve().unwrap_err(),
            SolverError::Computation(ComputationError::SingularSystem { column: 1 })
        );
    }

    #[test]
    fn gauss_rejects_tiny_nonzero_pivot() {
        // the second pivot is nonzero but below eps * max|A|
        let a = vec![vec![1.0, 0.5], vec![0.0, 1e-17]];
        let mut solver = IterativeSolver::new(&a, &[1.0, 2.0], Gauss::new()).unwrap();
        assert_eq!(
            solver.solve().unwrap_err(),
            SolverError::Computation(ComputationError::SingularSystem { column: 1 })
        );
    }

    #[test]
    fn faer_lu_matches_gauss() {
        let a = vec![
            vec![2.0, 1.0, 1.0],
            vec![1.0, 3.0, 2.0],
            vec![1.0, 0.0, 0.0],
        ];
        let b = vec![4.0, 5.0, 6.0];
        let mut solver = IterativeSolver::new(&a, &b, FaerLu::new()).unwrap();
        let (x, stats) = solver.solve_with_stats().unwrap();
        let expected = vec![6.0, 15.0, -23.0];
        for (xi, ei) in x.iter().zip(expected.iter()) {
            assert!((xi - ei).abs() < 1e-10, "xi = {}, expected = {}", xi, ei);
        }
        assert_eq!(stats.iterations, 1);
        assert_eq!(stats.termination, Termination::Exact);
        assert_eq!(solver.name(), "Lu");
    }

    #[test]
    fn faer_lu_reports_singular_system() {
        for a in [
            vec![vec![1.0, 2.0], vec![2.0, 4.0]],
            vec![vec![1.0, 0.5], vec![0.0, 1e-17]],
        ] {
            let mut solver = IterativeSolver::new(&a, &[1.0, 1.0], FaerLu::new()).unwrap();
            assert!(matches!(
                solver.solve(),
                Err(SolverError::Computation(ComputationError::SingularSystem { .. }))
            ));
        }
    }

    #[test]
    fn gauss_sequence_has_one_element() {
        let a = vec![vec![4.0, 1.0], vec![2.0, 3.0]];
        let mut solver = IterativeSolver::new(&a, &[1.0, 2.0], Gauss::new()).unwrap();
        let values: Vec<_> = solver.sequence().unwrap().collect::<Result<_>>().unwrap();
        assert_eq!(values.len(), 1);
        assert!((values[0][0] - 0.1).abs() < 1e-15);
        assert!((values[0][1] - 0.6).abs() < 1e-15);
    }
}
