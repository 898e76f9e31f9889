//! Gauss-Seidel and relaxed Gauss-Seidel (SOR).

use std::fmt;

use crate::config::SolverOptions;
use crate::error::{ConfigurationError, Result};
use crate::matrix::LinearSystem;
use crate::solver::UpdateRule;
use crate::solver::jacobi::checked_diagonal;
use crate::utils::convergence::{Convergence, Termination};
use num_traits::Float;

/// Gauss-Seidel: the Jacobi formula with sequential substitution, so rows
/// below `i` already see this sweep's updated components.
pub struct GaussSeidel<T> {
    pub conv: Convergence<T>,
    x: Vec<T>,
    diag: Vec<T>,
}

impl<T: Float> GaussSeidel<T> {
    pub fn new(conv: Convergence<T>) -> Self {
        Self { conv, x: Vec::new(), diag: Vec::new() }
    }

    pub fn from_options(options: &SolverOptions<T>) -> std::result::Result<Self, ConfigurationError> {
        Ok(Self::new(options.convergence()?))
    }

    /// One forward sweep over the stored iterate, updating it in place.
    ///
    /// With `omega`, each fresh component is blended with its old value before
    /// later rows see it.
    fn sweep(&mut self, system: &LinearSystem<T>, omega: Option<T>) -> Result<Vec<T>> {
        let a = system.a();
        let n = system.dim();
        if self.diag.is_empty() {
            self.diag = checked_diagonal(a)?;
            self.x = vec![T::zero(); n];
        }
        for i in 0..n {
            let mut sigma = T::zero();
            for j in (0..n).filter(|&j| j != i) {
                sigma = sigma + a[(i, j)] * self.x[j];
            }
            let gs = (system.b()[i] - sigma) / self.diag[i];
            self.x[i] = match omega {
                Some(w) => w * gs + (T::one() - w) * self.x[i],
                None => gs,
            };
        }
        Ok(self.x.clone())
    }
}

impl<T: Float> UpdateRule<T> for GaussSeidel<T> {
    fn name(&self) -> &'static str {
        "GaussSeidel"
    }

    fn compute_next(&mut self, system: &LinearSystem<T>) -> Result<Vec<T>> {
        self.sweep(system, None)
    }

    fn check_convergence(&self, delta: &[T], iteration: usize) -> Option<Termination> {
        self.conv.check(delta, iteration)
    }
}

/// Relaxed Gauss-Seidel (SOR): `x_{k+1} = ω·GS(x_k) + (1-ω)·x_k`, ω ∈ (0, 2),
/// applied row by row inside the sweep. ω = 1 is plain Gauss-Seidel.
pub struct Sor<T> {
    inner: GaussSeidel<T>,
    omega: T,
}

impl<T: Float> Sor<T> {
    pub fn new(conv: Convergence<T>, omega: T) -> std::result::Result<Self, ConfigurationError> {
        let two = T::one() + T::one();
        if !(omega > T::zero() && omega < two) {
            return Err(ConfigurationError::InvalidParameter {
                name: "omega",
                reason: "relaxation factor must lie in (0, 2)".into(),
            });
        }
        Ok(Self { inner: GaussSeidel::new(conv), omega })
    }

    pub fn from_options(options: &SolverOptions<T>, omega: T) -> std::result::Result<Self, ConfigurationError> {
        Self::new(options.convergence()?, omega)
    }

    pub fn omega(&self) -> T {
        self.omega
    }
}

impl<T: Float + fmt::Display> fmt::Display for Sor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SOR(omega={}, tol={})", self.omega, self.inner.conv.tol)
    }
}

impl<T: Float> UpdateRule<T> for Sor<T> {
    fn name(&self) -> &'static str {
        "GaussSeidelRelaxation"
    }

    fn compute_next(&mut self, system: &LinearSystem<T>) -> Result<Vec<T>> {
        self.inner.sweep(system, Some(self.omega))
    }

    fn check_convergence(&self, delta: &[T], iteration: usize) -> Option<Termination> {
        self.inner.check_convergence(delta, iteration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ComputationError, SolverError};
    use crate::solver::{IterativeSolver, LinearSolver};
    use crate::utils::Norm;

    fn conv() -> Convergence<f64> {
        Convergence::new(1e-12, None, Norm::Max)
    }

    #[test]
    fn first_sweep_uses_updated_components() {
        let a = vec![vec![4.0, 1.0], vec![2.0, 5.0]];
        let mut solver = IterativeSolver::new(&a, &[8.0, 10.0], GaussSeidel::new(conv())).unwrap();
        let mut seq = solver.sequence().unwrap();
        // x[0] = 8/4 = 2, then x[1] = (10 - 2*2)/5
        assert_eq!(seq.next().unwrap().unwrap(), vec![2.0, 1.2]);
    }

    #[test]
    fn omega_outside_open_interval_is_rejected() {
        for omega in [0.0, 2.0, -0.5, f64::NAN] {
            let err = Sor::new(conv(), omega).err().unwrap();
            assert!(matches!(err, ConfigurationError::InvalidParameter { name: "omega", .. }));
        }
    }

    #[test]
    fn relaxation_blends_each_row_before_substitution() {
        let a = vec![vec![4.0, 1.0], vec![2.0, 5.0]];
        let mut solver = IterativeSolver::new(&a, &[8.0, 10.0], Sor::new(conv(), 0.5).unwrap()).unwrap();
        let mut seq = solver.sequence().unwrap();
        // x[0] = 0.5 * 8/4 = 1, then x[1] = 0.5 * (10 - 2*1)/5
        assert_eq!(seq.next().unwrap().unwrap(), vec![1.0, 0.8]);
    }

    #[test]
    fn tiny_diagonal_is_degenerate_for_both_sweeps() {
        let a = vec![vec![1e-20, 1.0], vec![1.0, 3.0]];
        let expected = SolverError::Computation(ComputationError::DegenerateDiagonal { row: 0 });
        let mut gs = IterativeSolver::new(&a, &[1.0, 1.0], GaussSeidel::new(conv())).unwrap();
        assert_eq!(gs.solve().unwrap_err(), expected);
        let mut sor = IterativeSolver::new(&a, &[1.0, 1.0], Sor::new(conv(), 1.2).unwrap()).unwrap();
        assert_eq!(sor.solve().unwrap_err(), expected);
    }

    #[test]
    fn display_names_parameters() {
        let sor = Sor::new(conv(), 1.5).unwrap();
        assert_eq!(sor.to_string(), "SOR(omega=1.5, tol=0.000000000001)");
    }
}
