//! Convergence tracking & tolerance checks for iterative solvers.

use crate::core::traits::InnerProduct;
use num_traits::Float;

/// Vector norm applied to the step `delta = current - previous`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Norm {
    /// ‖·‖∞
    #[default]
    Max,
    /// ‖·‖₂
    Euclidean,
}

impl Norm {
    pub fn apply<T: Float>(self, v: &[T]) -> T {
        match self {
            Norm::Max => v.norm_inf(),
            Norm::Euclidean => v.norm(),
        }
    }
}

/// Why an approximation sequence stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The step norm fell to or below the tolerance.
    Precise,
    /// The iteration budget ran out first.
    Capped,
    /// One-shot method: the single produced value is the answer.
    Exact,
}

/// Stopping criteria.
#[derive(Clone, Debug)]
pub struct Convergence<T> {
    pub tol: T,
    pub max_iters: Option<usize>,
    pub norm: Norm,
}

#[derive(Clone, Debug)]
pub struct SolveStats<T> {
    pub iterations: usize,
    pub final_residual: T,
    pub termination: Termination,
}

impl<T> SolveStats<T> {
    /// `false` only when the iteration cap, not precision, ended the run.
    pub fn converged(&self) -> bool {
        self.termination != Termination::Capped
    }
}

impl<T: Float> Convergence<T> {
    pub fn new(tol: T, max_iters: Option<usize>, norm: Norm) -> Self {
        Self { tol, max_iters, norm }
    }

    /// Returns `Some(reason)` once iteration may stop, given the latest `delta`
    /// and the number `i` of values produced so far.
    ///
    /// Precision is checked before the budget, so a run that becomes precise on
    /// its last allowed step still reports `Precise`.
    pub fn check(&self, delta: &[T], i: usize) -> Option<Termination> {
        if self.norm.apply(delta) <= self.tol {
            Some(Termination::Precise)
        } else if self.max_iters.is_some_and(|cap| i >= cap) {
            Some(Termination::Capped)
        } else {
            None
        }
    }
}
