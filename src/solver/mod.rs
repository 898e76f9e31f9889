//! Iterative & direct solver interfaces.
//!
//! Every solver is an [`UpdateRule`] driven by the one generic engine in
//! [`engine`]. The rule supplies the next iterate and the stopping test; the
//! engine owns sequencing, shape checks and the single-use guarantee.

use crate::error::Result;
use crate::matrix::LinearSystem;
use crate::utils::convergence::{SolveStats, Termination};

/// Capability interface of a concrete method.
pub trait UpdateRule<T> {
    /// Stable label used as a report column header.
    fn name(&self) -> &'static str;
    /// Advance the rule's own iterate by one step and return it.
    fn compute_next(&mut self, system: &LinearSystem<T>) -> Result<Vec<T>>;
    /// `Some(reason)` once `delta = current - previous` after `iteration`
    /// produced values allows the sequence to end.
    fn check_convergence(&self, delta: &[T], iteration: usize) -> Option<Termination>;
}

/// One-shot stream of approximations as seen through a trait object.
pub type Sequence<T> = Box<dyn Iterator<Item = Result<Vec<T>>>>;

/// Object-safe surface consumed by comparison harnesses.
pub trait LinearSolver<T> {
    fn name(&self) -> &'static str;
    /// Size of the bound system.
    fn dim(&self) -> usize;
    /// Hand out the approximation sequence. Only the first call succeeds;
    /// later calls fail with `UsageError::SequenceAlreadyConsumed`.
    fn sequence(&mut self) -> Result<Sequence<T>>;
    /// Drain the sequence, returning its last value and how it ended.
    fn solve_with_stats(&mut self) -> Result<(Vec<T>, SolveStats<T>)>;
    /// Drain the sequence and return its last value.
    fn solve(&mut self) -> Result<Vec<T>> {
        self.solve_with_stats().map(|(x, _)| x)
    }
}

pub mod engine;
pub use engine::{Approximations, IterativeSolver};

pub mod direct_lu;
pub use direct_lu::{FaerLu, Gauss};

pub mod jacobi;
pub use jacobi::Jacobi;

pub mod seidel;
pub use seidel::{GaussSeidel, Sor};

pub mod cg;
pub use cg::{
    BetaRule, ConjugateGradient, DaiYuan, FletcherReeves, HestenesStiefel, PolakRibiere,
};
