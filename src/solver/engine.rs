//! The shared iteration template.
//!
//! [`Approximations`] is the state machine every method runs on: it seeds the
//! `previous`/`current` pair with opposite infinities, so the first stopping
//! check always fails, then alternates `compute_next` and the convergence test
//! until the rule reports a [`Termination`]. [`IterativeSolver`] wraps it
//! behind [`LinearSolver`] and hands it out at most once.

use crate::error::{ComputationError, Result, SolverError, UsageError};
use crate::matrix::LinearSystem;
use crate::solver::{LinearSolver, Sequence, UpdateRule};
use crate::utils::convergence::{SolveStats, Termination};
use num_traits::Float;

/// Lazy, single-use sequence of iterates `x_1, x_2, ...`.
///
/// Finite when the rule converges (or is capped), unbounded otherwise; the
/// consumer decides when to stop pulling. After an error the sequence is
/// fused.
pub struct Approximations<T, R> {
    system: LinearSystem<T>,
    rule: R,
    previous: Vec<T>,
    current: Vec<T>,
    iteration: usize,
    failed: bool,
}

impl<T: Float, R: UpdateRule<T>> Approximations<T, R> {
    pub fn new(system: LinearSystem<T>, rule: R) -> Self {
        let n = system.dim();
        Self {
            system,
            rule,
            previous: vec![T::infinity(); n],
            current: vec![T::neg_infinity(); n],
            iteration: 0,
            failed: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.rule.name()
    }

    /// Number of values produced so far.
    pub fn iterations(&self) -> usize {
        self.iteration
    }

    /// Most recent iterate, if any has been produced.
    pub fn current(&self) -> Option<&[T]> {
        (self.iteration > 0).then_some(self.current.as_slice())
    }

    fn delta(&self) -> Vec<T> {
        self.current
            .iter()
            .zip(&self.previous)
            .map(|(&c, &p)| c - p)
            .collect()
    }

    /// How the sequence ended, or `None` while it is still running (or failed).
    pub fn termination(&self) -> Option<Termination> {
        if self.failed {
            return None;
        }
        self.rule.check_convergence(&self.delta(), self.iteration)
    }

    pub fn has_more(&self) -> bool {
        !self.failed && self.termination().is_none()
    }

    /// Compute the next iterate, or `None` once the sequence is over.
    pub fn produce_next(&mut self) -> Option<Result<Vec<T>>> {
        if !self.has_more() {
            return None;
        }
        match self.step() {
            Ok(x) => Some(Ok(x)),
            Err(e) => {
                log::debug!("{}: failed at iteration {}: {}", self.rule.name(), self.iteration + 1, e);
                self.failed = true;
                Some(Err(e))
            }
        }
    }

    fn step(&mut self) -> Result<Vec<T>> {
        let next = self.rule.compute_next(&self.system)?;
        let expected = self.system.dim();
        if next.len() != expected {
            return Err(ComputationError::MalformedUpdate { expected, actual: next.len() }.into());
        }
        self.iteration += 1;
        if next.iter().any(|v| !v.is_finite()) {
            return Err(ComputationError::NonFinite { iteration: self.iteration }.into());
        }
        log::trace!("{}: iteration {}", self.rule.name(), self.iteration);
        self.previous = std::mem::replace(&mut self.current, next.clone());
        Ok(next)
    }

    /// Drain the sequence and return its last value together with [`SolveStats`].
    pub fn finish(mut self) -> Result<(Vec<T>, SolveStats<T>)> {
        let mut last = None;
        while let Some(x) = self.produce_next() {
            last = Some(x?);
        }
        let x = last.ok_or(ComputationError::EmptySequence)?;
        let termination = self.termination().ok_or(ComputationError::EmptySequence)?;
        log::debug!("{}: {:?} after {} iterations", self.rule.name(), termination, self.iteration);
        let stats = SolveStats {
            iterations: self.iteration,
            final_residual: self.system.residual_norm(&x),
            termination,
        };
        Ok((x, stats))
    }
}

impl<T: Float, R: UpdateRule<T>> Iterator for Approximations<T, R> {
    type Item = Result<Vec<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.produce_next()
    }
}

/// A method bound to its own copy of a system.
pub struct IterativeSolver<T, R> {
    name: &'static str,
    dim: usize,
    pending: Option<Approximations<T, R>>,
}

impl<T: Float, R: UpdateRule<T>> IterativeSolver<T, R> {
    /// Copy `(a, b)` and bind it to `rule`.
    pub fn new(a: &[Vec<T>], b: &[T], rule: R) -> Result<Self> {
        Ok(Self::from_system(LinearSystem::new(a, b)?, rule))
    }

    pub fn from_system(system: LinearSystem<T>, rule: R) -> Self {
        Self {
            name: rule.name(),
            dim: system.dim(),
            pending: Some(Approximations::new(system, rule)),
        }
    }

    /// Take the sequence by value; the solver is consumed with it.
    pub fn into_sequence(self) -> Result<Approximations<T, R>> {
        self.pending.ok_or_else(|| UsageError::SequenceAlreadyConsumed.into())
    }

    fn take(&mut self) -> Result<Approximations<T, R>> {
        self.pending
            .take()
            .ok_or(SolverError::Usage(UsageError::SequenceAlreadyConsumed))
    }
}

impl<T, R> LinearSolver<T> for IterativeSolver<T, R>
where
    T: Float + 'static,
    R: UpdateRule<T> + 'static,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn sequence(&mut self) -> Result<Sequence<T>> {
        Ok(Box::new(self.take()?))
    }

    fn solve_with_stats(&mut self) -> Result<(Vec<T>, SolveStats<T>)> {
        self.take()?.finish()
    }
}
