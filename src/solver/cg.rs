//! Conjugate Gradient per Saad §6.7, with a pluggable β formula.
//!
//! The four classic variants differ only in how the next search direction
//! `p_{k+1} = r_{k+1} + β_k p_k` is weighted. With `y_k = r_k - r_{k+1}`:
//!
//! | rule            | β_k                                   |
//! |-----------------|---------------------------------------|
//! | Fletcher-Reeves | `r_{k+1}·r_{k+1} / r_k·r_k`           |
//! | Polak-Ribière   | `r_{k+1}·(r_{k+1} - r_k) / r_k·r_k`   |
//! | Hestenes-Stiefel| `r_{k+1}·(r_{k+1} - r_k) / p_k·y_k`   |
//! | Dai-Yuan        | `r_{k+1}·r_{k+1} / p_k·y_k`           |
//!
//! For SPD `A` with exact line search all four coincide and terminate in at
//! most `n` steps in exact arithmetic.

use std::marker::PhantomData;

use crate::config::SolverOptions;
use crate::core::traits::{InnerProduct, MatVec};
use crate::error::{ComputationError, ConfigurationError, Result};
use crate::matrix::LinearSystem;
use crate::solver::UpdateRule;
use crate::utils::convergence::{Convergence, Termination};
use num_traits::Float;

/// Strategy for the direction-update coefficient β_k.
pub trait BetaRule {
    const NAME: &'static str;

    /// `r_new`/`r_old` are r_{k+1}/r_k, `p` is p_k; `rr_new`/`rr_old` are the
    /// matching squared residual norms.
    fn beta<T: Float>(r_new: &[T], r_old: &[T], p: &[T], rr_new: T, rr_old: T) -> Result<T>;
}

fn ratio<T: Float>(num: T, den: T) -> Result<T> {
    if den == T::zero() {
        return Err(ComputationError::Breakdown("zero denominator in beta").into());
    }
    Ok(num / den)
}

/// `r_{k+1}·(r_{k+1} - r_k)`
fn ribiere_numerator<T: Float>(r_new: &[T], r_old: &[T]) -> T {
    r_new
        .iter()
        .zip(r_old)
        .fold(T::zero(), |acc, (&rn, &ro)| acc + rn * (rn - ro))
}

/// `p_k·(r_k - r_{k+1})`, equal to `α_k p_k·A p_k`
fn curvature_denominator<T: Float>(r_new: &[T], r_old: &[T], p: &[T]) -> T {
    p.iter()
        .zip(r_old.iter().zip(r_new))
        .fold(T::zero(), |acc, (&pi, (&ro, &rn))| acc + pi * (ro - rn))
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FletcherReeves;

impl BetaRule for FletcherReeves {
    const NAME: &'static str = "FletcherReeves";

    fn beta<T: Float>(_r_new: &[T], _r_old: &[T], _p: &[T], rr_new: T, rr_old: T) -> Result<T> {
        ratio(rr_new, rr_old)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PolakRibiere;

impl BetaRule for PolakRibiere {
    const NAME: &'static str = "PolakRibiere";

    fn beta<T: Float>(r_new: &[T], r_old: &[T], _p: &[T], _rr_new: T, rr_old: T) -> Result<T> {
        ratio(ribiere_numerator(r_new, r_old), rr_old)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HestenesStiefel;

impl BetaRule for HestenesStiefel {
    const NAME: &'static str = "HestenesStiefel";

    fn beta<T: Float>(r_new: &[T], r_old: &[T], p: &[T], _rr_new: T, _rr_old: T) -> Result<T> {
        ratio(ribiere_numerator(r_new, r_old), curvature_denominator(r_new, r_old, p))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DaiYuan;

impl BetaRule for DaiYuan {
    const NAME: &'static str = "DaiYuan";

    fn beta<T: Float>(r_new: &[T], r_old: &[T], p: &[T], rr_new: T, _rr_old: T) -> Result<T> {
        ratio(rr_new, curvature_denominator(r_new, r_old, p))
    }
}

struct CgState<T> {
    x: Vec<T>,
    r: Vec<T>,
    p: Vec<T>,
    rsq: T,
}

impl<T: Float> CgState<T> {
    /// x_0 = 0, so r_0 = p_0 = b.
    fn start(system: &LinearSystem<T>) -> Self {
        let r = system.b().to_vec();
        let rsq = r.dot(&r);
        Self { x: vec![T::zero(); r.len()], p: r.clone(), r, rsq }
    }
}

pub struct ConjugateGradient<T, B> {
    pub conv: Convergence<T>,
    state: Option<CgState<T>>,
    _beta: PhantomData<B>,
}

impl<T: Float, B: BetaRule> ConjugateGradient<T, B> {
    pub fn new(conv: Convergence<T>) -> Self {
        Self { conv, state: None, _beta: PhantomData }
    }

    pub fn from_options(options: &SolverOptions<T>) -> std::result::Result<Self, ConfigurationError> {
        Ok(Self::new(options.convergence()?))
    }
}

impl<T: Float, B: BetaRule> UpdateRule<T> for ConjugateGradient<T, B> {
    fn name(&self) -> &'static str {
        B::NAME
    }

    fn compute_next(&mut self, system: &LinearSystem<T>) -> Result<Vec<T>> {
        let s = self.state.get_or_insert_with(|| CgState::start(system));
        if s.rsq == T::zero() {
            return Ok(s.x.clone());
        }
        let n = s.x.len();
        let mut ap = vec![T::zero(); n];
        system.a().matvec(&s.p, &mut ap);
        let pap = s.p.dot(&ap);
        // with a nonzero residual, p·Ap <= 0 means A is not positive definite along p
        if pap <= T::zero() || pap.is_nan() {
            return Err(ComputationError::Breakdown("non-positive curvature p·Ap").into());
        }
        let alpha = s.rsq / pap;
        for (xj, &pj) in s.x.iter_mut().zip(&s.p) {
            *xj = *xj + alpha * pj;
        }
        let r_new: Vec<T> = s.r.iter().zip(&ap).map(|(&rj, &apj)| rj - alpha * apj).collect();
        let rsq_new = r_new.dot(&r_new);
        let beta = B::beta(&r_new, &s.r, &s.p, rsq_new, s.rsq)?;
        for (pj, &rj) in s.p.iter_mut().zip(&r_new) {
            *pj = rj + beta * *pj;
        }
        s.r = r_new;
        s.rsq = rsq_new;
        Ok(s.x.clone())
    }

    fn check_convergence(&self, delta: &[T], iteration: usize) -> Option<Termination> {
        self.conv.check(delta, iteration)
    }
}
