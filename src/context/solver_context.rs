//! Factory for comparison rosters.
//!
//! This module provides `SolverKind`, one enumerator per concrete method, and
//! `SolverContext`, which builds a whole set of solvers for one system so a
//! harness can iterate them side by side. Every built solver owns its own copy
//! of the system.
//!
//! # Usage
//!
//! 1. Construct a `SolverContext` with the desired options, methods and relaxation factors.
//! 2. Call `build` with `(A, b)` and drive each returned solver.

use bitflags::bitflags;
use faer::traits::RealField;
use num_traits::Float;

use crate::config::SolverOptions;
use crate::error::Result;
use crate::matrix::LinearSystem;
use crate::solver::{
    BetaRule, ConjugateGradient, DaiYuan, FaerLu, FletcherReeves, Gauss, GaussSeidel,
    HestenesStiefel, IterativeSolver, Jacobi, LinearSolver, PolakRibiere, Sor,
};

/// Enum representing the available methods.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolverKind<T> {
    /// Gaussian elimination (direct, one step)
    Gauss,
    /// Faer's full-pivoting LU (direct, one step)
    Lu,
    /// Jacobi iteration
    Jacobi,
    /// Gauss-Seidel iteration
    GaussSeidel,
    /// Gauss-Seidel with relaxation factor ω
    Relaxation(T),
    /// CG with Fletcher-Reeves β
    FletcherReeves,
    /// CG with Polak-Ribière β
    PolakRibiere,
    /// CG with Hestenes-Stiefel β
    HestenesStiefel,
    /// CG with Dai-Yuan β
    DaiYuan,
}

impl<T: Float + RealField + 'static> SolverKind<T> {
    /// Report label, identical to the built solver's `name()`.
    pub fn label(&self) -> &'static str {
        match self {
            SolverKind::Gauss => "Gauss",
            SolverKind::Lu => "Lu",
            SolverKind::Jacobi => "Jacobi",
            SolverKind::GaussSeidel => "GaussSeidel",
            SolverKind::Relaxation(_) => "GaussSeidelRelaxation",
            SolverKind::FletcherReeves => FletcherReeves::NAME,
            SolverKind::PolakRibiere => PolakRibiere::NAME,
            SolverKind::HestenesStiefel => HestenesStiefel::NAME,
            SolverKind::DaiYuan => DaiYuan::NAME,
        }
    }

    /// Bind this method to a copy of `system`.
    pub fn build(
        &self,
        system: &LinearSystem<T>,
        options: &SolverOptions<T>,
    ) -> Result<Box<dyn LinearSolver<T>>> {
        let system = system.clone();
        let solver: Box<dyn LinearSolver<T>> = match *self {
            SolverKind::Gauss => Box::new(IterativeSolver::from_system(system, Gauss::new())),
            SolverKind::Lu => Box::new(IterativeSolver::from_system(system, FaerLu::new())),
            SolverKind::Jacobi => {
                Box::new(IterativeSolver::from_system(system, Jacobi::from_options(options)?))
            }
            SolverKind::GaussSeidel => {
                Box::new(IterativeSolver::from_system(system, GaussSeidel::from_options(options)?))
            }
            SolverKind::Relaxation(omega) => {
                Box::new(IterativeSolver::from_system(system, Sor::from_options(options, omega)?))
            }
            SolverKind::FletcherReeves => Box::new(IterativeSolver::from_system(
                system,
                ConjugateGradient::<T, FletcherReeves>::from_options(options)?,
            )),
            SolverKind::PolakRibiere => Box::new(IterativeSolver::from_system(
                system,
                ConjugateGradient::<T, PolakRibiere>::from_options(options)?,
            )),
            SolverKind::HestenesStiefel => Box::new(IterativeSolver::from_system(
                system,
                ConjugateGradient::<T, HestenesStiefel>::from_options(options)?,
            )),
            SolverKind::DaiYuan => Box::new(IterativeSolver::from_system(
                system,
                ConjugateGradient::<T, DaiYuan>::from_options(options)?,
            )),
        };
        Ok(solver)
    }
}

bitflags! {
    /// Selection of methods for a roster.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct Methods: u32 {
        const DAI_YUAN           = 0b0000_0001;
        const FLETCHER_REEVES    = 0b0000_0010;
        const HESTENES_STIEFEL   = 0b0000_0100;
        const POLAK_RIBIERE      = 0b0000_1000;
        const GAUSS              = 0b0001_0000;
        const JACOBI             = 0b0010_0000;
        const GAUSS_SEIDEL       = 0b0100_0000;
        const RELAXATION         = 0b1000_0000;
        const LU                 = 0b1_0000_0000;
        const CONJUGATE_GRADIENT = Self::DAI_YUAN.bits() | Self::FLETCHER_REEVES.bits()
                                 | Self::HESTENES_STIEFEL.bits() | Self::POLAK_RIBIERE.bits();
        const STATIONARY         = Self::JACOBI.bits() | Self::GAUSS_SEIDEL.bits() | Self::RELAXATION.bits();
        const DIRECT             = Self::GAUSS.bits() | Self::LU.bits();
        const ALL                = Self::CONJUGATE_GRADIENT.bits() | Self::DIRECT.bits() | Self::STATIONARY.bits();
    }
}

/// Options, method selection and relaxation factors for one comparison.
#[derive(Clone, Debug)]
pub struct SolverContext<T> {
    pub options: SolverOptions<T>,
    /// `RELAXATION` yields one entrant per factor in `relaxation`.
    pub methods: Methods,
    pub relaxation: Vec<T>,
}

impl SolverContext<f64> {
    /// The standard comparison set: four CG variants, Gauss, Jacobi,
    /// Gauss-Seidel and relaxed Gauss-Seidel at ω = 0.3 and ω = 1.8. The Faer
    /// LU reference is left out; see [`SolverContext::reference`].
    pub fn comparison(options: SolverOptions<f64>) -> Self {
        Self {
            options,
            methods: Methods::ALL.difference(Methods::LU),
            relaxation: vec![0.3, 1.8],
        }
    }
}

impl<T: Float + RealField + 'static> SolverContext<T> {
    /// Every method except relaxation, which needs at least one factor from
    /// [`SolverContext::with_relaxation`].
    pub fn new(options: SolverOptions<T>) -> Self {
        Self { options, methods: Methods::ALL.difference(Methods::RELAXATION), relaxation: Vec::new() }
    }

    pub fn with_methods(mut self, methods: Methods) -> Self {
        self.methods = methods;
        self
    }

    /// Add a relaxation factor and select `Methods::RELAXATION`.
    pub fn with_relaxation(mut self, omega: T) -> Self {
        self.relaxation.push(omega);
        self.methods.insert(Methods::RELAXATION);
        self
    }

    /// Selected methods in roster order.
    pub fn kinds(&self) -> Vec<SolverKind<T>> {
        let fixed = [
            (Methods::DAI_YUAN, SolverKind::DaiYuan),
            (Methods::FLETCHER_REEVES, SolverKind::FletcherReeves),
            (Methods::HESTENES_STIEFEL, SolverKind::HestenesStiefel),
            (Methods::POLAK_RIBIERE, SolverKind::PolakRibiere),
            (Methods::GAUSS, SolverKind::Gauss),
            (Methods::LU, SolverKind::Lu),
            (Methods::JACOBI, SolverKind::Jacobi),
            (Methods::GAUSS_SEIDEL, SolverKind::GaussSeidel),
        ];
        let mut kinds: Vec<_> = fixed
            .into_iter()
            .filter(|(flag, _)| self.methods.contains(*flag))
            .map(|(_, kind)| kind)
            .collect();
        if self.methods.contains(Methods::RELAXATION) {
            kinds.extend(self.relaxation.iter().map(|&omega| SolverKind::Relaxation(omega)));
        }
        kinds
    }

    /// Validate `(a, b)` once and build every selected solver.
    pub fn build(&self, a: &[Vec<T>], b: &[T]) -> Result<Vec<Box<dyn LinearSolver<T>>>> {
        self.build_for(&LinearSystem::new(a, b)?)
    }

    pub fn build_for(&self, system: &LinearSystem<T>) -> Result<Vec<Box<dyn LinearSolver<T>>>> {
        self.kinds()
            .iter()
            .map(|kind| kind.build(system, &self.options))
            .collect()
    }

    /// Exact solution from Faer's LU, the yardstick for the roster's answers.
    pub fn reference(&self, a: &[Vec<T>], b: &[T]) -> Result<Vec<T>> {
        FaerLu::factor_solve(&LinearSystem::new(a, b)?)
    }
}
