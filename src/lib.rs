//! itersolve: comparable iterative solvers for dense linear systems over Faer
//!
//! Every method (Jacobi, Gauss-Seidel, relaxed Gauss-Seidel, four conjugate
//! gradient variants and a direct Gaussian-elimination reference) runs under
//! one protocol: a lazy, single-use sequence of approximations with a
//! per-method stopping test, so their convergence can be measured side by side.

pub mod config;
pub mod context;
pub mod core;
pub mod error;
pub mod matrix;
pub mod solver;
pub mod utils;

// Re-exports for convenience
pub use config::*;
pub use context::*;
pub use crate::core::*;
pub use error::*;
pub use matrix::*;
pub use solver::*;
pub use utils::*;
