//! Context module for itersolve.
//!
//! This module provides factory types for configuring and building solver
//! rosters: algorithm selection, parameter management and construction of one
//! solver per selected method.
//!
//! # Example
//! ```rust
//! use itersolve::context::SolverContext;
//! use itersolve::SolverOptions;
//!
//! let ctx = SolverContext::comparison(SolverOptions::default());
//! let solvers = ctx.build(&[vec![4.0, 1.0], vec![1.0, 3.0]], &[1.0, 2.0]).unwrap();
//! assert_eq!(solvers.len(), 9);
//! ```

pub mod solver_context;
pub use solver_context::{Methods, SolverContext, SolverKind};
