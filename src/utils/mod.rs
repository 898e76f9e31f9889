pub mod convergence;

pub use convergence::{Convergence, Norm, SolveStats, Termination};
