//! API options shared by every iterative solver.
//!
//! `SolverOptions` carries the convergence tolerance, the optional iteration
//! budget and the norm used on successive differences. Relaxation factors are
//! rule-specific and passed to the relaxed Gauss-Seidel constructor instead.

use crate::error::ConfigurationError;
use crate::utils::convergence::{Convergence, Norm};
use num_traits::Float;

/// Convergence parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverOptions<T> {
    /// Stop once ‖x_k - x_{k-1}‖ is at or below this value
    pub epsilon: T,

    /// Report converged after this many iterates regardless of precision
    pub max_iterations: Option<usize>,

    /// Norm applied to the step
    pub norm: Norm,
}

impl Default for SolverOptions<f64> {
    fn default() -> Self {
        Self { epsilon: 1e-9, max_iterations: None, norm: Norm::Max }
    }
}

impl<T: Float> SolverOptions<T> {
    pub fn new(epsilon: T) -> Self {
        Self { epsilon, max_iterations: None, norm: Norm::Max }
    }

    pub fn with_epsilon(mut self, epsilon: T) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn with_norm(mut self, norm: Norm) -> Self {
        self.norm = norm;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.epsilon.is_finite() || self.epsilon < T::zero() {
            return Err(ConfigurationError::InvalidParameter {
                name: "epsilon",
                reason: "must be finite and non-negative".into(),
            });
        }
        if self.max_iterations == Some(0) {
            return Err(ConfigurationError::InvalidParameter {
                name: "max_iterations",
                reason: "must allow at least one iteration".into(),
            });
        }
        Ok(())
    }

    /// Validated stopping criteria for these options.
    pub fn convergence(&self) -> Result<Convergence<T>, ConfigurationError> {
        self.validate()?;
        Ok(Convergence::new(self.epsilon, self.max_iterations, self.norm))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(SolverOptions::default().validate().is_ok());
    }

    #[test]
    fn rejects_negative_epsilon() {
        let err = SolverOptions::new(-1.0).validate().unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidParameter { name: "epsilon", .. }));
    }

    #[test]
    fn rejects_zero_budget() {
        let err = SolverOptions::default().with_max_iterations(0).convergence().unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidParameter { name: "max_iterations", .. }));
    }
}
