use thiserror::Error;

// Unified error type for itersolve

/// Construction-time misuse: bad shapes or parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("invalid dimensions: matrix is {rows}x{cols}, right-hand side has length {rhs}")]
    InvalidDimensions { rows: usize, cols: usize, rhs: usize },
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// API-contract violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("approximation sequence can not be requested again")]
    SequenceAlreadyConsumed,
}

/// Numerical failures raised while a sequence is being produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComputationError {
    #[error("update rule returned a vector of length {actual}, expected {expected}")]
    MalformedUpdate { expected: usize, actual: usize },
    #[error("singular system: no usable pivot in column {column}")]
    SingularSystem { column: usize },
    #[error("degenerate diagonal entry at row {row}")]
    DegenerateDiagonal { row: usize },
    #[error("non-finite value produced at iteration {iteration}")]
    NonFinite { iteration: usize },
    #[error("breakdown: {0}")]
    Breakdown(&'static str),
    #[error("approximation sequence yielded no value")]
    EmptySequence,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("usage error: {0}")]
    Usage(#[from] UsageError),
    #[error("computation error: {0}")]
    Computation(#[from] ComputationError),
}

pub type Result<T> = std::result::Result<T, SolverError>;
