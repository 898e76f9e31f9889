//! Matrix module: dense storage and the immutable `(A, b)` snapshot.

pub mod dense;
pub use dense::DenseMatrix;
pub mod system;
pub use system::LinearSystem;
