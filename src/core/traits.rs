//! Core linear-algebra traits for itersolve.

/// Matrix–vector product: y ← A x.
pub trait MatVec<T> {
    /// Compute y = A · x.
    fn matvec(&self, x: &[T], y: &mut [T]);
}

/// Inner products & norms over a dense vector.
pub trait InnerProduct<T> {
    /// Compute dot(self, other).
    fn dot(&self, other: &[T]) -> T;
    /// Compute ‖self‖₂.
    fn norm(&self) -> T;
    /// Compute ‖self‖∞.
    fn norm_inf(&self) -> T;
}
