//! Tests for core dense operations: matrix-vector multiplication, dot product and norms.
//!
//! These tests verify the MatVec and InnerProduct implementations for Faer
//! matrices and slices, using random and fixed data.

use approx::assert_abs_diff_eq;
use faer::Mat;
use itersolve::core::traits::{InnerProduct, MatVec};
use itersolve::{DenseMatrix, LinearSystem};
use rand::Rng;

/// Matrix-vector multiplication for a small random dense matrix, checked
/// against a manual row-major computation.
#[test]
fn matvec_random_small() {
    let n = 5;
    let mut rng = rand::thread_rng();
    let vals: Vec<f64> = (0..n * n).map(|_| rng.r#gen()).collect();
    let a: Mat<f64> = DenseMatrix::from_row_major(n, n, &vals);
    let x: Vec<f64> = (0..n).map(|_| rng.r#gen()).collect();
    let mut y = vec![0.0; n];
    a.matvec(&x, &mut y);

    for i in 0..n {
        let expected = (0..n).map(|j| vals[i * n + j] * x[j]).sum::<f64>();
        assert_abs_diff_eq!(y[i], expected, epsilon = 1e-12);
    }
}

#[test]
fn dot_and_norms() {
    let x = vec![1.0, 2.0, 3.0];
    let y = vec![4.0, -5.0, 6.0];
    assert_abs_diff_eq!(x.dot(&y), 1.0 * 4.0 + 2.0 * (-5.0) + 3.0 * 6.0, epsilon = 1e-12);
    let expected_norm = (1.0f64 + 4.0 + 9.0).sqrt();
    assert_abs_diff_eq!(x.norm(), expected_norm, epsilon = 1e-12);
    assert_abs_diff_eq!(y.norm_inf(), 6.0, epsilon = 1e-12);
}

/// A system built from a Faer matrix keeps its own copy.
#[test]
fn system_from_mat_is_a_copy() {
    let mut a = Mat::from_fn(2, 2, |i, j| if i == j { 2.0 } else { 0.5 });
    let system = LinearSystem::from_mat(&a, &[1.0, 1.0]).unwrap();
    a[(0, 0)] = -10.0;
    assert_eq!(system.a()[(0, 0)], 2.0);
    assert_eq!(system.dim(), 2);
}

#[test]
fn system_from_rectangular_mat_is_rejected() {
    let a = Mat::from_fn(2, 3, |_, _| 1.0);
    assert!(LinearSystem::from_mat(&a, &[1.0, 1.0]).is_err());
}
