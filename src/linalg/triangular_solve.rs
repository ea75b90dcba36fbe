//! Triangular solve module.

use crate::{utils::thread::join_raw, MatMut, MatRef, Parallelism, RealField};
use equator::assert;

const PARALLEL_RHS_THRESHOLD: usize = 16;

#[inline]
fn split_rhs(
    ncols: usize,
    parallelism: Parallelism,
) -> Option<usize> {
    if parallelism != Parallelism::None && ncols >= PARALLEL_RHS_THRESHOLD {
        Some(ncols / 2)
    } else {
        None
    }
}

/// Computes the solution of `triangular_lower × X = rhs`, and stores the result in `rhs`.
///
/// `triangular_lower` is interpreted as a lower triangular matrix (diagonal included).
/// Its strictly upper triangular part is not accessed.
///
/// # Panics
///
///  - Panics if `triangular_lower` is not a square matrix.
///  - Panics if `rhs.nrows() != triangular_lower.ncols()`
///
/// # Example
///
/// ```
/// use faer_sevd::{
///     linalg::triangular_solve::solve_lower_triangular_in_place, mat, Mat, Parallelism,
/// };
///
/// let m: Mat<f64> = mat![[1.0, 0.0], [2.0, 3.0]];
/// let rhs: Mat<f64> = mat![[4.0], [5.0]];
///
/// let mut sol = rhs.clone();
/// solve_lower_triangular_in_place(m.as_ref(), sol.as_mut(), Parallelism::None);
///
/// let result = &m * &sol;
///
/// assert!((result.read(0, 0) - rhs.read(0, 0)).abs() < 1e-10);
/// assert!((result.read(1, 0) - rhs.read(1, 0)).abs() < 1e-10);
/// ```
#[track_caller]
#[inline]
pub fn solve_lower_triangular_in_place<E: RealField>(
    triangular_lower: MatRef<'_, E>,
    rhs: MatMut<'_, E>,
    parallelism: Parallelism,
) {
    let n = triangular_lower.nrows();
    assert!(all(
        triangular_lower.ncols() == n,
        rhs.nrows() == n,
    ));

    if let Some(mid) = split_rhs(rhs.ncols(), parallelism) {
        let (rhs_left, rhs_right) = rhs.split_at_col_mut(mid);
        join_raw(
            |parallelism| solve_lower_triangular_in_place(triangular_lower, rhs_left, parallelism),
            |parallelism| {
                solve_lower_triangular_in_place(triangular_lower, rhs_right, parallelism)
            },
            parallelism,
        );
        return;
    }

    let mut rhs = rhs;
    let tril = triangular_lower;
    for j in 0..rhs.ncols() {
        for i in 0..n {
            unsafe {
                let mut acc = rhs.read_unchecked(i, j);
                for k in 0..i {
                    acc = acc - tril.read_unchecked(i, k) * rhs.read_unchecked(k, j);
                }
                rhs.write_unchecked(i, j, acc / tril.read_unchecked(i, i));
            }
        }
    }
}

/// Computes the solution of `triangular_upper × X = rhs`, and stores the result in `rhs`.
///
/// `triangular_upper` is interpreted as an upper triangular matrix (diagonal included).
/// Its strictly lower triangular part is not accessed. In particular, the transpose of a lower
/// triangular factor can be passed directly as a view.
///
/// # Panics
///
///  - Panics if `triangular_upper` is not a square matrix.
///  - Panics if `rhs.nrows() != triangular_upper.ncols()`
#[track_caller]
#[inline]
pub fn solve_upper_triangular_in_place<E: RealField>(
    triangular_upper: MatRef<'_, E>,
    rhs: MatMut<'_, E>,
    parallelism: Parallelism,
) {
    let n = triangular_upper.nrows();
    assert!(all(
        triangular_upper.ncols() == n,
        rhs.nrows() == n,
    ));

    if let Some(mid) = split_rhs(rhs.ncols(), parallelism) {
        let (rhs_left, rhs_right) = rhs.split_at_col_mut(mid);
        join_raw(
            |parallelism| solve_upper_triangular_in_place(triangular_upper, rhs_left, parallelism),
            |parallelism| {
                solve_upper_triangular_in_place(triangular_upper, rhs_right, parallelism)
            },
            parallelism,
        );
        return;
    }

    let mut rhs = rhs;
    let triu = triangular_upper;
    for j in 0..rhs.ncols() {
        for i in (0..n).rev() {
            unsafe {
                let mut acc = rhs.read_unchecked(i, j);
                for k in i + 1..n {
                    acc = acc - triu.read_unchecked(i, k) * rhs.read_unchecked(k, j);
                }
                rhs.write_unchecked(i, j, acc / triu.read_unchecked(i, i));
            }
        }
    }
}
