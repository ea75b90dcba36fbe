use crate::{linalg::triangular_solve, MatMut, MatRef, Parallelism, RealField};
use equator::assert;
use reborrow::*;

/// Given the Cholesky factor of a matrix $A$ and a matrix $B$ stored in `rhs`, this function
/// computes the solution of the linear system:
/// $$AX = B.$$
///
/// The solution $X$ is stored in `rhs`. Only the lower triangular part of `cholesky_factor` is
/// accessed.
///
/// # Panics
///
/// - Panics if `cholesky_factor` is not a square matrix.
/// - Panics if `rhs.nrows() != cholesky_factor.nrows()`.
#[track_caller]
pub fn solve_in_place<E: RealField>(
    cholesky_factor: MatRef<'_, E>,
    rhs: MatMut<'_, E>,
    parallelism: Parallelism,
) {
    let n = cholesky_factor.nrows();
    assert!(all(cholesky_factor.ncols() == n, rhs.nrows() == n));

    let mut rhs = rhs;
    triangular_solve::solve_lower_triangular_in_place(cholesky_factor, rhs.rb_mut(), parallelism);
    triangular_solve::solve_upper_triangular_in_place(
        cholesky_factor.transpose(),
        rhs.rb_mut(),
        parallelism,
    );
}
