//! Reduction of a symmetric matrix to tridiagonal form by orthogonal similarity.
//!
//! The matrix $A$ is decomposed as $A = Q T Q^\top$, where $T$ is symmetric tridiagonal and
//! $Q = H_0 H_1 \dots H_{n-2}$ is a product of Householder reflections.

use crate::{
    linalg::{
        householder::{apply_householder_on_the_left_in_place, make_householder_in_place},
        matmul::matmul,
    },
    mat, MatMut, MatRef, Parallelism, RealField,
};
use dyn_stack::{PodStack, SizeOverflow, StackReq};
use equator::assert;
use reborrow::*;

/// Computes the size and alignment of required workspace for performing a tridiagonalization.
pub fn tridiagonalize_in_place_req<E: RealField>(n: usize) -> Result<StackReq, SizeOverflow> {
    StackReq::try_all_of([StackReq::try_new::<E>(n)?, StackReq::try_new::<E>(n)?])
}

/// Reduces the symmetric matrix `matrix` to tridiagonal form, in place.
///
/// Both triangles of `matrix` must be filled. On exit:
/// - the diagonal of `matrix` contains the diagonal of $T$,
/// - the first sub-diagonal contains the sub-diagonal of $T$,
/// - the entries below the first sub-diagonal of column `k` contain the essential part of the
///   Householder vector of $H_k$, whose coefficient $\tau_k$ is stored in
///   `householder_coeffs[k]`.
///
/// The strictly upper triangular part is left in an unspecified state.
///
/// # Panics
/// - Panics if `matrix` is not square.
/// - Panics if `householder_coeffs.len() != n - 1` (or `0` for an empty matrix).
///
/// This can also panic if the provided memory in `stack` is insufficient (see
/// [`tridiagonalize_in_place_req`]).
#[track_caller]
pub fn tridiagonalize_in_place<E: RealField>(
    matrix: MatMut<'_, E>,
    householder_coeffs: &mut [E],
    parallelism: Parallelism,
    stack: PodStack<'_>,
) {
    let n = matrix.nrows();
    assert!(all(
        matrix.ncols() == n,
        householder_coeffs.len() == n.saturating_sub(1),
    ));

    #[cfg(feature = "perf-warn")]
    if matrix.row_stride().unsigned_abs() != 1 && crate::__perf_warn!(TRIDIAG_WARN) {
        if matrix.col_stride().unsigned_abs() == 1 {
            log::warn!(target: "faer_perf", "tridiagonalization prefers column-major matrix. Found row-major matrix.");
        } else {
            log::warn!(target: "faer_perf", "tridiagonalization prefers column-major matrix. Found matrix with generic strides.");
        }
    }

    if n < 2 {
        return;
    }

    let mut matrix = matrix;
    let (v_storage, stack) = stack.make_raw::<E>(n);
    let (p_storage, _) = stack.make_raw::<E>(n);

    for k in 0..n - 1 {
        let m = n - k - 1;

        let head = matrix.read(k + 1, k);
        let mut tail_squared_norm = E::zero();
        for i in k + 2..n {
            tail_squared_norm = tail_squared_norm + matrix.read(i, k).faer_abs2();
        }

        let (tau, beta) = make_householder_in_place(
            matrix.rb_mut().submatrix_mut(k + 2, k, m - 1, 1),
            head,
            tail_squared_norm,
        );
        matrix.write(k + 1, k, beta);
        matrix.write(k, k + 1, beta);
        householder_coeffs[k] = tau;

        if tau == E::zero() {
            continue;
        }

        // A22 ← H A22 H, with
        // p = tau A22 v
        // w = p - tau/2 (p^T v) v
        // A22 ← A22 - v w^T - w v^T
        let v = &mut v_storage[..m];
        v[0] = E::one();
        for i in 1..m {
            v[i] = matrix.read(k + 1 + i, k);
        }
        let p = &mut p_storage[..m];

        matmul(
            mat::from_slice_as_col_mut(p),
            matrix.rb().submatrix(k + 1, k + 1, m, m),
            mat::from_slice_as_col(v),
            None,
            tau,
            parallelism,
        );

        let mut ptv = E::zero();
        for i in 0..m {
            ptv = ptv + p[i] * v[i];
        }
        let alpha = -(tau * E::faer_from_f64(0.5)) * ptv;
        for i in 0..m {
            p[i] = p[i] + alpha * v[i];
        }
        let w = &*p;

        let mut a22 = matrix.rb_mut().submatrix_mut(k + 1, k + 1, m, m);
        for j in 0..m {
            for i in 0..m {
                unsafe {
                    let a = a22.read_unchecked(i, j);
                    a22.write_unchecked(i, j, a - v[i] * w[j] - w[i] * v[j]);
                }
            }
        }
    }
}

/// Computes the orthogonal factor $Q$ of the tridiagonalization from the output of
/// [`tridiagonalize_in_place`], and stores it in `q`.
///
/// # Panics
/// Panics if `q` does not have the same dimensions as `tridiag`, or if `householder_coeffs` does
/// not have length `n - 1`.
#[track_caller]
pub fn accumulate_q<E: RealField>(
    tridiag: MatRef<'_, E>,
    householder_coeffs: &[E],
    q: MatMut<'_, E>,
) {
    let n = tridiag.nrows();
    assert!(all(
        tridiag.ncols() == n,
        q.nrows() == n,
        q.ncols() == n,
        householder_coeffs.len() == n.saturating_sub(1),
    ));

    let mut q = q;
    for j in 0..n {
        for i in 0..n {
            q.write(i, j, if i == j { E::one() } else { E::zero() });
        }
    }

    // Q = H_0 (H_1 (... H_{n-2}))
    for k in (0..n.saturating_sub(1)).rev() {
        let m = n - k - 1;
        apply_householder_on_the_left_in_place(
            tridiag.submatrix(k + 2, k, m - 1, 1),
            householder_coeffs[k],
            q.rb_mut().submatrix_mut(k + 1, k + 1, m, m),
        );
    }
}
