use super::CholeskyError;
use crate::{linalg::matmul::matmul, MatMut, Parallelism, RealField};
use equator::assert;
use reborrow::*;

/// Computes the Cholesky factor $L$ of the input matrix such that $L$ is lower triangular, and
/// $$LL^\top == A.$$
///
/// The result is stored back in the lower half of the same matrix, or an error is returned if
/// the matrix is not positive definite.
///
/// The input matrix is interpreted as symmetric and only the lower triangular part is read. The
/// strictly upper triangular part is left untouched.
///
/// # Panics
///
/// Panics if the input matrix is not square.
#[track_caller]
pub fn cholesky_in_place<E: RealField>(
    matrix: MatMut<'_, E>,
    parallelism: Parallelism,
) -> Result<(), CholeskyError> {
    let n = matrix.nrows();
    assert!(matrix.ncols() == n);

    #[cfg(feature = "perf-warn")]
    if matrix.row_stride().unsigned_abs() != 1 && crate::__perf_warn!(CHOLESKY_WARN) {
        if matrix.col_stride().unsigned_abs() == 1 {
            log::warn!(target: "faer_perf", "LLT prefers column-major matrix. Found row-major matrix.");
        } else {
            log::warn!(target: "faer_perf", "LLT prefers column-major matrix. Found matrix with generic strides.");
        }
    }

    let mut matrix = matrix;
    let zero = E::zero();

    for idx in 0..n {
        //
        //      L00
        // A =  L10  A11
        //      L20  A21  A22
        //
        // the first idx columns are already computed
        // we now compute A11 and A21
        //
        // A11 = L10×L10^T + L11×L11^T
        // A21 = L20×L10^T + L21×L11^T
        let (left, right) = matrix.rb_mut().split_at_col_mut(idx);
        let left = left.into_const();
        let l10 = left.submatrix(idx, 0, 1, idx);
        let l20 = left.submatrix(idx + 1, 0, n - idx - 1, idx);
        let mut col = right.submatrix_mut(idx, 0, n - idx, 1);

        let mut a11 = col.read(0, 0);
        for j in 0..idx {
            a11 = a11 - l10.read(0, j).faer_abs2();
        }

        // also rejects nan
        if !(a11 > zero) {
            return Err(CholeskyError {
                non_positive_definite_minor: idx + 1,
            });
        }
        let l11 = a11.sqrt();
        col.write(0, 0, l11);

        let mut a21 = col.submatrix_mut(1, 0, n - idx - 1, 1);
        if idx > 0 {
            matmul(
                a21.rb_mut(),
                l20,
                l10.transpose(),
                Some(E::one()),
                -E::one(),
                parallelism,
            );
        }

        let inv = l11.recip();
        for i in 0..a21.nrows() {
            let x = a21.read(i, 0);
            a21.write(i, 0, x * inv);
        }
    }

    Ok(())
}
