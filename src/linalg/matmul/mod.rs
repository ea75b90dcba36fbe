//! Matrix multiplication.

use crate::{MatMut, MatRef, Parallelism, RealField};
use core::any::TypeId;
use equator::assert;
use reborrow::*;

/// Computes the matrix product `[alpha * acc] + beta * lhs * rhs` and stores the result in `acc`.
///
/// Performs the operation:
/// - `acc = beta * lhs * rhs` if `alpha` is `None` (in this case, the preexisting values in `acc`
///   are not read, so it is allowed to be a view over uninitialized values if `E: Copy`),
/// - `acc = alpha * acc + beta * lhs * rhs` if `alpha` is `Some(_)`,
///
/// # Panics
///
/// Panics if the matrix dimensions are not compatible for matrix multiplication.
/// i.e.
///  - `acc.nrows() == lhs.nrows()`
///  - `acc.ncols() == rhs.ncols()`
///  - `lhs.ncols() == rhs.nrows()`
///
/// # Example
///
/// ```
/// use faer_sevd::{linalg::matmul::matmul, mat, Mat, Parallelism};
///
/// let lhs = mat![[0.0, 2.0], [1.0, 3.0]];
/// let rhs = mat![[4.0, 6.0], [5.0, 7.0]];
///
/// let mut acc = Mat::<f64>::zeros(2, 2);
/// let target = mat![
///     [
///         2.5 * (lhs.read(0, 0) * rhs.read(0, 0) + lhs.read(0, 1) * rhs.read(1, 0)),
///         2.5 * (lhs.read(0, 0) * rhs.read(0, 1) + lhs.read(0, 1) * rhs.read(1, 1)),
///     ],
///     [
///         2.5 * (lhs.read(1, 0) * rhs.read(0, 0) + lhs.read(1, 1) * rhs.read(1, 0)),
///         2.5 * (lhs.read(1, 0) * rhs.read(0, 1) + lhs.read(1, 1) * rhs.read(1, 1)),
///     ],
/// ];
///
/// matmul(acc.as_mut(), lhs.as_ref(), rhs.as_ref(), None, 2.5, Parallelism::None);
///
/// for i in 0..2 {
///     for j in 0..2 {
///         assert!((acc.read(i, j) - target.read(i, j)).abs() < 1e-12);
///     }
/// }
/// ```
#[track_caller]
#[inline]
pub fn matmul<E: RealField>(
    acc: MatMut<'_, E>,
    lhs: MatRef<'_, E>,
    rhs: MatRef<'_, E>,
    alpha: Option<E>,
    beta: E,
    parallelism: Parallelism,
) {
    assert!(all(
        acc.nrows() == lhs.nrows(),
        acc.ncols() == rhs.ncols(),
        lhs.ncols() == rhs.nrows(),
    ));
    matmul_imp(acc, lhs, rhs, alpha, beta, parallelism);
}

fn matmul_imp<E: RealField>(
    acc: MatMut<'_, E>,
    lhs: MatRef<'_, E>,
    rhs: MatRef<'_, E>,
    alpha: Option<E>,
    beta: E,
    parallelism: Parallelism,
) {
    let mut acc = acc;
    let m = acc.nrows();
    let n = acc.ncols();
    let k = lhs.ncols();

    if m == 0 || n == 0 {
        return;
    }

    if TypeId::of::<E>() == TypeId::of::<f32>() || TypeId::of::<E>() == TypeId::of::<f64>() {
        let gemm_parallelism = match parallelism {
            Parallelism::None => gemm::Parallelism::None,
            #[cfg(feature = "rayon")]
            Parallelism::Rayon(0) => gemm::Parallelism::Rayon(rayon::current_num_threads()),
            #[cfg(feature = "rayon")]
            Parallelism::Rayon(n_threads) => gemm::Parallelism::Rayon(n_threads),
        };

        // SAFETY: the dimensions were checked by the caller, and the strides come from valid views.
        unsafe {
            gemm::gemm(
                m,
                n,
                k,
                acc.rb_mut().as_ptr_mut(),
                acc.col_stride(),
                acc.row_stride(),
                alpha.is_some(),
                lhs.as_ptr(),
                lhs.col_stride(),
                lhs.row_stride(),
                rhs.as_ptr(),
                rhs.col_stride(),
                rhs.row_stride(),
                alpha.unwrap_or(E::zero()),
                beta,
                false,
                false,
                false,
                gemm_parallelism,
            );
        }
        return;
    }

    for j in 0..n {
        for i in 0..m {
            let mut dot = E::zero();
            for p in 0..k {
                dot = dot + unsafe { lhs.read_unchecked(i, p) * rhs.read_unchecked(p, j) };
            }
            let value = match alpha {
                Some(alpha) => alpha * unsafe { acc.read_unchecked(i, j) } + beta * dot,
                None => beta * dot,
            };
            unsafe { acc.write_unchecked(i, j, value) };
        }
    }
}
