//! Low level implementation of the eigenvalue decomposition of a real symmetric matrix.
//!
//! The eigenvalue decomposition of a symmetric matrix $M$ of shape $(n, n)$ is a decomposition
//! into two components $U$, $S$:
//!
//! - $U$ has shape $(n, n)$ and is orthogonal,
//! - $S$ has shape $(n, n)$ and is a diagonal matrix with real entries,
//! - and finally:
//!
//! $$M = U S U^\top.$$
//!
//! The matrix is first reduced to tridiagonal form ([`tridiag`]), then the tridiagonal matrix is
//! diagonalized by implicit QR sweeps ([`tridiag_evd`]).

use crate::{
    linalg::{temp_mat_req, temp_mat_uninit},
    MatMut, MatRef, Parallelism, RealField,
};
use dyn_stack::{PodStack, SizeOverflow, StackReq};
use equator::assert;
use reborrow::*;

pub mod tridiag;
pub mod tridiag_evd;

/// Indicates whether the eigenvectors are computed or skipped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ComputeVectors {
    /// Do not compute the eigenvectors.
    No,
    /// Do compute the eigenvectors.
    Yes,
}

/// Error returned by the eigenvalue decomposition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EvdError {
    /// The QR algorithm exceeded its sweep limit before all the sub-diagonal entries became
    /// negligible.
    NoConvergence,
}

impl core::fmt::Display for EvdError {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EvdError::NoConvergence => f.write_str("the eigenvalue decomposition did not converge"),
        }
    }
}

impl std::error::Error for EvdError {}

/// Self-adjoint eigendecomposition tuning parameters.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct SelfAdjointEvdParams {
    /// Maximum number of QR sweeps before reporting [`EvdError::NoConvergence`].
    ///
    /// Defaults to `max(30, nbits / 2) * n * n`, where `nbits` is the number of mantissa bits of
    /// the scalar type.
    pub max_iter: Option<usize>,
}

impl SelfAdjointEvdParams {
    /// Returns the parameters with the given sweep limit.
    #[inline]
    pub fn with_max_iter(self, max_iter: usize) -> Self {
        Self {
            max_iter: Some(max_iter),
        }
    }
}

/// Computes the size and alignment of required workspace for performing a self-adjoint
/// eigenvalue decomposition. The eigenvectors may be optionally computed.
pub fn self_adjoint_evd_req<E: RealField>(
    n: usize,
    compute_eigenvectors: ComputeVectors,
    parallelism: Parallelism,
    params: SelfAdjointEvdParams,
) -> Result<StackReq, SizeOverflow> {
    let _ = compute_eigenvectors;
    let _ = parallelism;
    let _ = params;
    StackReq::try_all_of([
        temp_mat_req::<E>(n, n)?,
        StackReq::try_new::<E>(n)?,
        StackReq::try_new::<E>(n)?,
        tridiag::tridiagonalize_in_place_req::<E>(n)?,
    ])
}

/// Computes the eigenvalue decomposition of a square symmetric `matrix`. Only the lower triangular
/// half of the matrix is accessed.
///
/// `s` represents the diagonal of the matrix $S$, and must have size equal to the dimension of the
/// matrix. The eigenvalues are stored in ascending order.
///
/// If `u` is `None`, then only the eigenvalues are computed. Otherwise, the eigenvectors are
/// computed and stored in `u`, the `j`-th column being associated with `s[j]`.
///
/// If the lower triangular half contains non-finite values, `s` and `u` are filled with NaN.
///
/// # Panics
/// Panics if any of the conditions described above is violated.
///
/// This can also panic if the provided memory in `stack` is insufficient (see
/// [`self_adjoint_evd_req`]).
#[track_caller]
pub fn self_adjoint_evd<E: RealField>(
    matrix: MatRef<'_, E>,
    s: &mut [E],
    u: Option<MatMut<'_, E>>,
    parallelism: Parallelism,
    stack: PodStack<'_>,
    params: SelfAdjointEvdParams,
) -> Result<(), EvdError> {
    self_adjoint_evd_custom_epsilon(
        matrix,
        s,
        u,
        E::faer_epsilon(),
        E::faer_zero_threshold(),
        parallelism,
        stack,
        params,
    )
}

/// See [`self_adjoint_evd`].
///
/// This function takes an additional `epsilon` and `zero_threshold` parameters. `epsilon`
/// represents the precision of the values in the matrix, and `zero_threshold` is the value below
/// which the precision starts to deteriorate, e.g. due to denormalized numbers.
#[track_caller]
pub fn self_adjoint_evd_custom_epsilon<E: RealField>(
    matrix: MatRef<'_, E>,
    s: &mut [E],
    u: Option<MatMut<'_, E>>,
    epsilon: E,
    zero_threshold: E,
    parallelism: Parallelism,
    stack: PodStack<'_>,
    params: SelfAdjointEvdParams,
) -> Result<(), EvdError> {
    let n = matrix.nrows();
    let mut u = u;

    assert!(all(matrix.ncols() == n, s.len() == n));
    if let Some(u) = u.rb() {
        assert!(all(u.nrows() == n, u.ncols() == n));
    }

    if n == 0 {
        return Ok(());
    }

    #[cfg(feature = "perf-warn")]
    if let Some(matrix) = u.rb() {
        if matrix.row_stride().unsigned_abs() != 1 && crate::__perf_warn!(EVD_WARN) {
            if matrix.col_stride().unsigned_abs() == 1 {
                log::warn!(target: "faer_perf", "EVD prefers column-major eigenvector matrix. Found row-major matrix.");
            } else {
                log::warn!(target: "faer_perf", "EVD prefers column-major eigenvector matrix. Found matrix with generic strides.");
            }
        }
    }

    let mut all_finite = true;
    let mut norm_max = E::zero();
    for j in 0..n {
        for i in j..n {
            let x = matrix.read(i, j);
            all_finite &= x.faer_is_finite();
            if x.abs() > norm_max {
                norm_max = x.abs();
            }
        }
    }

    if !all_finite {
        log::debug!(target: "faer_sevd", "self-adjoint evd of dimension {n}: non-finite input");
        s.fill(E::nan());
        if let Some(mut u) = u {
            u.fill(E::nan());
        }
        return Ok(());
    }

    if n == 1 {
        s[0] = matrix.read(0, 0);
        if let Some(mut u) = u {
            u.write(0, 0, E::one());
        }
        return Ok(());
    }

    // unit max-norm before the householder reduction
    let scale = if norm_max == E::zero() {
        E::one()
    } else {
        norm_max
    };

    let (mut trid, stack) = temp_mat_uninit::<E>(n, n, stack);
    for j in 0..n {
        for i in j..n {
            let x = matrix.read(i, j) / scale;
            trid.write(i, j, x);
            trid.write(j, i, x);
        }
    }

    let (householder, stack) = stack.make_raw::<E>(n);
    let (offdiag, stack) = stack.make_raw::<E>(n);
    let householder = &mut householder[..n - 1];
    let offdiag = &mut offdiag[..n - 1];

    tridiag::tridiagonalize_in_place(trid.rb_mut(), householder, parallelism, stack);

    for i in 0..n {
        s[i] = trid.read(i, i);
    }
    for i in 0..n - 1 {
        offdiag[i] = trid.read(i + 1, i);
    }

    if let Some(u) = u.rb_mut() {
        tridiag::accumulate_q(trid.rb(), householder, u);
    }

    let max_iter = params
        .max_iter
        .unwrap_or_else(|| tridiag_evd::default_max_iter::<E>(n));

    let result = tridiag_evd::compute_tridiag_evd(s, offdiag, u, epsilon, zero_threshold, max_iter);
    for x in s.iter_mut() {
        *x = *x * scale;
    }
    let info = result?;

    log::debug!(
        target: "faer_sevd",
        "self-adjoint evd of dimension {n}: {} QR sweeps",
        info.sweeps,
    );

    Ok(())
}
