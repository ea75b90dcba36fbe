//! Low level implementation of the generalized symmetric-definite eigenvalue problem
//! $$A v = \lambda B v,$$
//! where $A$ is symmetric and $B$ is symmetric positive definite.
//!
//! With the Cholesky factorization $B = L L^\top$, the problem is equivalent to the standard
//! symmetric problem
//! $$C w = \lambda w, \quad C = L^{-1} A L^{-\top}, \quad v = L^{-\top} w.$$

use crate::{
    linalg::{
        cholesky::llt::{cholesky_in_place, CholeskyError},
        evd::{self_adjoint_evd, self_adjoint_evd_req, ComputeVectors, EvdError, SelfAdjointEvdParams},
        temp_mat_req, temp_mat_uninit, temp_mat_zeroed,
        triangular_solve::{solve_lower_triangular_in_place, solve_upper_triangular_in_place},
    },
    MatMut, MatRef, Parallelism, RealField,
};
use dyn_stack::{PodStack, SizeOverflow, StackReq};
use equator::assert;
use reborrow::*;

/// Error returned by the generalized eigenvalue decomposition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GevdError {
    /// The right hand side matrix $B$ is not numerically positive definite.
    NonPositiveDefinite(CholeskyError),
    /// The eigenvalue decomposition of the reduced problem did not converge.
    NoConvergence,
}

impl From<CholeskyError> for GevdError {
    #[inline]
    fn from(value: CholeskyError) -> Self {
        Self::NonPositiveDefinite(value)
    }
}

impl From<EvdError> for GevdError {
    #[inline]
    fn from(value: EvdError) -> Self {
        match value {
            EvdError::NoConvergence => Self::NoConvergence,
        }
    }
}

impl core::fmt::Display for GevdError {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GevdError::NonPositiveDefinite(err) => write!(
                f,
                "the matrix B is not positive definite (leading minor of dimension {})",
                err.non_positive_definite_minor,
            ),
            GevdError::NoConvergence => f.write_str("the eigenvalue decomposition did not converge"),
        }
    }
}

impl std::error::Error for GevdError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GevdError::NonPositiveDefinite(err) => Some(err),
            GevdError::NoConvergence => None,
        }
    }
}

/// Computes the size and alignment of required workspace for solving a generalized
/// symmetric-definite eigenvalue problem.
pub fn self_adjoint_gevd_req<E: RealField>(
    n: usize,
    compute_eigenvectors: ComputeVectors,
    parallelism: Parallelism,
    params: SelfAdjointEvdParams,
) -> Result<StackReq, SizeOverflow> {
    StackReq::try_all_of([
        temp_mat_req::<E>(n, n)?,
        temp_mat_req::<E>(n, n)?,
        self_adjoint_evd_req::<E>(n, compute_eigenvectors, parallelism, params)?,
    ])
}

/// Computes the eigenvalues, and optionally the eigenvectors, of the generalized problem
/// $Av = \lambda Bv$. Only the lower triangular halves of `a` and `b` are accessed.
///
/// The eigenvalues are stored in `s` in ascending order. If `u` is provided, its `j`-th column is
/// set to the eigenvector associated with `s[j]`, normalized to unit euclidean norm. The
/// eigenvectors are not orthogonal in general, they are $B$-orthogonal up to scaling.
///
/// # Panics
/// Panics if `a` or `b` is not square, if their dimensions differ, or if `s` and `u` do not have
/// the matching dimension.
///
/// This can also panic if the provided memory in `stack` is insufficient (see
/// [`self_adjoint_gevd_req`]).
#[track_caller]
pub fn self_adjoint_gevd<E: RealField>(
    a: MatRef<'_, E>,
    b: MatRef<'_, E>,
    s: &mut [E],
    u: Option<MatMut<'_, E>>,
    parallelism: Parallelism,
    stack: PodStack<'_>,
    params: SelfAdjointEvdParams,
) -> Result<(), GevdError> {
    let n = a.nrows();
    let mut u = u;

    assert!(all(
        a.ncols() == n,
        b.nrows() == n,
        b.ncols() == n,
        s.len() == n,
    ));
    if let Some(u) = u.rb() {
        assert!(all(u.nrows() == n, u.ncols() == n));
    }

    if n == 0 {
        return Ok(());
    }

    let (mut l, stack) = temp_mat_zeroed::<E>(n, n, stack);
    for j in 0..n {
        for i in j..n {
            l.write(i, j, b.read(i, j));
        }
    }
    cholesky_in_place(l.rb_mut(), parallelism)?;
    let l = l.into_const();

    // C = L^-1 A L^-T
    let (mut c, stack) = temp_mat_uninit::<E>(n, n, stack);
    for j in 0..n {
        for i in j..n {
            let x = a.read(i, j);
            c.write(i, j, x);
            c.write(j, i, x);
        }
    }
    solve_lower_triangular_in_place(l, c.rb_mut(), parallelism);
    solve_lower_triangular_in_place(l, c.rb_mut().transpose_mut(), parallelism);

    self_adjoint_evd(c.rb(), s, u.rb_mut(), parallelism, stack, params)?;

    if let Some(mut u) = u {
        // V = L^-T W
        solve_upper_triangular_in_place(l.transpose(), u.rb_mut(), parallelism);

        for j in 0..n {
            let mut col = u.rb_mut().col_mut(j);
            let norm = col.rb().norm_l2();
            if norm > E::zero() {
                let inv = norm.recip();
                for i in 0..n {
                    let x = col.read(i, 0);
                    col.write(i, 0, x * inv);
                }
            }
        }
    }

    log::debug!(target: "faer_sevd", "generalized self-adjoint evd of dimension {n}");

    Ok(())
}
