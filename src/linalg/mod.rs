//! Linear algebra module.
//!
//! Contains the building blocks of the self-adjoint eigenvalue decomposition (Givens rotations,
//! Householder reflections, matrix products, triangular solves, Cholesky factorization), the
//! decompositions themselves, and the high level solver objects in [`solvers`].
//!
//! The low level routines take their temporary memory from a [`PodStack`], and each of them
//! has a companion `*_req` function computing the size and alignment of the memory it needs.

use crate::{mat, MatMut, RealField};
use dyn_stack::{PodStack, SizeOverflow, StackReq};

pub mod cholesky;
pub mod evd;
pub mod gevd;
pub mod householder;
pub mod jacobi;
mod mat_ops;
pub mod matmul;
pub mod solvers;
pub mod triangular_solve;

/// Returns the stack requirements for creating a temporary matrix with the given dimensions.
#[inline]
pub fn temp_mat_req<E: RealField>(nrows: usize, ncols: usize) -> Result<StackReq, SizeOverflow> {
    StackReq::try_new::<E>(nrows.checked_mul(ncols).ok_or(SizeOverflow)?)
}

/// Creates a temporary column-major matrix of untouched values, from the given memory stack.
///
/// # Panics
/// Panics if the stack does not have enough memory left (see [`temp_mat_req`]).
#[track_caller]
#[inline]
pub fn temp_mat_uninit<E: RealField>(
    nrows: usize,
    ncols: usize,
    stack: PodStack<'_>,
) -> (MatMut<'_, E>, PodStack<'_>) {
    let (alloc, stack) = stack.make_raw::<E>(nrows * ncols);
    (mat::from_column_major_slice_mut(alloc, nrows, ncols), stack)
}

/// Creates a temporary matrix of zero values, from the given memory stack.
#[track_caller]
#[inline]
pub fn temp_mat_zeroed<E: RealField>(
    nrows: usize,
    ncols: usize,
    stack: PodStack<'_>,
) -> (MatMut<'_, E>, PodStack<'_>) {
    let (mut mat, stack) = temp_mat_uninit::<E>(nrows, ncols, stack);
    mat.fill_zero();
    (mat, stack)
}
