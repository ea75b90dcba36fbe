//! Householder reflections.
//!
//! A Householder reflection is a linear transformation of the form
//! $$H = I - \tau v v^\top,$$
//! where $v = \begin{bmatrix} 1 \\\\ v_\text{essential} \end{bmatrix}$ and $\tau = 2 / \|v\|^2$,
//! so that $H$ is symmetric and orthogonal. Only the essential part of $v$ is stored.

use crate::{MatMut, MatRef, RealField};
use equator::assert;

/// Computes the Householder reflection $H$ such that
/// $$H \begin{bmatrix} \text{head} \\\\ \text{tail} \end{bmatrix} = \begin{bmatrix} \beta \\\\ 0
/// \end{bmatrix},$$
/// overwrites `essential` (initially holding `tail`, as a column) with the essential part of
/// $v$, and returns $(\tau, \beta)$.
///
/// When the tail is already zero, the reflection is the identity and $\tau = 0$.
#[inline]
pub fn make_householder_in_place<E: RealField>(
    essential: MatMut<'_, E>,
    head: E,
    tail_squared_norm: E,
) -> (E, E) {
    if tail_squared_norm == E::zero() {
        return (E::zero(), head);
    }

    let one = E::one();
    let norm = (head.faer_abs2() + tail_squared_norm).sqrt();
    let signed_norm = if head < E::zero() { -norm } else { norm };
    let head_with_beta = head + signed_norm;
    let inv = head_with_beta.recip();

    let mut essential = essential;
    for j in 0..essential.ncols() {
        for i in 0..essential.nrows() {
            let e = essential.read(i, j);
            essential.write(i, j, e * inv);
        }
    }

    let tau = (one + one) / (one + tail_squared_norm * inv.faer_abs2());
    (tau, -signed_norm)
}

/// Computes $M \gets H M$ where $H = I - \tau v v^\top$ and $v = [1; \text{essential}]$.
///
/// # Panics
/// Panics if `essential` is not a column with `matrix.nrows() - 1` rows.
#[track_caller]
#[inline]
pub fn apply_householder_on_the_left_in_place<E: RealField>(
    essential: MatRef<'_, E>,
    tau: E,
    matrix: MatMut<'_, E>,
) {
    let m = matrix.nrows();
    assert!(all(m > 0, essential.ncols() == 1, essential.nrows() == m - 1));

    if tau == E::zero() {
        return;
    }

    let mut matrix = matrix;
    for j in 0..matrix.ncols() {
        let mut dot = matrix.read(0, j);
        for i in 1..m {
            dot = dot + essential.read(i - 1, 0) * matrix.read(i, j);
        }
        let k = tau * dot;

        let head = matrix.read(0, j);
        matrix.write(0, j, head - k);
        for i in 1..m {
            let x = matrix.read(i, j);
            matrix.write(i, j, x - k * essential.read(i - 1, 0));
        }
    }
}
