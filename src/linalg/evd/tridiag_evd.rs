// Algorithm ported from Eigen, a lightweight C++ template library
// for linear algebra.
//
// Copyright (C) 2008-2010 Gael Guennebaud <gael.guennebaud@inria.fr>
// Copyright (C) 2010 Jitse Niesen <jitse@maths.leeds.ac.uk>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Eigenvalue decomposition of a symmetric tridiagonal matrix, by implicit QR sweeps with
//! Wilkinson shifts.

use super::EvdError;
use crate::{linalg::jacobi::JacobiRotation, perm::swap_cols, MatMut, RealField};
use equator::assert;
use reborrow::*;

/// Statistics about a successful tridiagonal eigenvalue decomposition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TridiagEvdInfo {
    /// Number of implicit QR sweeps that were performed.
    pub sweeps: usize,
}

/// Returns the default number of QR sweeps after which the iteration is considered to have
/// failed, for a tridiagonal matrix of dimension `n`.
#[inline]
pub fn default_max_iter<E: RealField>(n: usize) -> usize {
    Ord::max(30, E::faer_nbits() / 2).saturating_mul(n.saturating_mul(n))
}

/// Computes the Wilkinson shift of the trailing $2\times 2$ block at `(end - 1, end)`, i.e. the
/// eigenvalue of that block closest to `diag[end]`.
#[inline]
pub fn wilkinson_shift<E: RealField>(diag: &[E], offdiag: &[E], end: usize) -> E {
    let td = (diag[end - 1] - diag[end]) * E::faer_from_f64(0.5);
    let e = offdiag[end - 1];

    let mut mu = diag[end];
    if td == E::zero() {
        mu = mu - e.abs();
    } else if e != E::zero() {
        let e2 = e.faer_abs2();
        let h = (td.faer_abs2() + e2).sqrt();
        let h = if td > E::zero() { h } else { -h };
        if e2 == E::zero() {
            mu = mu - e / ((td + h) / e);
        } else {
            mu = mu - e2 / (td + h);
        }
    }
    mu
}

/// Performs one implicit symmetric QR sweep with Wilkinson shift over the unreduced block
/// `start..=end` of the tridiagonal matrix with diagonal `diag` and sub-diagonal `offdiag`.
///
/// If `u` is provided, it is multiplied on the right by every Givens rotation of the sweep.
///
/// # Panics
/// Panics if `start >= end`, if `end` is out of bounds for `diag` or `offdiag`, or if `u` has
/// fewer than `end + 1` columns.
#[track_caller]
pub fn qr_step<E: RealField>(
    diag: &mut [E],
    offdiag: &mut [E],
    start: usize,
    end: usize,
    u: Option<MatMut<'_, E>>,
) {
    assert!(all(
        start < end,
        end < diag.len(),
        end <= offdiag.len(),
    ));
    let mut u = u;
    if let Some(u) = u.rb() {
        assert!(u.ncols() > end);
    }

    let mu = wilkinson_shift(diag, offdiag, end);

    let mut x = diag[start] - mu;
    let mut z = offdiag[start];

    let mut k = start;
    while k < end && z != E::zero() {
        let rot = JacobiRotation::make_givens(x, z);
        let JacobiRotation { c, s } = rot;

        // do T = G' T G
        let sdk = s * diag[k] + c * offdiag[k];
        let dkp1 = s * offdiag[k] + c * diag[k + 1];

        diag[k] = c * (c * diag[k] - s * offdiag[k]) - s * (c * offdiag[k] - s * diag[k + 1]);
        diag[k + 1] = s * sdk + c * dkp1;
        offdiag[k] = c * sdk - s * dkp1;

        if k > start {
            offdiag[k - 1] = c * offdiag[k - 1] - s * z;
        }

        x = offdiag[k];
        if k < end - 1 {
            z = -s * offdiag[k + 1];
            offdiag[k + 1] = c * offdiag[k + 1];
        }

        // U = U G
        if let Some(u) = u.rb_mut() {
            rot.apply_on_the_right_to_cols(u, k, k + 1);
        }
        k += 1;
    }
}

/// Computes the eigenvalue decomposition of the symmetric tridiagonal matrix with diagonal `diag`
/// and sub-diagonal `offdiag`.
///
/// On success, `diag` contains the eigenvalues in ascending order and `offdiag` is clobbered. If
/// `u` is provided, it is multiplied on the right by the orthogonal transformation that
/// diagonalizes the tridiagonal matrix, then its columns are permuted along with the eigenvalues.
/// Passing the identity yields the eigenvectors of the tridiagonal matrix, passing the orthogonal
/// factor of a tridiagonalization yields the eigenvectors of the original matrix.
///
/// Fails with [`EvdError::NoConvergence`] if more than `max_iter` sweeps are needed, in which
/// case `diag` and `u` hold a partially diagonalized, unsorted state.
///
/// # Panics
/// Panics if `offdiag.len() + 1 < diag.len()`, or if `u` is not a square matrix with the same
/// dimension as `diag`.
#[track_caller]
pub fn compute_tridiag_evd<E: RealField>(
    diag: &mut [E],
    offdiag: &mut [E],
    u: Option<MatMut<'_, E>>,
    epsilon: E,
    zero_threshold: E,
    max_iter: usize,
) -> Result<TridiagEvdInfo, EvdError> {
    let n = diag.len();
    assert!(offdiag.len() + 1 >= n);
    let mut u = u;
    if let Some(u) = u.rb() {
        assert!(all(u.nrows() == n, u.ncols() == n));
    }

    if n <= 1 {
        return Ok(TridiagEvdInfo { sweeps: 0 });
    }
    let offdiag = &mut offdiag[..n - 1];

    let mut max = E::zero();
    for &x in diag.iter().chain(offdiag.iter()) {
        if x.abs() > max {
            max = x.abs();
        }
    }
    if max == E::zero() {
        return Ok(TridiagEvdInfo { sweeps: 0 });
    }

    let inv = max.recip();
    for x in diag.iter_mut().chain(offdiag.iter_mut()) {
        *x = *x * inv;
    }

    let result = deflate_and_sweep(diag, offdiag, u.rb_mut(), epsilon, zero_threshold, max_iter);

    for x in diag.iter_mut() {
        *x = *x * max;
    }

    let info = result?;

    for i in 0..n - 1 {
        let mut min_idx = i;
        let mut min_val = diag[i];

        for (k, &d) in diag[i + 1..].iter().enumerate() {
            if d < min_val {
                min_idx = k + i + 1;
                min_val = d;
            }
        }
        if min_idx > i {
            diag.swap(i, min_idx);
            if let Some(u) = u.rb_mut() {
                swap_cols(u, i, min_idx);
            }
        }
    }

    Ok(info)
}

fn deflate_and_sweep<E: RealField>(
    diag: &mut [E],
    offdiag: &mut [E],
    u: Option<MatMut<'_, E>>,
    epsilon: E,
    zero_threshold: E,
    max_iter: usize,
) -> Result<TridiagEvdInfo, EvdError> {
    let n = diag.len();
    let mut u = u;

    let mut end = n - 1;
    let mut start = 0;
    let mut sweeps = 0;

    while end > 0 {
        for i in start..end {
            let e = offdiag[i].abs();
            if e < zero_threshold || e <= epsilon * (diag[i].abs() + diag[i + 1].abs()) {
                offdiag[i] = E::zero();
            }
        }

        while end > 0 && offdiag[end - 1] == E::zero() {
            end -= 1;
        }

        if end == 0 {
            break;
        }

        if sweeps == max_iter {
            log::warn!(
                target: "faer_sevd",
                "tridiagonal QR algorithm did not converge after {sweeps} sweeps (dimension {n}, {} eigenvalues left)",
                end + 1,
            );
            return Err(EvdError::NoConvergence);
        }
        sweeps += 1;

        start = end - 1;
        while start > 0 && offdiag[start - 1] != E::zero() {
            start -= 1;
        }

        qr_step(diag, offdiag, start, end, u.rb_mut());
    }

    Ok(TridiagEvdInfo { sweeps })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mat;
    use assert_approx_eq::assert_approx_eq;
    use equator::assert;

    #[track_caller]
    fn test_evd(diag: &[f64], offdiag: &[f64]) {
        let n = diag.len();
        let mut u = Mat::<f64>::identity(n, n);

        let s = {
            let mut diag = diag.to_vec();
            let mut offdiag = offdiag.to_vec();

            compute_tridiag_evd(
                &mut diag,
                &mut offdiag,
                Some(u.as_mut()),
                f64::EPSILON,
                f64::MIN_POSITIVE,
                default_max_iter::<f64>(n),
            )
            .unwrap();

            for i in 1..n {
                assert!(diag[i - 1] <= diag[i]);
            }

            Mat::from_fn(n, n, |i, j| if i == j { diag[i] } else { 0.0 })
        };

        let us = &u * &s;
        let reconstructed = &us * u.transpose();
        for j in 0..n {
            for i in 0..n {
                let target = if i == j {
                    diag[j]
                } else if i == j + 1 {
                    offdiag[j]
                } else if j == i + 1 {
                    offdiag[i]
                } else {
                    0.0
                };

                assert_approx_eq!(reconstructed.read(i, j), target, 1e-13);
            }
        }
    }

    #[test]
    fn test_evd_2_0() {
        let diag = [1.0, 1.0];
        let offdiag = [0.0];
        test_evd(&diag, &offdiag);
    }

    #[test]
    fn test_evd_2_1() {
        let diag = [1.0, 1.0];
        let offdiag = [0.5213289];
        test_evd(&diag, &offdiag);
    }

    #[test]
    fn test_evd_3() {
        let diag = [1.79069356, 1.20930644, 1.0];
        let offdiag = [-4.06813537e-01, 0.0];

        test_evd(&diag, &offdiag);
    }

    #[test]
    fn test_evd_5() {
        let diag = [1.95069537, 2.44845332, 2.56957029, 3.03128102, 1.0];
        let offdiag = [-7.02200909e-01, -1.11661820e+00, -6.81418803e-01, 0.0];
        test_evd(&diag, &offdiag);
    }

    #[test]
    fn test_evd_wilkinson() {
        let diag = [3.0, 2.0, 1.0, 0.0, 1.0, 2.0, 3.0];
        let offdiag = [1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
        test_evd(&diag, &offdiag);
    }

    #[test]
    fn test_glued_wilkinson() {
        let diag = [
            3.0, 2.0, 1.0, 0.0, 1.0, 2.0, 3.0, 3.0, 2.0, 1.0, 0.0, 1.0, 2.0, 3.0,
        ];
        let x = 1e-6;
        let offdiag = [
            1.0, 1.0, 1.0, 1.0, 1.0, 1.0, x, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
        ];
        test_evd(&diag, &offdiag);
    }

    #[test]
    fn test_clustered_blocks() {
        let diag = [1.0, -3.0, 1.0 + 1e-14, 1e-300, 1.0, 2.0, 1.0];
        let offdiag = [0.0, 1e-7, 0.0, 0.3, 0.0, 1e-15];
        test_evd(&diag, &offdiag);
    }

    #[test]
    fn test_graded() {
        let n = 40;
        let diag = (0..n)
            .map(|i| f64::powi(10.0, -(i as i32) / 4))
            .collect::<Vec<_>>();
        let offdiag = (0..n - 1)
            .map(|i| 0.5 * f64::powi(10.0, -(i as i32) / 4))
            .collect::<Vec<_>>();
        test_evd(&diag, &offdiag);
    }

    #[test]
    fn test_evd_tiny_values() {
        let diag = [1e-200, 3e-200, -2e-200];
        let offdiag = [1e-200, 5e-201];
        let mut d = diag.to_vec();
        let mut e = offdiag.to_vec();
        compute_tridiag_evd(&mut d, &mut e, None, f64::EPSILON, f64::MIN_POSITIVE, 1000).unwrap();

        let trace = diag.iter().sum::<f64>();
        assert_approx_eq!(d.iter().sum::<f64>() / trace, 1.0, 1e-12);
    }

    #[test]
    fn test_negligible_offdiag_deflates_without_sweep() {
        let mut diag = [1.0, 2.0];
        let mut offdiag = [1e-300];
        let info = compute_tridiag_evd(
            &mut diag,
            &mut offdiag,
            None,
            f64::EPSILON,
            f64::MIN_POSITIVE,
            default_max_iter::<f64>(2),
        )
        .unwrap();

        assert!(info.sweeps == 0);
        assert!(diag == [1.0, 2.0]);
    }

    #[test]
    fn test_sweep_cap() {
        let mut diag = [1.0, 1.0, 1.0];
        let mut offdiag = [1.0, 1.0];
        let result = compute_tridiag_evd(
            &mut diag,
            &mut offdiag,
            None,
            f64::EPSILON,
            f64::MIN_POSITIVE,
            0,
        );
        assert!(result == Err(EvdError::NoConvergence));
    }

    #[test]
    fn test_sort_moves_vectors() {
        let mut diag = [3.0, 1.0];
        let mut offdiag = [0.0];
        let mut u = Mat::<f64>::identity(2, 2);
        compute_tridiag_evd(
            &mut diag,
            &mut offdiag,
            Some(u.as_mut()),
            f64::EPSILON,
            f64::MIN_POSITIVE,
            default_max_iter::<f64>(2),
        )
        .unwrap();

        assert_approx_eq!(diag[0], 1.0, 1e-15);
        assert_approx_eq!(diag[1], 3.0, 1e-15);
        assert!(u.read(1, 0) == 1.0);
        assert!(u.read(0, 1) == 1.0);
        assert!(u.read(0, 0) == 0.0);
    }

    #[test]
    fn test_wilkinson_shift() {
        // trailing block [[2, 1], [1, 2]] has eigenvalues 1 and 3, td = 0
        let shift = wilkinson_shift(&[2.0, 2.0], &[1.0], 1);
        assert!(shift == 1.0);

        // [[4, 0.5], [0.5, 1]], eigenvalue closest to 1
        let shift = wilkinson_shift(&[4.0, 1.0], &[0.5], 1);
        let exact = 2.5 - f64::sqrt(2.25 + 0.25);
        assert_approx_eq!(shift, exact, 1e-15);
    }

    #[test]
    fn test_qr_step_preserves_spectrum() {
        let mut diag = [4.0, 3.0, 2.0, 1.0];
        let mut offdiag = [1.0, 0.5, 0.25f64];
        let mut u = Mat::<f64>::identity(4, 4);

        let before = offdiag[2].abs();
        qr_step(&mut diag, &mut offdiag, 0, 3, Some(u.as_mut()));

        assert!(offdiag[2].abs() < before);
        assert_approx_eq!(diag.iter().sum::<f64>(), 10.0, 1e-14);

        let utu = u.transpose() * &u;
        for j in 0..4 {
            for i in 0..4 {
                assert_approx_eq!(utu.read(i, j), if i == j { 1.0 } else { 0.0 }, 1e-14);
            }
        }
    }
}
