//! Plane (Givens) rotations.

use crate::{MatMut, RealField};
use equator::assert;
use reborrow::*;

/// Plane rotation
/// $$G = \begin{bmatrix} c & s \\\\ -s & c \end{bmatrix},$$
/// with $c^2 + s^2 = 1$.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct JacobiRotation<E> {
    pub c: E,
    pub s: E,
}

impl<E: RealField> JacobiRotation<E> {
    /// Returns the identity rotation.
    #[inline]
    pub fn identity() -> Self {
        Self {
            c: E::one(),
            s: E::zero(),
        }
    }

    /// Computes the rotation $G$ such that $G^\top \begin{bmatrix} p \\\\ q \end{bmatrix} =
    /// \begin{bmatrix} r \\\\ 0 \end{bmatrix}$, i.e. $s p + c q = 0$.
    ///
    /// `p = q = 0` returns the identity rotation.
    #[inline]
    pub fn make_givens(p: E, q: E) -> Self {
        let zero = E::zero();
        let one = E::one();

        if q == zero {
            Self {
                c: if p < zero { -one } else { one },
                s: zero,
            }
        } else if p == zero {
            Self {
                c: zero,
                s: if q < zero { one } else { -one },
            }
        } else if p.abs() > q.abs() {
            let t = q / p;
            let mut u = (one + t.faer_abs2()).sqrt();
            if p < zero {
                u = -u;
            }
            let c = u.recip();
            Self { c, s: -t * c }
        } else {
            let t = p / q;
            let mut u = (one + t.faer_abs2()).sqrt();
            if q < zero {
                u = -u;
            }
            let s = -u.recip();
            Self { c: -t * s, s }
        }
    }

    /// Returns the inverse rotation.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self {
            c: self.c,
            s: -self.s,
        }
    }

    /// Applies $G^\top$ to the two row vectors stacked as $\begin{bmatrix} x \\\\ y
    /// \end{bmatrix}$:
    /// `x ← c·x + s·y`, `y ← -s·x + c·y`.
    ///
    /// # Panics
    /// Panics if `x` and `y` are not row vectors of the same length.
    #[track_caller]
    #[inline]
    pub fn apply_on_the_left_in_place(&self, x: MatMut<'_, E>, y: MatMut<'_, E>) {
        assert!(all(x.nrows() == 1, y.nrows() == 1, x.ncols() == y.ncols()));

        let Self { c, s } = *self;
        if c == E::one() && s == E::zero() {
            return;
        }

        let mut x = x;
        let mut y = y;
        for j in 0..x.ncols() {
            unsafe {
                let x_ = x.read_unchecked(0, j);
                let y_ = y.read_unchecked(0, j);
                x.write_unchecked(0, j, c * x_ + s * y_);
                y.write_unchecked(0, j, -s * x_ + c * y_);
            }
        }
    }

    /// Applies $G$ on the right of the matrix formed by the two column vectors $[x, y]$:
    /// `x ← c·x - s·y`, `y ← s·x + c·y`.
    ///
    /// # Panics
    /// Panics if `x` and `y` are not column vectors of the same length.
    #[track_caller]
    #[inline]
    pub fn apply_on_the_right_in_place(&self, x: MatMut<'_, E>, y: MatMut<'_, E>) {
        self.transpose()
            .apply_on_the_left_in_place(x.transpose_mut(), y.transpose_mut());
    }

    /// Applies $G$ on the right of `matrix`, acting on the columns `i` and `j`.
    #[track_caller]
    #[inline]
    pub fn apply_on_the_right_to_cols(&self, matrix: MatMut<'_, E>, i: usize, j: usize) {
        let mut matrix = matrix;
        let (x, y) = matrix.rb_mut().two_cols_mut(i, j);
        self.apply_on_the_right_in_place(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use crate::{mat, Mat};
    use equator::assert;

    #[test]
    fn givens_annihilates_second_component() {
        for (p, q) in [
            (3.0, 4.0),
            (-3.0, 4.0),
            (3.0, -4.0),
            (1e-300, 1.0),
            (1.0, 1e-300),
            (-7.5, 0.25),
            (0.0, 2.0),
            (0.0, -2.0),
            (2.0, 0.0),
            (-2.0, 0.0),
        ] {
            let rot = JacobiRotation::<f64>::make_givens(p, q);
            assert_approx_eq!(rot.c * rot.c + rot.s * rot.s, 1.0, 1e-15);
            assert_approx_eq!(rot.s * p + rot.c * q, 0.0, 1e-15);

            // the remaining component carries the whole norm
            let r = rot.c * p - rot.s * q;
            assert_approx_eq!(r.abs(), f64::hypot(p, q), 1e-14);
        }
    }

    #[test]
    fn givens_of_zero_is_identity() {
        let rot = JacobiRotation::<f64>::make_givens(0.0, 0.0);
        assert!(rot == JacobiRotation::identity());
    }

    #[test]
    fn right_application_matches_product() {
        let rot = JacobiRotation::<f64>::make_givens(1.5, -0.5);
        let m = mat![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0f64]];

        let mut rotated = m.clone();
        rot.apply_on_the_right_to_cols(rotated.as_mut(), 0, 2);

        let mut g = Mat::<f64>::identity(3, 3);
        g.write(0, 0, rot.c);
        g.write(0, 2, rot.s);
        g.write(2, 0, -rot.s);
        g.write(2, 2, rot.c);
        let target = &m * &g;

        for j in 0..3 {
            for i in 0..3 {
                assert_approx_eq!(rotated.read(i, j), target.read(i, j), 1e-14);
            }
        }
    }

    #[test]
    fn left_then_transpose_is_identity() {
        let rot = JacobiRotation::<f64>::make_givens(0.3, 0.9);
        let mut m = mat![[1.0, -2.0], [0.5, 4.0f64]];
        let orig = m.clone();

        {
            let (x, y) = m.as_mut().transpose_mut().two_cols_mut(0, 1);
            rot.apply_on_the_left_in_place(x.transpose_mut(), y.transpose_mut());
        }
        {
            let (x, y) = m.as_mut().transpose_mut().two_cols_mut(0, 1);
            rot.transpose()
                .apply_on_the_left_in_place(x.transpose_mut(), y.transpose_mut());
        }

        for j in 0..2 {
            for i in 0..2 {
                assert_approx_eq!(m.read(i, j), orig.read(i, j), 1e-15);
            }
        }
    }
}
