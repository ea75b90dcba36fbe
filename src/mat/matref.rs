use super::*;
use crate::{Mat, RealField};
use equator::{assert, debug_assert};
use reborrow::*;

/// Immutable view over a matrix, similar to an immutable reference to a 2D strided
/// [prim@slice].
pub struct MatRef<'a, E> {
    pub(super) inner: MatImpl<E>,
    pub(super) __marker: PhantomData<&'a E>,
}

impl<E> Clone for MatRef<'_, E> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}
impl<E> Copy for MatRef<'_, E> {}

unsafe impl<E: Sync> Sync for MatRef<'_, E> {}
unsafe impl<E: Sync> Send for MatRef<'_, E> {}

impl<'short, E> Reborrow<'short> for MatRef<'_, E> {
    type Target = MatRef<'short, E>;

    #[inline]
    fn rb(&'short self) -> Self::Target {
        *self
    }
}

impl<'short, E> ReborrowMut<'short> for MatRef<'_, E> {
    type Target = MatRef<'short, E>;

    #[inline]
    fn rb_mut(&'short mut self) -> Self::Target {
        *self
    }
}

impl<'a, E> IntoConst for MatRef<'a, E> {
    type Target = MatRef<'a, E>;

    #[inline]
    fn into_const(self) -> Self::Target {
        self
    }
}

impl<'a, E> MatRef<'a, E> {
    /// Returns the number of rows of the matrix.
    #[inline(always)]
    pub fn nrows(&self) -> usize {
        self.inner.nrows
    }

    /// Returns the number of columns of the matrix.
    #[inline(always)]
    pub fn ncols(&self) -> usize {
        self.inner.ncols
    }

    /// Returns the offset between the first elements of two successive rows in the matrix.
    #[inline(always)]
    pub fn row_stride(&self) -> isize {
        self.inner.row_stride
    }

    /// Returns the offset between the first elements of two successive columns in the matrix.
    #[inline(always)]
    pub fn col_stride(&self) -> isize {
        self.inner.col_stride
    }

    /// Returns a pointer to the matrix data.
    #[inline(always)]
    pub fn as_ptr(self) -> *const E {
        self.inner.ptr.as_ptr()
    }

    /// Returns a pointer to the element at the given indices, without bound checks.
    #[inline(always)]
    pub fn ptr_at(self, row: usize, col: usize) -> *const E {
        self.inner.ptr_at(row, col)
    }

    /// Returns the transpose of `self`.
    #[inline(always)]
    pub fn transpose(self) -> MatRef<'a, E> {
        unsafe {
            from_raw_parts(
                self.as_ptr(),
                self.ncols(),
                self.nrows(),
                self.col_stride(),
                self.row_stride(),
            )
        }
    }

    /// Returns a view over the submatrix starting at `(row_start, col_start)`, with dimensions
    /// `(nrows, ncols)`.
    ///
    /// # Panics
    /// Panics if the submatrix does not fit inside `self`.
    #[track_caller]
    #[inline]
    pub fn submatrix(self, row_start: usize, col_start: usize, nrows: usize, ncols: usize) -> Self {
        assert!(all(
            row_start <= self.nrows(),
            col_start <= self.ncols(),
            nrows <= self.nrows() - row_start,
            ncols <= self.ncols() - col_start,
        ));
        unsafe {
            from_raw_parts(
                self.ptr_at(row_start, col_start),
                nrows,
                ncols,
                self.row_stride(),
                self.col_stride(),
            )
        }
    }

    /// Returns a view over the column at index `col`, as an `nrows×1` matrix.
    #[track_caller]
    #[inline]
    pub fn col(self, col: usize) -> Self {
        assert!(col < self.ncols());
        self.submatrix(0, col, self.nrows(), 1)
    }
}

impl<'a, E: Copy> MatRef<'a, E> {
    /// Reads the value at the given indices, without bound checks.
    ///
    /// # Safety
    /// `row < self.nrows()` and `col < self.ncols()`.
    #[inline(always)]
    pub unsafe fn read_unchecked(&self, row: usize, col: usize) -> E {
        debug_assert!(all(row < self.nrows(), col < self.ncols()));
        *self.inner.ptr_at(row, col)
    }

    /// Reads the value at the given indices.
    ///
    /// # Panics
    /// Panics if the indices are out of bounds.
    #[track_caller]
    #[inline(always)]
    pub fn read(&self, row: usize, col: usize) -> E {
        assert!(all(row < self.nrows(), col < self.ncols()));
        unsafe { self.read_unchecked(row, col) }
    }

    /// Returns an owned copy of the matrix.
    #[inline]
    pub fn to_owned(&self) -> Mat<E> {
        let this = *self;
        Mat::from_fn(this.nrows(), this.ncols(), |i, j| unsafe {
            this.read_unchecked(i, j)
        })
    }
}

impl<E: RealField> MatRef<'_, E> {
    /// Returns the maximum absolute value of the entries, or zero for an empty matrix.
    #[inline]
    pub fn norm_max(&self) -> E {
        let mut max = E::zero();
        for j in 0..self.ncols() {
            for i in 0..self.nrows() {
                let x = unsafe { self.read_unchecked(i, j) }.abs();
                if x > max {
                    max = x;
                }
            }
        }
        max
    }

    /// Returns the Frobenius norm of the matrix.
    #[inline]
    pub fn norm_l2(&self) -> E {
        // scaled to avoid overflow of the squared entries
        let scale = self.norm_max();
        if scale == E::zero() || !scale.faer_is_finite() {
            return scale;
        }
        let inv = scale.recip();
        let mut acc = E::zero();
        for j in 0..self.ncols() {
            for i in 0..self.nrows() {
                acc = acc + (unsafe { self.read_unchecked(i, j) } * inv).faer_abs2();
            }
        }
        acc.sqrt() * scale
    }
}

impl<E: Copy + core::fmt::Debug> core::fmt::Debug for MatRef<'_, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        struct DebugRow<'a, T: Copy + core::fmt::Debug>(MatRef<'a, T>);

        impl<T: Copy + core::fmt::Debug> core::fmt::Debug for DebugRow<'_, T> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                let mut j = 0;
                f.debug_list()
                    .entries(core::iter::from_fn(|| {
                        let ret = if j < self.0.ncols() {
                            Some(self.0.read(0, j))
                        } else {
                            None
                        };
                        j += 1;
                        ret
                    }))
                    .finish()
            }
        }

        let mut i = 0;
        f.debug_list()
            .entries(core::iter::from_fn(|| {
                let ret = if i < self.nrows() {
                    Some(DebugRow(self.submatrix(i, 0, 1, self.ncols())))
                } else {
                    None
                };
                i += 1;
                ret
            }))
            .finish()
    }
}
