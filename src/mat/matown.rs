use super::*;
use crate::RealField;

/// Heap allocated resizable matrix, stored in column-major order.
#[derive(Clone)]
pub struct Mat<E> {
    data: Vec<E>,
    nrows: usize,
    ncols: usize,
}

impl<E> Default for Mat<E> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Mat<E> {
    /// Returns an empty matrix of dimension `0×0`.
    #[inline]
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            nrows: 0,
            ncols: 0,
        }
    }

    /// Returns the number of rows of the matrix.
    #[inline(always)]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Returns the number of columns of the matrix.
    #[inline(always)]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Returns a view over the matrix.
    #[inline]
    pub fn as_ref(&self) -> MatRef<'_, E> {
        unsafe {
            from_raw_parts(
                self.data.as_ptr(),
                self.nrows,
                self.ncols,
                1,
                self.nrows as isize,
            )
        }
    }

    /// Returns a mutable view over the matrix.
    #[inline]
    pub fn as_mut(&mut self) -> MatMut<'_, E> {
        unsafe {
            from_raw_parts_mut(
                self.data.as_mut_ptr(),
                self.nrows,
                self.ncols,
                1,
                self.nrows as isize,
            )
        }
    }

    /// Returns a view over the transpose of `self`.
    #[inline]
    pub fn transpose(&self) -> MatRef<'_, E> {
        self.as_ref().transpose()
    }
}

impl<E: Copy> Mat<E> {
    /// Returns a new matrix with dimensions `(nrows, ncols)`, filled with the provided function.
    #[inline]
    pub fn from_fn(nrows: usize, ncols: usize, mut f: impl FnMut(usize, usize) -> E) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for j in 0..ncols {
            for i in 0..nrows {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }

    /// Resizes the matrix in-place so that the new dimensions are `(new_nrows, new_ncols)`.
    /// Elements that are inside both the old and the new bounds keep their value, new elements
    /// are filled with `f(i, j)`.
    ///
    /// The storage is left untouched when the dimensions do not change.
    #[inline]
    pub fn resize_with(
        &mut self,
        new_nrows: usize,
        new_ncols: usize,
        mut f: impl FnMut(usize, usize) -> E,
    ) {
        if new_nrows == self.nrows && new_ncols == self.ncols {
            return;
        }

        let old = core::mem::take(&mut self.data);
        let old_nrows = self.nrows;
        let old_ncols = self.ncols;

        *self = Self::from_fn(new_nrows, new_ncols, |i, j| {
            if i < old_nrows && j < old_ncols {
                old[i + j * old_nrows]
            } else {
                f(i, j)
            }
        });
    }

    /// Reads the value at the given indices.
    #[track_caller]
    #[inline(always)]
    pub fn read(&self, row: usize, col: usize) -> E {
        self.as_ref().read(row, col)
    }

    /// Writes the value to the element at the given indices.
    #[track_caller]
    #[inline(always)]
    pub fn write(&mut self, row: usize, col: usize, value: E) {
        self.as_mut().write(row, col, value)
    }

    /// Swaps the columns at indices `a` and `b`.
    #[track_caller]
    #[inline]
    pub fn swap_cols(&mut self, a: usize, b: usize) {
        crate::perm::swap_cols(self.as_mut(), a, b)
    }
}

impl<E: RealField> Mat<E> {
    /// Returns a new matrix with dimensions `(nrows, ncols)`, filled with zeros.
    #[inline]
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self::from_fn(nrows, ncols, |_, _| E::zero())
    }

    /// Returns a new matrix with dimensions `(nrows, ncols)`, filled with zeros, except the main
    /// diagonal which is filled with ones.
    #[inline]
    pub fn identity(nrows: usize, ncols: usize) -> Self {
        Self::from_fn(nrows, ncols, |i, j| if i == j { E::one() } else { E::zero() })
    }

    /// Returns the maximum absolute value of the entries.
    #[inline]
    pub fn norm_max(&self) -> E {
        self.as_ref().norm_max()
    }

    /// Returns the Frobenius norm of the matrix.
    #[inline]
    pub fn norm_l2(&self) -> E {
        self.as_ref().norm_l2()
    }
}

impl<E: Copy + core::fmt::Debug> core::fmt::Debug for Mat<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.as_ref(), f)
    }
}
