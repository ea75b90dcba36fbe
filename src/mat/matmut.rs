use super::*;
use crate::{Mat, RealField};
use equator::{assert, debug_assert};
use reborrow::*;

/// Mutable view over a matrix, similar to a mutable reference to a 2D strided [prim@slice].
///
/// # Move semantics
/// Since `MatMut` mutably borrows data, it cannot be [`Copy`]. Passing it by value, or calling a
/// method that consumes `self` like [`MatMut::transpose_mut`], renders the original variable
/// unusable. The way around it is [`reborrow::ReborrowMut::rb_mut`], which mutably borrows a
/// `MatMut` to obtain another `MatMut` for the lifetime of the borrow, and
/// [`reborrow::Reborrow::rb`] to obtain a `MatRef`.
/// ```
/// use faer_sevd::{Mat, MatMut, MatRef};
/// use reborrow::*;
///
/// fn takes_matmut(view: MatMut<'_, f64>) {}
/// fn takes_matref(view: MatRef<'_, f64>) {}
///
/// let mut matrix = Mat::<f64>::zeros(2, 2);
/// let mut view = matrix.as_mut();
///
/// takes_matmut(view.rb_mut());
/// takes_matmut(view.rb_mut());
/// takes_matref(view.rb());
/// // view is still usable here
/// ```
pub struct MatMut<'a, E> {
    pub(super) inner: MatImpl<E>,
    pub(super) __marker: PhantomData<&'a mut E>,
}

unsafe impl<E: Sync> Sync for MatMut<'_, E> {}
unsafe impl<E: Send> Send for MatMut<'_, E> {}

impl<'short, E> Reborrow<'short> for MatMut<'_, E> {
    type Target = MatRef<'short, E>;

    #[inline]
    fn rb(&'short self) -> Self::Target {
        MatRef {
            inner: self.inner,
            __marker: PhantomData,
        }
    }
}

impl<'short, E> ReborrowMut<'short> for MatMut<'_, E> {
    type Target = MatMut<'short, E>;

    #[inline]
    fn rb_mut(&'short mut self) -> Self::Target {
        MatMut {
            inner: self.inner,
            __marker: PhantomData,
        }
    }
}

impl<'a, E> IntoConst for MatMut<'a, E> {
    type Target = MatRef<'a, E>;

    #[inline]
    fn into_const(self) -> Self::Target {
        MatRef {
            inner: self.inner,
            __marker: PhantomData,
        }
    }
}

impl<'a, E> MatMut<'a, E> {
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

    /// Returns a mutable pointer to the matrix data.
    #[inline(always)]
    pub fn as_ptr_mut(self) -> *mut E {
        self.inner.ptr.as_ptr()
    }

    /// Returns a mutable pointer to the element at the given indices, without bound checks.
    #[inline(always)]
    pub fn ptr_at_mut(self, row: usize, col: usize) -> *mut E {
        self.inner.ptr_at(row, col)
    }

    /// Returns the transpose of `self`.
    #[inline(always)]
    pub fn transpose_mut(self) -> MatMut<'a, E> {
        unsafe {
            from_raw_parts_mut(
                self.inner.ptr.as_ptr(),
                self.ncols(),
                self.nrows(),
                self.col_stride(),
                self.row_stride(),
            )
        }
    }

    /// Returns a mutable view over the submatrix starting at `(row_start, col_start)`, with
    /// dimensions `(nrows, ncols)`.
    ///
    /// # Panics
    /// Panics if the submatrix does not fit inside `self`.
    #[track_caller]
    #[inline]
    pub fn submatrix_mut(
        self,
        row_start: usize,
        col_start: usize,
        nrows: usize,
        ncols: usize,
    ) -> Self {
        assert!(all(
            row_start <= self.nrows(),
            col_start <= self.ncols(),
            nrows <= self.nrows() - row_start,
            ncols <= self.ncols() - col_start,
        ));
        let row_stride = self.row_stride();
        let col_stride = self.col_stride();
        unsafe {
            from_raw_parts_mut(
                self.ptr_at_mut(row_start, col_start),
                nrows,
                ncols,
                row_stride,
                col_stride,
            )
        }
    }

    /// Returns a mutable view over the column at index `col`, as an `nrows×1` matrix.
    #[track_caller]
    #[inline]
    pub fn col_mut(self, col: usize) -> Self {
        assert!(col < self.ncols());
        let nrows = self.nrows();
        self.submatrix_mut(0, col, nrows, 1)
    }

    /// Splits the matrix vertically at the given column, returning the left and right parts.
    #[track_caller]
    #[inline]
    pub fn split_at_col_mut(self, mid: usize) -> (Self, Self) {
        assert!(mid <= self.ncols());
        let nrows = self.nrows();
        let ncols = self.ncols();
        let row_stride = self.row_stride();
        let col_stride = self.col_stride();
        let ptr = self.inner.ptr.as_ptr();
        unsafe {
            (
                from_raw_parts_mut(ptr, nrows, mid, row_stride, col_stride),
                from_raw_parts_mut(
                    ptr.wrapping_offset(mid as isize * col_stride),
                    nrows,
                    ncols - mid,
                    row_stride,
                    col_stride,
                ),
            )
        }
    }

    /// Returns two mutable column views at the distinct indices `col0` and `col1`.
    ///
    /// # Panics
    /// Panics if the indices are equal or out of bounds.
    #[track_caller]
    #[inline]
    pub fn two_cols_mut(self, col0: usize, col1: usize) -> (Self, Self) {
        assert!(all(col0 != col1, col0 < self.ncols(), col1 < self.ncols()));
        let nrows = self.nrows();
        let row_stride = self.row_stride();
        let col_stride = self.col_stride();
        let ptr = self.inner.ptr.as_ptr();
        unsafe {
            (
                from_raw_parts_mut(
                    ptr.wrapping_offset(col0 as isize * col_stride),
                    nrows,
                    1,
                    row_stride,
                    col_stride,
                ),
                from_raw_parts_mut(
                    ptr.wrapping_offset(col1 as isize * col_stride),
                    nrows,
                    1,
                    row_stride,
                    col_stride,
                ),
            )
        }
    }
}

impl<'a, E: Copy> MatMut<'a, E> {
    /// Reads the value at the given indices, without bound checks.
    ///
    /// # Safety
    /// `row < self.nrows()` and `col < self.ncols()`.
    #[inline(always)]
    pub unsafe fn read_unchecked(&self, row: usize, col: usize) -> E {
        self.rb().read_unchecked(row, col)
    }

    /// Reads the value at the given indices.
    #[track_caller]
    #[inline(always)]
    pub fn read(&self, row: usize, col: usize) -> E {
        self.rb().read(row, col)
    }

    /// Writes the value to the element at the given indices, without bound checks.
    ///
    /// # Safety
    /// `row < self.nrows()` and `col < self.ncols()`.
    #[inline(always)]
    pub unsafe fn write_unchecked(&mut self, row: usize, col: usize, value: E) {
        debug_assert!(all(row < self.nrows(), col < self.ncols()));
        *self.inner.ptr_at(row, col) = value;
    }

    /// Writes the value to the element at the given indices.
    ///
    /// # Panics
    /// Panics if the indices are out of bounds.
    #[track_caller]
    #[inline(always)]
    pub fn write(&mut self, row: usize, col: usize, value: E) {
        assert!(all(row < self.nrows(), col < self.ncols()));
        unsafe { self.write_unchecked(row, col, value) }
    }

    /// Fills the elements of `self` with `constant`.
    #[inline]
    pub fn fill(&mut self, constant: E) {
        for j in 0..self.ncols() {
            for i in 0..self.nrows() {
                unsafe { self.write_unchecked(i, j, constant) };
            }
        }
    }

    /// Copies the values from `other` into `self`.
    ///
    /// # Panics
    /// Panics if the dimensions do not match.
    #[track_caller]
    #[inline]
    pub fn copy_from(&mut self, other: MatRef<'_, E>) {
        assert!(all(self.nrows() == other.nrows(), self.ncols() == other.ncols()));
        for j in 0..self.ncols() {
            for i in 0..self.nrows() {
                unsafe { self.write_unchecked(i, j, other.read_unchecked(i, j)) };
            }
        }
    }

    /// Returns an owned copy of the matrix.
    #[inline]
    pub fn to_owned(&self) -> Mat<E> {
        self.rb().to_owned()
    }
}

impl<E: RealField> MatMut<'_, E> {
    /// Fills the elements of `self` with zeros.
    #[inline]
    pub fn fill_zero(&mut self) {
        self.fill(E::zero())
    }
}

impl<E: Copy + core::fmt::Debug> core::fmt::Debug for MatMut<'_, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.rb(), f)
    }
}
