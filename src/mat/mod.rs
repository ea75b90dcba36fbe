//! Dense column-major matrices and strided views over them.
//!
//! [`Mat`] owns its storage, while [`MatRef`] and [`MatMut`] are (possibly transposed or strided)
//! views, similar to `&[T]` and `&mut [T]` for 2D data. Views are reborrowed with
//! [`reborrow::Reborrow`] and [`reborrow::ReborrowMut`].

use core::{marker::PhantomData, ptr::NonNull};
use equator::assert;

mod matmut;
mod matown;
mod matref;

pub use matmut::MatMut;
pub use matown::Mat;
pub use matref::MatRef;

struct MatImpl<E> {
    ptr: NonNull<E>,
    nrows: usize,
    ncols: usize,
    row_stride: isize,
    col_stride: isize,
}

impl<E> Copy for MatImpl<E> {}
impl<E> Clone for MatImpl<E> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> MatImpl<E> {
    #[inline(always)]
    fn ptr_at(&self, row: usize, col: usize) -> *mut E {
        self.ptr
            .as_ptr()
            .wrapping_offset(row as isize * self.row_stride)
            .wrapping_offset(col as isize * self.col_stride)
    }
}

/// Creates a `MatRef` from pointers to the matrix data, dimensions, and strides.
///
/// # Safety
/// For every `(i, j)` with `i < nrows` and `j < ncols`, `ptr.offset(i * row_stride + j *
/// col_stride)` must point to an initialized value that stays valid and unmodified for the
/// lifetime `'a`.
#[inline(always)]
pub unsafe fn from_raw_parts<'a, E>(
    ptr: *const E,
    nrows: usize,
    ncols: usize,
    row_stride: isize,
    col_stride: isize,
) -> MatRef<'a, E> {
    MatRef {
        inner: MatImpl {
            ptr: NonNull::new(ptr as *mut E).unwrap_or(NonNull::dangling()),
            nrows,
            ncols,
            row_stride,
            col_stride,
        },
        __marker: PhantomData,
    }
}

/// Creates a `MatMut` from pointers to the matrix data, dimensions, and strides.
///
/// # Safety
/// Same as [`from_raw_parts`], and additionally the pointed-to values must not be accessed
/// through any other pointer for the lifetime `'a`, and no two in-bounds indices may map to the
/// same address.
#[inline(always)]
pub unsafe fn from_raw_parts_mut<'a, E>(
    ptr: *mut E,
    nrows: usize,
    ncols: usize,
    row_stride: isize,
    col_stride: isize,
) -> MatMut<'a, E> {
    MatMut {
        inner: MatImpl {
            ptr: NonNull::new(ptr).unwrap_or(NonNull::dangling()),
            nrows,
            ncols,
            row_stride,
            col_stride,
        },
        __marker: PhantomData,
    }
}

/// Creates a `MatMut` over a column-major slice.
#[track_caller]
#[inline]
pub fn from_column_major_slice_mut<E>(
    slice: &mut [E],
    nrows: usize,
    ncols: usize,
) -> MatMut<'_, E> {
    assert!(slice.len() == nrows * ncols);
    unsafe { from_raw_parts_mut(slice.as_mut_ptr(), nrows, ncols, 1, nrows as isize) }
}

/// Creates a column view over a slice.
#[inline]
pub fn from_slice_as_col<E>(slice: &[E]) -> MatRef<'_, E> {
    unsafe { from_raw_parts(slice.as_ptr(), slice.len(), 1, 1, slice.len() as isize) }
}

/// Creates a mutable column view over a slice.
#[inline]
pub fn from_slice_as_col_mut<E>(slice: &mut [E]) -> MatMut<'_, E> {
    let n = slice.len();
    unsafe { from_raw_parts_mut(slice.as_mut_ptr(), n, 1, 1, n as isize) }
}
