//! Self-adjoint eigenvalue decomposition of real symmetric matrices, and of symmetric-definite
//! matrix pencils.
//!
//! The eigenvalue decomposition of a symmetric matrix $A$ of shape $(n, n)$ is a decomposition
//! into two components $U$, $S$:
//!
//! - $U$ has shape $(n, n)$ and is orthogonal,
//! - $S$ has shape $(n, n)$ and is a diagonal matrix with real entries sorted in ascending order,
//! - and finally:
//!
//! $$A = U S U^\top.$$
//!
//! The matrix is first reduced to tridiagonal form by Householder reflections, then diagonalized
//! by implicit QR sweeps with Wilkinson shifts, deflating the tridiagonal matrix whenever a
//! sub-diagonal entry becomes negligible.
//!
//! The generalized problem $A v = \lambda B v$, where $B$ is positive definite, is reduced to a
//! standard one with the Cholesky factor of $B$.
//!
//! # Example
//! ```
//! use faer_sevd::{mat, Side};
//!
//! let a = mat![
//!     [2.0, 1.0, 0.0],
//!     [1.0, 2.0, 1.0],
//!     [0.0, 1.0, 2.0f64],
//! ];
//!
//! let evd = a.selfadjoint_eigen(Side::Lower).unwrap();
//! let s = evd.eigenvalues();
//! assert!((s[0] - (2.0 - 2.0f64.sqrt())).abs() < 1e-12);
//! assert!((s[1] - 2.0).abs() < 1e-12);
//! assert!((s[2] - (2.0 + 2.0f64.sqrt())).abs() < 1e-12);
//! ```

#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]
#![allow(non_snake_case)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use dyn_stack;
pub use reborrow;

mod entity;
pub mod linalg;
pub mod mat;
pub mod perm;
pub mod utils;

pub use entity::RealField;
pub use linalg::solvers::{Llt, SelfAdjointEigen};
pub use mat::{Mat, MatMut, MatRef};

/// Specifies whether the triangular lower or upper part of a matrix should be accessed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    /// Lower half should be accessed.
    Lower,
    /// Upper half should be accessed.
    Upper,
}

/// Parallelism strategy that can be passed to most of the routines in the library.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Parallelism {
    /// No parallelism.
    ///
    /// The code is executed sequentially on the same thread that calls a function
    /// and passes this argument.
    None,
    /// Rayon parallelism.
    ///
    /// The code is possibly executed in parallel on the current thread, as well as the currently
    /// active rayon thread pool.
    ///
    /// The contained value represents a hint about the number of threads an implementation should
    /// use, but there is no way to guarantee how many or which threads will be used.
    ///
    /// A value of `0` treated as equivalent to `rayon::current_num_threads()`.
    #[cfg(feature = "rayon")]
    #[cfg_attr(docsrs, doc(cfg(feature = "rayon")))]
    Rayon(usize),
}

/// Returns the parallelism used by the high level solvers: all available threads when the `rayon`
/// feature is enabled, otherwise none.
#[inline]
pub fn get_global_parallelism() -> Parallelism {
    #[cfg(feature = "rayon")]
    {
        Parallelism::Rayon(0)
    }
    #[cfg(not(feature = "rayon"))]
    {
        Parallelism::None
    }
}

#[macro_export]
#[doc(hidden)]
macro_rules! __transpose_impl {
    ([$([$($col:expr),*])*] $($v:expr;)* ) => {
        [$([$($col,)*],)* [$($v,)*]]
    };
    ([$([$($col:expr),*])*] $($v0:expr, $($v:expr),* ;)*) => {
        $crate::__transpose_impl!([$([$($col),*])* [$($v0),*]] $($($v),* ;)*)
    };
}

/// Creates a [`Mat`] containing the arguments, given row by row.
///
/// ```
/// use faer_sevd::mat;
///
/// let matrix = mat![
///     [1.0, 5.0, 9.0],
///     [2.0, 6.0, 10.0],
///     [3.0, 7.0, 11.0],
///     [4.0, 8.0, 12.0f64],
/// ];
///
/// assert_eq!(matrix.read(0, 0), 1.0);
/// assert_eq!(matrix.read(3, 0), 4.0);
/// assert_eq!(matrix.read(0, 2), 9.0);
/// assert_eq!(matrix.read(3, 2), 12.0);
/// ```
#[macro_export]
macro_rules! mat {
    () => {
        {
            compile_error!("number of columns in the matrix is ambiguous");
        }
    };

    ($([$($v:expr),* $(,)?] ),* $(,)?) => {
        {
            let data = $crate::__transpose_impl!([] $($($v),* ;)*);
            let ncols = data.len();
            let nrows = data[0].len();
            $crate::mat::Mat::from_fn(nrows, ncols, |i, j| data[j][i])
        }
    };
}

#[cfg(feature = "perf-warn")]
#[macro_export]
#[doc(hidden)]
macro_rules! __perf_warn {
    ($name: ident) => {{
        #[inline(always)]
        #[allow(non_snake_case)]
        fn $name() -> &'static ::core::sync::atomic::AtomicBool {
            static $name: ::core::sync::atomic::AtomicBool =
                ::core::sync::atomic::AtomicBool::new(false);
            &$name
        }
        ::core::matches!(
            $name().compare_exchange(
                false,
                true,
                ::core::sync::atomic::Ordering::Relaxed,
                ::core::sync::atomic::Ordering::Relaxed,
            ),
            Ok(_)
        )
    }};
}
