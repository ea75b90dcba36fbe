//! The Cholesky decomposition of a symmetric positive definite matrix $A$ is such that:
//! $$A = LL^\top,$$
//! where $L$ is a lower triangular matrix.

/// Computing the decomposition.
pub mod compute;
/// Solving a linear system using the decomposition.
pub mod solve;

pub use compute::cholesky_in_place;
pub use solve::solve_in_place;

/// This error signifies that the LLT decomposition could not be computed due to the matrix not
/// being numerically positive definite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CholeskyError {
    /// The dimension of the first square non positive-definite top-left corner of the input
    /// matrix.
    pub non_positive_definite_minor: usize,
}

impl core::fmt::Display for CholeskyError {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self, f)
    }
}

impl std::error::Error for CholeskyError {}
