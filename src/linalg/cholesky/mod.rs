//! Low level implementation of the Cholesky decomposition, used to reduce the generalized
//! eigenvalue problem to a standard one.

pub mod llt;
