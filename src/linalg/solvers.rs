//! High level solver objects, owning their storage.

use crate::{
    get_global_parallelism,
    linalg::{
        cholesky::llt::{self, CholeskyError},
        evd::{
            self_adjoint_evd, self_adjoint_evd_req, ComputeVectors, EvdError, SelfAdjointEvdParams,
        },
        gevd::{self_adjoint_gevd, self_adjoint_gevd_req, GevdError},
        matmul::matmul,
    },
    Mat, MatMut, MatRef, RealField, Side,
};
use dyn_stack::{GlobalPodBuffer, PodStack, SizeOverflow, StackReq};
use equator::assert;
use reborrow::*;

/// Cholesky decomposition.
#[derive(Clone)]
pub struct Llt<E> {
    factors: Mat<E>,
}

impl<E: RealField> core::fmt::Debug for Llt<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Llt").field("factors", &self.factors).finish()
    }
}

impl<E: RealField> Llt<E> {
    /// Returns the Cholesky factorization of the input matrix, or an error if the matrix is not
    /// positive definite.
    ///
    /// The factorization is such that $A = LL^\top$, where $L$ is lower triangular.
    ///
    /// The matrix is interpreted as symmetric, but only the provided side is accessed.
    #[track_caller]
    pub fn new(matrix: MatRef<'_, E>, side: Side) -> Result<Self, CholeskyError> {
        assert!(matrix.nrows() == matrix.ncols());
        let dim = matrix.nrows();

        let matrix = match side {
            Side::Lower => matrix,
            Side::Upper => matrix.transpose(),
        };

        let mut factors = Mat::<E>::zeros(dim, dim);
        for j in 0..dim {
            for i in j..dim {
                factors.write(i, j, matrix.read(i, j));
            }
        }

        llt::cholesky_in_place(factors.as_mut(), get_global_parallelism())?;
        Ok(Self { factors })
    }

    /// Returns the dimension of the decomposed matrix.
    #[inline]
    pub fn dim(&self) -> usize {
        self.factors.nrows()
    }

    /// Returns the factor $L$ of the Cholesky decomposition. Its strictly upper triangular part is
    /// zero.
    #[inline]
    pub fn L(&self) -> MatRef<'_, E> {
        self.factors.as_ref()
    }

    /// Solves the equation $AX = B$ and stores the result in `rhs`.
    #[track_caller]
    pub fn solve_in_place(&self, rhs: MatMut<'_, E>) {
        llt::solve_in_place(self.factors.as_ref(), rhs, get_global_parallelism());
    }

    /// Returns the solution of the equation $AX = B$.
    #[track_caller]
    pub fn solve(&self, rhs: MatRef<'_, E>) -> Mat<E> {
        let mut sol = rhs.to_owned();
        self.solve_in_place(sol.as_mut());
        sol
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    Uncomputed,
    ValuesOnly,
    WithVectors,
}

/// Eigenvalue decomposition of a real symmetric matrix, or of a symmetric-definite pencil.
///
/// The object owns the eigenvalues, the eigenvectors and the workspace of the decomposition, and
/// reuses them when [`compute`](Self::compute) is called again with a matrix of the same
/// dimension.
///
/// # Example
/// ```
/// use faer_sevd::{linalg::evd::ComputeVectors, mat, SelfAdjointEigen, Side};
///
/// let a = mat![[3.0, 0.0], [0.0, 1.0f64]];
///
/// let mut evd = SelfAdjointEigen::with_dim(2);
/// evd.compute(a.as_ref(), Side::Lower, ComputeVectors::Yes)
///     .unwrap();
///
/// assert_eq!(evd.eigenvalues(), &[1.0, 3.0]);
/// assert_eq!(evd.eigenvectors().read(1, 0).abs(), 1.0);
/// ```
pub struct SelfAdjointEigen<E: RealField> {
    s: Vec<E>,
    u: Mat<E>,
    workspace: GlobalPodBuffer,
    workspace_req: StackReq,
    params: SelfAdjointEvdParams,
    state: State,
}

impl<E: RealField> Default for SelfAdjointEigen<E> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<E: RealField> core::fmt::Debug for SelfAdjointEigen<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SelfAdjointEigen")
            .field("state", &self.state)
            .field("s", &self.s)
            .field("u", &self.u)
            .finish()
    }
}

impl<E: RealField> SelfAdjointEigen<E> {
    /// Returns an empty decomposition object, which allocates its storage on the first call to
    /// [`compute`](Self::compute).
    #[inline]
    pub fn new() -> Self {
        Self {
            s: Vec::new(),
            u: Mat::new(),
            workspace: GlobalPodBuffer::new(StackReq::empty()),
            workspace_req: StackReq::empty(),
            params: SelfAdjointEvdParams::default(),
            state: State::Uncomputed,
        }
    }

    /// Returns a decomposition object with storage preallocated for matrices of dimension `dim`,
    /// eigenvectors included.
    ///
    /// # Panics
    /// Panics if the required workspace size overflows.
    #[track_caller]
    pub fn with_dim(dim: usize) -> Self {
        let mut this = Self::new();
        this.s = vec![E::zero(); dim];
        this.u = Mat::zeros(dim, dim);
        this.reserve_workspace(self_adjoint_evd_req::<E>(
            dim,
            ComputeVectors::Yes,
            get_global_parallelism(),
            this.params,
        ))
        .unwrap();
        this
    }

    /// Returns the object with the given tuning parameters.
    #[inline]
    pub fn with_params(mut self, params: SelfAdjointEvdParams) -> Self {
        self.params = params;
        self
    }

    /// Returns the dimension of the last decomposed matrix, or of the preallocated storage.
    #[inline]
    pub fn dim(&self) -> usize {
        self.s.len()
    }

    fn reserve_workspace(&mut self, req: Result<StackReq, SizeOverflow>) -> Result<(), SizeOverflow> {
        let req = req?;
        if req.size_bytes() > self.workspace_req.size_bytes()
            || req.align_bytes() > self.workspace_req.align_bytes()
        {
            let req = req.try_or(self.workspace_req)?;
            self.workspace = GlobalPodBuffer::new(req);
            self.workspace_req = req;
        }
        Ok(())
    }

    fn prepare(&mut self, dim: usize, compute_vectors: ComputeVectors) {
        self.state = State::Uncomputed;
        self.s.resize(dim, E::zero());
        if compute_vectors == ComputeVectors::Yes {
            self.u.resize_with(dim, dim, |_, _| E::zero());
        }
    }

    fn finish(&mut self, compute_vectors: ComputeVectors) {
        self.state = match compute_vectors {
            ComputeVectors::Yes => State::WithVectors,
            ComputeVectors::No => State::ValuesOnly,
        };
    }

    /// Computes the eigenvalue decomposition of the symmetric matrix `matrix`, of which only the
    /// provided side is accessed.
    ///
    /// The eigenvalues are sorted in ascending order. The eigenvectors are computed if
    /// `compute_vectors` is [`ComputeVectors::Yes`].
    ///
    /// On failure the object is left in the uncomputed state.
    ///
    /// # Panics
    /// Panics if `matrix` is not square.
    #[track_caller]
    pub fn compute(
        &mut self,
        matrix: MatRef<'_, E>,
        side: Side,
        compute_vectors: ComputeVectors,
    ) -> Result<&mut Self, EvdError> {
        assert!(matrix.nrows() == matrix.ncols());
        let dim = matrix.nrows();
        let parallelism = get_global_parallelism();

        let matrix = match side {
            Side::Lower => matrix,
            Side::Upper => matrix.transpose(),
        };

        self.prepare(dim, compute_vectors);
        self.reserve_workspace(self_adjoint_evd_req::<E>(
            dim,
            compute_vectors,
            parallelism,
            self.params,
        ))
        .unwrap();

        let u = match compute_vectors {
            ComputeVectors::Yes => Some(self.u.as_mut()),
            ComputeVectors::No => None,
        };
        self_adjoint_evd(
            matrix,
            &mut self.s,
            u,
            parallelism,
            PodStack::new(&mut self.workspace),
            self.params,
        )?;

        self.finish(compute_vectors);
        Ok(self)
    }

    /// Computes the eigenvalues, and optionally the eigenvectors, of the generalized problem
    /// $Av = \lambda Bv$, where $A$ is symmetric and $B$ is symmetric positive definite. Only
    /// the provided side of each matrix is accessed.
    ///
    /// The eigenvectors are normalized to unit euclidean norm.
    ///
    /// On failure the object is left in the uncomputed state.
    ///
    /// # Panics
    /// Panics if `a` or `b` is not square, or if their dimensions differ.
    #[track_caller]
    pub fn compute_generalized(
        &mut self,
        a: MatRef<'_, E>,
        b: MatRef<'_, E>,
        side: Side,
        compute_vectors: ComputeVectors,
    ) -> Result<&mut Self, GevdError> {
        assert!(all(
            a.nrows() == a.ncols(),
            b.nrows() == b.ncols(),
            a.nrows() == b.nrows(),
        ));
        let dim = a.nrows();
        let parallelism = get_global_parallelism();

        let (a, b) = match side {
            Side::Lower => (a, b),
            Side::Upper => (a.transpose(), b.transpose()),
        };

        self.prepare(dim, compute_vectors);
        self.reserve_workspace(self_adjoint_gevd_req::<E>(
            dim,
            compute_vectors,
            parallelism,
            self.params,
        ))
        .unwrap();

        let u = match compute_vectors {
            ComputeVectors::Yes => Some(self.u.as_mut()),
            ComputeVectors::No => None,
        };
        self_adjoint_gevd(
            a,
            b,
            &mut self.s,
            u,
            parallelism,
            PodStack::new(&mut self.workspace),
            self.params,
        )?;

        self.finish(compute_vectors);
        Ok(self)
    }

    /// Returns the eigenvalue decomposition of the symmetric input matrix, eigenvectors
    /// included. Only the provided side is accessed.
    #[track_caller]
    pub fn from_matrix(matrix: MatRef<'_, E>, side: Side) -> Result<Self, EvdError> {
        let mut this = Self::new();
        this.compute(matrix, side, ComputeVectors::Yes)?;
        Ok(this)
    }

    /// Returns the eigenvalue decomposition of the symmetric-definite pencil $(A, B)$,
    /// eigenvectors included. Only the provided side of each matrix is accessed.
    #[track_caller]
    pub fn from_pencil(a: MatRef<'_, E>, b: MatRef<'_, E>, side: Side) -> Result<Self, GevdError> {
        let mut this = Self::new();
        this.compute_generalized(a, b, side, ComputeVectors::Yes)?;
        Ok(this)
    }

    /// Returns the eigenvalues, in ascending order.
    ///
    /// # Panics
    /// Panics if no decomposition has been computed.
    #[track_caller]
    #[inline]
    pub fn eigenvalues(&self) -> &[E] {
        assert!(self.state != State::Uncomputed);
        &self.s
    }

    /// Returns the eigenvectors, as the columns of a matrix. The `j`-th column is associated with
    /// the `j`-th eigenvalue.
    ///
    /// # Panics
    /// Panics if the last decomposition was not computed with eigenvectors.
    #[track_caller]
    #[inline]
    pub fn eigenvectors(&self) -> MatRef<'_, E> {
        assert!(self.state == State::WithVectors);
        self.u.as_ref()
    }

    /// Returns the eigenvectors if they were computed by the last decomposition.
    #[inline]
    pub fn try_eigenvectors(&self) -> Option<MatRef<'_, E>> {
        if self.state == State::WithVectors {
            Some(self.u.as_ref())
        } else {
            None
        }
    }

    /// Returns `true` if the eigenvectors were computed by the last decomposition.
    #[inline]
    pub fn has_eigenvectors(&self) -> bool {
        self.state == State::WithVectors
    }

    fn spectral_function(&self, f: impl Fn(E) -> E) -> Mat<E> {
        let u = self.eigenvectors();
        let n = u.nrows();

        let mut scaled = u.to_owned();
        for j in 0..n {
            let fj = f(self.s[j]);
            for i in 0..n {
                let x = scaled.read(i, j);
                scaled.write(i, j, x * fj);
            }
        }

        let mut out = Mat::<E>::zeros(n, n);
        matmul(
            out.as_mut(),
            scaled.as_ref(),
            u.transpose(),
            None,
            E::one(),
            get_global_parallelism(),
        );
        out
    }

    /// Returns the square root of the decomposed matrix, $U S^{1/2} U^\top$.
    ///
    /// Only meaningful for a positive semi-definite matrix, negative eigenvalues produce NaN
    /// values.
    ///
    /// # Panics
    /// Panics if the last decomposition was not computed with eigenvectors.
    #[track_caller]
    pub fn operator_sqrt(&self) -> Mat<E> {
        self.spectral_function(|x| x.sqrt())
    }

    /// Returns the inverse square root of the decomposed matrix, $U S^{-1/2} U^\top$.
    ///
    /// Only meaningful for a positive definite matrix.
    ///
    /// # Panics
    /// Panics if the last decomposition was not computed with eigenvectors.
    #[track_caller]
    pub fn operator_inverse_sqrt(&self) -> Mat<E> {
        self.spectral_function(|x| x.sqrt().recip())
    }
}

impl<E: RealField> MatRef<'_, E> {
    /// Returns the Cholesky decomposition of `self`. Only the provided side is accessed.
    #[track_caller]
    pub fn cholesky(&self, side: Side) -> Result<Llt<E>, CholeskyError> {
        Llt::new(*self, side)
    }

    /// Returns the eigenvalue decomposition of `self`, assuming it is symmetric. Only the
    /// provided side is accessed.
    #[track_caller]
    pub fn selfadjoint_eigen(&self, side: Side) -> Result<SelfAdjointEigen<E>, EvdError> {
        SelfAdjointEigen::from_matrix(*self, side)
    }

    /// Returns the eigenvalues of `self` in ascending order, assuming it is symmetric. Only the
    /// provided side is accessed.
    #[track_caller]
    pub fn selfadjoint_eigenvalues(&self, side: Side) -> Result<Vec<E>, EvdError> {
        let mut evd = SelfAdjointEigen::new();
        evd.compute(*self, side, ComputeVectors::No)?;
        Ok(core::mem::take(&mut evd.s))
    }
}

impl<E: RealField> MatMut<'_, E> {
    /// Returns the Cholesky decomposition of `self`. Only the provided side is accessed.
    #[track_caller]
    pub fn cholesky(&self, side: Side) -> Result<Llt<E>, CholeskyError> {
        self.rb().cholesky(side)
    }

    /// Returns the eigenvalue decomposition of `self`, assuming it is symmetric. Only the
    /// provided side is accessed.
    #[track_caller]
    pub fn selfadjoint_eigen(&self, side: Side) -> Result<SelfAdjointEigen<E>, EvdError> {
        self.rb().selfadjoint_eigen(side)
    }

    /// Returns the eigenvalues of `self` in ascending order, assuming it is symmetric. Only the
    /// provided side is accessed.
    #[track_caller]
    pub fn selfadjoint_eigenvalues(&self, side: Side) -> Result<Vec<E>, EvdError> {
        self.rb().selfadjoint_eigenvalues(side)
    }
}

impl<E: RealField> Mat<E> {
    /// Returns the Cholesky decomposition of `self`. Only the provided side is accessed.
    #[track_caller]
    pub fn cholesky(&self, side: Side) -> Result<Llt<E>, CholeskyError> {
        self.as_ref().cholesky(side)
    }

    /// Returns the eigenvalue decomposition of `self`, assuming it is symmetric. Only the
    /// provided side is accessed.
    #[track_caller]
    pub fn selfadjoint_eigen(&self, side: Side) -> Result<SelfAdjointEigen<E>, EvdError> {
        self.as_ref().selfadjoint_eigen(side)
    }

    /// Returns the eigenvalues of `self` in ascending order, assuming it is symmetric. Only the
    /// provided side is accessed.
    #[track_caller]
    pub fn selfadjoint_eigenvalues(&self, side: Side) -> Result<Vec<E>, EvdError> {
        self.as_ref().selfadjoint_eigenvalues(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use crate::mat;
    use equator::assert;
    use rand::prelude::*;

    fn random_symmetric(rng: &mut StdRng, n: usize) -> Mat<f64> {
        let a = Mat::from_fn(n, n, |_, _| rng.gen::<f64>() - 0.5);
        Mat::from_fn(n, n, |i, j| a.read(i, j) + a.read(j, i))
    }

    fn random_positive_definite(rng: &mut StdRng, n: usize) -> Mat<f64> {
        let a = Mat::from_fn(n, n, |_, _| rng.gen::<f64>() - 0.5);
        let ata = a.transpose() * &a;
        Mat::from_fn(n, n, |i, j| {
            ata.read(i, j) + if i == j { 1.0 } else { 0.0 }
        })
    }

    #[track_caller]
    fn assert_identity(m: MatRef<'_, f64>, eps: f64) {
        for j in 0..m.ncols() {
            for i in 0..m.nrows() {
                assert_approx_eq!(m.read(i, j), if i == j { 1.0 } else { 0.0 }, eps);
            }
        }
    }

    #[track_caller]
    fn assert_decomposition(a: &Mat<f64>, evd: &SelfAdjointEigen<f64>, eps: f64) {
        let n = a.nrows();
        let s = evd.eigenvalues();
        let u = evd.eigenvectors();

        for i in 1..n {
            assert!(s[i - 1] <= s[i]);
        }

        let au = a * u;
        for j in 0..n {
            for i in 0..n {
                assert_approx_eq!(au.read(i, j), u.read(i, j) * s[j], eps);
            }
        }
        assert_identity((u.transpose() * u).as_ref(), eps);
    }

    #[test]
    fn test_random() {
        let rng = &mut StdRng::seed_from_u64(0);
        for n in [1, 2, 3, 8, 17, 40] {
            let a = random_symmetric(rng, n);
            let evd = a.selfadjoint_eigen(Side::Lower).unwrap();
            assert_decomposition(&a, &evd, 1e-10);
        }
    }

    #[test]
    fn test_upper_side() {
        let rng = &mut StdRng::seed_from_u64(1);
        let n = 9;
        let a = random_symmetric(rng, n);
        let upper = Mat::from_fn(n, n, |i, j| if i <= j { a.read(i, j) } else { f64::NAN });

        let evd = upper.selfadjoint_eigen(Side::Upper).unwrap();
        assert_decomposition(&a, &evd, 1e-10);
    }

    #[test]
    fn test_idempotent() {
        let rng = &mut StdRng::seed_from_u64(2);
        let n = 13;
        let a = random_symmetric(rng, n);

        let mut evd = SelfAdjointEigen::new();
        evd.compute(a.as_ref(), Side::Lower, ComputeVectors::Yes)
            .unwrap();
        let s0 = evd.eigenvalues().to_vec();
        let u0 = evd.eigenvectors().to_owned();

        evd.compute(a.as_ref(), Side::Lower, ComputeVectors::Yes)
            .unwrap();
        assert!(evd.eigenvalues() == &*s0);
        for j in 0..n {
            for i in 0..n {
                assert!(evd.eigenvectors().read(i, j) == u0.read(i, j));
            }
        }
    }

    #[test]
    fn test_storage_reuse() {
        let rng = &mut StdRng::seed_from_u64(3);
        let n = 6;
        let mut evd = SelfAdjointEigen::<f64>::with_dim(n);
        assert!(evd.dim() == n);

        evd.compute(random_symmetric(rng, n).as_ref(), Side::Lower, ComputeVectors::Yes)
            .unwrap();
        let s_ptr = evd.eigenvalues().as_ptr();
        let u_ptr = evd.eigenvectors().as_ptr();

        evd.compute(random_symmetric(rng, n).as_ref(), Side::Lower, ComputeVectors::Yes)
            .unwrap();
        assert!(all(
            evd.eigenvalues().as_ptr() == s_ptr,
            evd.eigenvectors().as_ptr() == u_ptr,
        ));
    }

    #[test]
    fn test_1x1() {
        let a = mat![[5.0f64]];
        let evd = a.selfadjoint_eigen(Side::Lower).unwrap();
        assert!(evd.eigenvalues() == &[5.0]);
        assert!(evd.eigenvectors().read(0, 0) == 1.0);
    }

    #[test]
    fn test_diagonal_2x2() {
        let a = mat![[3.0, 0.0], [0.0, 1.0f64]];
        let evd = a.selfadjoint_eigen(Side::Lower).unwrap();
        let s = evd.eigenvalues();
        let u = evd.eigenvectors();

        assert_approx_eq!(s[0], 1.0, 1e-15);
        assert_approx_eq!(s[1], 3.0, 1e-15);

        assert!(all(
            u.read(0, 0) == 0.0,
            u.read(1, 0).abs() == 1.0,
            u.read(0, 1).abs() == 1.0,
            u.read(1, 1) == 0.0,
        ));
    }

    #[test]
    fn test_scaled_identity() {
        let n = 5;
        let a = Mat::from_fn(n, n, |i, j| if i == j { 2.5 } else { 0.0f64 });
        let evd = a.selfadjoint_eigen(Side::Lower).unwrap();

        for &x in evd.eigenvalues() {
            assert_approx_eq!(x, 2.5, 1e-15);
        }
        assert_identity((evd.eigenvectors().transpose() * evd.eigenvectors()).as_ref(), 1e-15);
    }

    #[test]
    fn test_tiny_offdiag() {
        let a = mat![[1.0, 1e-300], [1e-300, 2.0f64]];
        let evd = a.selfadjoint_eigen(Side::Lower).unwrap();
        assert_approx_eq!(evd.eigenvalues()[0], 1.0, 1e-15);
        assert_approx_eq!(evd.eigenvalues()[1], 2.0, 1e-15);
        assert_identity(evd.eigenvectors(), 1e-15);
    }

    #[test]
    fn test_values_only() {
        let rng = &mut StdRng::seed_from_u64(4);
        let n = 10;
        let a = random_symmetric(rng, n);

        let values = a.selfadjoint_eigenvalues(Side::Lower).unwrap();
        let evd = a.selfadjoint_eigen(Side::Lower).unwrap();
        for i in 0..n {
            assert_approx_eq!(values[i], evd.eigenvalues()[i], 1e-12);
        }

        let mut evd = SelfAdjointEigen::new();
        evd.compute(a.as_ref(), Side::Lower, ComputeVectors::No)
            .unwrap();
        assert!(all(!evd.has_eigenvectors(), evd.try_eigenvectors().is_none()));
    }

    #[test]
    #[should_panic]
    fn test_eigenvectors_not_computed() {
        let a = mat![[1.0, 0.0], [0.5, 1.0f64]];
        let mut evd = SelfAdjointEigen::new();
        evd.compute(a.as_ref(), Side::Lower, ComputeVectors::No)
            .unwrap();
        let _ = evd.eigenvectors();
    }

    #[test]
    #[should_panic]
    fn test_eigenvalues_uncomputed() {
        let evd = SelfAdjointEigen::<f64>::new();
        let _ = evd.eigenvalues();
    }

    #[test]
    #[should_panic]
    fn test_eigenvectors_uncomputed() {
        let evd = SelfAdjointEigen::<f64>::new();
        let _ = evd.eigenvectors();
    }

    #[test]
    #[should_panic]
    fn test_generalized_dimension_mismatch() {
        let a = Mat::<f64>::identity(2, 2);
        let b = Mat::<f64>::identity(3, 3);
        let mut evd = SelfAdjointEigen::new();
        let _ = evd.compute_generalized(a.as_ref(), b.as_ref(), Side::Lower, ComputeVectors::Yes);
    }

    #[test]
    #[should_panic]
    fn test_non_square() {
        let a = Mat::<f64>::zeros(2, 3);
        let _ = a.selfadjoint_eigen(Side::Lower);
    }

    #[test]
    fn test_failed_compute_resets_state() {
        let a = mat![[1.0, 0.0], [1.0, 1.0f64]];
        let mut evd =
            SelfAdjointEigen::new().with_params(SelfAdjointEvdParams::default().with_max_iter(0));

        let err = evd
            .compute(a.as_ref(), Side::Lower, ComputeVectors::Yes)
            .err();
        assert!(err == Some(EvdError::NoConvergence));
        assert!(!evd.has_eigenvectors());
    }

    #[test]
    fn test_operator_sqrt() {
        let rng = &mut StdRng::seed_from_u64(5);
        let n = 7;
        let m = random_positive_definite(rng, n);
        let evd = m.selfadjoint_eigen(Side::Lower).unwrap();

        let sqrt = evd.operator_sqrt();
        let sqrt2 = &sqrt * &sqrt;
        for j in 0..n {
            for i in 0..n {
                assert_approx_eq!(sqrt2.read(i, j), m.read(i, j), 1e-10);
                assert_approx_eq!(sqrt.read(i, j), sqrt.read(j, i), 1e-12);
            }
        }

        let inv_sqrt = evd.operator_inverse_sqrt();
        let whitened = &(&inv_sqrt * &m) * &inv_sqrt;
        assert_identity(whitened.as_ref(), 1e-10);
    }

    #[test]
    fn test_generalized() {
        let rng = &mut StdRng::seed_from_u64(6);
        let n = 6;

        let i = Mat::<f64>::identity(n, n);
        let evd = SelfAdjointEigen::from_pencil(i.as_ref(), i.as_ref(), Side::Lower).unwrap();
        for &x in evd.eigenvalues() {
            assert_approx_eq!(x, 1.0, 1e-15);
        }

        let a = random_symmetric(rng, n);
        let b = random_positive_definite(rng, n);
        let mut evd = SelfAdjointEigen::new();
        evd.compute_generalized(a.as_ref(), b.as_ref(), Side::Upper, ComputeVectors::Yes)
            .unwrap();

        let s = evd.eigenvalues();
        let u = evd.eigenvectors();
        let au = &a * u;
        let bu = &b * u;
        for j in 0..n {
            for i in 0..n {
                assert_approx_eq!(au.read(i, j), s[j] * bu.read(i, j), 1e-9);
            }
        }

        let not_pd = Mat::from_fn(n, n, |i, j| if i == j { -1.0 } else { 0.0 });
        let err = SelfAdjointEigen::from_pencil(a.as_ref(), not_pd.as_ref(), Side::Lower).err();
        assert!(matches!(err, Some(GevdError::NonPositiveDefinite(_))));
    }

    #[test]
    fn test_llt() {
        let rng = &mut StdRng::seed_from_u64(7);
        let n = 8;
        let a = random_positive_definite(rng, n);
        let llt = a.cholesky(Side::Lower).unwrap();
        assert!(llt.dim() == n);
        assert!(format!("{llt:?}").starts_with("Llt"));

        let l = llt.L();
        let llt_t = l * l.transpose();
        for j in 0..n {
            for i in 0..n {
                assert_approx_eq!(llt_t.read(i, j), a.read(i, j), 1e-12);
            }
        }

        let rhs = Mat::from_fn(n, 3, |_, _| rng.gen::<f64>());
        let sol = llt.solve(rhs.as_ref());
        let prod = &a * &sol;
        for j in 0..3 {
            for i in 0..n {
                assert_approx_eq!(prod.read(i, j), rhs.read(i, j), 1e-10);
            }
        }

        let not_pd = mat![[1.0, 2.0], [2.0, 1.0f64]];
        let err = not_pd.cholesky(Side::Upper).err();
        assert!(err.map(|e| e.non_positive_definite_minor) == Some(2));
    }
}
