use crate::{get_global_parallelism, linalg::matmul::matmul, Mat, MatMut, MatRef, RealField};
use core::ops::Mul;
use equator::assert;

macro_rules! impl_mul {
    ($lhs: ty, $rhs: ty) => {
        impl<E: RealField> Mul<$rhs> for $lhs {
            type Output = Mat<E>;

            #[track_caller]
            fn mul(self, other: $rhs) -> Self::Output {
                mul_imp(self.as_ref(), other.as_ref())
            }
        }
    };
}

#[track_caller]
fn mul_imp<E: RealField>(lhs: MatRef<'_, E>, rhs: MatRef<'_, E>) -> Mat<E> {
    assert!(lhs.ncols() == rhs.nrows());
    let mut out = Mat::zeros(lhs.nrows(), rhs.ncols());
    matmul(
        out.as_mut(),
        lhs,
        rhs,
        None,
        E::one(),
        get_global_parallelism(),
    );
    out
}

// `Mat` provides `as_ref` as an inherent method, views go through this trait.
trait AsMatRef<E> {
    fn as_ref(&self) -> MatRef<'_, E>;
}

impl<E> AsMatRef<E> for MatRef<'_, E> {
    #[inline]
    fn as_ref(&self) -> MatRef<'_, E> {
        *self
    }
}

impl<E> AsMatRef<E> for MatMut<'_, E> {
    #[inline]
    fn as_ref(&self) -> MatRef<'_, E> {
        reborrow::Reborrow::rb(self)
    }
}

impl_mul!(MatRef<'_, E>, MatRef<'_, E>);
impl_mul!(MatRef<'_, E>, &Mat<E>);
impl_mul!(&Mat<E>, MatRef<'_, E>);
impl_mul!(&Mat<E>, &Mat<E>);
impl_mul!(MatMut<'_, E>, MatRef<'_, E>);
impl_mul!(MatRef<'_, E>, MatMut<'_, E>);
