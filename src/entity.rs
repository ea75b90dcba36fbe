use core::fmt::Debug;

/// Real scalar type usable by the decompositions in this crate.
///
/// The bound on [`bytemuck::Pod`] allows temporaries to be carved out of a
/// [`dyn_stack::PodStack`].
pub trait RealField:
    num_traits::Float + bytemuck::Pod + Debug + PartialOrd + Send + Sync + 'static
{
    /// Relative precision of the type.
    fn faer_epsilon() -> Self;
    /// Value below which the precision starts to deteriorate, e.g. due to denormalized numbers.
    fn faer_zero_threshold() -> Self;
    /// Number of mantissa bits.
    fn faer_nbits() -> usize;

    #[inline(always)]
    fn faer_from_f64(value: f64) -> Self {
        <Self as num_traits::NumCast>::from(value).unwrap_or_else(Self::nan)
    }

    #[inline(always)]
    fn faer_abs2(self) -> Self {
        self * self
    }

    #[inline(always)]
    fn faer_is_finite(self) -> bool {
        num_traits::Float::is_finite(self)
    }
}

impl RealField for f32 {
    #[inline(always)]
    fn faer_epsilon() -> Self {
        Self::EPSILON
    }
    #[inline(always)]
    fn faer_zero_threshold() -> Self {
        Self::MIN_POSITIVE
    }
    #[inline(always)]
    fn faer_nbits() -> usize {
        Self::MANTISSA_DIGITS as usize
    }
}

impl RealField for f64 {
    #[inline(always)]
    fn faer_epsilon() -> Self {
        Self::EPSILON
    }
    #[inline(always)]
    fn faer_zero_threshold() -> Self {
        Self::MIN_POSITIVE
    }
    #[inline(always)]
    fn faer_nbits() -> usize {
        Self::MANTISSA_DIGITS as usize
    }
}
