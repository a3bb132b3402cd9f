/// Primitive integers accepted by [`crate::sort`].
///
/// Conversion is checked: anything outside `0..=u32::MAX` is rejected instead of
/// truncated.
pub trait IntoKey: Copy {
    fn into_key(self) -> Option<u32>;

    /// Lossless widening used when reporting a rejected value.
    fn widen(self) -> i128;
}

macro_rules! impl_into_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoKey for $ty {
                #[inline]
                fn into_key(self) -> Option<u32> {
                    u32::try_from(self).ok()
                }

                #[inline]
                fn widen(self) -> i128 {
                    self as i128
                }
            }
        )*
    };
}

impl_into_key!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl IntoKey for u128 {
    #[inline]
    fn into_key(self) -> Option<u32> {
        u32::try_from(self).ok()
    }

    #[inline]
    fn widen(self) -> i128 {
        // Only reached for rejected values, which are all above u32::MAX.
        i128::try_from(self).unwrap_or(i128::MAX)
    }
}

impl IntoKey for i128 {
    #[inline]
    fn into_key(self) -> Option<u32> {
        u32::try_from(self).ok()
    }

    #[inline]
    fn widen(self) -> i128 {
        self
    }
}

/// The byte of `key` starting at bit `shift`; shift 0 is the least significant byte.
#[inline(always)]
pub(crate) fn digit(key: u32, shift: u32) -> usize {
    ((key >> shift) & 0xFF) as usize
}
