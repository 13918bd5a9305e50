pub trait NumExt: Sized {
    /// Returns the base 2 logarithm of the number, rounding down. Returns `0` for `0`.
    fn ilog2_floor(self) -> Self;

    /// Returns `ceil(self / 2)`.
    fn half_ceil(self) -> Self;

    /// Returns `true` if the number is a power of two greater than or equal to 2.
    fn is_power_of_two_pair(self) -> bool;

    /// Returns the power of two directly below the number. For a power of two `n` this is
    /// `n / 2`, for any other number the largest power of two smaller than it.
    fn previous_power_of_two(self) -> Self;
}

macro_rules! impl_num_ext {
    ($($t:ty),*) => {
        $(
            impl NumExt for $t {
                #[inline]
                fn ilog2_floor(self) -> Self {
                    match self {
                        0 => 0,
                        n => n.ilog2() as Self,
                    }
                }

                #[inline]
                fn half_ceil(self) -> Self {
                    self / 2 + self % 2
                }

                #[inline]
                fn is_power_of_two_pair(self) -> bool {
                    self >= 2 && self & (self - 1) == 0
                }

                #[inline]
                fn previous_power_of_two(self) -> Self {
                    match self {
                        0 => 0,
                        n if n.is_power_of_two_pair() => n / 2,
                        n => (1 as Self) << n.ilog2(),
                    }
                }
            }
        )*
    };
}

impl_num_ext!(u32, usize);

#[cfg(test)]
mod tests {
    use super::NumExt;

    #[test]
    fn test_ilog2() {
        assert_eq!(0_u32.ilog2_floor(), 0);
        assert_eq!(1_u32.ilog2_floor(), 0);
        assert_eq!(2_u32.ilog2_floor(), 1);
        assert_eq!(3_u32.ilog2_floor(), 1);
        assert_eq!(4_u32.ilog2_floor(), 2);
        assert_eq!(8_u32.ilog2_floor(), 3);
        assert_eq!(16_usize.ilog2_floor(), 4);
        assert_eq!(32_usize.ilog2_floor(), 5);
        assert_eq!((1_usize << 20).ilog2_floor(), 20);
    }

    #[test]
    fn test_half_ceil() {
        assert_eq!(0_u32.half_ceil(), 0);
        assert_eq!(1_u32.half_ceil(), 1);
        assert_eq!(2_u32.half_ceil(), 1);
        assert_eq!(3_u32.half_ceil(), 2);
        assert_eq!(4_u32.half_ceil(), 2);
        assert_eq!(7_usize.half_ceil(), 4);
    }

    #[test]
    fn test_power_of_two() {
        assert!(!0_usize.is_power_of_two_pair());
        assert!(!1_usize.is_power_of_two_pair());
        assert!(2_usize.is_power_of_two_pair());
        assert!(!6_usize.is_power_of_two_pair());
        assert!(64_usize.is_power_of_two_pair());

        assert_eq!(1_usize.previous_power_of_two(), 1);
        assert_eq!(2_usize.previous_power_of_two(), 1);
        assert_eq!(3_usize.previous_power_of_two(), 2);
        assert_eq!(4_usize.previous_power_of_two(), 2);
        assert_eq!(5_usize.previous_power_of_two(), 4);
        assert_eq!(6_usize.previous_power_of_two(), 4);
        assert_eq!(8_usize.previous_power_of_two(), 4);
        assert_eq!(9_usize.previous_power_of_two(), 8);
        assert_eq!(33_usize.previous_power_of_two(), 32);
    }
}
