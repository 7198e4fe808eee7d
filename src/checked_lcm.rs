//! Utility for calculating the least common multiple of iterators while checking for overflow.
//!
//! The [`CheckedLcm`] trait is implemented for iterators of unsigned integer types, via those
//! types implementing [`CheckedLeastCommonMultiple`].

use num_traits::{One, Zero};

/// Iterator extension trait for calculating the least common multiple of numbers with overflow
/// checking.
pub trait CheckedLcm<T> {
    /// Finds the least common multiple of numbers in an iterator, checking for overflow.
    /// Returns `None` if overflow occurred.
    ///
    /// An empty iterator has a least common multiple of one, and any zero makes it zero.
    fn checked_lcm(self) -> Option<T>;
}

impl<T, I> CheckedLcm<T> for I
where
    T: CheckedLeastCommonMultiple + One,
    I: Iterator<Item = T>,
{
    fn checked_lcm(mut self) -> Option<T> {
        self.try_fold(T::one(), |acc, value| acc.checked_least_common_multiple(&value))
    }
}

/// Numeric type supporting overflow-checked least common multiples.
pub trait CheckedLeastCommonMultiple: Sized + Copy + Zero {
    /// The greatest common divisor of two numbers.
    fn greatest_common_divisor(self, other: Self) -> Self;

    /// Finds the least common multiple of two numbers checking for overflow, returns `None` if
    /// overflow occurred.
    fn checked_least_common_multiple(&self, other: &Self) -> Option<Self>;
}

macro_rules! impl_checked_least_common_multiple {
    ($($t:ty),*) => {
        $(
            impl CheckedLeastCommonMultiple for $t {
                fn greatest_common_divisor(self, other: Self) -> Self {
                    let (mut a, mut b) = (self, other);
                    while b != 0 {
                        (a, b) = (b, a % b);
                    }
                    a
                }

                fn checked_least_common_multiple(&self, other: &Self) -> Option<Self> {
                    if self.is_zero() || other.is_zero() {
                        return Some(0);
                    }
                    // divide first so only the final product can overflow
                    let divisor = self.greatest_common_divisor(*other);
                    (*self / divisor).checked_mul(*other)
                }
            }
        )*
    };
}

impl_checked_least_common_multiple!(u8, u16, u32, u64, u128, usize);

#[cfg(test)]
mod tests {
    use crate::checked_lcm::{CheckedLcm, CheckedLeastCommonMultiple};

    #[test]
    fn test_checked_lcm() {
        let values = vec![2u64, 3, 4, 6];
        assert_eq!(values.into_iter().checked_lcm(), Some(12));

        let values = vec![7u64, 11, 13];
        assert_eq!(values.into_iter().checked_lcm(), Some(1001));
    }

    #[test]
    fn test_checked_lcm_empty_iterator() {
        let values: Vec<u32> = vec![];
        assert_eq!(values.into_iter().checked_lcm(), Some(1));
    }

    #[test]
    fn test_checked_lcm_zero() {
        let values = vec![5u32, 0, 7];
        assert_eq!(values.into_iter().checked_lcm(), Some(0));
    }

    #[test]
    fn test_checked_lcm_overflow() {
        let values = vec![251u8, 2];
        assert_eq!(values.into_iter().checked_lcm(), None);

        // shared factors don't overflow even when the plain product would
        let values = vec![120u8, 240];
        assert_eq!(values.into_iter().checked_lcm(), Some(240));
    }

    #[test]
    fn test_greatest_common_divisor() {
        assert_eq!(48u32.greatest_common_divisor(18), 6);
        assert_eq!(7u32.greatest_common_divisor(0), 7);
    }
}
