//! Overflow-checked integer helpers shared by solutions.
//!
//! [`CheckedProduct`] multiplies iterators of integers, and [`checked_lcm`] folds least common
//! multiples; both report overflow as `None` instead of wrapping.

use num_traits::{CheckedMul, One, PrimInt};

/// Iterator extension trait for calculating the product of numbers with overflow checking.
pub trait CheckedProduct<T> {
    /// Multiplies numbers in an iterator, returning `None` if overflow occurred.
    fn checked_product(self) -> Option<T>;
}

impl<T, I> CheckedProduct<T> for I
where
    T: CheckedMul + One,
    I: Iterator<Item = T>,
{
    fn checked_product(mut self) -> Option<T> {
        self.try_fold(T::one(), |acc, value| acc.checked_mul(&value))
    }
}

/// Greatest common divisor by Euclid's algorithm.
pub fn gcd<T: PrimInt>(mut a: T, mut b: T) -> T {
    while !b.is_zero() {
        (a, b) = (b, a % b);
    }
    a
}

/// Least common multiple of two numbers, `None` on overflow.
///
/// The least common multiple with zero is zero.
pub fn lcm<T: PrimInt>(a: T, b: T) -> Option<T> {
    if a.is_zero() || b.is_zero() {
        return Some(T::zero());
    }
    // divide first to keep the intermediate small
    (a / gcd(a, b)).checked_mul(&b)
}

/// Least common multiple of every number in an iterator, `None` on overflow.
///
/// An empty iterator has a least common multiple of one.
pub fn checked_lcm<T, I>(values: I) -> Option<T>
where
    T: PrimInt,
    I: IntoIterator<Item = T>,
{
    values
        .into_iter()
        .try_fold(T::one(), |acc, value| lcm(acc, value))
}
