//! Fixed-width nonce arithmetic.
//!
//! Account-model chains use 256-bit nonces, Filecoin uses 64-bit ones. Both are
//! plain unsigned integers with no wraparound: stepping past the maximum is
//! reported as `None` and turned into an error by the strategies, never wrapped.
//! Widths are never converted into each other.

use alloy_primitives::U256;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// An unsigned nonce of a fixed width.
pub trait NonceValue: Copy + Ord + Hash + Debug + Display + Send + Sync + 'static {
    const ZERO: Self;

    /// `self + 1`, or `None` if `self` is already the largest representable value.
    fn checked_next(self) -> Option<Self>;
}

impl NonceValue for u64 {
    const ZERO: Self = 0;

    fn checked_next(self) -> Option<Self> {
        self.checked_add(1)
    }
}

impl NonceValue for U256 {
    const ZERO: Self = U256::ZERO;

    fn checked_next(self) -> Option<Self> {
        self.checked_add(U256::from(1u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u64_next() {
        assert_eq!(7u64.checked_next(), Some(8));
        assert_eq!(u64::MAX.checked_next(), None);
    }

    #[test]
    fn test_u256_next() {
        assert_eq!(U256::ZERO.checked_next(), Some(U256::from(1u8)));
        let beyond_u64 = U256::from(u64::MAX).checked_next().unwrap();
        assert!(beyond_u64 > U256::from(u64::MAX));
        assert_eq!(U256::MAX.checked_next(), None);
    }
}
