//! Checked arithmetic trait for fixed-point quantities.
//!
//! The [`CheckedArithmetic`] trait provides fallible arithmetic operations
//! that return [`Result<Self, AmmError>`](crate::error::AmmError) instead
//! of panicking on overflow, underflow, or division by zero.
//!
//! # Examples
//!
//! ```
//! use synthpool::domain::UFixed;
//! use synthpool::math::CheckedArithmetic;
//!
//! let a = UFixed::from_whole(3);
//! let b = UFixed::from_whole(2);
//! assert_eq!(a.safe_mul(&b), Ok(UFixed::from_whole(6)));
//! assert_eq!(a.safe_div(&b), Ok(UFixed::from_raw(1_500_000_000_000_000_000)));
//! ```

use crate::domain::{UFixed, SCALE};
use crate::error::AmmError;
use crate::math::wide;

/// Fallible arithmetic for scaled quantities.
///
/// Every method returns [`Result<Self, AmmError>`] with a specific error
/// variant so callers can distinguish overflow from underflow from
/// division by zero.
///
/// # Contract
///
/// - **No panics**: all error conditions produce `Err`.
/// - **No saturation**: errors propagate instead.
/// - **Truncation toward zero** on `safe_mul` and `safe_div`.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result exceeds the
    /// representable range.
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError>;

    /// Scaled multiplication: `a * b / 10^18`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result exceeds the
    /// representable range.
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError>;

    /// Scaled division: `a * 10^18 / b`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::DivideByZero`] if `other` is zero.
    /// - [`AmmError::Overflow`] if the result exceeds the representable range.
    fn safe_div(&self, other: &Self) -> Result<Self, AmmError>;
}

impl CheckedArithmetic for UFixed {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("fixed-point addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("fixed-point subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError> {
        wide::mul_div(self.raw(), other.raw(), SCALE)
            .map(Self::from_raw)
            .map_err(|_| AmmError::Overflow("fixed-point multiplication overflow"))
    }

    #[inline]
    fn safe_div(&self, other: &Self) -> Result<Self, AmmError> {
        if other.is_zero() {
            return Err(AmmError::DivideByZero);
        }
        wide::mul_div(self.raw(), SCALE, other.raw())
            .map(Self::from_raw)
            .map_err(|_| AmmError::Overflow("fixed-point division overflow"))
    }
}
