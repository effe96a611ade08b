//! Basis-point representation for percentages.

use core::fmt;

use super::UFixed;
use crate::error::AmmError;
use crate::math::wide;

/// Value that represents 100%.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// A percentage expressed in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// Used for the circuit-breaker threshold (3000 bp) and the synthetic
/// redemption haircut (500 bp).
///
/// # Examples
///
/// ```
/// use synthpool::domain::BasisPoints;
///
/// let bp = BasisPoints::new(500);
/// assert_eq!(bp.get(), 500);
/// assert_eq!(bp.complement(), BasisPoints::new(9_500));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// Zero basis points (0%).
    pub const ZERO: Self = Self(0);

    /// 100% expressed in basis points.
    pub const MAX_PERCENT: Self = Self(BPS_DENOMINATOR);

    /// Creates a new `BasisPoints` from a raw `u32` value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the underlying `u32` value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the value is in the valid percentage range (`0..=10_000`).
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 <= BPS_DENOMINATOR
    }

    /// Returns `10 000 - self`, saturating at zero.
    #[must_use]
    pub const fn complement(&self) -> Self {
        Self(BPS_DENOMINATOR.saturating_sub(self.0))
    }

    /// Computes `amount * self / 10 000`, truncated.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result does not fit.
    pub fn apply(&self, amount: UFixed) -> crate::error::Result<UFixed> {
        wide::mul_div(
            amount.raw(),
            u128::from(self.0),
            u128::from(BPS_DENOMINATOR),
        )
        .map(UFixed::from_raw)
        .map_err(|e| match e {
            AmmError::DivideByZero => AmmError::DivideByZero,
            _ => AmmError::Overflow("basis points apply overflow"),
        })
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_and_get() {
        assert_eq!(BasisPoints::new(30).get(), 30);
    }

    #[test]
    fn constants() {
        assert_eq!(BasisPoints::ZERO.get(), 0);
        assert_eq!(BasisPoints::MAX_PERCENT.get(), 10_000);
    }

    #[test]
    fn valid_percent_range() {
        assert!(BasisPoints::ZERO.is_valid_percent());
        assert!(BasisPoints::new(3_000).is_valid_percent());
        assert!(BasisPoints::MAX_PERCENT.is_valid_percent());
        assert!(!BasisPoints::new(10_001).is_valid_percent());
    }

    #[test]
    fn complement() {
        assert_eq!(BasisPoints::new(500).complement(), BasisPoints::new(9_500));
        assert_eq!(BasisPoints::MAX_PERCENT.complement(), BasisPoints::ZERO);
        assert_eq!(BasisPoints::new(20_000).complement(), BasisPoints::ZERO);
    }

    #[test]
    fn apply_truncates() {
        // 9 * 9500 / 10000 = 8.55 -> 8
        let Ok(v) = BasisPoints::new(9_500).apply(UFixed::from_raw(9)) else {
            panic!("expected Ok");
        };
        assert_eq!(v, UFixed::from_raw(8));
    }

    #[test]
    fn apply_whole_units() {
        let Ok(v) = BasisPoints::new(9_500).apply(UFixed::from_whole(100)) else {
            panic!("expected Ok");
        };
        assert_eq!(v, UFixed::from_whole(95));
    }

    #[test]
    fn apply_does_not_overflow_on_max() {
        let Ok(v) = BasisPoints::MAX_PERCENT.apply(UFixed::MAX) else {
            panic!("expected Ok");
        };
        assert_eq!(v, UFixed::MAX);
    }

    #[test]
    fn apply_above_hundred_percent_overflows() {
        let r = BasisPoints::new(20_000).apply(UFixed::MAX);
        assert!(matches!(r, Err(AmmError::Overflow(_))));
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", BasisPoints::new(3_000)), "3000bp");
    }
}
