//! Unsigned 18-decimal fixed-point quantity.

use core::fmt;

/// Number of decimal places carried by every [`UFixed`].
pub const DECIMALS: u32 = 18;

/// Raw value of one whole unit (`10^18`).
pub const SCALE: u128 = 1_000_000_000_000_000_000;

/// A non-negative quantity scaled by `10^18`.
///
/// Reserves, liquidity units, synthetic supply and rates are all carried as
/// `UFixed`. The raw `u128` is the number of `10^-18` sub-units; one whole
/// token is [`UFixed::ONE`].
///
/// The inherent methods are checked and return `None` on failure. Scaled
/// multiplication and division live in
/// [`CheckedArithmetic`](crate::math::CheckedArithmetic), which reports the
/// specific [`AmmError`](crate::error::AmmError) variant instead.
///
/// # Examples
///
/// ```
/// use synthpool::domain::UFixed;
///
/// let a = UFixed::from_whole(100);
/// let b = UFixed::from_whole(200);
/// assert_eq!(a.checked_add(&b), Some(UFixed::from_whole(300)));
/// assert_eq!(b.checked_sub(&a), Some(UFixed::from_whole(100)));
/// assert_eq!(a.checked_sub(&b), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[must_use]
pub struct UFixed(u128);

impl UFixed {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// One whole unit (`10^18` raw).
    pub const ONE: Self = Self(SCALE);

    /// Largest representable value.
    pub const MAX: Self = Self(u128::MAX);

    /// Wraps a raw, already-scaled value.
    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    /// Builds a value from a whole number of units (`units * 10^18`).
    ///
    /// Any `u64` fits: `u64::MAX * 10^18 < u128::MAX`.
    pub const fn from_whole(units: u64) -> Self {
        Self(units as u128 * SCALE)
    }

    /// Returns the raw scaled value.
    #[must_use]
    pub const fn raw(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the value is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Whole-unit part, truncated.
    #[must_use]
    pub const fn whole(&self) -> u128 {
        self.0 / SCALE
    }

    /// Fractional part in raw sub-units (`0..10^18`).
    #[must_use]
    pub const fn fraction(&self) -> u128 {
        self.0 % SCALE
    }

    /// Checked addition. Returns `None` on overflow.
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` if the result would be negative.
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Absolute difference.
    pub const fn abs_diff(&self, other: &Self) -> Self {
        Self(self.0.abs_diff(other.0))
    }
}

impl fmt::Display for UFixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:018}", self.whole(), self.fraction())
    }
}
