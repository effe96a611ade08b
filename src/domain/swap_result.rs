//! Outcome of a single swap leg.

use core::fmt;

use super::{PoolSnapshot, SwapDirection, UFixed};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;

/// The outcome of one pool swap: amounts exchanged, the slip fee retained
/// and the pool state after the leg.
///
/// The fee is denominated in the output side and is already deducted from
/// `amount_out`; it is reported, never charged again.
///
/// # Invariants
///
/// - `amount_in > 0`.
///
/// # Examples
///
/// ```
/// use synthpool::domain::{PoolSnapshot, PoolState, SwapDirection, SwapResult, TokenAddress, UFixed};
///
/// let pool = PoolSnapshot {
///     asset: TokenAddress::from_bytes([2u8; 32]),
///     base_reserve: UFixed::from_whole(110),
///     asset_reserve: UFixed::from_whole(92),
///     unit_supply: UFixed::from_whole(100),
///     last_rate: UFixed::ONE,
///     state: PoolState::Active,
/// };
/// let result = SwapResult::new(
///     UFixed::from_whole(10),
///     UFixed::from_whole(8),
///     UFixed::ONE,
///     SwapDirection::BaseToAsset,
///     pool,
/// );
/// assert!(result.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapResult {
    amount_in: UFixed,
    amount_out: UFixed,
    fee: UFixed,
    direction: SwapDirection,
    pool: PoolSnapshot,
}

impl SwapResult {
    /// Creates a new `SwapResult` with validated invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidQuantity`] if `amount_in` is zero.
    pub const fn new(
        amount_in: UFixed,
        amount_out: UFixed,
        fee: UFixed,
        direction: SwapDirection,
        pool: PoolSnapshot,
    ) -> crate::error::Result<Self> {
        if amount_in.is_zero() {
            return Err(AmmError::InvalidQuantity("amount_in must be positive"));
        }
        Ok(Self {
            amount_in,
            amount_out,
            fee,
            direction,
            pool,
        })
    }

    /// Returns the input amount.
    pub const fn amount_in(&self) -> UFixed {
        self.amount_in
    }

    /// Returns the output amount.
    pub const fn amount_out(&self) -> UFixed {
        self.amount_out
    }

    /// Returns the slip fee retained, in output units.
    pub const fn fee(&self) -> UFixed {
        self.fee
    }

    /// Returns the leg direction.
    #[must_use]
    pub const fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Returns the pool state after the leg.
    #[must_use]
    pub const fn pool(&self) -> &PoolSnapshot {
        &self.pool
    }

    /// Realized rate: `amount_out / amount_in`, scaled.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the rate does not fit.
    pub fn effective_rate(&self) -> crate::error::Result<UFixed> {
        self.amount_out.safe_div(&self.amount_in)
    }
}

impl fmt::Display for SwapResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapResult({}: in={}, out={}, fee={})",
            self.direction, self.amount_in, self.amount_out, self.fee
        )
    }
}
