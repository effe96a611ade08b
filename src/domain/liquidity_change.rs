//! Mutations to a liquidity position and their outcomes.

use core::fmt;

use super::{PoolSnapshot, Side, UFixed};
use crate::error::AmmError;

/// Descriptor for the type of liquidity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ChangeType {
    /// Depositing both sides.
    Add = 0,
    /// Depositing one side only.
    AddAsymmetric = 1,
    /// Redeeming liquidity units.
    Remove = 2,
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "Add"),
            Self::AddAsymmetric => write!(f, "AddAsymmetric"),
            Self::Remove => write!(f, "Remove"),
        }
    }
}

/// Describes a mutation to a liquidity position: a two-sided deposit, a
/// single-sided deposit, or a redemption of units.
///
/// # Examples
///
/// ```
/// use synthpool::domain::{LiquidityChange, UFixed};
///
/// let change = LiquidityChange::add(UFixed::from_whole(100), UFixed::from_whole(2));
/// assert!(change.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LiquidityChange {
    /// Deposit base and asset together.
    Add {
        /// Base to deposit.
        base_in: UFixed,
        /// Asset to deposit.
        asset_in: UFixed,
    },
    /// Deposit a single side.
    AddAsymmetric {
        /// Amount to deposit.
        amount: UFixed,
        /// Side the amount belongs to.
        side: Side,
    },
    /// Redeem liquidity units for both sides.
    Remove {
        /// Units to burn.
        units: UFixed,
    },
}

impl LiquidityChange {
    /// Creates an `Add` variant.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidQuantity`] if both amounts are zero.
    pub const fn add(base_in: UFixed, asset_in: UFixed) -> crate::error::Result<Self> {
        if base_in.is_zero() && asset_in.is_zero() {
            return Err(AmmError::InvalidQuantity(
                "at least one amount must be positive",
            ));
        }
        Ok(Self::Add { base_in, asset_in })
    }

    /// Creates an `AddAsymmetric` variant.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidQuantity`] if `amount` is zero.
    pub const fn add_asymmetric(amount: UFixed, side: Side) -> crate::error::Result<Self> {
        if amount.is_zero() {
            return Err(AmmError::InvalidQuantity("deposit must be positive"));
        }
        Ok(Self::AddAsymmetric { amount, side })
    }

    /// Creates a `Remove` variant.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidQuantity`] if `units` is zero.
    pub const fn remove(units: UFixed) -> crate::error::Result<Self> {
        if units.is_zero() {
            return Err(AmmError::InvalidQuantity("remove units must be non-zero"));
        }
        Ok(Self::Remove { units })
    }

    /// Returns the [`ChangeType`] descriptor for this variant.
    #[must_use]
    pub const fn change_type(&self) -> ChangeType {
        match self {
            Self::Add { .. } => ChangeType::Add,
            Self::AddAsymmetric { .. } => ChangeType::AddAsymmetric,
            Self::Remove { .. } => ChangeType::Remove,
        }
    }
}

impl fmt::Display for LiquidityChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add { base_in, asset_in } => {
                write!(f, "Add(base={base_in}, asset={asset_in})")
            }
            Self::AddAsymmetric { amount, side } => {
                write!(f, "AddAsymmetric({side}={amount})")
            }
            Self::Remove { units } => write!(f, "Remove(units={units})"),
        }
    }
}

/// Outcome of a liquidity change on one pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LiquidityResult {
    /// What kind of change produced this result.
    pub kind: ChangeType,
    /// Units minted to (add) or burned from (remove) the holder.
    pub units: UFixed,
    /// Units permanently locked by a first deposit; zero otherwise.
    pub locked: UFixed,
    /// Base deposited (add) or paid out (remove).
    pub base: UFixed,
    /// Asset deposited (add) or paid out (remove).
    pub asset: UFixed,
    /// Pool state after the change.
    pub pool: PoolSnapshot,
}
