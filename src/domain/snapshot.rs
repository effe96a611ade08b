//! Post-operation state snapshots handed to event emitters.

use core::fmt;

use super::{TokenAddress, UFixed};

/// Lifecycle state of a pool's circuit breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PoolState {
    /// Accepting state-changing operations.
    #[default]
    Active,
    /// Breaker tripped; every mutating operation fails until cleared
    /// externally.
    Frozen,
}

impl PoolState {
    /// Returns `true` if the breaker has tripped.
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        matches!(self, Self::Frozen)
    }
}

impl fmt::Display for PoolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Frozen => write!(f, "Frozen"),
        }
    }
}

/// Reserve and supply state of one pool after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolSnapshot {
    /// Paired asset identifying the pool.
    pub asset: TokenAddress,
    /// Base units held.
    pub base_reserve: UFixed,
    /// Asset units held.
    pub asset_reserve: UFixed,
    /// Outstanding liquidity units, including the locked minimum.
    pub unit_supply: UFixed,
    /// Rate recorded by the last safety check.
    pub last_rate: UFixed,
    /// Breaker state.
    pub state: PoolState,
}

impl fmt::Display for PoolSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pool({}: base={}, asset={}, units={}, {})",
            self.asset, self.base_reserve, self.asset_reserve, self.unit_supply, self.state
        )
    }
}

/// Collateral and debt of one synthetic after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SynthSnapshot {
    /// Synthetic token.
    pub token: TokenAddress,
    /// Pool units held as backing.
    pub collateral: UFixed,
    /// Synthetic supply outstanding.
    pub debt: UFixed,
}

impl fmt::Display for SynthSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Synth({}: collateral={}, debt={})",
            self.token, self.collateral, self.debt
        )
    }
}
