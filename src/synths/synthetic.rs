//! A synthetic asset backed by liquidity units of one pool.

use core::fmt;

use crate::domain::{AccountId, PoolSnapshot, SynthSnapshot, TokenAddress, UFixed};

/// One synthetic tracking the pool of `asset`.
///
/// The synthetic's `account` holds `collateral` units of the pool's units
/// token in the balance ledger; `debt` equals the synthetic token's total
/// supply.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Synthetic {
    asset: TokenAddress,
    token: TokenAddress,
    account: AccountId,
    pub(crate) collateral: UFixed,
    pub(crate) debt: UFixed,
}

impl Synthetic {
    /// Creates a synthetic with no collateral and no debt.
    #[must_use]
    pub const fn new(asset: TokenAddress, token: TokenAddress) -> Self {
        Self {
            asset,
            token,
            account: AccountId::for_token(&token),
            collateral: UFixed::ZERO,
            debt: UFixed::ZERO,
        }
    }

    /// Returns the asset whose pool backs the synthetic.
    #[must_use]
    pub const fn asset(&self) -> TokenAddress {
        self.asset
    }

    /// Returns the synthetic token.
    #[must_use]
    pub const fn token(&self) -> TokenAddress {
        self.token
    }

    /// Returns the ledger account holding the collateral units.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.account
    }

    /// Returns the pool units held as backing.
    pub const fn collateral(&self) -> UFixed {
        self.collateral
    }

    /// Returns the outstanding synthetic supply.
    pub const fn debt(&self) -> UFixed {
        self.debt
    }

    /// Captures collateral and debt.
    #[must_use]
    pub const fn snapshot(&self) -> SynthSnapshot {
        SynthSnapshot {
            token: self.token,
            collateral: self.collateral,
            debt: self.debt,
        }
    }
}

impl fmt::Display for Synthetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.snapshot())
    }
}

/// Outcome of a synthetic mint or burn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SynthResult {
    /// Underlying paid in (mint) or synthetic burned (burn).
    pub amount_in: UFixed,
    /// Synthetic issued (mint) or underlying paid out (burn).
    pub amount_out: UFixed,
    /// Pool units added to (mint) or released from (burn) the collateral.
    pub units: UFixed,
    /// Backing pool after the operation.
    pub pool: PoolSnapshot,
    /// Synthetic after the operation.
    pub synth: SynthSnapshot,
}
