//! Commands accepted by [`Exchange::execute`](super::Exchange::execute)
//! and the receipts they produce.

use core::fmt;

use crate::domain::{LiquidityChange, LiquidityResult, SafetyReport, Side, TokenAddress, UFixed};
use crate::router::{RouteResult, ZapResult};
use crate::synths::SynthResult;

/// One user operation against the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// Trade `amount_in` of `from` for at least `min_out` of `to`. Either
    /// token may be the base; two non-base tokens route through base.
    Swap {
        /// Token sold.
        from: TokenAddress,
        /// Token bought.
        to: TokenAddress,
        /// Amount sold.
        amount_in: UFixed,
        /// Slippage floor on the amount bought.
        min_out: UFixed,
    },
    /// Add or remove liquidity in the pool of `asset`.
    Liquidity {
        /// Asset identifying the pool.
        asset: TokenAddress,
        /// Deposit or withdrawal.
        change: LiquidityChange,
    },
    /// Move `units` of liquidity from the `from` pool into the `to` pool.
    Zap {
        /// Asset of the source pool.
        from: TokenAddress,
        /// Asset of the destination pool.
        to: TokenAddress,
        /// Source units to redeem.
        units: UFixed,
    },
    /// Mint the synthetic of `asset`, paying `amount` of `from`.
    MintSynth {
        /// Asset whose synthetic is minted.
        asset: TokenAddress,
        /// Which token of the pool pays.
        from: Side,
        /// Amount paid.
        amount: UFixed,
    },
    /// Burn `amount` of the synthetic of `asset`, paid out in `to`.
    BurnSynth {
        /// Asset whose synthetic is burned.
        asset: TokenAddress,
        /// Synthetic burned.
        amount: UFixed,
        /// Which token of the pool is paid out.
        to: Side,
    },
    /// Run the circuit breaker of the pool of `asset` on demand.
    SafetyCheck {
        /// Asset identifying the pool.
        asset: TokenAddress,
    },
}

impl Command {
    /// Short label used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Swap { .. } => "swap",
            Self::Liquidity { .. } => "liquidity",
            Self::Zap { .. } => "zap",
            Self::MintSynth { .. } => "mint-synth",
            Self::BurnSynth { .. } => "burn-synth",
            Self::SafetyCheck { .. } => "safety-check",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of an executed [`Command`], one variant per command kind.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Receipt {
    /// From [`Command::Swap`].
    Swap(RouteResult),
    /// From [`Command::Liquidity`].
    Liquidity(LiquidityResult),
    /// From [`Command::Zap`].
    Zap(ZapResult),
    /// From [`Command::MintSynth`] and [`Command::BurnSynth`].
    Synth(SynthResult),
    /// From [`Command::SafetyCheck`].
    Safety(SafetyReport),
}
