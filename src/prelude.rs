//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use synthpool::prelude::*;
//! ```

pub use crate::domain::{
    AccountId, BasisPoints, LiquidityChange, PoolSnapshot, PoolState, Side, SwapDirection,
    SwapResult, SynthSnapshot, TokenAddress, UFixed,
};

pub use crate::traits::{BalanceLedger, CurationRegistry, FromConfig};

pub use crate::math::CheckedArithmetic;

pub use crate::config::{EngineConfig, PoolConfig};

pub use crate::error::{AmmError, Result};

pub use crate::exchange::{Command, Exchange, Receipt};
pub use crate::factory::{PoolFactory, SynthFactory};
pub use crate::ledger::MemoryLedger;
pub use crate::pools::Pool;
pub use crate::synths::Synthetic;
