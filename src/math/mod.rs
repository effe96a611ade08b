//! Arithmetic for pool pricing and accounting.
//!
//! This module provides [`CheckedArithmetic`] for overflow-safe fixed-point
//! operations and the pure formulas the pool state machine applies.
//!
//! | Submodule | Formulas |
//! |-----------|----------|
//! | `swap` | [`swap_output`], [`swap_fee`], [`value_in`] |
//! | `liquidity` | [`initial_units`], [`symmetric_units`], [`asymmetric_units`], [`removal_shares`], [`collateral_share`] |
//! | `rate` | [`pool_rate`], [`deviation_bps`] |
//!
//! Every formula forms its full product in 256- or 512-bit width before a
//! single truncating division.

mod checked;
mod liquidity;
mod rate;
mod swap;
pub(crate) mod wide;

pub use checked::CheckedArithmetic;
pub use liquidity::{
    asymmetric_units, collateral_share, initial_units, removal_shares, symmetric_units,
};
pub use rate::{deviation_bps, pool_rate};
pub use swap::{swap_fee, swap_output, value_in};
