//! Fundamental domain value types used throughout the engine.
//!
//! This module contains the value types that model the exchange: scaled
//! quantities, basis points, token and account identifiers, swap
//! directions, and the snapshots and results operations hand back for
//! event emission.

mod basis_points;
mod liquidity_change;
mod safety_report;
mod side;
mod snapshot;
mod swap_result;
mod token_address;
mod ufixed;

pub use basis_points::{BasisPoints, BPS_DENOMINATOR};
pub use liquidity_change::{ChangeType, LiquidityChange, LiquidityResult};
pub use safety_report::SafetyReport;
pub use side::{Side, SwapDirection};
pub use snapshot::{PoolSnapshot, PoolState, SynthSnapshot};
pub use swap_result::SwapResult;
pub use token_address::{AccountId, TokenAddress};
pub use ufixed::{UFixed, DECIMALS, SCALE};
