//! Synthetic assets collateralised by pool liquidity units.
//!
//! A [`Synthetic`] tracks one pool. Minting deposits base (or the pool's
//! asset) into the pool and holds the issued units as collateral; burning
//! releases a proportional slice of that collateral and pays the holder
//! out of one reserve, minus the redemption haircut.

mod operations;
mod synthetic;

pub use operations::{burn_to_asset, burn_to_base, mint_from_asset, mint_from_base};
pub use synthetic::{SynthResult, Synthetic};
