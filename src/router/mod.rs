//! Routing across pools: path resolution, direct and composite swaps, and
//! liquidity zaps.
//!
//! Every multi-pool operation runs on copies of the pools it touches and
//! writes them back only after the last leg succeeds. A failing leg's error
//! is returned unchanged and no pool is modified.

mod path;
mod swap;
mod zap;

pub use path::{resolve_path, Path};
pub use swap::{composite_swap, direct_swap, RouteResult};
pub use zap::{zap_liquidity, ZapResult};
