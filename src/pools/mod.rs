//! The base-paired pool state machine.
//!
//! | Operation | Effect on reserves | Units |
//! |-----------|--------------------|-------|
//! | [`Pool::swap`] | input `+x`, output `-y` | unchanged |
//! | [`Pool::add_liquidity`] | base `+b`, asset `+t` | issued |
//! | [`Pool::add_liquidity_asymmetric`] | one side `+x` | issued |
//! | [`Pool::remove_liquidity`] | both sides pro rata | burned |
//! | [`Pool::redeem_synthetic`] | one side `-y` | burned |

mod pool;

pub use pool::Pool;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;
