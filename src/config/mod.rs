//! Declarative, validated configuration.
//!
//! [`EngineConfig`] carries the exchange-wide parameters (base asset,
//! minimum liquidity lock, breaker threshold, redemption haircut, synthetic
//! minting switch) and derives one [`PoolConfig`] per pool.

mod engine_config;
mod pool_config;

pub use engine_config::{
    EngineConfig, DEFAULT_FREEZE_THRESHOLD, DEFAULT_MINIMUM_LIQUIDITY, DEFAULT_REDEMPTION_HAIRCUT,
};
pub use pool_config::PoolConfig;
