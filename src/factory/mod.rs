//! Registries owning the exchange's pools and synthetics.
//!
//! [`PoolFactory`] builds pools from [`PoolConfig`] values, keys them by
//! asset, and records which are curated; it is the exchange's
//! [`CurationRegistry`]. [`SynthFactory`] creates synthetics against
//! curated pools and tracks which are active.
//!
//! [`PoolConfig`]: crate::config::PoolConfig
//! [`CurationRegistry`]: crate::traits::CurationRegistry

mod pool_factory;
mod synth_factory;

pub use pool_factory::PoolFactory;
pub use synth_factory::SynthFactory;
