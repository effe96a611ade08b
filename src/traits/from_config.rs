//! Generic construction trait for building values from configuration.
//!
//! [`FromConfig`] provides a uniform interface for creating instances from
//! their validated configuration structs. The
//! [`Exchange`](crate::exchange::Exchange) builds every pool this way:
//!
//! ```text
//! EngineConfig::pool_config(asset, units_token) => PoolConfig
//! Pool::from_config(&pool_config)               => empty Pool
//! ```
//!
//! # Validation Contract
//!
//! Implementations **must** re-validate the configuration during
//! construction. A successfully constructed value is guaranteed to be in
//! a valid initial state.
//!
//! There is no blanket implementation; each pairing is intentional.

use crate::error::AmmError;

/// Construction from a configuration.
///
/// # Implementors
///
/// - `impl FromConfig<PoolConfig> for Pool`
///
/// # Errors
///
/// Returns [`AmmError::InvalidConfiguration`] (or a more specific
/// variant) if the configuration is invalid.
pub trait FromConfig<C> {
    /// Creates a new instance from the given configuration.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if any parameter is out of range.
    /// - [`AmmError::InvalidToken`] if the token identities are inconsistent.
    fn from_config(config: &C) -> Result<Self, AmmError>
    where
        Self: Sized;
}
