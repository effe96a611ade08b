//! Configuration for a single base-paired pool.

use crate::domain::{BasisPoints, TokenAddress, UFixed, BPS_DENOMINATOR};
use crate::error::AmmError;

/// Immutable parameters of one base/asset pool.
///
/// # Validation
///
/// - `asset` and `units_token` must differ.
/// - `minimum_liquidity` must be non-zero.
/// - `freeze_threshold` must lie in `1..=10_000` basis points.
///
/// # Examples
///
/// ```
/// use synthpool::config::PoolConfig;
/// use synthpool::domain::{BasisPoints, TokenAddress, UFixed};
///
/// let cfg = PoolConfig::new(
///     TokenAddress::from_bytes([2u8; 32]),
///     TokenAddress::from_bytes([3u8; 32]),
///     UFixed::from_whole(100),
///     BasisPoints::new(3_000),
/// );
/// assert!(cfg.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolConfig {
    asset: TokenAddress,
    units_token: TokenAddress,
    minimum_liquidity: UFixed,
    freeze_threshold: BasisPoints,
}

impl PoolConfig {
    /// Creates a new `PoolConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] or
    /// [`AmmError::InvalidConfiguration`] if validation fails.
    pub fn new(
        asset: TokenAddress,
        units_token: TokenAddress,
        minimum_liquidity: UFixed,
        freeze_threshold: BasisPoints,
    ) -> Result<Self, AmmError> {
        let config = Self {
            asset,
            units_token,
            minimum_liquidity,
            freeze_threshold,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if `asset == units_token`.
    /// - [`AmmError::InvalidConfiguration`] if `minimum_liquidity` is zero or
    ///   `freeze_threshold` is outside `1..=10_000`.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.asset == self.units_token {
            return Err(AmmError::InvalidToken(
                "units token must differ from the pooled asset",
            ));
        }
        if self.minimum_liquidity.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "minimum liquidity must be non-zero",
            ));
        }
        if self.freeze_threshold.get() == 0 || self.freeze_threshold.get() > BPS_DENOMINATOR {
            return Err(AmmError::InvalidConfiguration(
                "freeze threshold must be within 1..=10000 bp",
            ));
        }
        Ok(())
    }

    /// Returns the pooled asset.
    #[must_use]
    pub const fn asset(&self) -> TokenAddress {
        self.asset
    }

    /// Returns the liquidity-unit token.
    #[must_use]
    pub const fn units_token(&self) -> TokenAddress {
        self.units_token
    }

    /// Returns the units locked by the first deposit.
    pub const fn minimum_liquidity(&self) -> UFixed {
        self.minimum_liquidity
    }

    /// Returns the rate deviation above which the pool freezes.
    #[must_use]
    pub const fn freeze_threshold(&self) -> BasisPoints {
        self.freeze_threshold
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn asset() -> TokenAddress {
        TokenAddress::from_bytes([2u8; 32])
    }

    fn units() -> TokenAddress {
        TokenAddress::from_bytes([3u8; 32])
    }

    #[test]
    fn valid_config() {
        let result = PoolConfig::new(asset(), units(), UFixed::ONE, BasisPoints::new(3_000));
        assert!(result.is_ok());
    }

    #[test]
    fn same_tokens_rejected() {
        let result = PoolConfig::new(asset(), asset(), UFixed::ONE, BasisPoints::new(3_000));
        assert!(matches!(result, Err(AmmError::InvalidToken(_))));
    }

    #[test]
    fn zero_minimum_rejected() {
        let result = PoolConfig::new(asset(), units(), UFixed::ZERO, BasisPoints::new(3_000));
        assert!(matches!(result, Err(AmmError::InvalidConfiguration(_))));
    }

    #[test]
    fn threshold_bounds() {
        let zero = PoolConfig::new(asset(), units(), UFixed::ONE, BasisPoints::ZERO);
        assert!(matches!(zero, Err(AmmError::InvalidConfiguration(_))));
        let full = PoolConfig::new(asset(), units(), UFixed::ONE, BasisPoints::MAX_PERCENT);
        assert!(full.is_ok());
        let over = PoolConfig::new(asset(), units(), UFixed::ONE, BasisPoints::new(10_001));
        assert!(matches!(over, Err(AmmError::InvalidConfiguration(_))));
    }

    #[test]
    fn accessors() {
        let Ok(cfg) = PoolConfig::new(asset(), units(), UFixed::from_whole(7), BasisPoints::new(42))
        else {
            panic!("expected Ok");
        };
        assert_eq!(cfg.asset(), asset());
        assert_eq!(cfg.units_token(), units());
        assert_eq!(cfg.minimum_liquidity(), UFixed::from_whole(7));
        assert_eq!(cfg.freeze_threshold(), BasisPoints::new(42));
    }
}
