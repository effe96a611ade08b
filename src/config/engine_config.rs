//! Exchange-wide parameters.

use super::PoolConfig;
use crate::domain::{BasisPoints, TokenAddress, UFixed, BPS_DENOMINATOR};
use crate::error::AmmError;

/// Units locked forever by every pool's first deposit (`100 * 10^18`).
pub const DEFAULT_MINIMUM_LIQUIDITY: UFixed = UFixed::from_whole(100);

/// Rate deviation that trips a pool's circuit breaker (30%).
pub const DEFAULT_FREEZE_THRESHOLD: BasisPoints = BasisPoints::new(3_000);

/// Share of a synthetic redemption withheld by the pool (5%).
pub const DEFAULT_REDEMPTION_HAIRCUT: BasisPoints = BasisPoints::new(500);

/// Parameters shared by every pool and synthetic on one exchange.
///
/// # Validation
///
/// - `minimum_liquidity` must be non-zero.
/// - `freeze_threshold` must lie in `1..=10_000` basis points.
/// - `redemption_haircut` must not exceed 10 000 basis points.
///
/// # Examples
///
/// ```
/// use synthpool::config::EngineConfig;
/// use synthpool::domain::{BasisPoints, TokenAddress};
///
/// let cfg = EngineConfig::with_defaults(TokenAddress::from_bytes([1u8; 32]));
/// assert_eq!(cfg.freeze_threshold(), BasisPoints::new(3_000));
/// assert!(cfg.synth_minting());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    base: TokenAddress,
    minimum_liquidity: UFixed,
    freeze_threshold: BasisPoints,
    redemption_haircut: BasisPoints,
    synth_minting: bool,
}

impl EngineConfig {
    /// Creates a new `EngineConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if validation fails.
    pub fn new(
        base: TokenAddress,
        minimum_liquidity: UFixed,
        freeze_threshold: BasisPoints,
        redemption_haircut: BasisPoints,
        synth_minting: bool,
    ) -> Result<Self, AmmError> {
        let config = Self {
            base,
            minimum_liquidity,
            freeze_threshold,
            redemption_haircut,
            synth_minting,
        };
        config.validate()?;
        Ok(config)
    }

    /// Default parameters around `base`: 100-unit lock, 3000 bp breaker,
    /// 500 bp haircut, synthetic minting on.
    #[must_use]
    pub const fn with_defaults(base: TokenAddress) -> Self {
        Self {
            base,
            minimum_liquidity: DEFAULT_MINIMUM_LIQUIDITY,
            freeze_threshold: DEFAULT_FREEZE_THRESHOLD,
            redemption_haircut: DEFAULT_REDEMPTION_HAIRCUT,
            synth_minting: true,
        }
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] describing the first
    /// violated constraint.
    pub fn validate(&self) -> Result<(), AmmError> {
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
        if !self.redemption_haircut.is_valid_percent() {
            return Err(AmmError::InvalidConfiguration(
                "redemption haircut must not exceed 10000 bp",
            ));
        }
        Ok(())
    }

    /// Derives the configuration of a new pool for `asset`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if `asset` or `units_token` is the base,
    ///   or they coincide.
    pub fn pool_config(
        &self,
        asset: TokenAddress,
        units_token: TokenAddress,
    ) -> Result<PoolConfig, AmmError> {
        if asset == self.base {
            return Err(AmmError::InvalidToken("cannot pool the base against itself"));
        }
        if units_token == self.base {
            return Err(AmmError::InvalidToken("units token cannot be the base"));
        }
        PoolConfig::new(
            asset,
            units_token,
            self.minimum_liquidity,
            self.freeze_threshold,
        )
    }

    /// Switches synthetic minting on or off. Burning stays available.
    pub fn set_synth_minting(&mut self, enabled: bool) {
        self.synth_minting = enabled;
    }

    /// Returns the common base asset.
    #[must_use]
    pub const fn base(&self) -> TokenAddress {
        self.base
    }

    /// Returns the units locked by each first deposit.
    pub const fn minimum_liquidity(&self) -> UFixed {
        self.minimum_liquidity
    }

    /// Returns the breaker threshold.
    #[must_use]
    pub const fn freeze_threshold(&self) -> BasisPoints {
        self.freeze_threshold
    }

    /// Returns the synthetic redemption haircut.
    #[must_use]
    pub const fn redemption_haircut(&self) -> BasisPoints {
        self.redemption_haircut
    }

    /// Returns `true` if synthetics may be minted.
    #[must_use]
    pub const fn synth_minting(&self) -> bool {
        self.synth_minting
    }
}
