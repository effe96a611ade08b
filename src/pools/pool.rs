//! Base-paired constant-product pool with a rate-deviation circuit breaker.
//!
//! Every pool pairs the common base asset with one asset. Swaps price with
//! the slip-fee curve from [`swap_output`]; liquidity is issued in units
//! tracked by `unit_supply`.
//!
//! # Lifecycle
//!
//! ```text
//!   from_config        first add_liquidity        deviation > threshold
//! ───────────▶ empty ─────────────────────▶ Active ─────────────────────▶ Frozen
//!                                              ▲                            │
//!                                              └──────── clear_freeze ──────┘
//! ```
//!
//! While frozen every mutating operation fails with
//! [`AmmError::PoolFrozen`]; only [`Pool::safety_check`] still runs.
//! Each mutation computes the new reserves and their rate first; only then
//! does it commit and run the safety check, so a failed call leaves the
//! pool untouched. A trade that trips the breaker still completes.

use tracing::{debug, info, warn};

use crate::config::PoolConfig;
use crate::domain::{
    BasisPoints, ChangeType, LiquidityResult, PoolSnapshot, PoolState, SafetyReport, Side,
    SwapDirection, SwapResult, TokenAddress, UFixed,
};
use crate::error::AmmError;
use crate::math::{
    asymmetric_units, deviation_bps, initial_units, pool_rate, removal_shares, swap_fee,
    swap_output, symmetric_units, CheckedArithmetic,
};
use crate::traits::FromConfig;

/// One base/asset reserve pair.
///
/// # State
///
/// - `base_reserve` / `asset_reserve`: current holdings.
/// - `unit_supply`: outstanding liquidity units, including the units locked
///   by the first deposit.
/// - `last_rate`: base per asset (scaled) recorded by the last safety check.
/// - `state`: breaker state.
///
/// # Invariants
///
/// - `unit_supply > 0` implies both reserves are non-zero.
/// - `unit_supply == 0` if and only if both reserves are zero.
///
/// # Example
///
/// ```rust
/// use synthpool::config::PoolConfig;
/// use synthpool::domain::{BasisPoints, SwapDirection, TokenAddress, UFixed};
/// use synthpool::pools::Pool;
/// use synthpool::traits::FromConfig;
///
/// let cfg = PoolConfig::new(
///     TokenAddress::from_bytes([2u8; 32]),
///     TokenAddress::from_bytes([3u8; 32]),
///     UFixed::from_whole(100),
///     BasisPoints::new(3_000),
/// )
/// .expect("valid config");
/// let mut pool = Pool::from_config(&cfg).expect("pool created");
/// pool.add_liquidity(UFixed::from_whole(10_000), UFixed::from_whole(30))
///     .expect("first deposit");
///
/// let result = pool
///     .swap(UFixed::from_whole(3), SwapDirection::AssetToBase, UFixed::ZERO)
///     .expect("swap ok");
/// assert_eq!(result.amount_out().whole(), 826);
/// assert_eq!(pool.asset_reserve(), UFixed::from_whole(33));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    asset: TokenAddress,
    units_token: TokenAddress,
    base_reserve: UFixed,
    asset_reserve: UFixed,
    unit_supply: UFixed,
    last_rate: UFixed,
    state: PoolState,
    minimum_liquidity: UFixed,
    freeze_threshold: BasisPoints,
}

impl Pool {
    /// Returns the paired asset.
    #[must_use]
    pub const fn asset(&self) -> TokenAddress {
        self.asset
    }

    /// Returns the liquidity-unit token.
    #[must_use]
    pub const fn units_token(&self) -> TokenAddress {
        self.units_token
    }

    /// Returns the base reserve.
    pub const fn base_reserve(&self) -> UFixed {
        self.base_reserve
    }

    /// Returns the asset reserve.
    pub const fn asset_reserve(&self) -> UFixed {
        self.asset_reserve
    }

    /// Returns the reserve of `side`.
    pub const fn reserve(&self, side: Side) -> UFixed {
        match side {
            Side::Base => self.base_reserve,
            Side::Asset => self.asset_reserve,
        }
    }

    /// Returns outstanding liquidity units.
    pub const fn unit_supply(&self) -> UFixed {
        self.unit_supply
    }

    /// Returns the rate recorded by the last safety check.
    pub const fn last_rate(&self) -> UFixed {
        self.last_rate
    }

    /// Returns the breaker state.
    #[must_use]
    pub const fn state(&self) -> PoolState {
        self.state
    }

    /// Returns the units locked by the first deposit.
    pub const fn minimum_liquidity(&self) -> UFixed {
        self.minimum_liquidity
    }

    /// Returns `true` before the first deposit.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.unit_supply.is_zero()
    }

    /// Captures the current reserves, supply and breaker state.
    #[must_use]
    pub const fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            asset: self.asset,
            base_reserve: self.base_reserve,
            asset_reserve: self.asset_reserve,
            unit_supply: self.unit_supply,
            last_rate: self.last_rate,
            state: self.state,
        }
    }

    /// Current base per asset, scaled by `10^18`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the rate does not fit.
    pub fn current_rate(&self) -> Result<UFixed, AmmError> {
        pool_rate(self.base_reserve, self.asset_reserve)
    }

    fn ensure_active(&self) -> Result<(), AmmError> {
        if self.state.is_frozen() {
            return Err(AmmError::PoolFrozen);
        }
        Ok(())
    }

    fn reserves_for(&self, direction: SwapDirection) -> (UFixed, UFixed) {
        (
            self.reserve(direction.input_side()),
            self.reserve(direction.output_side()),
        )
    }

    /// `(base, asset)` with the `side` reserve replaced by `value`.
    fn reserves_with(&self, side: Side, value: UFixed) -> (UFixed, UFixed) {
        match side {
            Side::Base => (value, self.asset_reserve),
            Side::Asset => (self.base_reserve, value),
        }
    }

    /// Prices the new reserves, then writes them and records the rate.
    /// Nothing changes if the rate does not fit.
    fn commit(
        &mut self,
        base: UFixed,
        asset: UFixed,
        supply: UFixed,
    ) -> Result<SafetyReport, AmmError> {
        let rate = pool_rate(base, asset)?;
        self.base_reserve = base;
        self.asset_reserve = asset;
        self.unit_supply = supply;
        Ok(self.record_rate(rate))
    }

    // -- swap ---------------------------------------------------------------

    /// Prices a swap without touching state. Returns `(amount_out, fee)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::EmptyPool`] if either reserve is zero.
    /// - [`AmmError::Overflow`] if the computation overflows.
    pub fn quote_swap(
        &self,
        amount_in: UFixed,
        direction: SwapDirection,
    ) -> Result<(UFixed, UFixed), AmmError> {
        let (reserve_in, reserve_out) = self.reserves_for(direction);
        let out = swap_output(amount_in, reserve_in, reserve_out)?;
        let fee = swap_fee(amount_in, reserve_in, reserve_out)?;
        Ok((out, fee))
    }

    /// Sells `amount_in` of the direction's input side into the pool.
    ///
    /// The input reserve grows by exactly `amount_in` and the output reserve
    /// shrinks by exactly the returned `amount_out`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolFrozen`] if the breaker has tripped.
    /// - [`AmmError::InvalidQuantity`] if `amount_in` is zero.
    /// - [`AmmError::EmptyPool`] if either reserve is zero.
    /// - [`AmmError::InsufficientOutput`] if the output is below `min_out`.
    /// - [`AmmError::InsufficientLiquidity`] if the output would drain the
    ///   output reserve.
    /// - [`AmmError::Overflow`] if the input reserve would overflow.
    pub fn swap(
        &mut self,
        amount_in: UFixed,
        direction: SwapDirection,
        min_out: UFixed,
    ) -> Result<SwapResult, AmmError> {
        self.ensure_active()?;
        if amount_in.is_zero() {
            return Err(AmmError::InvalidQuantity("swap input must be positive"));
        }

        let (reserve_in, reserve_out) = self.reserves_for(direction);
        let (amount_out, fee) = self.quote_swap(amount_in, direction)?;

        if min_out > amount_out {
            return Err(AmmError::InsufficientOutput {
                minimum: min_out,
                actual: amount_out,
            });
        }
        if amount_out >= reserve_out {
            return Err(AmmError::InsufficientLiquidity);
        }

        let new_in = reserve_in.safe_add(&amount_in)?;
        let new_out = reserve_out.safe_sub(&amount_out)?;
        let (new_base, new_asset) = match direction {
            SwapDirection::BaseToAsset => (new_in, new_out),
            SwapDirection::AssetToBase => (new_out, new_in),
        };

        self.commit(new_base, new_asset, self.unit_supply)?;
        debug!(
            asset = %self.asset,
            %direction,
            %amount_in,
            %amount_out,
            %fee,
            "swap leg"
        );
        SwapResult::new(amount_in, amount_out, fee, direction, self.snapshot())
    }

    // -- liquidity ----------------------------------------------------------

    /// Deposits both sides and issues liquidity units.
    ///
    /// On an empty pool this is the first deposit: it mints the geometric
    /// mean of the two sides, locks `minimum_liquidity` of it, and seeds
    /// `last_rate`. Otherwise it mints
    /// `S * (b*T + t*B) / (2*B*T)` units.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolFrozen`] if the breaker has tripped.
    /// - [`AmmError::InvalidQuantity`] if both sides are zero, a first deposit
    ///   lacks a side or does not exceed the lock, or the deposit is too
    ///   small to mint a unit.
    /// - [`AmmError::Overflow`] if a reserve or the supply would overflow.
    pub fn add_liquidity(
        &mut self,
        base_in: UFixed,
        asset_in: UFixed,
    ) -> Result<LiquidityResult, AmmError> {
        self.ensure_active()?;
        if base_in.is_zero() && asset_in.is_zero() {
            return Err(AmmError::InvalidQuantity("must deposit at least one side"));
        }

        if self.is_empty() {
            let total = initial_units(base_in, asset_in, self.minimum_liquidity)?;
            let units = total.safe_sub(&self.minimum_liquidity)?;
            let rate = pool_rate(base_in, asset_in)?;

            self.base_reserve = base_in;
            self.asset_reserve = asset_in;
            self.unit_supply = total;
            self.last_rate = rate;
            info!(
                asset = %self.asset,
                %base_in,
                %asset_in,
                %units,
                locked = %self.minimum_liquidity,
                "pool seeded"
            );
            return Ok(LiquidityResult {
                kind: ChangeType::Add,
                units,
                locked: self.minimum_liquidity,
                base: base_in,
                asset: asset_in,
                pool: self.snapshot(),
            });
        }

        let units = symmetric_units(
            base_in,
            asset_in,
            self.base_reserve,
            self.asset_reserve,
            self.unit_supply,
        )?;
        if units.is_zero() {
            return Err(AmmError::InvalidQuantity("deposit too small to mint units"));
        }

        let new_base = self.base_reserve.safe_add(&base_in)?;
        let new_asset = self.asset_reserve.safe_add(&asset_in)?;
        let new_supply = self.unit_supply.safe_add(&units)?;

        self.commit(new_base, new_asset, new_supply)?;
        debug!(asset = %self.asset, %base_in, %asset_in, %units, "liquidity added");

        Ok(LiquidityResult {
            kind: ChangeType::Add,
            units,
            locked: UFixed::ZERO,
            base: base_in,
            asset: asset_in,
            pool: self.snapshot(),
        })
    }

    /// Deposits a single side and issues `S * amount / (2 * R_side)` units.
    ///
    /// The side's reserve grows by the full amount; the other reserve is
    /// unchanged.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolFrozen`] if the breaker has tripped.
    /// - [`AmmError::InvalidQuantity`] if `amount` is zero or too small to
    ///   mint a unit.
    /// - [`AmmError::EmptyPool`] before the first deposit.
    /// - [`AmmError::Overflow`] if the reserve or the supply would overflow.
    pub fn add_liquidity_asymmetric(
        &mut self,
        amount: UFixed,
        side: Side,
    ) -> Result<LiquidityResult, AmmError> {
        self.add_liquidity_asymmetric_at(amount, side, self.reserve(side))
    }

    /// As [`Pool::add_liquidity_asymmetric`], but units are priced against
    /// `reference` instead of the live `side` reserve. Synthetic mints that
    /// first swap through the pool use this to issue on pre-swap depth.
    pub(crate) fn add_liquidity_asymmetric_at(
        &mut self,
        amount: UFixed,
        side: Side,
        reference: UFixed,
    ) -> Result<LiquidityResult, AmmError> {
        self.ensure_active()?;
        if amount.is_zero() {
            return Err(AmmError::InvalidQuantity("deposit must be positive"));
        }
        if self.is_empty() {
            return Err(AmmError::EmptyPool);
        }

        let units = asymmetric_units(amount, reference, self.unit_supply)?;
        if units.is_zero() {
            return Err(AmmError::InvalidQuantity("deposit too small to mint units"));
        }

        let new_reserve = self.reserve(side).safe_add(&amount)?;
        let new_supply = self.unit_supply.safe_add(&units)?;
        let (new_base, new_asset) = self.reserves_with(side, new_reserve);

        self.commit(new_base, new_asset, new_supply)?;
        debug!(asset = %self.asset, %side, %amount, %units, "single-sided liquidity added");

        let (base, asset) = match side {
            Side::Base => (amount, UFixed::ZERO),
            Side::Asset => (UFixed::ZERO, amount),
        };
        Ok(LiquidityResult {
            kind: ChangeType::AddAsymmetric,
            units,
            locked: UFixed::ZERO,
            base,
            asset,
            pool: self.snapshot(),
        })
    }

    /// Burns `units` and pays out the pro-rata share of both reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolFrozen`] if the breaker has tripped.
    /// - [`AmmError::InvalidQuantity`] if `units` is zero.
    /// - [`AmmError::InsufficientUnits`] if `units` exceeds the supply.
    pub fn remove_liquidity(&mut self, units: UFixed) -> Result<LiquidityResult, AmmError> {
        self.ensure_active()?;
        if units.is_zero() {
            return Err(AmmError::InvalidQuantity("remove units must be non-zero"));
        }

        let (base_out, asset_out) = removal_shares(
            units,
            self.base_reserve,
            self.asset_reserve,
            self.unit_supply,
        )?;

        let new_base = self.base_reserve.safe_sub(&base_out)?;
        let new_asset = self.asset_reserve.safe_sub(&asset_out)?;
        let new_supply = self.unit_supply.safe_sub(&units)?;

        self.commit(new_base, new_asset, new_supply)?;
        debug!(asset = %self.asset, %units, %base_out, %asset_out, "liquidity removed");

        Ok(LiquidityResult {
            kind: ChangeType::Remove,
            units,
            locked: UFixed::ZERO,
            base: base_out,
            asset: asset_out,
            pool: self.snapshot(),
        })
    }

    // -- synthetic settlement -----------------------------------------------

    /// Settles a synthetic redemption against the pool: burns the `units`
    /// of collateral released by the synthetic and pays `amount_out` from
    /// the `side` reserve. The other reserve is unchanged.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolFrozen`] if the breaker has tripped.
    /// - [`AmmError::InsufficientUnits`] if `units` exceeds the supply.
    /// - [`AmmError::InsufficientLiquidity`] if `amount_out` would drain
    ///   the reserve.
    pub fn redeem_synthetic(
        &mut self,
        units: UFixed,
        side: Side,
        amount_out: UFixed,
    ) -> Result<PoolSnapshot, AmmError> {
        self.ensure_active()?;
        if units > self.unit_supply {
            return Err(AmmError::InsufficientUnits {
                requested: units,
                available: self.unit_supply,
            });
        }
        let reserve = self.reserve(side);
        if amount_out >= reserve {
            return Err(AmmError::InsufficientLiquidity);
        }

        let new_reserve = reserve.safe_sub(&amount_out)?;
        let new_supply = self.unit_supply.safe_sub(&units)?;
        let (new_base, new_asset) = self.reserves_with(side, new_reserve);

        self.commit(new_base, new_asset, new_supply)?;
        debug!(asset = %self.asset, %units, %side, %amount_out, "synthetic redemption settled");

        Ok(self.snapshot())
    }

    // -- circuit breaker ----------------------------------------------------

    /// Measures the rate jump since the previous check and freezes the pool
    /// if it exceeds the threshold. Always records the current rate.
    ///
    /// Runs on frozen pools too; a frozen pool stays frozen.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the rate does not fit.
    pub fn safety_check(&mut self) -> Result<SafetyReport, AmmError> {
        let current = self.current_rate()?;
        Ok(self.record_rate(current))
    }

    fn record_rate(&mut self, current: UFixed) -> SafetyReport {
        let previous = self.last_rate;
        let deviation = deviation_bps(current, previous);
        let breached = deviation > self.freeze_threshold;
        let tripped = breached && !self.state.is_frozen();

        if breached {
            self.state = PoolState::Frozen;
        }
        self.last_rate = current;

        if tripped {
            warn!(
                asset = %self.asset,
                previous_rate = %previous,
                current_rate = %current,
                %deviation,
                threshold = %self.freeze_threshold,
                "circuit breaker tripped, pool frozen"
            );
        }

        SafetyReport {
            previous_rate: previous,
            current_rate: current,
            deviation,
            threshold: self.freeze_threshold,
            tripped,
            state: self.state,
        }
    }

    /// Returns a frozen pool to `Active` and re-anchors `last_rate` at the
    /// current rate. Intended for the governance layer.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the rate does not fit.
    pub fn clear_freeze(&mut self) -> Result<PoolSnapshot, AmmError> {
        self.last_rate = self.current_rate()?;
        self.state = PoolState::Active;
        info!(asset = %self.asset, rate = %self.last_rate, "freeze cleared");
        Ok(self.snapshot())
    }
}

impl FromConfig<PoolConfig> for Pool {
    /// Creates an empty, active pool. Reserves arrive with the first
    /// [`Pool::add_liquidity`].
    ///
    /// # Errors
    ///
    /// Propagates any error from [`PoolConfig::validate`].
    fn from_config(config: &PoolConfig) -> Result<Self, AmmError> {
        config.validate()?;
        Ok(Self {
            asset: config.asset(),
            units_token: config.units_token(),
            base_reserve: UFixed::ZERO,
            asset_reserve: UFixed::ZERO,
            unit_supply: UFixed::ZERO,
            last_rate: UFixed::ZERO,
            state: PoolState::Active,
            minimum_liquidity: config.minimum_liquidity(),
            freeze_threshold: config.freeze_threshold(),
        })
    }
}
