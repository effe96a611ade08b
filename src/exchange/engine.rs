//! The exchange context: configuration, registries and the balance ledger.

use tracing::{debug, info};

use super::{Command, Receipt};
use crate::config::EngineConfig;
use crate::domain::{
    AccountId, ChangeType, LiquidityChange, LiquidityResult, PoolSnapshot, Side, SynthSnapshot,
    TokenAddress, UFixed,
};
use crate::error::AmmError;
use crate::factory::{PoolFactory, SynthFactory};
use crate::ledger::Journal;
use crate::pools::Pool;
use crate::router::{
    composite_swap, direct_swap, resolve_path, zap_liquidity, Path, RouteResult, ZapResult,
};
use crate::synths::{burn_to_asset, burn_to_base, mint_from_asset, mint_from_base, SynthResult};
use crate::traits::{BalanceLedger, CurationRegistry, FromConfig};

/// Everything one exchange instance owns.
///
/// Operations take `&mut self`, so at most one runs at a time. Each one
/// computes on copies of the pools and synthetics it touches, realises the
/// token movements through a [`Journal`], and writes the copies back only
/// after every ledger call has succeeded. On error nothing changes.
///
/// # Example
///
/// ```rust
/// use synthpool::config::EngineConfig;
/// use synthpool::domain::{AccountId, TokenAddress, UFixed};
/// use synthpool::exchange::{Command, Exchange, Receipt};
/// use synthpool::ledger::MemoryLedger;
/// use synthpool::traits::BalanceLedger;
///
/// let base = TokenAddress::from_bytes([1u8; 32]);
/// let asset = TokenAddress::from_bytes([2u8; 32]);
/// let units = TokenAddress::from_bytes([3u8; 32]);
/// let alice = AccountId::from_bytes([7u8; 32]);
///
/// let mut ledger = MemoryLedger::new();
/// ledger.credit(&alice, &base, UFixed::from_whole(20_000)).expect("credit");
/// ledger.credit(&alice, &asset, UFixed::from_whole(100)).expect("credit");
///
/// let mut ex = Exchange::new(EngineConfig::with_defaults(base), ledger).expect("valid");
/// ex.create_pool(&alice, asset, units, UFixed::from_whole(10_000), UFixed::from_whole(30))
///     .expect("pool created");
///
/// let cmd = Command::Swap {
///     from: asset,
///     to: base,
///     amount_in: UFixed::from_whole(3),
///     min_out: UFixed::ZERO,
/// };
/// let Receipt::Swap(route) = ex.execute(&alice, cmd).expect("swap ok") else {
///     unreachable!()
/// };
/// assert_eq!(route.amount_out.whole(), 826);
/// assert_eq!(ex.ledger().balance_of(&alice, &base).whole(), 10_826);
/// ```
#[derive(Debug, Clone)]
pub struct Exchange<L: BalanceLedger> {
    config: EngineConfig,
    pools: PoolFactory,
    synths: SynthFactory,
    ledger: L,
}

impl<L: BalanceLedger> Exchange<L> {
    /// Creates an exchange with no pools over `ledger`.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`EngineConfig::validate`].
    pub fn new(config: EngineConfig, ledger: L) -> Result<Self, AmmError> {
        config.validate()?;
        info!(base = %config.base(), "exchange created");
        Ok(Self {
            config,
            pools: PoolFactory::new(),
            synths: SynthFactory::new(),
            ledger,
        })
    }

    /// Returns the engine configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the pool registry.
    #[must_use]
    pub const fn pools(&self) -> &PoolFactory {
        &self.pools
    }

    /// Returns the synthetic registry.
    #[must_use]
    pub const fn synths(&self) -> &SynthFactory {
        &self.synths
    }

    /// Returns the balance ledger.
    #[must_use]
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Returns the balance ledger mutably, e.g. to fund accounts.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Looks up the pool for `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] if there is none.
    pub fn pool(&self, asset: &TokenAddress) -> Result<&Pool, AmmError> {
        self.pools.get(asset)
    }

    fn token_of(&self, asset: TokenAddress, side: Side) -> TokenAddress {
        match side {
            Side::Base => self.config.base(),
            Side::Asset => asset,
        }
    }

    // -- administration -----------------------------------------------------

    /// Creates the pool for `asset` and makes the first deposit from
    /// `account`.
    ///
    /// The depositor receives the issued units less the minimum liquidity,
    /// which is minted to [`AccountId::LOCKED`].
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if `asset` or `units_token` is the base
    ///   or a synthetic token, or they are equal.
    /// - [`AmmError::PoolExists`] if `asset` or `units_token` is taken.
    /// - [`AmmError::InvalidQuantity`] if the deposit cannot seed a pool.
    /// - [`AmmError::InsufficientBalance`] if `account` cannot pay.
    pub fn create_pool(
        &mut self,
        account: &AccountId,
        asset: TokenAddress,
        units_token: TokenAddress,
        base_in: UFixed,
        asset_in: UFixed,
    ) -> Result<LiquidityResult, AmmError> {
        if self
            .synths
            .synths()
            .any(|s| s.token() == asset || s.token() == units_token)
        {
            return Err(AmmError::InvalidToken("token is a synthetic"));
        }
        if self.pools.contains(&asset) || self.pools.by_units_token(&units_token).is_some() {
            return Err(AmmError::PoolExists);
        }
        let pool_config = self.config.pool_config(asset, units_token)?;
        let mut pool = Pool::from_config(&pool_config)?;
        let seeded = pool.add_liquidity(base_in, asset_in)?;

        let base = self.config.base();
        let mut journal = Journal::new(&mut self.ledger);
        journal.transfer_in(account, &base, base_in)?;
        journal.transfer_in(account, &asset, asset_in)?;
        journal.mint(account, &units_token, seeded.units)?;
        journal.mint(&AccountId::LOCKED, &units_token, seeded.locked)?;
        self.pools.insert(pool)?;
        journal.commit();

        info!(%account, %asset, %base_in, %asset_in, units = %seeded.units, "pool created");
        Ok(seeded)
    }

    /// Curates the pool for `asset`. Returns `false` if it already was.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] if `asset` has no pool.
    pub fn curate(&mut self, asset: &TokenAddress) -> Result<bool, AmmError> {
        self.pools.curate(asset)
    }

    /// Removes curation from the pool for `asset` and deactivates its
    /// synthetic, if any. Returns `false` if it was not curated.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] if `asset` has no pool.
    pub fn uncurate(&mut self, asset: &TokenAddress) -> Result<bool, AmmError> {
        let removed = self.pools.uncurate(asset)?;
        self.synths.deactivate(asset);
        Ok(removed)
    }

    /// Creates (or re-activates) the synthetic backed by the pool of
    /// `asset`, issued as `token`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] if `asset` has no pool.
    /// - [`AmmError::InvalidToken`] if `token` is the base, a pool asset or
    ///   a units token.
    /// - Any error of [`SynthFactory::create`].
    pub fn create_synth(
        &mut self,
        asset: TokenAddress,
        token: TokenAddress,
    ) -> Result<SynthSnapshot, AmmError> {
        self.pools.get(&asset)?;
        if token == self.config.base()
            || self.pools.contains(&token)
            || self.pools.by_units_token(&token).is_some()
        {
            return Err(AmmError::InvalidToken("synthetic token collides"));
        }
        let synth = self.synths.create(&self.pools, asset, token)?;
        Ok(synth.snapshot())
    }

    /// Takes the synthetic of `asset` out of the active set. Holders can
    /// still burn it.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::SynthNotFound`] if `asset` has no synthetic.
    pub fn remove_synth(&mut self, asset: &TokenAddress) -> Result<bool, AmmError> {
        self.synths.remove(asset)
    }

    /// Enables or disables synthetic minting exchange-wide.
    pub fn set_synth_minting(&mut self, enabled: bool) {
        self.config.set_synth_minting(enabled);
        info!(enabled, "synthetic minting toggled");
    }

    /// Unfreezes the pool of `asset`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] if `asset` has no pool.
    /// - [`AmmError::Overflow`] if the rate does not fit.
    pub fn clear_freeze(&mut self, asset: &TokenAddress) -> Result<PoolSnapshot, AmmError> {
        self.pools.get_mut(asset)?.clear_freeze()
    }

    // -- dispatch -----------------------------------------------------------

    /// Executes one command on behalf of `account`.
    ///
    /// # Errors
    ///
    /// The first error any step returns, unchanged. Pools, synthetics and
    /// ledger are left as they were.
    pub fn execute(&mut self, account: &AccountId, command: Command) -> Result<Receipt, AmmError> {
        debug!(%account, %command, "executing");
        match command {
            Command::Swap {
                from,
                to,
                amount_in,
                min_out,
            } => self
                .swap(account, from, to, amount_in, min_out)
                .map(Receipt::Swap),
            Command::Liquidity { asset, change } => self
                .change_liquidity(account, asset, change)
                .map(Receipt::Liquidity),
            Command::Zap { from, to, units } => self.zap(account, from, to, units).map(Receipt::Zap),
            Command::MintSynth {
                asset,
                from,
                amount,
            } => self
                .mint_synth(account, asset, from, amount)
                .map(Receipt::Synth),
            Command::BurnSynth { asset, amount, to } => self
                .burn_synth(account, asset, amount, to)
                .map(Receipt::Synth),
            Command::SafetyCheck { asset } => self
                .pools
                .get_mut(&asset)?
                .safety_check()
                .map(Receipt::Safety),
        }
    }

    fn swap(
        &mut self,
        account: &AccountId,
        from: TokenAddress,
        to: TokenAddress,
        amount_in: UFixed,
        min_out: UFixed,
    ) -> Result<RouteResult, AmmError> {
        let (route, touched) = match resolve_path(&self.config.base(), &from, &to)? {
            Path::Direct { asset, direction } => {
                let mut pool = self.pools.get(&asset)?.clone();
                let route = direct_swap(&mut pool, amount_in, direction, min_out)?;
                (route, vec![pool])
            }
            Path::Composite {
                from_asset,
                to_asset,
            } => {
                let mut first = self.pools.get(&from_asset)?.clone();
                let mut second = self.pools.get(&to_asset)?.clone();
                let route = composite_swap(&mut first, &mut second, amount_in, min_out)?;
                (route, vec![first, second])
            }
        };

        let mut journal = Journal::new(&mut self.ledger);
        journal.transfer_in(account, &from, amount_in)?;
        journal.transfer_out(account, &to, route.amount_out)?;
        for pool in touched {
            self.pools.replace(pool)?;
        }
        journal.commit();

        info!(
            %account,
            path = %route.path,
            %amount_in,
            amount_out = %route.amount_out,
            fee = %route.fee,
            "swap executed"
        );
        Ok(route)
    }

    fn change_liquidity(
        &mut self,
        account: &AccountId,
        asset: TokenAddress,
        change: LiquidityChange,
    ) -> Result<LiquidityResult, AmmError> {
        let mut pool = self.pools.get(&asset)?.clone();
        let result = match change {
            LiquidityChange::Add { base_in, asset_in } => pool.add_liquidity(base_in, asset_in)?,
            LiquidityChange::AddAsymmetric { amount, side } => {
                pool.add_liquidity_asymmetric(amount, side)?
            }
            LiquidityChange::Remove { units } => pool.remove_liquidity(units)?,
        };

        let base = self.config.base();
        let units_token = pool.units_token();
        let mut journal = Journal::new(&mut self.ledger);
        match result.kind {
            ChangeType::Add | ChangeType::AddAsymmetric => {
                journal.transfer_in(account, &base, result.base)?;
                journal.transfer_in(account, &asset, result.asset)?;
                journal.mint(account, &units_token, result.units)?;
                journal.mint(&AccountId::LOCKED, &units_token, result.locked)?;
            }
            ChangeType::Remove => {
                journal.burn(account, &units_token, result.units)?;
                journal.transfer_out(account, &base, result.base)?;
                journal.transfer_out(account, &asset, result.asset)?;
            }
        }
        self.pools.replace(pool)?;
        journal.commit();

        info!(
            %account,
            %asset,
            kind = ?result.kind,
            units = %result.units,
            base = %result.base,
            asset_amount = %result.asset,
            "liquidity changed"
        );
        Ok(result)
    }

    fn zap(
        &mut self,
        account: &AccountId,
        from: TokenAddress,
        to: TokenAddress,
        units: UFixed,
    ) -> Result<ZapResult, AmmError> {
        if from == to {
            return Err(AmmError::InvalidToken("zap pools must differ"));
        }
        let mut source = self.pools.get(&from)?.clone();
        let mut target = self.pools.get(&to)?.clone();
        let result = zap_liquidity(&mut source, &mut target, units)?;

        let (from_units, to_units) = (source.units_token(), target.units_token());
        let mut journal = Journal::new(&mut self.ledger);
        journal.burn(account, &from_units, result.units_in)?;
        journal.mint(account, &to_units, result.units_out)?;
        self.pools.replace(source)?;
        self.pools.replace(target)?;
        journal.commit();

        info!(
            %account,
            %from,
            %to,
            units_in = %result.units_in,
            units_out = %result.units_out,
            base_moved = %result.base_moved,
            "liquidity zapped"
        );
        Ok(result)
    }

    fn mint_synth(
        &mut self,
        account: &AccountId,
        asset: TokenAddress,
        from: Side,
        amount: UFixed,
    ) -> Result<SynthResult, AmmError> {
        if !self.config.synth_minting() {
            return Err(AmmError::SynthMintingDisabled);
        }
        if !self.pools.is_curated(&asset) {
            return Err(AmmError::NotCurated);
        }
        if !self.synths.is_active(&asset) {
            return Err(AmmError::SynthNotFound);
        }
        let mut pool = self.pools.get(&asset)?.clone();
        let mut synth = self.synths.get_synth(&asset)?.clone();
        let result = match from {
            Side::Base => mint_from_base(&mut pool, &mut synth, amount)?,
            Side::Asset => mint_from_asset(&mut pool, &mut synth, amount)?,
        };

        let token_in = self.token_of(asset, from);
        let units_token = pool.units_token();
        let mut journal = Journal::new(&mut self.ledger);
        journal.transfer_in(account, &token_in, amount)?;
        journal.mint(&synth.account(), &units_token, result.units)?;
        journal.mint(account, &synth.token(), result.amount_out)?;
        self.pools.replace(pool)?;
        self.synths.replace(synth)?;
        journal.commit();

        info!(
            %account,
            %asset,
            %from,
            %amount,
            minted = %result.amount_out,
            collateral = %result.synth.collateral,
            "synthetic minted"
        );
        Ok(result)
    }

    fn burn_synth(
        &mut self,
        account: &AccountId,
        asset: TokenAddress,
        amount: UFixed,
        to: Side,
    ) -> Result<SynthResult, AmmError> {
        let mut pool = self.pools.get(&asset)?.clone();
        let mut synth = self.synths.get_synth(&asset)?.clone();
        let haircut = self.config.redemption_haircut();
        let result = match to {
            Side::Base => burn_to_base(&mut pool, &mut synth, amount, haircut)?,
            Side::Asset => burn_to_asset(&mut pool, &mut synth, amount, haircut)?,
        };

        let token_out = self.token_of(asset, to);
        let units_token = pool.units_token();
        let mut journal = Journal::new(&mut self.ledger);
        journal.burn(account, &synth.token(), amount)?;
        journal.burn(&synth.account(), &units_token, result.units)?;
        journal.transfer_out(account, &token_out, result.amount_out)?;
        self.pools.replace(pool)?;
        self.synths.replace(synth)?;
        journal.commit();

        info!(
            %account,
            %asset,
            %to,
            %amount,
            paid = %result.amount_out,
            collateral = %result.synth.collateral,
            "synthetic burned"
        );
        Ok(result)
    }
}
