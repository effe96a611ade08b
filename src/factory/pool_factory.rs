//! Registry of pools keyed by their paired asset, with curation flags.

use std::collections::{BTreeMap, BTreeSet};

use tracing::info;

use crate::config::PoolConfig;
use crate::domain::TokenAddress;
use crate::error::AmmError;
use crate::pools::Pool;
use crate::traits::{CurationRegistry, FromConfig};

/// Owns every pool of the exchange, one per asset.
///
/// A pool is created once and never removed. Curation marks the pools that
/// may back a synthetic.
///
/// # Example
///
/// ```rust
/// use synthpool::config::EngineConfig;
/// use synthpool::domain::TokenAddress;
/// use synthpool::factory::PoolFactory;
/// use synthpool::traits::CurationRegistry;
///
/// let base = TokenAddress::from_bytes([1u8; 32]);
/// let asset = TokenAddress::from_bytes([2u8; 32]);
/// let units = TokenAddress::from_bytes([3u8; 32]);
/// let cfg = EngineConfig::with_defaults(base)
///     .pool_config(asset, units)
///     .expect("valid config");
///
/// let mut pools = PoolFactory::new();
/// pools.create(&cfg).expect("pool created");
/// assert!(pools.curate(&asset).expect("known pool"));
/// assert!(pools.is_curated(&asset));
/// assert_eq!(pools.curated_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolFactory {
    pools: BTreeMap<TokenAddress, Pool>,
    curated: BTreeSet<TokenAddress>,
}

impl PoolFactory {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an empty pool from `config` and registers it.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolExists`] as for [`insert`](Self::insert).
    /// - Any error from [`PoolConfig::validate`].
    pub fn create(&mut self, config: &PoolConfig) -> Result<&mut Pool, AmmError> {
        let pool = Pool::from_config(config)?;
        self.insert(pool)
    }

    /// Registers an already built pool.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolExists`] if the asset already has a pool or
    /// the units token is already used by another pool.
    pub fn insert(&mut self, pool: Pool) -> Result<&mut Pool, AmmError> {
        let asset = pool.asset();
        let units_token = pool.units_token();
        if self.pools.contains_key(&asset) || self.by_units_token(&units_token).is_some() {
            return Err(AmmError::PoolExists);
        }
        info!(%asset, %units_token, "pool registered");
        Ok(self.pools.entry(asset).or_insert(pool))
    }

    /// Returns `true` if `asset` has a pool.
    #[must_use]
    pub fn contains(&self, asset: &TokenAddress) -> bool {
        self.pools.contains_key(asset)
    }

    /// Looks up the pool for `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] if there is none.
    pub fn get(&self, asset: &TokenAddress) -> Result<&Pool, AmmError> {
        self.pools.get(asset).ok_or(AmmError::PoolNotFound)
    }

    /// Looks up the pool for `asset` mutably.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] if there is none.
    pub fn get_mut(&mut self, asset: &TokenAddress) -> Result<&mut Pool, AmmError> {
        self.pools.get_mut(asset).ok_or(AmmError::PoolNotFound)
    }

    /// Writes back a pool updated outside the registry.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] if the pool's asset is not
    /// registered.
    pub(crate) fn replace(&mut self, pool: Pool) -> Result<(), AmmError> {
        let slot = self.get_mut(&pool.asset())?;
        *slot = pool;
        Ok(())
    }

    /// Finds the pool whose liquidity units are `units_token`.
    #[must_use]
    pub fn by_units_token(&self, units_token: &TokenAddress) -> Option<&Pool> {
        self.pools.values().find(|p| p.units_token() == *units_token)
    }

    /// Iterates over all pools in asset order.
    pub fn pools(&self) -> impl Iterator<Item = &Pool> {
        self.pools.values()
    }

    /// Number of registered pools.
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// Marks the pool for `asset` as curated. Returns `false` if it already
    /// was.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] if `asset` has no pool.
    pub fn curate(&mut self, asset: &TokenAddress) -> Result<bool, AmmError> {
        if !self.contains(asset) {
            return Err(AmmError::PoolNotFound);
        }
        let added = self.curated.insert(*asset);
        if added {
            info!(%asset, curated = self.curated.len(), "pool curated");
        }
        Ok(added)
    }

    /// Removes curation from the pool for `asset`. Returns `false` if it was
    /// not curated.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] if `asset` has no pool.
    pub fn uncurate(&mut self, asset: &TokenAddress) -> Result<bool, AmmError> {
        if !self.contains(asset) {
            return Err(AmmError::PoolNotFound);
        }
        let removed = self.curated.remove(asset);
        if removed {
            info!(%asset, curated = self.curated.len(), "pool curation removed");
        }
        Ok(removed)
    }

    /// Number of curated pools.
    #[must_use]
    pub fn curated_count(&self) -> usize {
        self.curated.len()
    }
}

impl CurationRegistry for PoolFactory {
    fn is_curated(&self, asset: &TokenAddress) -> bool {
        self.curated.contains(asset)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    fn addr(tag: u8) -> TokenAddress {
        TokenAddress::from_bytes([tag; 32])
    }

    fn config(asset: u8, units: u8) -> PoolConfig {
        let Ok(cfg) = EngineConfig::with_defaults(addr(1)).pool_config(addr(asset), addr(units))
        else {
            panic!("expected valid config");
        };
        cfg
    }

    // -- registration ----------------------------------------------------

    #[test]
    fn create_registers_empty_pool() {
        let mut f = PoolFactory::new();
        let Ok(pool) = f.create(&config(2, 102)) else {
            panic!("expected Ok");
        };
        assert!(pool.is_empty());
        assert_eq!(f.pool_count(), 1);
        assert!(f.contains(&addr(2)));
        assert!(f.by_units_token(&addr(102)).is_some());
    }

    #[test]
    fn duplicate_asset_rejected() {
        let mut f = PoolFactory::new();
        let Ok(_) = f.create(&config(2, 102)) else {
            panic!("expected Ok");
        };
        assert!(matches!(f.create(&config(2, 103)), Err(AmmError::PoolExists)));
        assert!(matches!(f.create(&config(3, 102)), Err(AmmError::PoolExists)));
    }

    #[test]
    fn missing_pool_not_found() {
        let f = PoolFactory::new();
        assert!(matches!(f.get(&addr(9)), Err(AmmError::PoolNotFound)));
    }

    // -- curation --------------------------------------------------------

    #[test]
    fn curate_and_uncurate() {
        let mut f = PoolFactory::new();
        let Ok(_) = f.create(&config(2, 102)) else {
            panic!("expected Ok");
        };
        assert!(matches!(f.curate(&addr(2)), Ok(true)));
        assert!(matches!(f.curate(&addr(2)), Ok(false)));
        assert_eq!(f.curated_count(), 1);
        assert!(f.is_curated(&addr(2)));

        assert!(matches!(f.uncurate(&addr(2)), Ok(true)));
        assert_eq!(f.curated_count(), 0);
        assert!(!f.is_curated(&addr(2)));
    }

    #[test]
    fn curate_unknown_pool_fails() {
        let mut f = PoolFactory::new();
        assert!(matches!(f.curate(&addr(2)), Err(AmmError::PoolNotFound)));
    }
}
