//! Registry of synthetics keyed by the asset whose pool backs them.

use std::collections::{BTreeMap, BTreeSet};

use tracing::info;

use crate::domain::TokenAddress;
use crate::error::AmmError;
use crate::synths::Synthetic;
use crate::traits::CurationRegistry;

/// Owns every synthetic, one per backing asset.
///
/// The mapping from asset to synthetic is permanent. Only the active set
/// changes: removing a synthetic (or un-curating its pool) takes it out of
/// the active set, but [`get_synth`](Self::get_synth) still resolves it so
/// holders can burn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynthFactory {
    synths: BTreeMap<TokenAddress, Synthetic>,
    active: BTreeSet<TokenAddress>,
}

impl SynthFactory {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates (or re-activates) the synthetic for `asset`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotCurated`] if the pool for `asset` is not curated.
    /// - [`AmmError::SynthExists`] if the synthetic is already active.
    /// - [`AmmError::InvalidToken`] if a synthetic for `asset` exists
    ///   under a different token, or `token` equals `asset`.
    pub fn create<R: CurationRegistry>(
        &mut self,
        registry: &R,
        asset: TokenAddress,
        token: TokenAddress,
    ) -> Result<&Synthetic, AmmError> {
        if !registry.is_curated(&asset) {
            return Err(AmmError::NotCurated);
        }
        if token == asset {
            return Err(AmmError::InvalidToken("synthetic token must differ from asset"));
        }
        if self.active.contains(&asset) {
            return Err(AmmError::SynthExists);
        }
        if let Some(existing) = self.synths.get(&asset) {
            if existing.token() != token {
                return Err(AmmError::InvalidToken("asset already has a synthetic"));
            }
        }
        if self
            .synths
            .values()
            .any(|s| s.token() == token && s.asset() != asset)
        {
            return Err(AmmError::InvalidToken("synthetic token already in use"));
        }

        self.active.insert(asset);
        info!(%asset, %token, active = self.active.len(), "synthetic activated");
        Ok(self
            .synths
            .entry(asset)
            .or_insert_with(|| Synthetic::new(asset, token)))
    }

    /// Takes the synthetic for `asset` out of the active set.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::SynthNotFound`] if `asset` has no synthetic.
    pub fn remove(&mut self, asset: &TokenAddress) -> Result<bool, AmmError> {
        if !self.synths.contains_key(asset) {
            return Err(AmmError::SynthNotFound);
        }
        Ok(self.deactivate(asset))
    }

    /// Deactivates the synthetic for `asset` if there is an active one.
    pub(crate) fn deactivate(&mut self, asset: &TokenAddress) -> bool {
        let removed = self.active.remove(asset);
        if removed {
            info!(%asset, active = self.active.len(), "synthetic deactivated");
        }
        removed
    }

    /// Resolves the synthetic for `asset`, active or not.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::SynthNotFound`] if there is none.
    pub fn get_synth(&self, asset: &TokenAddress) -> Result<&Synthetic, AmmError> {
        self.synths.get(asset).ok_or(AmmError::SynthNotFound)
    }

    /// Writes back a synthetic updated outside the registry.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::SynthNotFound`] if its asset has no synthetic.
    pub(crate) fn replace(&mut self, synth: Synthetic) -> Result<(), AmmError> {
        let slot = self
            .synths
            .get_mut(&synth.asset())
            .ok_or(AmmError::SynthNotFound)?;
        *slot = synth;
        Ok(())
    }

    /// Returns `true` if the synthetic for `asset` is in the active set.
    #[must_use]
    pub fn is_active(&self, asset: &TokenAddress) -> bool {
        self.active.contains(asset)
    }

    /// Number of active synthetics.
    #[must_use]
    pub fn synth_count(&self) -> usize {
        self.active.len()
    }

    /// Iterates over every synthetic ever created, in asset order.
    pub fn synths(&self) -> impl Iterator<Item = &Synthetic> {
        self.synths.values()
    }
}
