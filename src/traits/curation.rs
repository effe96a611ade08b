//! Curation registry: which pools may back synthetics.

use crate::domain::TokenAddress;

/// Answers whether the pool pairing `asset` is curated.
///
/// Only curated pools may have a synthetic created against them.
/// Curation itself is decided elsewhere (governance); the engine only
/// reads it.
///
/// # Implementors
///
/// - [`PoolFactory`](crate::factory::PoolFactory)
pub trait CurationRegistry {
    /// Returns `true` if the pool for `asset` is curated.
    fn is_curated(&self, asset: &TokenAddress) -> bool;
}
