//! Liquidity migration between two pools.

use tracing::debug;

use crate::domain::{PoolSnapshot, Side, SwapDirection, UFixed};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;
use crate::pools::Pool;

/// Outcome of moving liquidity from one pool to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZapResult {
    /// Units of the source pool redeemed.
    pub units_in: UFixed,
    /// Units of the destination pool issued.
    pub units_out: UFixed,
    /// Base removed directly from the source pool.
    pub base_removed: UFixed,
    /// Base obtained by selling the removed asset back to the source pool.
    pub base_from_sale: UFixed,
    /// Total base deposited into the destination pool.
    pub base_moved: UFixed,
    /// Source pool after the zap.
    pub from: PoolSnapshot,
    /// Destination pool after the zap.
    pub to: PoolSnapshot,
}

/// Moves `units` of liquidity from `from` to `to`.
///
/// 1. Redeem `units` from `from` for `(b, t)`.
/// 2. Sell `t` back into `from` for base (the destination pool does not hold
///    that asset).
/// 3. Deposit all the base into `to` single-sided.
///
/// All-or-nothing: the steps run on copies that replace the pools only
/// after every step has succeeded.
///
/// # Errors
///
/// Any error of [`Pool::remove_liquidity`], [`Pool::swap`] or
/// [`Pool::add_liquidity_asymmetric`], unchanged.
pub fn zap_liquidity(from: &mut Pool, to: &mut Pool, units: UFixed) -> Result<ZapResult, AmmError> {
    let mut source = from.clone();
    let mut target = to.clone();

    let removed = source.remove_liquidity(units)?;
    let base_from_sale = if removed.asset.is_zero() {
        UFixed::ZERO
    } else {
        source
            .swap(removed.asset, SwapDirection::AssetToBase, UFixed::ZERO)?
            .amount_out()
    };
    let base_moved = removed.base.safe_add(&base_from_sale)?;
    let added = target.add_liquidity_asymmetric(base_moved, Side::Base)?;

    debug!(
        from = %source.asset(),
        to = %target.asset(),
        %units,
        %base_moved,
        units_out = %added.units,
        "liquidity zapped"
    );

    *from = source;
    *to = target;
    Ok(ZapResult {
        units_in: units,
        units_out: added.units,
        base_removed: removed.base,
        base_from_sale,
        base_moved,
        from: from.snapshot(),
        to: to.snapshot(),
    })
}
