//! Minting and burning synthetics against their backing pool.
//!
//! | Operation | Pool effect | Synthetic effect |
//! |-----------|-------------|------------------|
//! | mint from base | base `+x`, units `+u` | collateral `+u`, debt `+out` |
//! | mint from asset | asset `+x`, units `+u` | collateral `+u`, debt `+out` |
//! | burn to base | base `-out`, units `-share` | collateral `-share`, debt `-x` |
//! | burn to asset | asset `-out`, units `-share` | collateral `-share`, debt `-x` |
//!
//! Each operation works on copies of the pool and the synthetic and writes
//! both back only on success.

use tracing::debug;

use super::{SynthResult, Synthetic};
use crate::domain::{BasisPoints, Side, SwapDirection, UFixed};
use crate::error::AmmError;
use crate::math::{collateral_share, swap_output, CheckedArithmetic};
use crate::pools::Pool;

fn credit(synth: &mut Synthetic, units: UFixed, minted: UFixed) -> Result<(), AmmError> {
    let collateral = synth.collateral.safe_add(&units)?;
    let debt = synth.debt.safe_add(&minted)?;
    synth.collateral = collateral;
    synth.debt = debt;
    Ok(())
}

/// Mints a synthetic by depositing `base_in` into the backing pool.
///
/// The synthetic issued is what `base_in` would buy on the pre-deposit
/// reserves; the base itself is added single-sided and the units issued
/// become collateral.
///
/// # Errors
///
/// - [`AmmError::InvalidQuantity`] if `base_in` is zero or buys nothing.
/// - [`AmmError::EmptyPool`], [`AmmError::PoolFrozen`] and the other
///   errors of [`Pool::add_liquidity_asymmetric`].
pub fn mint_from_base(
    pool: &mut Pool,
    synth: &mut Synthetic,
    base_in: UFixed,
) -> Result<SynthResult, AmmError> {
    if base_in.is_zero() {
        return Err(AmmError::InvalidQuantity("mint input must be positive"));
    }
    let mut p = pool.clone();
    let mut s = synth.clone();

    let minted = swap_output(base_in, p.base_reserve(), p.asset_reserve())?;
    if minted.is_zero() {
        return Err(AmmError::InvalidQuantity("mint too small to issue"));
    }
    let units = p.add_liquidity_asymmetric(base_in, Side::Base)?.units;
    credit(&mut s, units, minted)?;
    debug!(asset = %p.asset(), %base_in, %minted, %units, "synthetic minted from base");

    *pool = p;
    *synth = s;
    Ok(SynthResult {
        amount_in: base_in,
        amount_out: minted,
        units,
        pool: pool.snapshot(),
        synth: synth.snapshot(),
    })
}

/// Mints a synthetic from `asset_in` of the pool's own asset.
///
/// The asset is first sold into the pool for `base_in`. The synthetic
/// issued is what `base_in` buys on the post-sale reserves; the collateral
/// units are `S * base_in / (2 * X)` with `X` the base reserve before the
/// sale. Net effect on the pool: the asset reserve grows by `asset_in`, the
/// base reserve is unchanged.
///
/// # Errors
///
/// - [`AmmError::InvalidQuantity`] if `asset_in` is zero or buys nothing.
/// - Any error of [`Pool::swap`] or [`Pool::add_liquidity_asymmetric`].
pub fn mint_from_asset(
    pool: &mut Pool,
    synth: &mut Synthetic,
    asset_in: UFixed,
) -> Result<SynthResult, AmmError> {
    if asset_in.is_zero() {
        return Err(AmmError::InvalidQuantity("mint input must be positive"));
    }
    let mut p = pool.clone();
    let mut s = synth.clone();
    let base_before = p.base_reserve();

    let base_in = p
        .swap(asset_in, SwapDirection::AssetToBase, UFixed::ZERO)?
        .amount_out();
    let minted = swap_output(base_in, p.base_reserve(), p.asset_reserve())?;
    if minted.is_zero() {
        return Err(AmmError::InvalidQuantity("mint too small to issue"));
    }
    let units = p
        .add_liquidity_asymmetric_at(base_in, Side::Base, base_before)?
        .units;
    credit(&mut s, units, minted)?;
    debug!(asset = %p.asset(), %asset_in, %base_in, %minted, %units, "synthetic minted from asset");

    *pool = p;
    *synth = s;
    Ok(SynthResult {
        amount_in: asset_in,
        amount_out: minted,
        units,
        pool: pool.snapshot(),
        synth: synth.snapshot(),
    })
}

/// Burns `synth_in` of the synthetic and pays the holder in base.
///
/// Releases `collateral * synth_in / debt` units, which the pool burns.
/// The payout is the synthetic's value in base minus `haircut`.
///
/// # Errors
///
/// - [`AmmError::InvalidQuantity`] if `synth_in` is zero.
/// - [`AmmError::DivideByZero`] if the synthetic has no debt.
/// - [`AmmError::InsufficientUnits`] if `synth_in` exceeds the debt.
/// - Any error of [`Pool::redeem_synthetic`].
pub fn burn_to_base(
    pool: &mut Pool,
    synth: &mut Synthetic,
    synth_in: UFixed,
    haircut: BasisPoints,
) -> Result<SynthResult, AmmError> {
    burn(pool, synth, synth_in, haircut, Side::Base)
}

/// Burns `synth_in` of the synthetic and pays the holder in the pool's
/// asset.
///
/// As [`burn_to_base`], then the hair-cut base is priced through the curve
/// into asset: `swap_output(base_out, B - base_out, T)`. The base reserve
/// is unchanged; the asset reserve pays out.
///
/// # Errors
///
/// As [`burn_to_base`].
pub fn burn_to_asset(
    pool: &mut Pool,
    synth: &mut Synthetic,
    synth_in: UFixed,
    haircut: BasisPoints,
) -> Result<SynthResult, AmmError> {
    burn(pool, synth, synth_in, haircut, Side::Asset)
}

fn burn(
    pool: &mut Pool,
    synth: &mut Synthetic,
    synth_in: UFixed,
    haircut: BasisPoints,
    payout: Side,
) -> Result<SynthResult, AmmError> {
    if synth_in.is_zero() {
        return Err(AmmError::InvalidQuantity("burn input must be positive"));
    }
    let mut p = pool.clone();
    let mut s = synth.clone();

    let share = collateral_share(synth_in, s.collateral, s.debt)?;
    let gross = swap_output(synth_in, p.asset_reserve(), p.base_reserve())?;
    let base_out = haircut.complement().apply(gross)?;
    let amount_out = match payout {
        Side::Base => base_out,
        Side::Asset => {
            let base_after = p.base_reserve().safe_sub(&base_out)?;
            swap_output(base_out, base_after, p.asset_reserve())?
        }
    };

    p.redeem_synthetic(share, payout, amount_out)?;
    let collateral = s.collateral.safe_sub(&share)?;
    let debt = s.debt.safe_sub(&synth_in)?;
    s.collateral = collateral;
    s.debt = debt;
    debug!(
        asset = %p.asset(),
        %synth_in,
        %share,
        %payout,
        %amount_out,
        "synthetic burned"
    );

    *pool = p;
    *synth = s;
    Ok(SynthResult {
        amount_in: synth_in,
        amount_out,
        units: share,
        pool: pool.snapshot(),
        synth: synth.snapshot(),
    })
}
