//! Liquidity-unit issuance and redemption formulas.
//!
//! | Operation | Units / amounts |
//! |-----------|-----------------|
//! | First deposit | `isqrt(b * t)`, of which `minimum` is locked |
//! | Symmetric add | `S * (b*T + t*B) / (2*B*T)` |
//! | Asymmetric add | `S * a / (2 * R)` |
//! | Remove | `B * u / S`, `T * u / S` |
//! | Synthetic share | `collateral * amount / debt` |

use primitive_types::U512;

use crate::domain::UFixed;
use crate::error::{AmmError, Result};
use crate::math::wide;

/// Units issued for depositing `base_in` and `asset_in` into a non-empty
/// pool holding `base_reserve`, `asset_reserve` with `unit_supply` outstanding.
///
/// Averages the share each side would buy on its own, so an off-ratio
/// deposit is credited at the mean of the two sides.
///
/// # Errors
///
/// - [`AmmError::EmptyPool`] if either reserve is zero.
/// - [`AmmError::Overflow`] if the result does not fit.
pub fn symmetric_units(
    base_in: UFixed,
    asset_in: UFixed,
    base_reserve: UFixed,
    asset_reserve: UFixed,
    unit_supply: UFixed,
) -> Result<UFixed> {
    if base_reserve.is_zero() || asset_reserve.is_zero() {
        return Err(AmmError::EmptyPool);
    }
    let bt = U512::from(wide::product2(base_in.raw(), asset_reserve.raw()));
    let tb = U512::from(wide::product2(asset_in.raw(), base_reserve.raw()));
    let num = (bt + tb) * U512::from(unit_supply.raw());
    let den = U512::from(wide::product2(base_reserve.raw(), asset_reserve.raw())) * U512::from(2u8);
    wide::div_narrow(num, den, "symmetric units").map(UFixed::from_raw)
}

/// Total units minted by a pool's first deposit: the floor geometric mean
/// of the two sides. The caller withholds `minimum` of it as a permanent lock.
///
/// # Errors
///
/// Returns [`AmmError::InvalidQuantity`] if either side is zero or the
/// geometric mean does not exceed `minimum`.
///
/// # Examples
///
/// ```
/// use synthpool::domain::UFixed;
/// use synthpool::math::initial_units;
///
/// let units = initial_units(
///     UFixed::from_whole(400),
///     UFixed::from_whole(100),
///     UFixed::from_whole(100),
/// );
/// assert_eq!(units, Ok(UFixed::from_whole(200)));
/// ```
pub fn initial_units(base_in: UFixed, asset_in: UFixed, minimum: UFixed) -> Result<UFixed> {
    if base_in.is_zero() || asset_in.is_zero() {
        return Err(AmmError::InvalidQuantity(
            "first deposit needs both sides non-zero",
        ));
    }
    let gm = wide::narrow(
        wide::isqrt(wide::product2(base_in.raw(), asset_in.raw())),
        "initial units",
    )?;
    if gm <= minimum.raw() {
        return Err(AmmError::InvalidQuantity(
            "first deposit does not exceed minimum liquidity",
        ));
    }
    Ok(UFixed::from_raw(gm))
}

/// Units issued for a single-sided deposit of `amount` against the side
/// holding `reserve`.
///
/// Treats the deposit as half swapped and half added; the swap leg's
/// price impact is ignored, so this over-credits large deposits slightly.
///
/// # Errors
///
/// - [`AmmError::EmptyPool`] if `reserve` is zero.
/// - [`AmmError::Overflow`] if the result does not fit.
pub fn asymmetric_units(amount: UFixed, reserve: UFixed, unit_supply: UFixed) -> Result<UFixed> {
    if reserve.is_zero() {
        return Err(AmmError::EmptyPool);
    }
    let num = U512::from(wide::product2(unit_supply.raw(), amount.raw()));
    let den = U512::from(wide::product2(reserve.raw(), 2));
    wide::div_narrow(num, den, "asymmetric units").map(UFixed::from_raw)
}

/// Reserve amounts paid for redeeming `units` of `unit_supply`.
///
/// Returns `(base_out, asset_out)`.
///
/// # Errors
///
/// - [`AmmError::InsufficientUnits`] if `units > unit_supply`.
/// - [`AmmError::DivideByZero`] if `unit_supply` is zero.
pub fn removal_shares(
    units: UFixed,
    base_reserve: UFixed,
    asset_reserve: UFixed,
    unit_supply: UFixed,
) -> Result<(UFixed, UFixed)> {
    if units > unit_supply {
        return Err(AmmError::InsufficientUnits {
            requested: units,
            available: unit_supply,
        });
    }
    let base_out = wide::mul_div(base_reserve.raw(), units.raw(), unit_supply.raw())?;
    let asset_out = wide::mul_div(asset_reserve.raw(), units.raw(), unit_supply.raw())?;
    Ok((UFixed::from_raw(base_out), UFixed::from_raw(asset_out)))
}

/// Slice of a synthetic's collateral released by burning `amount` of its
/// `debt`: `collateral * amount / debt`.
///
/// # Errors
///
/// - [`AmmError::DivideByZero`] if `debt` is zero.
/// - [`AmmError::InsufficientUnits`] if `amount > debt`.
pub fn collateral_share(amount: UFixed, collateral: UFixed, debt: UFixed) -> Result<UFixed> {
    if debt.is_zero() {
        return Err(AmmError::DivideByZero);
    }
    if amount > debt {
        return Err(AmmError::InsufficientUnits {
            requested: amount,
            available: debt,
        });
    }
    wide::mul_div(collateral.raw(), amount.raw(), debt.raw()).map(UFixed::from_raw)
}
