//! Pool rate and rate-deviation measurement for the circuit breaker.

use crate::domain::{BasisPoints, UFixed, SCALE, BPS_DENOMINATOR};
use crate::error::Result;
use crate::math::wide;

/// Base per unit of asset: `base_reserve * 10^18 / asset_reserve`.
///
/// An empty asset reserve yields a zero rate.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`](crate::error::AmmError::Overflow) if the
/// rate does not fit.
pub fn pool_rate(base_reserve: UFixed, asset_reserve: UFixed) -> Result<UFixed> {
    if asset_reserve.is_zero() {
        return Ok(UFixed::ZERO);
    }
    wide::mul_div(base_reserve.raw(), SCALE, asset_reserve.raw()).map(UFixed::from_raw)
}

/// Relative distance between two rates, in basis points of the larger:
/// `|current - last| * 10_000 / max(current, last)`, truncated.
///
/// Zero when both rates are zero. Never exceeds 10 000.
///
/// # Examples
///
/// ```
/// use synthpool::domain::{BasisPoints, UFixed};
/// use synthpool::math::deviation_bps;
///
/// let d = deviation_bps(UFixed::from_whole(70), UFixed::from_whole(100));
/// assert_eq!(d, BasisPoints::new(3_000));
/// ```
#[must_use]
pub fn deviation_bps(current: UFixed, last: UFixed) -> BasisPoints {
    let max = current.max(last);
    if max.is_zero() {
        return BasisPoints::ZERO;
    }
    let diff = current.abs_diff(&last);
    // diff <= max, so the quotient is at most 10_000
    let bps = wide::product2(diff.raw(), u128::from(BPS_DENOMINATOR)) / wide::widen(max.raw());
    BasisPoints::new(bps.low_u32())
}
