//! Constant-product swap formulas with the slip-based fee built in.
//!
//! The output of selling `x` into a pool holding `X` of the input side and
//! `Y` of the output side is
//!
//! ```text
//!            x * Y * X
//! output = -------------
//!            (x + X)^2
//! ```
//!
//! which is the plain constant-product output `x * Y / (x + X)` scaled by
//! `X / (x + X)`. The difference is the slip fee; it stays in the pool.
//! All products are formed in full before the single truncating division.

use crate::domain::UFixed;
use crate::error::{AmmError, Result};
use crate::math::wide;

/// Amount of the output side paid for `x` of the input side.
///
/// # Errors
///
/// - [`AmmError::EmptyPool`] if either reserve is zero (checked first).
/// - [`AmmError::Overflow`] if the quotient does not fit.
///
/// # Examples
///
/// ```
/// use synthpool::domain::UFixed;
/// use synthpool::math::swap_output;
///
/// // 10 into 100/100: 10 * 100 * 100 / 110^2 = 8.264...
/// let out = swap_output(
///     UFixed::from_whole(10),
///     UFixed::from_whole(100),
///     UFixed::from_whole(100),
/// );
/// assert_eq!(out.map(|v| v.whole()), Ok(8));
/// ```
pub fn swap_output(x: UFixed, reserve_in: UFixed, reserve_out: UFixed) -> Result<UFixed> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::EmptyPool);
    }
    if x.is_zero() {
        return Ok(UFixed::ZERO);
    }
    let num = wide::product3(x.raw(), reserve_out.raw(), reserve_in.raw());
    let den = wide::sum_squared(x.raw(), reserve_in.raw());
    wide::div_narrow(num, den, "swap output").map(UFixed::from_raw)
}

/// Slip fee implied by selling `x`: `x^2 * Y / (x + X)^2`.
///
/// Reporting only. The fee is already retained by [`swap_output`] and is
/// never applied to reserves separately.
///
/// # Errors
///
/// - [`AmmError::EmptyPool`] if either reserve is zero (checked first).
/// - [`AmmError::Overflow`] if the quotient does not fit.
pub fn swap_fee(x: UFixed, reserve_in: UFixed, reserve_out: UFixed) -> Result<UFixed> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::EmptyPool);
    }
    if x.is_zero() {
        return Ok(UFixed::ZERO);
    }
    let num = wide::product3(x.raw(), x.raw(), reserve_out.raw());
    let den = wide::sum_squared(x.raw(), reserve_in.raw());
    wide::div_narrow(num, den, "swap fee").map(UFixed::from_raw)
}

/// Spot value of `amount` of one side expressed in the other:
/// `amount * reserve_to / reserve_from`.
///
/// # Errors
///
/// - [`AmmError::EmptyPool`] if `reserve_from` is zero.
/// - [`AmmError::Overflow`] if the quotient does not fit.
pub fn value_in(amount: UFixed, reserve_from: UFixed, reserve_to: UFixed) -> Result<UFixed> {
    if reserve_from.is_zero() {
        return Err(AmmError::EmptyPool);
    }
    wide::mul_div(amount.raw(), reserve_to.raw(), reserve_from.raw())
        .map(UFixed::from_raw)
        .map_err(|_| AmmError::Overflow("spot value"))
}
