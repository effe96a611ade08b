//! Wide intermediates for products of two or three 128-bit values.
//!
//! Every formula in the engine multiplies reserves together before a single
//! truncating division. Two-factor products are carried in [`U256`],
//! three-factor products and squared sums in [`U512`], and the quotient is
//! narrowed back to `u128` only at the end.

use primitive_types::{U256, U512};

use crate::error::{AmmError, Result};

/// Widens a `u128` into a [`U256`].
#[inline]
pub(crate) fn widen(v: u128) -> U256 {
    U256::from(v)
}

/// Narrows a [`U256`] back to `u128`.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] with `context` if the value does not fit.
#[inline]
pub(crate) fn narrow(v: U256, context: &'static str) -> Result<u128> {
    if v.bits() > 128 {
        return Err(AmmError::Overflow(context));
    }
    Ok(v.low_u128())
}

/// Computes `a * b / c`, truncated, with a 256-bit intermediate.
///
/// # Errors
///
/// - [`AmmError::DivideByZero`] if `c == 0`.
/// - [`AmmError::Overflow`] if the quotient exceeds `u128::MAX`.
pub(crate) fn mul_div(a: u128, b: u128, c: u128) -> Result<u128> {
    if c == 0 {
        return Err(AmmError::DivideByZero);
    }
    narrow(widen(a) * widen(b) / widen(c), "mul_div result")
}

/// Exact product of two 128-bit values.
#[inline]
pub(crate) fn product2(a: u128, b: u128) -> U256 {
    widen(a) * widen(b)
}

/// Exact product of three 128-bit values.
#[inline]
pub(crate) fn product3(a: u128, b: u128, c: u128) -> U512 {
    product2(a, b).full_mul(widen(c))
}

/// Exact square of `a + b`.
#[inline]
pub(crate) fn sum_squared(a: u128, b: u128) -> U512 {
    let sum = widen(a) + widen(b);
    sum.full_mul(sum)
}

/// Divides two 512-bit values and narrows the quotient to `u128`.
///
/// # Errors
///
/// - [`AmmError::DivideByZero`] if `den` is zero.
/// - [`AmmError::Overflow`] with `context` if the quotient does not fit.
pub(crate) fn div_narrow(num: U512, den: U512, context: &'static str) -> Result<u128> {
    if den.is_zero() {
        return Err(AmmError::DivideByZero);
    }
    let q = num / den;
    if q.bits() > 128 {
        return Err(AmmError::Overflow(context));
    }
    Ok(q.low_u128())
}

/// Integer square root (floor) of a 256-bit value.
///
/// Newton iteration starting from `ceil(n / 2)`; converges from above.
#[must_use]
pub(crate) fn isqrt(n: U256) -> U256 {
    if n.is_zero() {
        return U256::zero();
    }
    let mut x = n;
    let mut y = (n >> 1) + (n & U256::one());
    while y < x {
        x = y;
        y = (x + n / x) >> 1;
    }
    x
}
