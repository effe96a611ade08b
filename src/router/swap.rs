//! Direct and composite swaps across pools.

use core::fmt;

use tracing::debug;

use super::Path;
use crate::domain::{SwapDirection, SwapResult, UFixed};
use crate::error::AmmError;
use crate::math::{value_in, CheckedArithmetic};
use crate::pools::Pool;

/// Outcome of a routed swap.
///
/// `fee` is expressed in output units. For a composite route the first
/// leg's base-denominated fee is converted at the second pool's post-trade
/// spot rate and added to the second leg's fee.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteResult {
    /// Route taken.
    pub path: Path,
    /// Amount sold by the caller.
    pub amount_in: UFixed,
    /// Amount received by the caller.
    pub amount_out: UFixed,
    /// Total slip fee retained, in output units.
    pub fee: UFixed,
    /// Per-leg results, in execution order.
    pub legs: Vec<SwapResult>,
}

impl fmt::Display for RouteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Route({}: in={}, out={}, fee={})",
            self.path, self.amount_in, self.amount_out, self.fee
        )
    }
}

/// Single-leg swap through `pool`.
///
/// # Errors
///
/// Propagates every error of [`Pool::swap`]; the pool is untouched on
/// failure.
pub fn direct_swap(
    pool: &mut Pool,
    amount_in: UFixed,
    direction: SwapDirection,
    min_out: UFixed,
) -> Result<RouteResult, AmmError> {
    let leg = pool.swap(amount_in, direction, min_out)?;
    Ok(RouteResult {
        path: Path::Direct {
            asset: pool.asset(),
            direction,
        },
        amount_in,
        amount_out: leg.amount_out(),
        fee: leg.fee(),
        legs: vec![leg],
    })
}

/// Two-leg swap: sells `amount_in` of `from`'s asset for base, then buys
/// `to`'s asset with that base.
///
/// Both legs run on copies; the pools are replaced only once the whole
/// route has succeeded, so any failure leaves both untouched.
///
/// # Errors
///
/// - [`AmmError::InsufficientOutput`] if the final output is below
///   `min_out`.
/// - Any error of either leg's [`Pool::swap`], unchanged.
pub fn composite_swap(
    from: &mut Pool,
    to: &mut Pool,
    amount_in: UFixed,
    min_out: UFixed,
) -> Result<RouteResult, AmmError> {
    let mut first_pool = from.clone();
    let mut second_pool = to.clone();

    let first = first_pool.swap(amount_in, SwapDirection::AssetToBase, UFixed::ZERO)?;
    let second = second_pool.swap(first.amount_out(), SwapDirection::BaseToAsset, UFixed::ZERO)?;

    if second.amount_out() < min_out {
        return Err(AmmError::InsufficientOutput {
            minimum: min_out,
            actual: second.amount_out(),
        });
    }

    let carried = value_in(
        first.fee(),
        second_pool.base_reserve(),
        second_pool.asset_reserve(),
    )?;
    let fee = carried.safe_add(&second.fee())?;
    debug!(
        from = %from.asset(),
        to = %to.asset(),
        %amount_in,
        base = %first.amount_out(),
        amount_out = %second.amount_out(),
        %fee,
        "composite route"
    );

    *from = first_pool;
    *to = second_pool;
    Ok(RouteResult {
        path: Path::Composite {
            from_asset: from.asset(),
            to_asset: to.asset(),
        },
        amount_in,
        amount_out: second.amount_out(),
        fee,
        legs: vec![first, second],
    })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::PoolConfig;
    use crate::domain::{BasisPoints, PoolState, TokenAddress};
    use crate::math::swap_output;
    use crate::traits::FromConfig;

    fn w(n: u64) -> UFixed {
        UFixed::from_whole(n)
    }

    fn make_pool(tag: u8, base: u64, asset: u64) -> Pool {
        let Ok(cfg) = PoolConfig::new(
            TokenAddress::from_bytes([tag; 32]),
            TokenAddress::from_bytes([tag + 100; 32]),
            w(100),
            BasisPoints::new(3_000),
        ) else {
            panic!("expected valid config");
        };
        let Ok(mut pool) = Pool::from_config(&cfg) else {
            panic!("expected valid pool");
        };
        let Ok(_) = pool.add_liquidity(w(base), w(asset)) else {
            panic!("expected first deposit");
        };
        pool
    }

    // -- direct ---------------------------------------------------------------

    #[test]
    fn direct_has_one_leg() {
        let mut pool = make_pool(2, 1_000, 1_000);
        let Ok(r) = direct_swap(&mut pool, w(10), SwapDirection::BaseToAsset, UFixed::ZERO) else {
            panic!("expected Ok");
        };
        assert_eq!(r.legs.len(), 1);
        assert_eq!(r.amount_out, r.legs[0].amount_out());
        assert_eq!(pool.base_reserve(), w(1_010));
    }

    // -- composite ------------------------------------------------------------

    #[test]
    fn composite_chains_through_base() {
        let mut a = make_pool(2, 1_000, 100);
        let mut b = make_pool(3, 2_000, 500);
        let Ok(r) = composite_swap(&mut a, &mut b, w(1), UFixed::ZERO) else {
            panic!("expected Ok");
        };
        let Ok(y) = swap_output(w(1), w(100), w(1_000)) else {
            panic!("expected Ok");
        };
        let Ok(z) = swap_output(y, w(2_000), w(500)) else {
            panic!("expected Ok");
        };
        assert_eq!(r.legs[0].amount_out(), y);
        assert_eq!(r.amount_out, z);
        assert_eq!(a.asset_reserve(), w(101));
        assert_eq!(b.base_reserve().raw(), w(2_000).raw() + y.raw());
        assert_eq!(b.asset_reserve().raw(), w(500).raw() - z.raw());
    }

    #[test]
    fn composite_fee_converts_first_leg() {
        let mut a = make_pool(2, 1_000, 100);
        let mut b = make_pool(3, 2_000, 500);
        let Ok(r) = composite_swap(&mut a, &mut b, w(1), UFixed::ZERO) else {
            panic!("expected Ok");
        };
        let Ok(carried) = value_in(r.legs[0].fee(), b.base_reserve(), b.asset_reserve()) else {
            panic!("expected Ok");
        };
        assert_eq!(r.fee.raw(), carried.raw() + r.legs[1].fee().raw());
    }

    #[test]
    fn composite_min_out_restores_both() {
        let mut a = make_pool(2, 1_000, 100);
        let mut b = make_pool(3, 2_000, 500);
        let (sa, sb) = (a.clone(), b.clone());
        let r = composite_swap(&mut a, &mut b, w(1), w(1_000));
        assert!(matches!(r, Err(AmmError::InsufficientOutput { .. })));
        assert_eq!(a, sa);
        assert_eq!(b, sb);
    }

    #[test]
    fn composite_second_leg_failure_restores_first() {
        let mut a = make_pool(2, 1_000, 100);
        let mut b = make_pool(3, 10_000, 30);
        // freeze the second pool
        let Ok(_) = b.swap(w(30), SwapDirection::AssetToBase, UFixed::ZERO) else {
            panic!("expected Ok");
        };
        assert_eq!(b.state(), PoolState::Frozen);
        let (sa, sb) = (a.clone(), b.clone());
        let r = composite_swap(&mut a, &mut b, w(1), UFixed::ZERO);
        assert_eq!(r, Err(AmmError::PoolFrozen));
        assert_eq!(a, sa);
        assert_eq!(b, sb);
    }
}
