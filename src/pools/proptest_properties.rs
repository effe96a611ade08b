//! Property-based tests for the pool arithmetic and state machine.
//!
//! 1. **Swap conservation**: reserves move by exactly `amount_in` and
//!    `amount_out`.
//! 2. **Proportional issuance**: units match `S*(b*T + t*B)/(2*B*T)`.
//! 3. **Liquidity round-trip**: removing what a deposit minted returns no
//!    more than was deposited.
//! 4. **Fee bound**: `swap_output + swap_fee <= x*Y/(x+X)`.
//! 5. **Breaker trip**: a jump past the threshold freezes the pool.

use primitive_types::U512;
use proptest::prelude::*;

use super::Pool;
use crate::config::PoolConfig;
use crate::domain::{BasisPoints, PoolState, SwapDirection, TokenAddress, UFixed};
use crate::error::AmmError;
use crate::math::{swap_fee, swap_output};
use crate::math::wide::mul_div;
use crate::traits::FromConfig;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn make_pool(base: u64, asset: u64) -> Pool {
    let Ok(cfg) = PoolConfig::new(
        TokenAddress::from_bytes([2u8; 32]),
        TokenAddress::from_bytes([3u8; 32]),
        UFixed::from_whole(100),
        BasisPoints::new(3_000),
    ) else {
        panic!("valid config");
    };
    let Ok(mut pool) = Pool::from_config(&cfg) else {
        panic!("valid pool");
    };
    let Ok(_) = pool.add_liquidity(UFixed::from_whole(base), UFixed::from_whole(asset)) else {
        panic!("first deposit");
    };
    pool
}

fn scaled(reserve: UFixed, per_mille: u64) -> UFixed {
    UFixed::from_raw(reserve.raw() / 1_000 * u128::from(per_mille))
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Whole-unit reserves in [1_000, 10_000_000]; the geometric mean always
/// clears the 100-unit lock.
fn reserve_strategy() -> impl Strategy<Value = u64> {
    1_000u64..=10_000_000u64
}

/// Trade or deposit size as a fraction of a reserve, in per mille.
fn fraction_strategy() -> impl Strategy<Value = u64> {
    1u64..=200u64
}

fn direction_strategy() -> impl Strategy<Value = SwapDirection> {
    prop_oneof![
        Just(SwapDirection::BaseToAsset),
        Just(SwapDirection::AssetToBase)
    ]
}

// ---------------------------------------------------------------------------
// Property 1: Swap Conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_conserves_reserves(
        base in reserve_strategy(),
        asset in reserve_strategy(),
        per_mille in fraction_strategy(),
        direction in direction_strategy(),
    ) {
        let mut pool = make_pool(base, asset);
        let reserve_in = pool.reserve(direction.input_side());
        let reserve_out = pool.reserve(direction.output_side());
        let amount_in = scaled(reserve_in, per_mille);

        let Ok(result) = pool.swap(amount_in, direction, UFixed::ZERO) else {
            return Ok(());
        };

        prop_assert_eq!(
            pool.reserve(direction.input_side()).raw(),
            reserve_in.raw() + amount_in.raw()
        );
        prop_assert_eq!(
            pool.reserve(direction.output_side()).raw(),
            reserve_out.raw() - result.amount_out().raw()
        );
        prop_assert!(result.amount_out() < reserve_out);
    }
}

// ---------------------------------------------------------------------------
// Property 2: Proportional Issuance
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_units_match_issuance_formula(
        base in reserve_strategy(),
        asset in reserve_strategy(),
        base_mille in fraction_strategy(),
        asset_mille in fraction_strategy(),
    ) {
        let mut pool = make_pool(base, asset);
        let (b_res, t_res, supply) = (pool.base_reserve(), pool.asset_reserve(), pool.unit_supply());
        let b = scaled(b_res, base_mille);
        let t = scaled(t_res, asset_mille);

        let Ok(added) = pool.add_liquidity(b, t) else {
            return Ok(());
        };

        let wide = |v: UFixed| U512::from(v.raw());
        let num = wide(supply) * (wide(b) * wide(t_res) + wide(t) * wide(b_res));
        let den = U512::from(2u8) * wide(b_res) * wide(t_res);
        let expected = (num / den).low_u128();

        prop_assert_eq!(added.units.raw(), expected);
        prop_assert_eq!(pool.base_reserve().raw(), b_res.raw() + b.raw());
        prop_assert_eq!(pool.asset_reserve().raw(), t_res.raw() + t.raw());
        prop_assert_eq!(pool.unit_supply().raw(), supply.raw() + expected);
    }
}

// ---------------------------------------------------------------------------
// Property 3: Liquidity Round-Trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_add_then_remove_returns_no_more(
        base in reserve_strategy(),
        asset in reserve_strategy(),
        per_mille in fraction_strategy(),
    ) {
        let mut pool = make_pool(base, asset);
        let b = scaled(pool.base_reserve(), per_mille);
        let t = scaled(pool.asset_reserve(), per_mille);

        let Ok(added) = pool.add_liquidity(b, t) else {
            return Ok(());
        };
        let Ok(removed) = pool.remove_liquidity(added.units) else {
            return Ok(());
        };

        prop_assert!(removed.base <= b, "base {} > deposited {}", removed.base, b);
        prop_assert!(removed.asset <= t, "asset {} > deposited {}", removed.asset, t);
    }
}

// ---------------------------------------------------------------------------
// Property 4: Fee Bound
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_output_plus_fee_bounded(
        x in 1u128..=1_000_000_000_000_000_000_000_000u128,
        reserve_in in 1u128..=1_000_000_000_000_000_000_000_000u128,
        reserve_out in 1u128..=1_000_000_000_000_000_000_000_000u128,
    ) {
        let (x, rx, ry) = (UFixed::from_raw(x), UFixed::from_raw(reserve_in), UFixed::from_raw(reserve_out));
        let Ok(out) = swap_output(x, rx, ry) else {
            return Err(TestCaseError::fail("swap_output failed"));
        };
        let Ok(fee) = swap_fee(x, rx, ry) else {
            return Err(TestCaseError::fail("swap_fee failed"));
        };
        let Ok(bound) = mul_div(x.raw(), ry.raw(), x.raw() + rx.raw()) else {
            return Err(TestCaseError::fail("bound failed"));
        };

        prop_assert!(out.raw() + fee.raw() <= bound);
        prop_assert!(out < ry);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Breaker Trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_large_swap_freezes_pool(
        base in reserve_strategy(),
        asset in reserve_strategy(),
        direction in direction_strategy(),
    ) {
        let mut pool = make_pool(base, asset);
        // selling a full reserve moves the rate by 62.5%
        let amount_in = pool.reserve(direction.input_side());

        let Ok(result) = pool.swap(amount_in, direction, UFixed::ZERO) else {
            return Err(TestCaseError::fail("tripping swap should still complete"));
        };
        prop_assert_eq!(result.pool().state, PoolState::Frozen);

        let next = pool.swap(UFixed::from_whole(1), direction, UFixed::ZERO);
        prop_assert!(matches!(next, Err(AmmError::PoolFrozen)));
        let add = pool.add_liquidity(UFixed::from_whole(1), UFixed::from_whole(1));
        prop_assert!(matches!(add, Err(AmmError::PoolFrozen)));
    }
}
