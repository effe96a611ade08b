//! Integration tests exercising the exchange end to end through the public
//! API: pool seeding, swaps and routes, liquidity, zaps, synthetics, the
//! circuit breaker, and ledger conservation after every flow.

#![allow(clippy::panic)]

use synthpool::config::EngineConfig;
use synthpool::domain::{
    AccountId, LiquidityChange, PoolState, Side, SwapDirection, TokenAddress, UFixed,
};
use synthpool::error::AmmError;
use synthpool::exchange::{Command, Exchange, Receipt};
use synthpool::ledger::MemoryLedger;
use synthpool::math::{asymmetric_units, swap_output, CheckedArithmetic};
use synthpool::router::Path;
use synthpool::traits::{BalanceLedger, CurationRegistry};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn w(n: u64) -> UFixed {
    UFixed::from_whole(n)
}

fn token(tag: u8) -> TokenAddress {
    TokenAddress::from_bytes([tag; 32])
}

fn base() -> TokenAddress {
    token(1)
}

fn eth() -> TokenAddress {
    token(2)
}

fn btc() -> TokenAddress {
    token(3)
}

fn units(asset: TokenAddress) -> TokenAddress {
    let mut bytes = asset.as_bytes();
    bytes[0] = 0xEE;
    TokenAddress::from_bytes(bytes)
}

fn synth_token(asset: TokenAddress) -> TokenAddress {
    let mut bytes = asset.as_bytes();
    bytes[0] = 0x55;
    TokenAddress::from_bytes(bytes)
}

fn lp() -> AccountId {
    AccountId::from_bytes([0x11; 32])
}

fn trader() -> AccountId {
    AccountId::from_bytes([0x22; 32])
}

/// Exchange with an ETH pool at 10 000 / 30 and a BTC pool at 20 000 / 10,
/// both seeded by `lp()`; `trader()` holds some of every token.
fn setup() -> Exchange<MemoryLedger> {
    let mut ledger = MemoryLedger::new();
    for (account, amounts) in [
        (lp(), [1_000_000u64, 1_000, 1_000]),
        (trader(), [100_000u64, 100, 100]),
    ] {
        for (t, amount) in [base(), eth(), btc()].into_iter().zip(amounts) {
            let Ok(()) = ledger.credit(&account, &t, w(amount)) else {
                panic!("credit");
            };
        }
    }
    let Ok(mut ex) = Exchange::new(EngineConfig::with_defaults(base()), ledger) else {
        panic!("valid exchange");
    };
    for (asset, b, a) in [(eth(), 10_000, 30), (btc(), 20_000, 10)] {
        let Ok(_) = ex.create_pool(&lp(), asset, units(asset), w(b), w(a)) else {
            panic!("pool created");
        };
    }
    ex
}

fn swap(from: TokenAddress, to: TokenAddress, amount_in: UFixed) -> Command {
    Command::Swap {
        from,
        to,
        amount_in,
        min_out: UFixed::ZERO,
    }
}

/// Every token the exchange holds is fully accounted for by pool reserves,
/// and every units token's supply equals its pool's unit supply.
fn assert_conserved(ex: &Exchange<MemoryLedger>) {
    let mut base_total = 0u128;
    for pool in ex.pools().pools() {
        base_total += pool.base_reserve().raw();
        assert_eq!(
            ex.ledger().custody(&pool.asset()),
            pool.asset_reserve(),
            "asset custody"
        );
        assert_eq!(
            ex.ledger().total_supply(&pool.units_token()),
            pool.unit_supply(),
            "unit supply"
        );
    }
    assert_eq!(ex.ledger().custody(&base()).raw(), base_total, "base custody");
    for synth in ex.synths().synths() {
        let Ok(pool) = ex.pool(&synth.asset()) else {
            panic!("backing pool");
        };
        assert_eq!(
            ex.ledger().balance_of(&synth.account(), &pool.units_token()),
            synth.collateral(),
            "collateral"
        );
        assert_eq!(ex.ledger().total_supply(&synth.token()), synth.debt(), "debt");
    }
}

// ---------------------------------------------------------------------------
// Swaps
// ---------------------------------------------------------------------------

#[test]
fn asset_in_swap_moves_reserves_exactly() {
    let mut ex = setup();
    let base_before = ex.ledger().balance_of(&trader(), &base());

    let Ok(Receipt::Swap(route)) = ex.execute(&trader(), swap(eth(), base(), w(3))) else {
        panic!("swap receipt");
    };

    assert_eq!(route.amount_out.raw(), 826_446_280_991_735_537_190);
    assert_eq!(
        route.path,
        Path::Direct {
            asset: eth(),
            direction: SwapDirection::AssetToBase
        }
    );
    let Ok(pool) = ex.pool(&eth()) else {
        panic!("pool");
    };
    assert_eq!(pool.asset_reserve(), w(33));
    assert_eq!(
        pool.base_reserve().raw(),
        w(10_000).raw() - 826_446_280_991_735_537_190
    );
    // no dividend on top of the curve output
    assert_eq!(
        ex.ledger().balance_of(&trader(), &base()).raw(),
        base_before.raw() + route.amount_out.raw()
    );
    assert_conserved(&ex);
}

#[test]
fn composite_swap_routes_through_base() {
    let mut ex = setup();
    let Ok(eth_pool) = ex.pool(&eth()) else {
        panic!("pool");
    };
    let Ok(base_mid) = swap_output(w(1), eth_pool.asset_reserve(), eth_pool.base_reserve()) else {
        panic!("quote");
    };

    let Ok(Receipt::Swap(route)) = ex.execute(&trader(), swap(eth(), btc(), w(1))) else {
        panic!("swap receipt");
    };

    assert_eq!(route.legs.len(), 2);
    assert_eq!(route.legs[0].amount_out(), base_mid);
    assert_eq!(route.legs[1].amount_in(), base_mid);
    assert!(route.fee > route.legs[1].fee());
    assert_eq!(
        ex.ledger().balance_of(&trader(), &btc()).raw(),
        w(100).raw() + route.amount_out.raw()
    );
    assert_conserved(&ex);
}

#[test]
fn failed_second_leg_rolls_back_everything() {
    let mut ex = setup();
    // dump 10 BTC into the 20 000 / 10 pool; the rate falls by 62.5%
    let Ok(Receipt::Swap(r)) = ex.execute(&trader(), swap(btc(), base(), w(10))) else {
        panic!("swap receipt");
    };
    assert_eq!(r.legs[0].pool().state, PoolState::Frozen);

    let pools = ex.pools().clone();
    let ledger = ex.ledger().clone();
    let r = ex.execute(&trader(), swap(eth(), btc(), w(1)));
    assert!(matches!(r, Err(AmmError::PoolFrozen)));
    assert_eq!(*ex.pools(), pools);
    assert_eq!(*ex.ledger(), ledger);
}

#[test]
fn same_token_swap_rejected() {
    let mut ex = setup();
    let r = ex.execute(&trader(), swap(eth(), eth(), w(1)));
    assert!(matches!(r, Err(AmmError::InvalidToken(_))));
}

// ---------------------------------------------------------------------------
// Liquidity and zaps
// ---------------------------------------------------------------------------

#[test]
fn liquidity_lifecycle_conserves_tokens() {
    let mut ex = setup();
    let steps = [
        LiquidityChange::add(w(1_000), w(3)),
        LiquidityChange::add_asymmetric(w(500), Side::Base),
        LiquidityChange::add_asymmetric(w(1), Side::Asset),
    ];
    for change in steps {
        let Ok(change) = change else {
            panic!("valid change");
        };
        let Ok(Receipt::Liquidity(r)) = ex.execute(
            &trader(),
            Command::Liquidity {
                asset: eth(),
                change,
            },
        ) else {
            panic!("liquidity receipt");
        };
        assert!(r.units > UFixed::ZERO);
        assert_conserved(&ex);
    }

    let held = ex.ledger().balance_of(&trader(), &units(eth()));
    let Ok(change) = LiquidityChange::remove(held) else {
        panic!("valid change");
    };
    let Ok(Receipt::Liquidity(removed)) = ex.execute(
        &trader(),
        Command::Liquidity {
            asset: eth(),
            change,
        },
    ) else {
        panic!("liquidity receipt");
    };
    assert!(removed.base > UFixed::ZERO && removed.asset > UFixed::ZERO);
    assert_eq!(ex.ledger().balance_of(&trader(), &units(eth())), UFixed::ZERO);
    assert_conserved(&ex);
}

#[test]
fn locked_units_cannot_be_withdrawn() {
    let mut ex = setup();
    let lp_units = ex.ledger().balance_of(&lp(), &units(eth()));
    let Ok(change) = LiquidityChange::remove(lp_units) else {
        panic!("valid change");
    };
    let Ok(_) = ex.execute(
        &lp(),
        Command::Liquidity {
            asset: eth(),
            change,
        },
    ) else {
        panic!("liquidity receipt");
    };
    let Ok(pool) = ex.pool(&eth()) else {
        panic!("pool");
    };
    assert_eq!(pool.unit_supply(), w(100));
    assert!(pool.base_reserve() > UFixed::ZERO);
    assert_eq!(
        ex.ledger().balance_of(&AccountId::LOCKED, &units(eth())),
        w(100)
    );
}

#[test]
fn zap_moves_position_between_pools() {
    let mut ex = setup();
    let Ok(Receipt::Zap(z)) = ex.execute(
        &lp(),
        Command::Zap {
            from: eth(),
            to: btc(),
            units: w(50),
        },
    ) else {
        panic!("zap receipt");
    };
    assert!(z.units_out > UFixed::ZERO);
    let Ok(moved) = z.base_removed.safe_add(&z.base_from_sale) else {
        panic!("sum");
    };
    assert_eq!(moved, z.base_moved);
    assert_eq!(z.to.base_reserve.raw(), w(20_000).raw() + z.base_moved.raw());
    assert_eq!(z.to.asset_reserve, w(10));
    assert_conserved(&ex);
}

// ---------------------------------------------------------------------------
// Synthetics and curation
// ---------------------------------------------------------------------------

fn with_eth_synth() -> Exchange<MemoryLedger> {
    let mut ex = setup();
    let Ok(_) = ex.curate(&eth()) else {
        panic!("curate");
    };
    let Ok(_) = ex.create_synth(eth(), synth_token(eth())) else {
        panic!("synth created");
    };
    ex
}

#[test]
fn synthetic_lifecycle_keeps_collateral_on_ledger() {
    let mut ex = with_eth_synth();

    let mints = [(Side::Base, w(200)), (Side::Asset, w(1))];
    for (from, amount) in mints {
        let Ok(Receipt::Synth(r)) = ex.execute(
            &trader(),
            Command::MintSynth {
                asset: eth(),
                from,
                amount,
            },
        ) else {
            panic!("mint receipt");
        };
        assert!(r.amount_out > UFixed::ZERO);
        assert_conserved(&ex);
    }

    let held = ex.ledger().balance_of(&trader(), &synth_token(eth()));
    let half = UFixed::from_raw(held.raw() / 2);
    for (amount, to) in [(half, Side::Asset), (half, Side::Base)] {
        let Ok(Receipt::Synth(r)) = ex.execute(
            &trader(),
            Command::BurnSynth {
                asset: eth(),
                amount,
                to,
            },
        ) else {
            panic!("burn receipt");
        };
        assert!(r.amount_out > UFixed::ZERO);
        assert_conserved(&ex);
    }

    let Ok(synth) = ex.synths().get_synth(&eth()) else {
        panic!("synth");
    };
    assert_eq!(synth.debt().raw(), held.raw() - 2 * half.raw());
}

#[test]
fn asset_mint_prices_on_curve_and_pre_swap_depth() {
    let mut ex = with_eth_synth();
    let Ok(pool) = ex.pool(&eth()) else {
        panic!("pool");
    };
    let (x, y, supply) = (pool.base_reserve(), pool.asset_reserve(), pool.unit_supply());
    let Ok(base_in) = swap_output(w(1), y, x) else {
        panic!("base leg");
    };
    let (Ok(x_after), Ok(y_after)) = (x.safe_sub(&base_in), y.safe_add(&w(1))) else {
        panic!("reserves");
    };
    let Ok(expected_out) = swap_output(base_in, x_after, y_after) else {
        panic!("synth leg");
    };
    let Ok(expected_units) = asymmetric_units(base_in, x, supply) else {
        panic!("units");
    };

    let Ok(Receipt::Synth(r)) = ex.execute(
        &trader(),
        Command::MintSynth {
            asset: eth(),
            from: Side::Asset,
            amount: w(1),
        },
    ) else {
        panic!("mint receipt");
    };
    assert_eq!(r.amount_out, expected_out);
    assert_eq!(r.units, expected_units);
    assert_eq!(r.pool.base_reserve, x);
    assert_eq!(r.pool.asset_reserve, y_after);
    assert_eq!(
        ex.ledger().balance_of(&trader(), &synth_token(eth())),
        expected_out
    );
    assert_conserved(&ex);
}

#[test]
fn removing_curation_retires_synthetic() {
    let mut ex = with_eth_synth();
    assert_eq!(ex.pools().curated_count(), 1);
    assert_eq!(ex.synths().synth_count(), 1);

    let Ok(Receipt::Synth(minted)) = ex.execute(
        &trader(),
        Command::MintSynth {
            asset: eth(),
            from: Side::Base,
            amount: w(100),
        },
    ) else {
        panic!("mint receipt");
    };

    let Ok(true) = ex.uncurate(&eth()) else {
        panic!("uncurate");
    };
    assert_eq!(ex.pools().curated_count(), 0);
    assert!(!ex.pools().is_curated(&eth()));
    assert!(!ex.synths().is_active(&eth()));
    let Ok(synth) = ex.synths().get_synth(&eth()) else {
        panic!("synth still resolves");
    };
    assert_eq!(synth.token(), synth_token(eth()));

    // holders can still exit
    let Ok(_) = ex.execute(
        &trader(),
        Command::BurnSynth {
            asset: eth(),
            amount: minted.amount_out,
            to: Side::Base,
        },
    ) else {
        panic!("burn receipt");
    };
    assert_conserved(&ex);
}

#[test]
fn synthetic_on_uncurated_pool_rejected() {
    let mut ex = setup();
    let r = ex.create_synth(btc(), synth_token(btc()));
    assert!(matches!(r, Err(AmmError::NotCurated)));
}

// ---------------------------------------------------------------------------
// Circuit breaker
// ---------------------------------------------------------------------------

#[test]
fn breaker_freezes_pool_until_cleared() {
    let mut ex = setup();
    let Ok(Receipt::Swap(r)) = ex.execute(&trader(), swap(eth(), base(), w(30))) else {
        panic!("tripping swap still completes");
    };
    let leg = &r.legs[0];
    assert_eq!(leg.amount_out(), w(2_500));
    assert_eq!(leg.pool().state, PoolState::Frozen);
    assert_eq!(leg.pool().last_rate, w(125));

    assert!(matches!(
        ex.execute(&trader(), swap(base(), eth(), w(10))),
        Err(AmmError::PoolFrozen)
    ));
    let Ok(change) = LiquidityChange::add(w(100), w(1)) else {
        panic!("valid change");
    };
    assert!(matches!(
        ex.execute(
            &trader(),
            Command::Liquidity {
                asset: eth(),
                change
            }
        ),
        Err(AmmError::PoolFrozen)
    ));
    // the other pool is unaffected
    let Ok(_) = ex.execute(&trader(), swap(base(), btc(), w(10))) else {
        panic!("btc pool still active");
    };

    let Ok(snap) = ex.clear_freeze(&eth()) else {
        panic!("cleared");
    };
    assert_eq!(snap.state, PoolState::Active);
    let Ok(_) = ex.execute(&trader(), swap(base(), eth(), w(10))) else {
        panic!("swap after clearance");
    };
    assert_conserved(&ex);
}
