//! Exchange walkthrough.
//!
//! Seeds two pools, trades directly and across pools, zaps liquidity,
//! mints and burns a synthetic, and trips the circuit breaker.
//!
//! # Run
//!
//! ```bash
//! cargo run --example exchange
//! ```

use synthpool::config::EngineConfig;
use synthpool::domain::{AccountId, LiquidityChange, Side, TokenAddress, UFixed};
use synthpool::exchange::{Command, Exchange, Receipt};
use synthpool::ledger::MemoryLedger;
use synthpool::traits::BalanceLedger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== synthpool exchange ===\n");

    // ── 1. Tokens and accounts ──────────────────────────────────────────
    let base = TokenAddress::from_bytes([1u8; 32]);
    let eth = TokenAddress::from_bytes([2u8; 32]);
    let btc = TokenAddress::from_bytes([3u8; 32]);
    let eth_units = TokenAddress::from_bytes([12u8; 32]);
    let btc_units = TokenAddress::from_bytes([13u8; 32]);
    let seth = TokenAddress::from_bytes([22u8; 32]);
    let alice = AccountId::from_bytes([0xA1; 32]);

    let mut ledger = MemoryLedger::new();
    ledger.credit(&alice, &base, UFixed::from_whole(1_000_000))?;
    ledger.credit(&alice, &eth, UFixed::from_whole(1_000))?;
    ledger.credit(&alice, &btc, UFixed::from_whole(1_000))?;

    // ── 2. Seed two pools ───────────────────────────────────────────────
    let mut ex = Exchange::new(EngineConfig::with_defaults(base), ledger)?;
    let seeded = ex.create_pool(
        &alice,
        eth,
        eth_units,
        UFixed::from_whole(10_000),
        UFixed::from_whole(30),
    )?;
    println!("ETH pool seeded: {} units, {} locked", seeded.units, seeded.locked);
    ex.create_pool(
        &alice,
        btc,
        btc_units,
        UFixed::from_whole(200_000),
        UFixed::from_whole(10),
    )?;
    println!("ETH pool: {}", ex.pool(&eth)?.snapshot());
    println!("BTC pool: {}", ex.pool(&btc)?.snapshot());

    // ── 3. Direct swap: 3 ETH for base ──────────────────────────────────
    let cmd = Command::Swap {
        from: eth,
        to: base,
        amount_in: UFixed::from_whole(3),
        min_out: UFixed::ZERO,
    };
    if let Receipt::Swap(route) = ex.execute(&alice, cmd)? {
        println!("\n--- {} ---", route);
        println!("  Amount out: {}", route.amount_out);
        println!("  Slip fee:   {}", route.fee);
    }

    // ── 4. Composite swap: ETH for BTC through base ─────────────────────
    let cmd = Command::Swap {
        from: eth,
        to: btc,
        amount_in: UFixed::from_whole(1),
        min_out: UFixed::ZERO,
    };
    if let Receipt::Swap(route) = ex.execute(&alice, cmd)? {
        println!("\n--- {} ---", route);
        for leg in &route.legs {
            println!("  {leg}");
        }
    }

    // ── 5. Add liquidity, then zap part of it into the BTC pool ─────────
    let change = LiquidityChange::add(UFixed::from_whole(1_000), UFixed::from_whole(3))?;
    if let Receipt::Liquidity(added) = ex.execute(&alice, Command::Liquidity { asset: eth, change })? {
        println!("\nAdded liquidity: {} units", added.units);
    }
    let cmd = Command::Zap {
        from: eth,
        to: btc,
        units: UFixed::from_whole(20),
    };
    if let Receipt::Zap(z) = ex.execute(&alice, cmd)? {
        println!(
            "Zapped 20 ETH-pool units: {} base moved, {} BTC-pool units issued",
            z.base_moved, z.units_out
        );
    }

    // ── 6. Synthetic ETH ────────────────────────────────────────────────
    ex.curate(&eth)?;
    ex.create_synth(eth, seth)?;
    let cmd = Command::MintSynth {
        asset: eth,
        from: Side::Base,
        amount: UFixed::from_whole(500),
    };
    if let Receipt::Synth(minted) = ex.execute(&alice, cmd)? {
        println!("\nMinted {} sETH, collateral {}", minted.amount_out, minted.synth.collateral);
        let cmd = Command::BurnSynth {
            asset: eth,
            amount: minted.amount_out,
            to: Side::Base,
        };
        if let Receipt::Synth(burned) = ex.execute(&alice, cmd)? {
            println!("Burned for {} base after the haircut", burned.amount_out);
        }
    }

    // ── 7. Trip the breaker ─────────────────────────────────────────────
    let cmd = Command::Swap {
        from: eth,
        to: base,
        amount_in: UFixed::from_whole(40),
        min_out: UFixed::ZERO,
    };
    ex.execute(&alice, cmd)?;
    println!("\nAfter a large sale: {}", ex.pool(&eth)?.snapshot());
    match ex.execute(&alice, cmd) {
        Err(e) => println!("Next swap rejected: {e}"),
        Ok(_) => println!("Next swap unexpectedly accepted"),
    }
    ex.clear_freeze(&eth)?;
    println!("Freeze cleared: {}", ex.pool(&eth)?.snapshot());

    println!(
        "\nAlice holds {} base, {} ETH",
        ex.ledger().balance_of(&alice, &base),
        ex.ledger().balance_of(&alice, &eth)
    );
    Ok(())
}
