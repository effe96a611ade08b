//! # synthpool
//!
//! Pricing and accounting engine for a base-paired automated market maker.
//!
//! Every pool pairs one common **base** token with one **asset**. On top of
//! the pools the crate provides:
//!
//! - **Routing**: direct swaps, composite asset-to-asset swaps through the
//!   base, and liquidity **zaps** that move a position between pools.
//! - **Synthetics**: tokens tracking a pool's asset, collateralised by that
//!   pool's liquidity units.
//! - **Circuit breaker**: each pool freezes itself when its rate jumps by
//!   more than a threshold between two checks.
//!
//! All amounts are [`UFixed`](domain::UFixed) values with 18 decimals.
//! Intermediate products are computed at 256 or 512 bits and every
//! operation is checked; nothing saturates or panics.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | no | `Serialize`/`Deserialize` for configs, snapshots and results |
//!
//! # Quick Start
//!
//! ```rust
//! use synthpool::prelude::*;
//!
//! let base = TokenAddress::from_bytes([1u8; 32]);
//! let eth = TokenAddress::from_bytes([2u8; 32]);
//! let eth_units = TokenAddress::from_bytes([3u8; 32]);
//! let alice = AccountId::from_bytes([7u8; 32]);
//!
//! // 1. Fund an account and open the exchange
//! let mut ledger = MemoryLedger::new();
//! ledger.credit(&alice, &base, UFixed::from_whole(20_000)).expect("credit");
//! ledger.credit(&alice, &eth, UFixed::from_whole(100)).expect("credit");
//! let mut ex = Exchange::new(EngineConfig::with_defaults(base), ledger).expect("valid config");
//!
//! // 2. Seed a 10 000 / 30 pool
//! ex.create_pool(&alice, eth, eth_units, UFixed::from_whole(10_000), UFixed::from_whole(30))
//!     .expect("pool created");
//!
//! // 3. Sell 3 ETH for base
//! let receipt = ex
//!     .execute(
//!         &alice,
//!         Command::Swap { from: eth, to: base, amount_in: UFixed::from_whole(3), min_out: UFixed::ZERO },
//!     )
//!     .expect("swap succeeded");
//!
//! let Receipt::Swap(route) = receipt else { unreachable!() };
//! assert_eq!(route.amount_out.whole(), 826);
//! assert_eq!(ex.pool(&eth).expect("pool").asset_reserve(), UFixed::from_whole(33));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Exchange    │  Command dispatch, ledger journal, commit
//! └──────┬───────┘
//!        │ resolve_path / zap / mint / burn
//!        ▼
//! ┌──────────────┐     ┌──────────────┐
//! │    Router     │     │  Synthetics   │  run on pool copies
//! └──────┬───────┘     └──────┬───────┘
//!        └──────────┬─────────┘
//!                   ▼
//! ┌──────────────────────────────┐
//! │   Pool (Active / Frozen)      │  reserves, units, breaker
//! └──────────────┬───────────────┘
//!                ▼
//! ┌──────────────────────────────┐
//! │   Math (swap, liquidity, rate)│  256/512-bit intermediates
//! └──────────────────────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`UFixed`](domain::UFixed), [`BasisPoints`](domain::BasisPoints), [`TokenAddress`](domain::TokenAddress), snapshots and results |
//! | [`math`] | Swap, liquidity and rate formulas; [`CheckedArithmetic`](math::CheckedArithmetic) |
//! | [`pools`] | The [`Pool`](pools::Pool) state machine |
//! | [`router`] | Path resolution, direct and composite swaps, zaps |
//! | [`synths`] | [`Synthetic`](synths::Synthetic) mint and burn |
//! | [`factory`] | Pool and synthetic registries, curation |
//! | [`ledger`] | [`MemoryLedger`](ledger::MemoryLedger) and the rollback [`Journal`](ledger::Journal) |
//! | [`exchange`] | [`Exchange`](exchange::Exchange) context and [`Command`](exchange::Command) dispatch |
//! | [`traits`] | [`BalanceLedger`](traits::BalanceLedger), [`CurationRegistry`](traits::CurationRegistry), [`FromConfig`](traits::FromConfig) |
//! | [`config`] | [`EngineConfig`](config::EngineConfig) and [`PoolConfig`](config::PoolConfig) |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod domain;
pub mod error;
pub mod exchange;
pub mod factory;
pub mod ledger;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod router;
pub mod synths;
pub mod traits;
