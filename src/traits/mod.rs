//! Core trait abstractions at the engine's seams.
//!
//! The engine consumes two external collaborators through traits:
//! [`BalanceLedger`] for token movements and [`CurationRegistry`] for
//! curation status. [`FromConfig`] covers configuration-driven
//! construction.

mod balance_ledger;
mod curation;
mod from_config;

pub use balance_ledger::BalanceLedger;
pub use curation::CurationRegistry;
pub use from_config::FromConfig;
