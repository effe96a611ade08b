//! The exchange context and its command dispatch.
//!
//! [`Exchange`] owns the configuration, the pool and synthetic registries,
//! and the balance ledger. Callers drive it with [`Command`] values through
//! [`Exchange::execute`], or call the administrative methods directly.

mod command;
mod engine;

pub use command::{Command, Receipt};
pub use engine::Exchange;
