//! Balance-ledger implementation and the journal that makes multi-call
//! ledger updates atomic.

mod journal;
mod memory;

pub use journal::Journal;
pub use memory::MemoryLedger;
