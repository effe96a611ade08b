//! Undo log over a [`BalanceLedger`].

use tracing::warn;

use crate::domain::{AccountId, TokenAddress, UFixed};
use crate::error::AmmError;
use crate::traits::BalanceLedger;

#[derive(Debug, Clone, Copy)]
enum Entry {
    TransferIn,
    TransferOut,
    Mint,
    Burn,
}

/// Applies ledger calls and remembers them. Dropping an uncommitted
/// journal replays the inverse of every applied call, newest first.
///
/// ```rust
/// use synthpool::domain::{AccountId, TokenAddress, UFixed};
/// use synthpool::ledger::{Journal, MemoryLedger};
/// use synthpool::traits::BalanceLedger;
///
/// let alice = AccountId::from_bytes([7u8; 32]);
/// let token = TokenAddress::from_bytes([1u8; 32]);
/// let mut ledger = MemoryLedger::new();
/// ledger.credit(&alice, &token, UFixed::from_whole(5)).expect("credit");
///
/// {
///     let mut journal = Journal::new(&mut ledger);
///     journal.transfer_in(&alice, &token, UFixed::from_whole(5)).expect("in");
///     // a later step fails; the journal is dropped uncommitted
/// }
/// assert_eq!(ledger.balance_of(&alice, &token), UFixed::from_whole(5));
/// ```
#[derive(Debug)]
pub struct Journal<'a, L: BalanceLedger> {
    ledger: &'a mut L,
    applied: Vec<(Entry, AccountId, TokenAddress, UFixed)>,
    committed: bool,
}

impl<'a, L: BalanceLedger> Journal<'a, L> {
    /// Opens an empty journal over `ledger`.
    pub fn new(ledger: &'a mut L) -> Self {
        Self {
            ledger,
            applied: Vec::new(),
            committed: false,
        }
    }

    /// Journaled [`BalanceLedger::transfer_in`]. Zero amounts are skipped.
    ///
    /// # Errors
    ///
    /// Propagates the ledger's error; nothing is recorded.
    pub fn transfer_in(
        &mut self,
        account: &AccountId,
        token: &TokenAddress,
        amount: UFixed,
    ) -> Result<(), AmmError> {
        self.apply(Entry::TransferIn, account, token, amount)
    }

    /// Journaled [`BalanceLedger::transfer_out`]. Zero amounts are skipped.
    ///
    /// # Errors
    ///
    /// Propagates the ledger's error; nothing is recorded.
    pub fn transfer_out(
        &mut self,
        account: &AccountId,
        token: &TokenAddress,
        amount: UFixed,
    ) -> Result<(), AmmError> {
        self.apply(Entry::TransferOut, account, token, amount)
    }

    /// Journaled [`BalanceLedger::mint_supply`]. Zero amounts are skipped.
    ///
    /// # Errors
    ///
    /// Propagates the ledger's error; nothing is recorded.
    pub fn mint(
        &mut self,
        account: &AccountId,
        token: &TokenAddress,
        amount: UFixed,
    ) -> Result<(), AmmError> {
        self.apply(Entry::Mint, account, token, amount)
    }

    /// Journaled [`BalanceLedger::burn_supply`]. Zero amounts are skipped.
    ///
    /// # Errors
    ///
    /// Propagates the ledger's error; nothing is recorded.
    pub fn burn(
        &mut self,
        account: &AccountId,
        token: &TokenAddress,
        amount: UFixed,
    ) -> Result<(), AmmError> {
        self.apply(Entry::Burn, account, token, amount)
    }

    /// Keeps every applied call.
    pub fn commit(mut self) {
        self.committed = true;
    }

    fn apply(
        &mut self,
        entry: Entry,
        account: &AccountId,
        token: &TokenAddress,
        amount: UFixed,
    ) -> Result<(), AmmError> {
        if amount.is_zero() {
            return Ok(());
        }
        match entry {
            Entry::TransferIn => self.ledger.transfer_in(account, token, amount)?,
            Entry::TransferOut => self.ledger.transfer_out(account, token, amount)?,
            Entry::Mint => self.ledger.mint_supply(account, token, amount)?,
            Entry::Burn => self.ledger.burn_supply(account, token, amount)?,
        }
        self.applied.push((entry, *account, *token, amount));
        Ok(())
    }
}

impl<L: BalanceLedger> Drop for Journal<'_, L> {
    fn drop(&mut self) {
        if self.committed || self.applied.is_empty() {
            return;
        }
        warn!(entries = self.applied.len(), "unwinding uncommitted ledger journal");
        while let Some((entry, account, token, amount)) = self.applied.pop() {
            let undone = match entry {
                Entry::TransferIn => self.ledger.transfer_out(&account, &token, amount),
                Entry::TransferOut => self.ledger.transfer_in(&account, &token, amount),
                Entry::Mint => self.ledger.burn_supply(&account, &token, amount),
                Entry::Burn => self.ledger.mint_supply(&account, &token, amount),
            };
            if let Err(err) = undone {
                warn!(?entry, %account, %token, %amount, %err, "ledger undo failed");
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::ledger::MemoryLedger;

    fn alice() -> AccountId {
        AccountId::from_bytes([7u8; 32])
    }

    fn base() -> TokenAddress {
        TokenAddress::from_bytes([1u8; 32])
    }

    fn units() -> TokenAddress {
        TokenAddress::from_bytes([3u8; 32])
    }

    fn funded() -> MemoryLedger {
        let mut l = MemoryLedger::new();
        let Ok(()) = l.credit(&alice(), &base(), UFixed::from_whole(10)) else {
            panic!("expected Ok");
        };
        l
    }

    #[test]
    fn commit_keeps_changes() {
        let mut l = funded();
        let mut j = Journal::new(&mut l);
        let Ok(()) = j.transfer_in(&alice(), &base(), UFixed::from_whole(4)) else {
            panic!("expected Ok");
        };
        let Ok(()) = j.mint(&alice(), &units(), UFixed::from_whole(2)) else {
            panic!("expected Ok");
        };
        j.commit();
        assert_eq!(l.custody(&base()), UFixed::from_whole(4));
        assert_eq!(l.total_supply(&units()), UFixed::from_whole(2));
    }

    #[test]
    fn drop_unwinds_in_reverse() {
        let mut l = funded();
        let before = l.clone();
        {
            let mut j = Journal::new(&mut l);
            let Ok(()) = j.transfer_in(&alice(), &base(), UFixed::from_whole(4)) else {
                panic!("expected Ok");
            };
            let Ok(()) = j.mint(&alice(), &units(), UFixed::from_whole(2)) else {
                panic!("expected Ok");
            };
            let Ok(()) = j.burn(&alice(), &units(), UFixed::from_whole(1)) else {
                panic!("expected Ok");
            };
            let Ok(()) = j.transfer_out(&alice(), &base(), UFixed::from_whole(1)) else {
                panic!("expected Ok");
            };
            let r = j.transfer_in(&alice(), &base(), UFixed::from_whole(100));
            assert!(matches!(r, Err(AmmError::InsufficientBalance)));
        }
        assert_eq!(l.balance_of(&alice(), &base()), before.balance_of(&alice(), &base()));
        assert_eq!(l.custody(&base()), UFixed::ZERO);
        assert_eq!(l.total_supply(&units()), UFixed::ZERO);
        assert_eq!(l.balance_of(&alice(), &units()), UFixed::ZERO);
        assert_eq!(l, before);
    }
}
