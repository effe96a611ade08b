//! In-memory [`BalanceLedger`].

use std::collections::BTreeMap;

use crate::domain::{AccountId, TokenAddress, UFixed};
use crate::error::AmmError;
use crate::traits::BalanceLedger;

/// Balances, exchange custody and issued supply held in ordered maps.
/// Zero amounts are never stored, so two ledgers holding the same amounts
/// compare equal however they got there.
///
/// Custody is the exchange's own holding of a token: `transfer_in` moves
/// balance into it and `transfer_out` pays from it.
///
/// # Example
///
/// ```rust
/// use synthpool::domain::{AccountId, TokenAddress, UFixed};
/// use synthpool::ledger::MemoryLedger;
/// use synthpool::traits::BalanceLedger;
///
/// let alice = AccountId::from_bytes([7u8; 32]);
/// let token = TokenAddress::from_bytes([1u8; 32]);
/// let mut ledger = MemoryLedger::new();
/// ledger.credit(&alice, &token, UFixed::from_whole(10)).expect("credit");
/// ledger.transfer_in(&alice, &token, UFixed::from_whole(4)).expect("in");
/// assert_eq!(ledger.balance_of(&alice, &token), UFixed::from_whole(6));
/// assert_eq!(ledger.custody(&token), UFixed::from_whole(4));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLedger {
    balances: BTreeMap<(AccountId, TokenAddress), UFixed>,
    custody: BTreeMap<TokenAddress, UFixed>,
    supply: BTreeMap<TokenAddress, UFixed>,
}

impl MemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gives `account` tokens from outside the exchange, e.g. a faucet or
    /// an external deposit. Neither custody nor supply changes.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the balance would overflow.
    pub fn credit(
        &mut self,
        account: &AccountId,
        token: &TokenAddress,
        amount: UFixed,
    ) -> Result<(), AmmError> {
        let next = add(self.balance_of(account, token), amount, "balance")?;
        store(&mut self.balances, (*account, *token), next);
        Ok(())
    }

    /// Amount of `token` held by the exchange.
    #[must_use]
    pub fn custody(&self, token: &TokenAddress) -> UFixed {
        self.custody.get(token).copied().unwrap_or(UFixed::ZERO)
    }

    fn debit_balance(
        &self,
        account: &AccountId,
        token: &TokenAddress,
        amount: UFixed,
    ) -> Result<UFixed, AmmError> {
        self.balance_of(account, token)
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)
    }
}

fn add(a: UFixed, b: UFixed, context: &'static str) -> Result<UFixed, AmmError> {
    a.checked_add(&b).ok_or(AmmError::Overflow(context))
}

/// Zero is the absent value, so a zero entry is removed rather than kept.
fn store<K: Ord>(map: &mut BTreeMap<K, UFixed>, key: K, value: UFixed) {
    if value.is_zero() {
        map.remove(&key);
    } else {
        map.insert(key, value);
    }
}

impl BalanceLedger for MemoryLedger {
    fn balance_of(&self, account: &AccountId, token: &TokenAddress) -> UFixed {
        self.balances
            .get(&(*account, *token))
            .copied()
            .unwrap_or(UFixed::ZERO)
    }

    fn total_supply(&self, token: &TokenAddress) -> UFixed {
        self.supply.get(token).copied().unwrap_or(UFixed::ZERO)
    }

    fn transfer_in(
        &mut self,
        account: &AccountId,
        token: &TokenAddress,
        amount: UFixed,
    ) -> Result<(), AmmError> {
        let balance = self.debit_balance(account, token, amount)?;
        let custody = add(self.custody(token), amount, "custody")?;
        store(&mut self.balances, (*account, *token), balance);
        store(&mut self.custody, *token, custody);
        Ok(())
    }

    fn transfer_out(
        &mut self,
        account: &AccountId,
        token: &TokenAddress,
        amount: UFixed,
    ) -> Result<(), AmmError> {
        let custody = self
            .custody(token)
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        let balance = add(self.balance_of(account, token), amount, "balance")?;
        store(&mut self.custody, *token, custody);
        store(&mut self.balances, (*account, *token), balance);
        Ok(())
    }

    fn mint_supply(
        &mut self,
        account: &AccountId,
        token: &TokenAddress,
        amount: UFixed,
    ) -> Result<(), AmmError> {
        let balance = add(self.balance_of(account, token), amount, "balance")?;
        let supply = add(self.total_supply(token), amount, "supply")?;
        store(&mut self.balances, (*account, *token), balance);
        store(&mut self.supply, *token, supply);
        Ok(())
    }

    fn burn_supply(
        &mut self,
        account: &AccountId,
        token: &TokenAddress,
        amount: UFixed,
    ) -> Result<(), AmmError> {
        let balance = self.debit_balance(account, token, amount)?;
        let supply = self
            .total_supply(token)
            .checked_sub(&amount)
            .ok_or(AmmError::Underflow("supply"))?;
        store(&mut self.balances, (*account, *token), balance);
        store(&mut self.supply, *token, supply);
        Ok(())
    }
}
