//! Balance ledger abstraction realising pool accounting as token movements.
//!
//! The engine never moves tokens itself. Every amount a pool or synthetic
//! takes in or pays out is handed to a [`BalanceLedger`], which owns
//! account balances, the exchange's custody of each token, and the total
//! supply of the tokens the exchange issues (liquidity units and
//! synthetics).
//!
//! # Conservation Contract
//!
//! For each token the exchange holds, custody must equal the sum of the
//! pool reserves holding that token. `transfer_in` and `transfer_out` are
//! the only calls that change custody.
//!
//! # Atomicity
//!
//! Each call either applies fully or returns an error with no effect.
//! Multi-call sequences are made atomic by the exchange's journal, which
//! replays inverse calls if a later step fails.

use crate::domain::{AccountId, TokenAddress, UFixed};
use crate::error::AmmError;

/// Account balances and issued supply, keyed by `(account, token)`.
///
/// # Implementors
///
/// - [`MemoryLedger`](crate::ledger::MemoryLedger): in-memory maps.
pub trait BalanceLedger {
    /// Balance of `token` held by `account`.
    fn balance_of(&self, account: &AccountId, token: &TokenAddress) -> UFixed;

    /// Total issued supply of `token`.
    fn total_supply(&self, token: &TokenAddress) -> UFixed;

    /// Moves `amount` of `token` from `account` into exchange custody.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `account` holds less
    /// than `amount`.
    fn transfer_in(
        &mut self,
        account: &AccountId,
        token: &TokenAddress,
        amount: UFixed,
    ) -> Result<(), AmmError>;

    /// Pays `amount` of `token` out of exchange custody to `account`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if custody holds less than
    /// `amount`, or [`AmmError::Overflow`] if the balance would overflow.
    fn transfer_out(
        &mut self,
        account: &AccountId,
        token: &TokenAddress,
        amount: UFixed,
    ) -> Result<(), AmmError>;

    /// Issues `amount` of `token` to `account`, growing total supply.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the balance or supply would
    /// overflow.
    fn mint_supply(
        &mut self,
        account: &AccountId,
        token: &TokenAddress,
        amount: UFixed,
    ) -> Result<(), AmmError>;

    /// Destroys `amount` of `token` held by `account`, shrinking total
    /// supply.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `account` holds less
    /// than `amount`.
    fn burn_supply(
        &mut self,
        account: &AccountId,
        token: &TokenAddress,
        amount: UFixed,
    ) -> Result<(), AmmError>;
}
