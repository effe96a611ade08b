//! Unified error types for the synthpool engine.
//!
//! All fallible operations across the crate return `AmmError` as their
//! error type, ensuring a consistent error handling experience for consumers.
//! Errors are returned synchronously and never retried; a composite
//! operation surfaces the first failing leg's error unchanged.

use thiserror::Error;

use crate::domain::UFixed;

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Every failure the engine can report.
///
/// Arithmetic and validation variants carry a static context string naming
/// the computation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmmError {
    // -- arithmetic ---------------------------------------------------------
    /// A reserve involved in the computation is zero.
    #[error("pool reserves are empty")]
    EmptyPool,

    /// A subtraction would go below zero.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// A result does not fit in 128 bits.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Division by a zero denominator.
    #[error("division by zero")]
    DivideByZero,

    // -- pool ---------------------------------------------------------------
    /// Computed output is below the caller's minimum.
    #[error("insufficient output: wanted at least {minimum}, got {actual}")]
    InsufficientOutput {
        /// Caller-supplied floor.
        minimum: UFixed,
        /// Amount the pool would have paid.
        actual: UFixed,
    },

    /// Output would drain the paying reserve.
    #[error("insufficient liquidity in pool")]
    InsufficientLiquidity,

    /// More liquidity units or synthetic supply requested than exist.
    #[error("insufficient units: requested {requested}, available {available}")]
    InsufficientUnits {
        /// Units the caller asked to burn.
        requested: UFixed,
        /// Units outstanding.
        available: UFixed,
    },

    /// The pool's circuit breaker has tripped.
    #[error("pool is frozen")]
    PoolFrozen,

    // -- validation ---------------------------------------------------------
    /// An input amount is zero or otherwise unusable.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(&'static str),

    /// A token argument is not acceptable for the operation.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// A configuration value failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    // -- registry -----------------------------------------------------------
    /// No pool is registered for the asset.
    #[error("pool not found")]
    PoolNotFound,

    /// A pool already exists for the asset.
    #[error("pool already exists")]
    PoolExists,

    /// No synthetic is registered for the asset.
    #[error("synthetic not found")]
    SynthNotFound,

    /// A synthetic already exists for the asset.
    #[error("synthetic already exists")]
    SynthExists,

    /// The pool is not curated.
    #[error("pool is not curated")]
    NotCurated,

    /// Synthetic minting is switched off.
    #[error("synthetic minting is disabled")]
    SynthMintingDisabled,

    // -- ledger -------------------------------------------------------------
    /// An account does not hold enough of a token.
    #[error("insufficient balance")]
    InsufficientBalance,
}
