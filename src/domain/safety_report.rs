//! Result of a circuit-breaker measurement.

use core::fmt;

use super::{BasisPoints, PoolState, UFixed};

/// What a pool's safety check measured and decided.
///
/// The check compares the current base-per-asset rate against the rate
/// recorded by the previous check. Only a single jump between two
/// consecutive checks is caught; a slow drift in small steps is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SafetyReport {
    /// Rate recorded by the previous check.
    pub previous_rate: UFixed,
    /// Rate measured now; becomes the pool's new `last_rate`.
    pub current_rate: UFixed,
    /// Relative distance between the two rates.
    pub deviation: BasisPoints,
    /// Configured freeze threshold.
    pub threshold: BasisPoints,
    /// `true` if this check moved the pool from `Active` to `Frozen`.
    pub tripped: bool,
    /// Pool state after the check.
    pub state: PoolState,
}

impl fmt::Display for SafetyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Safety(rate {} -> {}, deviation={} / {}, {})",
            self.previous_rate, self.current_rate, self.deviation, self.threshold, self.state
        )
    }
}
