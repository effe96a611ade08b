//! Chain-agnostic token and account identifiers.

use core::fmt;

/// A chain-agnostic address identifying a token: the base asset, a paired
/// asset, a pool's liquidity-unit token or a synthetic.
///
/// Wraps a fixed-size `[u8; 32]` byte array. All 32-byte sequences are
/// valid, so construction is infallible.
///
/// # Examples
///
/// ```
/// use synthpool::domain::TokenAddress;
///
/// let addr = TokenAddress::from_bytes([1u8; 32]);
/// assert_eq!(addr.as_bytes(), [1u8; 32]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenAddress([u8; 32]);

impl TokenAddress {
    /// Creates a `TokenAddress` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_short_hex(f, &self.0)
    }
}

/// A ledger account: a trader, a liquidity provider, or a synthetic's
/// collateral holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// Sink account that receives the minimum liquidity locked by a pool's
    /// first deposit. Nothing can ever spend from it.
    pub const LOCKED: Self = Self([0u8; 32]);

    /// Creates an `AccountId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// The account that holds collateral on behalf of the synthetic `token`.
    #[must_use]
    pub const fn for_token(token: &TokenAddress) -> Self {
        Self(token.as_bytes())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_short_hex(f, &self.0)
    }
}

fn write_short_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8; 32]) -> fmt::Result {
    write!(f, "0x")?;
    for b in &bytes[..4] {
        write!(f, "{b:02x}")?;
    }
    write!(f, "…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_round_trip() {
        let bytes = [42u8; 32];
        assert_eq!(TokenAddress::from_bytes(bytes).as_bytes(), bytes);
        assert_eq!(AccountId::from_bytes(bytes).as_bytes(), bytes);
    }

    #[test]
    fn ordering_is_lexicographic() {
        let lo = TokenAddress::from_bytes([0u8; 32]);
        let hi = TokenAddress::from_bytes([1u8; 32]);
        assert!(lo < hi);
    }

    #[test]
    fn locked_is_all_zeros() {
        assert_eq!(AccountId::LOCKED.as_bytes(), [0u8; 32]);
    }

    #[test]
    fn synthetic_account_mirrors_token() {
        let token = TokenAddress::from_bytes([9u8; 32]);
        assert_eq!(AccountId::for_token(&token).as_bytes(), [9u8; 32]);
    }

    #[test]
    fn display_is_short_hex() {
        let addr = TokenAddress::from_bytes([0xab; 32]);
        assert_eq!(format!("{addr}"), "0xabababab…");
    }
}
