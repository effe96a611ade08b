//! Token-path resolution.

use core::fmt;

use crate::domain::{SwapDirection, TokenAddress};
use crate::error::AmmError;

/// How a trade from one token to another routes through the pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Path {
    /// One side is the base: a single leg through the pool of `asset`.
    Direct {
        /// Asset identifying the pool.
        asset: TokenAddress,
        /// Leg direction.
        direction: SwapDirection,
    },
    /// Neither side is the base: sell into base through the `from_asset`
    /// pool, then buy through the `to_asset` pool.
    Composite {
        /// Asset sold.
        from_asset: TokenAddress,
        /// Asset bought.
        to_asset: TokenAddress,
    },
}

impl Path {
    /// Number of pool legs the path takes.
    #[must_use]
    pub const fn legs(&self) -> usize {
        match self {
            Self::Direct { .. } => 1,
            Self::Composite { .. } => 2,
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct { asset, direction } => write!(f, "Direct({asset}, {direction})"),
            Self::Composite {
                from_asset,
                to_asset,
            } => write!(f, "Composite({from_asset} -> base -> {to_asset})"),
        }
    }
}

/// Resolves the route for trading `from` into `to` on an exchange whose
/// common asset is `base`.
///
/// # Errors
///
/// Returns [`AmmError::InvalidToken`] if `from == to`.
///
/// # Examples
///
/// ```
/// use synthpool::domain::{SwapDirection, TokenAddress};
/// use synthpool::router::{resolve_path, Path};
///
/// let base = TokenAddress::from_bytes([1u8; 32]);
/// let tkn = TokenAddress::from_bytes([2u8; 32]);
/// assert_eq!(
///     resolve_path(&base, &tkn, &base),
///     Ok(Path::Direct { asset: tkn, direction: SwapDirection::AssetToBase }),
/// );
/// ```
pub fn resolve_path(
    base: &TokenAddress,
    from: &TokenAddress,
    to: &TokenAddress,
) -> Result<Path, AmmError> {
    if from == to {
        return Err(AmmError::InvalidToken("cannot swap a token for itself"));
    }
    let path = if from == base {
        Path::Direct {
            asset: *to,
            direction: SwapDirection::BaseToAsset,
        }
    } else if to == base {
        Path::Direct {
            asset: *from,
            direction: SwapDirection::AssetToBase,
        }
    } else {
        Path::Composite {
            from_asset: *from,
            to_asset: *to,
        }
    };
    Ok(path)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn t(n: u8) -> TokenAddress {
        TokenAddress::from_bytes([n; 32])
    }

    #[test]
    fn base_in_is_direct_buy() {
        assert_eq!(
            resolve_path(&t(1), &t(1), &t(2)),
            Ok(Path::Direct {
                asset: t(2),
                direction: SwapDirection::BaseToAsset
            })
        );
    }

    #[test]
    fn base_out_is_direct_sell() {
        assert_eq!(
            resolve_path(&t(1), &t(2), &t(1)),
            Ok(Path::Direct {
                asset: t(2),
                direction: SwapDirection::AssetToBase
            })
        );
    }

    #[test]
    fn two_assets_is_composite() {
        let Ok(path) = resolve_path(&t(1), &t(2), &t(3)) else {
            panic!("expected Ok");
        };
        assert_eq!(
            path,
            Path::Composite {
                from_asset: t(2),
                to_asset: t(3)
            }
        );
        assert_eq!(path.legs(), 2);
    }

    #[test]
    fn same_token_rejected() {
        assert!(matches!(
            resolve_path(&t(1), &t(2), &t(2)),
            Err(AmmError::InvalidToken(_))
        ));
        assert!(matches!(
            resolve_path(&t(1), &t(1), &t(1)),
            Err(AmmError::InvalidToken(_))
        ));
    }
}
