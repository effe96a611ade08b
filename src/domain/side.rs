//! Reserve sides and swap directions.

use core::fmt;

/// One of the two reserves of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// The common base asset present in every pool.
    Base,
    /// The pool's paired asset.
    Asset,
}

impl Side {
    /// Returns the opposite reserve.
    #[must_use]
    pub const fn other(&self) -> Self {
        match self {
            Self::Base => Self::Asset,
            Self::Asset => Self::Base,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "base"),
            Self::Asset => write!(f, "asset"),
        }
    }
}

/// Direction of a single constant-product leg.
///
/// # Examples
///
/// ```
/// use synthpool::domain::{Side, SwapDirection};
///
/// let dir = SwapDirection::AssetToBase;
/// assert_eq!(dir.input_side(), Side::Asset);
/// assert_eq!(dir.output_side(), Side::Base);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapDirection {
    /// Sell base, receive the paired asset.
    BaseToAsset,
    /// Sell the paired asset, receive base.
    AssetToBase,
}

impl SwapDirection {
    /// Builds the direction that consumes `side`.
    #[must_use]
    pub const fn selling(side: Side) -> Self {
        match side {
            Side::Base => Self::BaseToAsset,
            Side::Asset => Self::AssetToBase,
        }
    }

    /// Reserve that receives the input.
    #[must_use]
    pub const fn input_side(&self) -> Side {
        match self {
            Self::BaseToAsset => Side::Base,
            Self::AssetToBase => Side::Asset,
        }
    }

    /// Reserve that pays the output.
    #[must_use]
    pub const fn output_side(&self) -> Side {
        self.input_side().other()
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BaseToAsset => write!(f, "base->asset"),
            Self::AssetToBase => write!(f, "asset->base"),
        }
    }
}
