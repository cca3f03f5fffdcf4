//! Assets and their editable fields.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// One investable instrument or asset class.
///
/// `expected_return` and `risk` are fractional point estimates (0.10 = 10%).
/// `weight` is the current allocation and is only written by applying an
/// optimization result.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Asset {
    /// Display label
    pub name: String,
    /// Expected return as a fraction
    pub expected_return: f64,
    /// Per-asset risk magnitude as a fraction
    pub risk: f64,
    /// Current allocation as a fraction of the portfolio
    #[cfg_attr(feature = "serde", serde(default))]
    pub weight: f64,
}

impl Asset {
    /// Create an asset with the given statistics and zero weight.
    pub fn new(name: impl Into<String>, expected_return: f64, risk: f64) -> Self {
        Self {
            name: name.into(),
            expected_return,
            risk,
            weight: 0.0,
        }
    }

    /// Set the starting weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// The four-asset starting universe, equally weighted.
    pub fn defaults() -> Vec<Asset> {
        vec![
            Asset::new("Stock A", 0.10, 0.20).with_weight(0.25),
            Asset::new("Stock B", 0.15, 0.25).with_weight(0.25),
            Asset::new("Bond C", 0.05, 0.10).with_weight(0.25),
            Asset::new("Real Estate D", 0.08, 0.15).with_weight(0.25),
        ]
    }
}

/// The user-editable fields of an [`Asset`].
///
/// `weight` is deliberately absent: parsing `"weight"` yields
/// [`Error::WeightNotEditable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AssetField {
    Name,
    #[cfg_attr(feature = "serde", serde(alias = "return"))]
    ExpectedReturn,
    Risk,
}

impl AssetField {
    /// Whether edits to this field go through numeric parsing.
    #[inline]
    pub fn is_numeric(self) -> bool {
        !matches!(self, AssetField::Name)
    }
}

impl fmt::Display for AssetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetField::Name => write!(f, "name"),
            AssetField::ExpectedReturn => write!(f, "return"),
            AssetField::Risk => write!(f, "risk"),
        }
    }
}

impl FromStr for AssetField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(AssetField::Name),
            "return" | "expected_return" | "ret" => Ok(AssetField::ExpectedReturn),
            "risk" => Ok(AssetField::Risk),
            "weight" => Err(Error::WeightNotEditable),
            other => Err(Error::UnknownField(other.to_string())),
        }
    }
}
