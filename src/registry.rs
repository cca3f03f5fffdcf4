//! The ordered asset list shared by sampling and optimization.
//!
//! Asset order is the index alignment used by every weight vector. The
//! registry is never empty.

use std::hash::Hasher;

use rustc_hash::FxHasher;

use crate::asset::{Asset, AssetField};
use crate::error::{Error, Result};
use crate::metrics::{PortfolioMetrics, compute_metrics};
use crate::parse::ParsePolicy;

/// An ordered, index-stable list of assets.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AssetRegistry {
    assets: Vec<Asset>,
}

impl AssetRegistry {
    /// Create a registry from a non-empty asset list.
    pub fn new(assets: Vec<Asset>) -> Result<Self> {
        if assets.is_empty() {
            return Err(Error::EmptyRegistry);
        }
        Ok(Self { assets })
    }

    /// The default four-asset universe.
    pub fn with_defaults() -> Self {
        Self {
            assets: Asset::defaults(),
        }
    }

    // === Queries ===

    /// Number of assets.
    #[inline]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// All assets in registry order.
    #[inline]
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Asset at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Asset> {
        self.assets.get(index)
    }

    /// Current weights in registry order.
    pub fn weights(&self) -> Vec<f64> {
        self.assets.iter().map(|a| a.weight).collect()
    }

    /// `(name, weight)` pairs for an allocation chart.
    pub fn allocation(&self) -> Vec<(&str, f64)> {
        self.assets
            .iter()
            .map(|a| (a.name.as_str(), a.weight))
            .collect()
    }

    /// Metrics of the portfolio described by the live weights.
    pub fn current_metrics(&self) -> PortfolioMetrics {
        compute_metrics(&self.weights(), &self.assets)
    }

    /// Hash of every asset's return and risk, in order.
    ///
    /// Names and weights do not contribute, so edits to them leave the
    /// fingerprint (and any population sampled under it) unchanged.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        hasher.write_usize(self.assets.len());
        for asset in &self.assets {
            hasher.write_u64(asset.expected_return.to_bits());
            hasher.write_u64(asset.risk.to_bits());
        }
        hasher.finish()
    }

    /// Bit patterns of every asset's `(expected_return, risk)`, in order.
    ///
    /// The exact key behind [`fingerprint`](Self::fingerprint); two registries
    /// with equal keys score every weight vector identically.
    pub fn data_bits(&self) -> Vec<(u64, u64)> {
        self.assets
            .iter()
            .map(|a| (a.expected_return.to_bits(), a.risk.to_bits()))
            .collect()
    }

    /// Whether the returns and risks are bit-for-bit those in `bits`.
    pub fn has_data_bits(&self, bits: &[(u64, u64)]) -> bool {
        self.assets.len() == bits.len()
            && self
                .assets
                .iter()
                .zip(bits)
                .all(|(a, &(r, s))| a.expected_return.to_bits() == r && a.risk.to_bits() == s)
    }

    // === Mutation ===

    /// Edit one field of one asset from raw text.
    ///
    /// Numeric fields are parsed under `policy`. On error nothing changes.
    pub fn update_field(
        &mut self,
        index: usize,
        field: AssetField,
        raw: &str,
        policy: ParsePolicy,
    ) -> Result<()> {
        let len = self.assets.len();
        let asset = self
            .assets
            .get_mut(index)
            .ok_or(Error::AssetIndex { index, len })?;

        match field {
            AssetField::Name => asset.name = raw.to_string(),
            AssetField::ExpectedReturn => asset.expected_return = policy.parse(field, raw)?,
            AssetField::Risk => asset.risk = policy.parse(field, raw)?,
        }
        Ok(())
    }

    /// Overwrite every asset's weight, one-to-one by index.
    ///
    /// This is the only way weights change.
    pub fn apply_weights(&mut self, weights: &[f64]) -> Result<()> {
        if weights.len() != self.assets.len() {
            return Err(Error::WeightLength {
                expected: self.assets.len(),
                got: weights.len(),
            });
        }
        for (asset, &w) in self.assets.iter_mut().zip(weights) {
            asset.weight = w;
        }
        Ok(())
    }
}

impl Default for AssetRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
