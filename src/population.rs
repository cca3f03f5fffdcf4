//! Scored candidate portfolios.
//!
//! A [`Population`] is a set of sampled weight vectors, each scored with
//! [`compute_metrics`] and a Sharpe ratio, together with the registry
//! return/risk data it was sampled under.

use rand::Rng;

use crate::asset::Asset;
use crate::error::Result;
use crate::metrics::{PortfolioMetrics, compute_metrics, compute_sharpe};
use crate::registry::AssetRegistry;
use crate::sampler::{WeightVector, generate_population};

/// A sampled portfolio and its metrics. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortfolioCandidate {
    /// Weights, index-aligned with the registry
    pub weights: WeightVector,
    /// Expected portfolio return
    pub expected_return: f64,
    /// Portfolio risk (L2 combination)
    pub risk: f64,
    /// Sharpe ratio; non-finite when risk is zero
    pub sharpe: f64,
}

impl PortfolioCandidate {
    /// Score `weights` against `assets`.
    pub fn score(weights: WeightVector, assets: &[Asset], risk_free_rate: f64) -> Self {
        let PortfolioMetrics {
            expected_return,
            risk,
        } = compute_metrics(&weights, assets);
        Self {
            weights,
            expected_return,
            risk,
            sharpe: compute_sharpe(expected_return, risk, risk_free_rate),
        }
    }

    /// Return and risk without the weights.
    #[inline]
    pub fn metrics(&self) -> PortfolioMetrics {
        PortfolioMetrics {
            expected_return: self.expected_return,
            risk: self.risk,
        }
    }

    /// Scatter-plot coordinates for this candidate.
    pub fn point(&self) -> ScatterPoint {
        ScatterPoint::new(self.expected_return, self.risk, self.sharpe)
    }
}

/// One point of the risk/return scatter, in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScatterPoint {
    /// Risk in percent
    pub risk: f64,
    /// Expected return in percent
    #[cfg_attr(feature = "serde", serde(rename = "return"))]
    pub expected_return: f64,
    /// Sharpe ratio (unscaled); serializes as `null` when non-finite
    pub sharpe: f64,
}

impl ScatterPoint {
    /// Build a point from fractional return and risk.
    pub fn new(expected_return: f64, risk: f64, sharpe: f64) -> Self {
        Self {
            risk: risk * 100.0,
            expected_return: expected_return * 100.0,
            sharpe,
        }
    }

    /// The Sharpe ratio if it is finite.
    #[inline]
    pub fn finite_sharpe(&self) -> Option<f64> {
        self.sharpe.is_finite().then_some(self.sharpe)
    }
}

impl std::fmt::Display for ScatterPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "risk {:>6.2}%  return {:>6.2}%",
            self.risk, self.expected_return
        )?;
        match self.finite_sharpe() {
            Some(s) => write!(f, "  sharpe {s:>6.2}"),
            None => write!(f, "  sharpe    n/a"),
        }
    }
}

/// Scored candidates sampled from one registry state.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Population {
    candidates: Vec<PortfolioCandidate>,
    fingerprint: u64,
    #[cfg_attr(feature = "serde", serde(skip))]
    data_bits: Vec<(u64, u64)>,
}

impl Population {
    /// Sample and score `count` candidates for `registry`.
    pub fn sample<R: Rng + ?Sized>(
        registry: &AssetRegistry,
        count: usize,
        risk_free_rate: f64,
        rng: &mut R,
    ) -> Result<Self> {
        let weights = generate_population(registry.len(), count, rng)?;
        Ok(Self::from_weights(registry, weights, risk_free_rate))
    }

    /// Sample in parallel from a seed (see [`par_generate_population`]).
    ///
    /// [`par_generate_population`]: crate::sampler::par_generate_population
    #[cfg(feature = "parallel")]
    pub fn par_sample(
        registry: &AssetRegistry,
        count: usize,
        risk_free_rate: f64,
        seed: u64,
    ) -> Result<Self> {
        use rayon::prelude::*;

        let weights = crate::sampler::par_generate_population(registry.len(), count, seed)?;
        let assets = registry.assets();
        let candidates = weights
            .into_par_iter()
            .map(|w| PortfolioCandidate::score(w, assets, risk_free_rate))
            .collect();
        Ok(Self {
            candidates,
            fingerprint: registry.fingerprint(),
            data_bits: registry.data_bits(),
        })
    }

    /// Score pre-drawn weight vectors against `registry`.
    pub fn from_weights(
        registry: &AssetRegistry,
        weights: Vec<WeightVector>,
        risk_free_rate: f64,
    ) -> Self {
        let assets = registry.assets();
        let candidates = weights
            .into_iter()
            .map(|w| PortfolioCandidate::score(w, assets, risk_free_rate))
            .collect();
        Self {
            candidates,
            fingerprint: registry.fingerprint(),
            data_bits: registry.data_bits(),
        }
    }

    /// The registry fingerprint this population was scored under.
    #[inline]
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Whether the population was derived from the registry's current returns and risks.
    ///
    /// The fingerprint is only a quick reject; equal fingerprints are
    /// confirmed against the exact return/risk bits.
    pub fn is_current_for(&self, registry: &AssetRegistry) -> bool {
        self.fingerprint == registry.fingerprint() && registry.has_data_bits(&self.data_bits)
    }

    /// All candidates in sampling order.
    #[inline]
    pub fn candidates(&self) -> &[PortfolioCandidate] {
        &self.candidates
    }

    /// Number of candidates.
    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// True if there are no candidates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Iterate over candidates.
    pub fn iter(&self) -> std::slice::Iter<'_, PortfolioCandidate> {
        self.candidates.iter()
    }

    /// Scatter points for every candidate.
    pub fn scatter(&self) -> Vec<ScatterPoint> {
        self.candidates.iter().map(PortfolioCandidate::point).collect()
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a PortfolioCandidate;
    type IntoIter = std::slice::Iter<'a, PortfolioCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::DEFAULT_RISK_FREE_RATE;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn score_equal_weight() {
        let assets = Asset::defaults();
        let c = PortfolioCandidate::score(vec![0.25; 4], &assets, DEFAULT_RISK_FREE_RATE);
        assert!((c.expected_return - 0.095).abs() < 1e-12);
        assert!((c.sharpe - (0.095 - 0.02) / c.risk).abs() < 1e-12);
    }

    #[test]
    fn sample_scores_every_candidate() {
        let reg = AssetRegistry::with_defaults();
        let mut rng = StdRng::seed_from_u64(3);
        let pop = Population::sample(&reg, 250, DEFAULT_RISK_FREE_RATE, &mut rng).unwrap();

        assert_eq!(pop.len(), 250);
        assert!(pop.is_current_for(&reg));
        for c in &pop {
            let m = compute_metrics(&c.weights, reg.assets());
            assert_eq!(c.metrics(), m);
        }
    }

    #[test]
    fn candidates_lie_within_asset_bounds() {
        let reg = AssetRegistry::with_defaults();
        let mut rng = StdRng::seed_from_u64(5);
        let pop = Population::sample(&reg, 500, DEFAULT_RISK_FREE_RATE, &mut rng).unwrap();
        for c in pop.iter() {
            assert!(c.expected_return >= 0.05 - 1e-12);
            assert!(c.expected_return <= 0.15 + 1e-12);
            assert!(c.risk <= 0.25 + 1e-12);
        }
    }

    #[test]
    fn scatter_is_in_percent() {
        let p = ScatterPoint::new(0.095, 0.0919, 0.88);
        assert!((p.expected_return - 9.5).abs() < 1e-9);
        assert!((p.risk - 9.19).abs() < 1e-9);
        assert_eq!(p.sharpe, 0.88);
    }

    #[test]
    fn zero_risk_candidate_renders() {
        let assets = vec![Asset::new("Cash", 0.03, 0.0)];
        let c = PortfolioCandidate::score(vec![1.0], &assets, DEFAULT_RISK_FREE_RATE);
        assert_eq!(c.sharpe, f64::INFINITY);
        let p = c.point();
        assert_eq!(p.finite_sharpe(), None);
        assert!(format!("{p}").contains("n/a"));
    }

    #[test]
    fn stale_after_return_edit() {
        let mut reg = AssetRegistry::with_defaults();
        let mut rng = StdRng::seed_from_u64(8);
        let pop = Population::sample(&reg, 10, DEFAULT_RISK_FREE_RATE, &mut rng).unwrap();
        reg.update_field(
            1,
            crate::AssetField::ExpectedReturn,
            "0.2",
            crate::ParsePolicy::Strict,
        )
        .unwrap();
        assert!(!pop.is_current_for(&reg));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn non_finite_sharpe_serializes_as_null() {
        let p = ScatterPoint::new(0.03, 0.0, f64::INFINITY);
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"sharpe\":null"));
        assert!(json.contains("\"return\":3"));
    }
}
