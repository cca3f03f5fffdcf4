//! Portfolio return, risk, and Sharpe ratio.
//!
//! Risk is the Euclidean norm of the weighted per-asset risks,
//! `sqrt(Σ (wᵢ·σᵢ)²)`. Assets are treated as uncorrelated and there is no
//! covariance matrix.

use crate::asset::Asset;

/// Risk-free rate used for Sharpe ratios unless configured otherwise (2%).
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.02;

/// Expected return and risk of one weight vector.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortfolioMetrics {
    /// Weighted sum of asset returns
    pub expected_return: f64,
    /// L2 norm of weighted asset risks
    pub risk: f64,
}

impl PortfolioMetrics {
    /// Sharpe ratio of these metrics against `risk_free_rate`.
    #[inline]
    pub fn sharpe(&self, risk_free_rate: f64) -> f64 {
        compute_sharpe(self.expected_return, self.risk, risk_free_rate)
    }
}

impl std::fmt::Display for PortfolioMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "return {:>7.2}%  risk {:>7.2}%",
            self.expected_return * 100.0,
            self.risk * 100.0
        )
    }
}

/// Compute expected return and risk of `weights` over `assets`.
///
/// The slices must be index-aligned and of equal length; this is only
/// checked in debug builds.
pub fn compute_metrics(weights: &[f64], assets: &[Asset]) -> PortfolioMetrics {
    debug_assert_eq!(
        weights.len(),
        assets.len(),
        "weight vector and asset list must be index-aligned"
    );

    let mut expected_return = 0.0;
    let mut sum_sq = 0.0;
    for (w, asset) in weights.iter().zip(assets) {
        expected_return += w * asset.expected_return;
        let contribution = w * asset.risk;
        sum_sq += contribution * contribution;
    }

    PortfolioMetrics {
        expected_return,
        risk: sum_sq.sqrt(),
    }
}

/// Sharpe ratio: `(expected_return - risk_free_rate) / risk`.
///
/// Zero risk follows IEEE division: positive excess return gives `+∞`,
/// negative gives `-∞`, and zero excess gives NaN. Callers that display or
/// compare Sharpe ratios must accept non-finite values.
#[inline]
pub fn compute_sharpe(expected_return: f64, risk: f64, risk_free_rate: f64) -> f64 {
    (expected_return - risk_free_rate) / risk
}
