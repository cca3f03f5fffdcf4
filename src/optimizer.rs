//! Mean-variance utility selection over a sampled population.
//!
//! `U = r - ½·A·σ²`, where `A` is the risk-aversion coefficient. The winner
//! is found by a single left-to-right scan that replaces the incumbent only
//! on strictly greater utility, so ties go to the earlier candidate.

use crate::error::{Error, Result};
use crate::population::PortfolioCandidate;

/// Mean-variance utility of a return/risk pair.
#[inline]
pub fn utility(expected_return: f64, risk: f64, risk_aversion: f64) -> f64 {
    expected_return - 0.5 * risk_aversion * risk * risk
}

impl PortfolioCandidate {
    /// Utility of this candidate under `risk_aversion`.
    #[inline]
    pub fn utility(&self, risk_aversion: f64) -> f64 {
        utility(self.expected_return, self.risk, risk_aversion)
    }
}

/// Index of the utility-maximizing candidate.
///
/// No range check is applied to `risk_aversion`.
pub fn best_index(population: &[PortfolioCandidate], risk_aversion: f64) -> Result<usize> {
    let (first, rest) = population.split_first().ok_or(Error::EmptyPopulation)?;

    let mut best = 0;
    let mut best_utility = first.utility(risk_aversion);
    for (i, candidate) in rest.iter().enumerate() {
        let u = candidate.utility(risk_aversion);
        if u > best_utility {
            best = i + 1;
            best_utility = u;
        }
    }
    Ok(best)
}

/// The utility-maximizing candidate. Never synthesizes a new one.
pub fn optimize(
    population: &[PortfolioCandidate],
    risk_aversion: f64,
) -> Result<&PortfolioCandidate> {
    let i = best_index(population, risk_aversion)?;
    Ok(&population[i])
}

/// Parallel [`best_index`]; returns the same index.
///
/// The reduction keeps the left operand on ties. A NaN utility can only win
/// from the first position, as in the sequential scan.
#[cfg(feature = "parallel")]
pub fn par_best_index(population: &[PortfolioCandidate], risk_aversion: f64) -> Result<usize> {
    use rayon::prelude::*;

    let first = population.first().ok_or(Error::EmptyPopulation)?;
    if first.utility(risk_aversion).is_nan() {
        return Ok(0);
    }

    population
        .par_iter()
        .enumerate()
        .map(|(i, c)| {
            let u = c.utility(risk_aversion);
            (if u.is_nan() { f64::NEG_INFINITY } else { u }, i)
        })
        .reduce_with(|left, right| if right.0 > left.0 { right } else { left })
        .map(|(_, i)| i)
        .ok_or(Error::EmptyPopulation)
}
