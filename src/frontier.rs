//! Approximate efficient frontier from a sampled population.
//!
//! The frontier is the upper-left envelope of the cloud: walking candidates
//! in order of increasing risk, a candidate is on the frontier when its return
//! beats every candidate with lower (or equal) risk.

use std::cmp::Ordering;

use crate::population::PortfolioCandidate;

/// Frontier candidates, sorted by increasing risk (and increasing return).
///
/// Candidates with non-finite return or risk are skipped.
pub fn efficient_frontier(candidates: &[PortfolioCandidate]) -> Vec<&PortfolioCandidate> {
    let mut order: Vec<&PortfolioCandidate> = candidates
        .iter()
        .filter(|c| c.risk.is_finite() && c.expected_return.is_finite())
        .collect();

    // Risk ascending; on equal risk the higher return comes first so the
    // dominated twin is dropped below.
    order.sort_by(|a, b| {
        a.risk
            .partial_cmp(&b.risk)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                b.expected_return
                    .partial_cmp(&a.expected_return)
                    .unwrap_or(Ordering::Equal)
            })
    });

    let mut frontier = Vec::new();
    let mut best_return = f64::NEG_INFINITY;
    for c in order {
        if c.expected_return > best_return {
            best_return = c.expected_return;
            frontier.push(c);
        }
    }
    frontier
}

/// Candidate with the highest Sharpe ratio, the sampled tangency portfolio.
///
/// Non-finite Sharpe ratios are ignored and ties keep the earlier candidate.
/// Returns `None` when nothing qualifies.
pub fn max_sharpe(candidates: &[PortfolioCandidate]) -> Option<&PortfolioCandidate> {
    candidates
        .iter()
        .filter(|c| c.sharpe.is_finite())
        .fold(None, |best: Option<&PortfolioCandidate>, c| match best {
            Some(b) if b.sharpe >= c.sharpe => Some(b),
            _ => Some(c),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(expected_return: f64, risk: f64) -> PortfolioCandidate {
        PortfolioCandidate {
            weights: vec![1.0],
            expected_return,
            risk,
            sharpe: (expected_return - 0.02) / risk,
        }
    }

    #[test]
    fn empty_population_has_empty_frontier() {
        assert!(efficient_frontier(&[]).is_empty());
    }

    #[test]
    fn dominated_points_are_dropped() {
        let pop = vec![
            candidate(0.08, 0.10),
            candidate(0.06, 0.12), // dominated by the first
            candidate(0.12, 0.20),
            candidate(0.10, 0.20), // same risk, lower return
            candidate(0.05, 0.05),
        ];
        let f = efficient_frontier(&pop);
        let pts: Vec<(f64, f64)> = f.iter().map(|c| (c.risk, c.expected_return)).collect();
        assert_eq!(pts, vec![(0.05, 0.05), (0.10, 0.08), (0.20, 0.12)]);
    }

    #[test]
    fn frontier_is_monotone() {
        let pop: Vec<_> = (0..200)
            .map(|i| {
                let x = i as f64;
                candidate(
                    (x * 0.37).sin().abs() * 0.15,
                    0.05 + (x * 0.11).cos().abs() * 0.2,
                )
            })
            .collect();
        let f = efficient_frontier(&pop);
        assert!(!f.is_empty());
        for pair in f.windows(2) {
            assert!(pair[1].risk >= pair[0].risk);
            assert!(pair[1].expected_return > pair[0].expected_return);
        }
    }

    #[test]
    fn non_finite_skipped() {
        let pop = vec![candidate(f64::NAN, 0.1), candidate(0.05, f64::INFINITY)];
        assert!(efficient_frontier(&pop).is_empty());
    }

    #[test]
    fn max_sharpe_ignores_infinite() {
        let mut zero_risk = candidate(0.05, 0.0);
        zero_risk.sharpe = f64::INFINITY;
        let pop = vec![candidate(0.10, 0.20), zero_risk, candidate(0.12, 0.20)];
        let best = max_sharpe(&pop).unwrap();
        assert_eq!(best.expected_return, 0.12);
    }

    #[test]
    fn max_sharpe_none_when_all_non_finite() {
        let mut c = candidate(0.02, 0.0);
        c.sharpe = f64::NAN;
        assert!(max_sharpe(&[c]).is_none());
    }
}
