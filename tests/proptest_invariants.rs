//! Property-based tests for sampling and selection invariants.
//!
//! These tests use proptest to verify that key invariants hold
//! across randomly generated asset sets and seeds.

use opto::{
    Asset, AssetRegistry, Population, Session, SessionConfig, best_index, compute_metrics,
    efficient_frontier, random_weights, utility,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Generate a plausible asset (return -10%..40%, risk 0..60%)
fn asset_strategy() -> impl Strategy<Value = Asset> {
    (-0.10f64..0.40, 0.0f64..0.60).prop_map(|(r, s)| Asset::new("X", r, s))
}

/// Generate a non-empty asset set
fn assets_strategy() -> impl Strategy<Value = Vec<Asset>> {
    prop::collection::vec(asset_strategy(), 1..=12)
}

fn sample(assets: Vec<Asset>, count: usize, seed: u64) -> Population {
    let registry = AssetRegistry::new(assets).unwrap();
    let mut rng = StdRng::seed_from_u64(seed);
    Population::sample(&registry, count, 0.02, &mut rng).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // ========================================================================
    // SAMPLING INVARIANTS
    // ========================================================================

    /// Every draw is on the open simplex: positive entries summing to 1
    #[test]
    fn weights_on_simplex(n in 1usize..=20, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..20 {
            let w = random_weights(n, &mut rng);
            prop_assert_eq!(w.len(), n);
            prop_assert!(w.iter().all(|x| *x > 0.0 && *x <= 1.0));
            let sum: f64 = w.iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-9, "sum = {}", sum);
        }
    }

    /// Same seed, same population
    #[test]
    fn sampling_is_deterministic(assets in assets_strategy(), seed in any::<u64>()) {
        let a = sample(assets.clone(), 50, seed);
        let b = sample(assets, 50, seed);
        prop_assert_eq!(a.candidates(), b.candidates());
    }

    /// Candidate metrics are exactly what compute_metrics reports for its weights
    #[test]
    fn candidates_carry_their_metrics(assets in assets_strategy(), seed in any::<u64>()) {
        let pop = sample(assets.clone(), 30, seed);
        for c in &pop {
            let m = compute_metrics(&c.weights, &assets);
            prop_assert_eq!(m.expected_return, c.expected_return);
            prop_assert_eq!(m.risk, c.risk);
        }
    }

    // ========================================================================
    // METRIC INVARIANTS
    // ========================================================================

    /// Return is a convex combination of asset returns
    #[test]
    fn return_within_asset_range(assets in assets_strategy(), seed in any::<u64>()) {
        let lo = assets.iter().map(|a| a.expected_return).fold(f64::INFINITY, f64::min);
        let hi = assets.iter().map(|a| a.expected_return).fold(f64::NEG_INFINITY, f64::max);
        let pop = sample(assets, 30, seed);
        for c in &pop {
            prop_assert!(c.expected_return >= lo - 1e-12);
            prop_assert!(c.expected_return <= hi + 1e-12);
        }
    }

    /// L2 risk never exceeds the weighted sum of asset risks
    #[test]
    fn risk_below_linear(assets in assets_strategy(), seed in any::<u64>()) {
        let pop = sample(assets.clone(), 30, seed);
        for c in &pop {
            let linear: f64 = c.weights.iter().zip(&assets).map(|(w, a)| w * a.risk).sum();
            prop_assert!(c.risk >= 0.0);
            prop_assert!(c.risk <= linear + 1e-12);
        }
    }

    // ========================================================================
    // SELECTION INVARIANTS
    // ========================================================================

    /// The winner's utility is at least every candidate's
    #[test]
    fn winner_dominates(
        assets in assets_strategy(),
        seed in any::<u64>(),
        aversion in -5.0f64..20.0,
    ) {
        let pop = sample(assets, 200, seed);
        let i = best_index(pop.candidates(), aversion).unwrap();
        let best = pop.candidates()[i].utility(aversion);
        for c in &pop {
            prop_assert!(c.utility(aversion) <= best);
        }
        // Ties go to the earliest candidate.
        for c in &pop.candidates()[..i] {
            prop_assert!(c.utility(aversion) < best);
        }
    }

    /// Raising risk aversion never selects a riskier portfolio
    #[test]
    fn aversion_monotone_in_risk(
        assets in assets_strategy(),
        seed in any::<u64>(),
        low in 0.0f64..5.0,
        step in 0.0f64..20.0,
    ) {
        let pop = sample(assets, 200, seed);
        let high = low + step;
        let a = &pop.candidates()[best_index(pop.candidates(), low).unwrap()];
        let b = &pop.candidates()[best_index(pop.candidates(), high).unwrap()];
        prop_assert!(
            b.risk <= a.risk + 1e-12,
            "A={} risk {} > A={} risk {}",
            high, b.risk, low, a.risk
        );
    }

    /// Utility is linear in the aversion coefficient
    #[test]
    fn utility_linear_in_aversion(r in -1.0f64..1.0, s in 0.0f64..1.0, a in 0.0f64..50.0) {
        let u0 = utility(r, s, 0.0);
        let u1 = utility(r, s, 1.0);
        let ua = utility(r, s, a);
        prop_assert!((ua - (u0 + a * (u1 - u0))).abs() < 1e-9);
    }

    /// Optimizing writes weights back and the registry reproduces the winner
    #[test]
    fn optimize_round_trip(
        assets in assets_strategy(),
        seed in any::<u64>(),
        aversion in 0.0f64..10.0,
    ) {
        let config = SessionConfig {
            population_size: 100,
            risk_aversion: aversion,
            seed: Some(seed),
            ..Default::default()
        };
        let mut session = Session::new(AssetRegistry::new(assets).unwrap(), config).unwrap();
        let result = session.optimize().unwrap();
        let live = session.current_metrics();
        prop_assert_eq!(live.expected_return, result.expected_return);
        prop_assert_eq!(live.risk, result.risk);
        prop_assert_eq!(session.samples_drawn(), 1);
    }

    // ========================================================================
    // FRONTIER INVARIANTS
    // ========================================================================

    /// Frontier is strictly increasing in return and non-decreasing in risk
    #[test]
    fn frontier_is_monotone(assets in assets_strategy(), seed in any::<u64>()) {
        let pop = sample(assets, 200, seed);
        let f = efficient_frontier(pop.candidates());
        prop_assert!(!f.is_empty());
        for pair in f.windows(2) {
            prop_assert!(pair[0].risk <= pair[1].risk);
            prop_assert!(pair[0].expected_return < pair[1].expected_return);
        }
    }

    /// No sampled candidate strictly dominates a frontier point
    #[test]
    fn frontier_not_dominated(assets in assets_strategy(), seed in any::<u64>()) {
        let pop = sample(assets, 100, seed);
        for p in efficient_frontier(pop.candidates()) {
            for c in &pop {
                let dominates = c.risk < p.risk && c.expected_return > p.expected_return;
                prop_assert!(!dominates);
            }
        }
    }
}

#[test]
fn aversion_monotone_on_defaults() {
    let pop = sample(Asset::defaults(), 1000, 2024);
    let mut last_risk = f64::INFINITY;
    for a in [0.0, 1.0, 2.0, 5.0, 10.0, 50.0] {
        let i = best_index(pop.candidates(), a).unwrap();
        let risk = pop.candidates()[i].risk;
        assert!(risk <= last_risk + 1e-12);
        last_risk = risk;
    }
}
