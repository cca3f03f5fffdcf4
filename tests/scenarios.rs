//! End-to-end scenarios: default assets, edits, sampling, optimization.

use opto::{
    Asset, AssetField, AssetRegistry, Population, Session, SessionConfig, compute_metrics,
    efficient_frontier, max_sharpe, optimize, utility,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn seeded(seed: u64) -> SessionConfig {
    SessionConfig {
        seed: Some(seed),
        ..Default::default()
    }
}

// ============================================================================
// Baseline metrics
// ============================================================================

#[test]
fn default_equal_weight_baseline() {
    let registry = AssetRegistry::with_defaults();
    let m = registry.current_metrics();

    assert!((m.expected_return - 0.095).abs() < 1e-12);
    // sqrt(0.05² + 0.0625² + 0.025² + 0.0375²) = sqrt(0.0084375)
    assert!((m.risk - 0.0084375f64.sqrt()).abs() < 1e-12);
    assert!((m.risk - 0.091856).abs() < 1e-6);
}

#[test]
fn single_asset_reports_its_own_numbers() {
    let registry = AssetRegistry::new(vec![Asset::new("Solo", 0.07, 0.12)]).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    let population = Population::sample(&registry, 50, 0.02, &mut rng).unwrap();

    for c in &population {
        assert_eq!(c.weights, vec![1.0]);
        assert_eq!(c.expected_return, 0.07);
        assert_eq!(c.risk, 0.12);
    }
}

#[test]
fn risk_is_not_linear_in_weights() {
    let assets = Asset::defaults();
    let w = [0.25; 4];
    let m = compute_metrics(&w, &assets);
    let linear: f64 = assets.iter().zip(&w).map(|(a, w)| a.risk * w).sum();
    assert!(m.risk < linear);
}

// ============================================================================
// Optimize, write back, recompute
// ============================================================================

#[test]
fn optimize_round_trip_matches_winner() {
    let mut session = Session::new(AssetRegistry::with_defaults(), seeded(11)).unwrap();
    let result = session.optimize().unwrap();

    let live = session.current_metrics();
    assert_eq!(live.expected_return, result.expected_return);
    assert_eq!(live.risk, result.risk);
    assert_eq!(session.registry().weights(), result.weights);
}

#[test]
fn winner_beats_every_candidate() {
    let registry = AssetRegistry::with_defaults();
    let mut rng = StdRng::seed_from_u64(99);
    let population = Population::sample(&registry, 1000, 0.02, &mut rng).unwrap();

    let best = optimize(population.candidates(), 2.0).unwrap();
    let best_u = utility(best.expected_return, best.risk, 2.0);
    for c in &population {
        assert!(c.utility(2.0) <= best_u);
    }
}

#[test]
fn edits_flow_into_next_optimization() {
    let mut session = Session::new(AssetRegistry::with_defaults(), seeded(5)).unwrap();

    // Make Bond C dominate: highest return, lowest risk.
    session
        .update_field(2, AssetField::ExpectedReturn, "0.30")
        .unwrap();
    session.update_field(2, AssetField::Risk, "0.01").unwrap();

    let result = session.optimize().unwrap();
    let bond = result.weights[2];
    assert!(result.weights.iter().all(|w| *w <= bond));
}

#[test]
fn rename_keeps_cached_population() {
    let mut session = Session::new(AssetRegistry::with_defaults(), seeded(8)).unwrap();
    session.population().unwrap();
    session.update_field(0, AssetField::Name, "Tech Fund").unwrap();
    session.set_risk_aversion(6.0);
    session.optimize().unwrap();

    assert_eq!(session.samples_drawn(), 1);
    assert_eq!(session.registry().get(0).unwrap().name, "Tech Fund");
}

// ============================================================================
// Frontier and max-Sharpe
// ============================================================================

#[test]
fn frontier_contains_global_extremes() {
    let registry = AssetRegistry::with_defaults();
    let mut rng = StdRng::seed_from_u64(21);
    let population = Population::sample(&registry, 2000, 0.02, &mut rng).unwrap();
    let frontier = efficient_frontier(population.candidates());

    let min_risk = population
        .iter()
        .map(|c| c.risk)
        .fold(f64::INFINITY, f64::min);
    let max_ret = population
        .iter()
        .map(|c| c.expected_return)
        .fold(f64::NEG_INFINITY, f64::max);

    assert_eq!(frontier.first().unwrap().risk, min_risk);
    assert_eq!(frontier.last().unwrap().expected_return, max_ret);
}

#[test]
fn max_sharpe_lies_on_frontier() {
    let registry = AssetRegistry::with_defaults();
    let mut rng = StdRng::seed_from_u64(34);
    let population = Population::sample(&registry, 1000, 0.02, &mut rng).unwrap();

    let best = max_sharpe(population.candidates()).unwrap();
    let frontier = efficient_frontier(population.candidates());
    assert!(frontier.iter().any(|c| std::ptr::eq(*c, best)));
}

#[test]
fn session_frontier_uses_cached_population() {
    let mut session = Session::new(AssetRegistry::with_defaults(), seeded(1)).unwrap();
    let n = session.frontier().unwrap().len();
    assert!(n > 0);
    session.optimize().unwrap();
    assert_eq!(session.samples_drawn(), 1);
}
