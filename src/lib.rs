//! # opto
//!
//! Mean-variance portfolio exploration by random sampling.
//!
//! ## Features
//!
//! - **Sampling**: random long-only weight vectors on the unit simplex
//! - **Metrics**: expected return, L2-combined risk, Sharpe ratio
//! - **Optimization**: utility-maximizing candidate under a risk-aversion coefficient
//! - **Frontier**: upper-left envelope of the sampled cloud
//! - **Sessions**: population memoized on the assets' return/risk data
//!
//! ## Quick Start
//!
//! ```
//! use opto::{AssetRegistry, Population, optimize};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut registry = AssetRegistry::with_defaults();
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! // 1000 candidate portfolios, Sharpe ratios against a 2% risk-free rate
//! let population = Population::sample(&registry, 1000, 0.02, &mut rng).unwrap();
//!
//! // Best candidate for risk aversion 3.0, written back as the new allocation
//! let best = optimize(population.candidates(), 3.0).unwrap();
//! registry.apply_weights(&best.weights).unwrap();
//!
//! let live = registry.current_metrics();
//! assert_eq!(live.expected_return, best.expected_return);
//! assert_eq!(live.risk, best.risk);
//! ```
//!
//! ## Portfolio Metrics
//!
//! | Metric | Formula |
//! |--------|---------|
//! | **Return** | `Σ wᵢ·rᵢ` |
//! | **Risk** | `sqrt(Σ (wᵢ·σᵢ)²)` |
//! | **Sharpe** | `(return − r_f) / risk` |
//! | **Utility** | `return − ½·A·risk²` |
//!
//! Risk combines per-asset contributions as a Euclidean norm; there is no
//! covariance matrix.
//!
//! ```
//! use opto::{Asset, compute_metrics};
//!
//! let assets = Asset::defaults();
//! let m = compute_metrics(&[1.0, 0.0, 0.0, 0.0], &assets);
//! assert_eq!(m.expected_return, 0.10);
//! assert_eq!(m.risk, 0.20);
//! ```
//!
//! ## Field Edits
//!
//! Asset fields are edited from raw text. The [`ParsePolicy`] decides what
//! happens to input that is not a number:
//!
//! ```
//! use opto::{AssetField, AssetRegistry, ParsePolicy};
//!
//! let mut registry = AssetRegistry::with_defaults();
//!
//! // Lenient: coerced to zero
//! registry.update_field(0, AssetField::Risk, "oops", ParsePolicy::Lenient).unwrap();
//! assert_eq!(registry.get(0).unwrap().risk, 0.0);
//!
//! // Strict: rejected, registry unchanged
//! assert!(registry.update_field(1, AssetField::Risk, "oops", ParsePolicy::Strict).is_err());
//! assert_eq!(registry.get(1).unwrap().risk, 0.25);
//! ```

pub mod asset;
pub mod config;
mod error;
pub mod frontier;
pub mod metrics;
pub mod optimizer;
pub mod parse;
pub mod population;
pub mod registry;
pub mod sampler;
pub mod session;

// Re-export public API
pub use asset::{Asset, AssetField};
pub use config::SessionConfig;
pub use error::{Error, Result};
pub use frontier::{efficient_frontier, max_sharpe};
pub use metrics::{DEFAULT_RISK_FREE_RATE, PortfolioMetrics, compute_metrics, compute_sharpe};
pub use optimizer::{best_index, optimize, utility};
pub use parse::ParsePolicy;
pub use population::{Population, PortfolioCandidate, ScatterPoint};
pub use registry::AssetRegistry;
pub use sampler::{DEFAULT_POPULATION_SIZE, WeightVector, generate_population, random_weights};
pub use session::{Optimization, Session};
