//! Interactive optimization session.
//!
//! A [`Session`] owns the asset registry, the risk-aversion setting, and the
//! sampled population. The population is memoized on the assets' return and
//! risk values: it is redrawn only when an asset's return or risk changes,
//! never on risk-aversion edits, renames, or weight writes.
//!
//! # Example
//!
//! ```
//! use opto::{AssetField, Session, SessionConfig};
//!
//! let config = SessionConfig { seed: Some(7), ..Default::default() };
//! let mut session = Session::new(Default::default(), config).unwrap();
//!
//! session.update_field(0, AssetField::Risk, "0.3").unwrap();
//! session.set_risk_aversion(4.0);
//!
//! let result = session.optimize().unwrap();
//! assert_eq!(session.registry().weights(), result.weights);
//! ```

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::asset::AssetField;
use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::frontier::efficient_frontier;
use crate::metrics::PortfolioMetrics;
use crate::parse::ParsePolicy;
use crate::population::{Population, PortfolioCandidate, ScatterPoint};
use crate::registry::AssetRegistry;
use crate::sampler::WeightVector;

/// Outcome of [`Session::optimize`]: the winning candidate as applied.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Optimization {
    /// Position of the winner in the population
    pub index: usize,
    /// Weights written to the registry
    pub weights: WeightVector,
    /// Expected return of the winner
    pub expected_return: f64,
    /// Risk of the winner
    pub risk: f64,
    /// Sharpe ratio of the winner
    pub sharpe: f64,
    /// Utility under `risk_aversion`
    pub utility: f64,
    /// Risk aversion used for the selection
    pub risk_aversion: f64,
}

impl Optimization {
    fn from_candidate(index: usize, candidate: &PortfolioCandidate, risk_aversion: f64) -> Self {
        Self {
            index,
            weights: candidate.weights.clone(),
            expected_return: candidate.expected_return,
            risk: candidate.risk,
            sharpe: candidate.sharpe,
            utility: candidate.utility(risk_aversion),
            risk_aversion,
        }
    }
}

impl std::fmt::Display for Optimization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Optimal portfolio (risk aversion {:.1})",
            self.risk_aversion
        )?;
        writeln!(
            f,
            "  Expected return: {:>8.2}%",
            self.expected_return * 100.0
        )?;
        writeln!(f, "  Risk:            {:>8.2}%", self.risk * 100.0)?;
        writeln!(f, "  Sharpe:          {:>8.2}", self.sharpe)?;
        writeln!(f, "  Utility:         {:>8.4}", self.utility)
    }
}

/// Single-writer optimization session.
#[derive(Debug)]
pub struct Session {
    registry: AssetRegistry,
    risk_aversion: f64,
    config: SessionConfig,
    rng: StdRng,
    population: Option<Population>,
    samples_drawn: u64,
}

impl Session {
    /// Create a session over `registry`. The config is validated first.
    pub fn new(registry: AssetRegistry, config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            registry,
            risk_aversion: config.risk_aversion,
            config,
            rng,
            population: None,
            samples_drawn: 0,
        })
    }

    // === Queries ===

    /// The asset registry.
    #[inline]
    pub fn registry(&self) -> &AssetRegistry {
        &self.registry
    }

    /// The session configuration.
    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current risk-aversion coefficient.
    #[inline]
    pub fn risk_aversion(&self) -> f64 {
        self.risk_aversion
    }

    /// Number of populations drawn so far.
    #[inline]
    pub fn samples_drawn(&self) -> u64 {
        self.samples_drawn
    }

    /// The memoized population, if it matches the current registry.
    pub fn cached_population(&self) -> Option<&Population> {
        self.population
            .as_ref()
            .filter(|p| p.is_current_for(&self.registry))
    }

    /// Metrics of the registry's live weights.
    pub fn current_metrics(&self) -> PortfolioMetrics {
        self.registry.current_metrics()
    }

    /// Scatter point of the registry's live weights.
    pub fn current_point(&self) -> ScatterPoint {
        let m = self.current_metrics();
        ScatterPoint::new(
            m.expected_return,
            m.risk,
            m.sharpe(self.config.risk_free_rate),
        )
    }

    // === Edits ===

    /// Edit one asset field from raw text under the session's parse policy.
    pub fn update_field(&mut self, index: usize, field: AssetField, raw: &str) -> Result<()> {
        self.registry
            .update_field(index, field, raw, self.config.parse_policy)?;
        log::debug!("asset {index} {field} <- {raw:?}");
        Ok(())
    }

    /// Set the risk-aversion coefficient. No range check is applied.
    pub fn set_risk_aversion(&mut self, risk_aversion: f64) {
        self.risk_aversion = risk_aversion;
    }

    /// Switch the parse policy for subsequent edits.
    pub fn set_parse_policy(&mut self, policy: ParsePolicy) {
        self.config.parse_policy = policy;
    }

    /// Restore the default registry and drop the population.
    pub fn reset(&mut self) {
        self.registry = AssetRegistry::with_defaults();
        self.risk_aversion = self.config.risk_aversion;
        self.population = None;
    }

    // === Population ===

    /// The population for the current registry, drawing one if needed.
    pub fn population(&mut self) -> Result<&Population> {
        let fresh = self
            .population
            .as_ref()
            .is_some_and(|p| p.is_current_for(&self.registry));
        if !fresh {
            self.draw()?;
        }
        self.population.as_ref().ok_or(Error::EmptyPopulation)
    }

    /// Draw a new population even if the cached one is current.
    pub fn resample(&mut self) -> Result<&Population> {
        self.draw()?;
        self.population.as_ref().ok_or(Error::EmptyPopulation)
    }

    /// Efficient frontier of the current population.
    pub fn frontier(&mut self) -> Result<Vec<&PortfolioCandidate>> {
        let population = self.population()?;
        Ok(efficient_frontier(population.candidates()))
    }

    fn draw(&mut self) -> Result<()> {
        let population = self.sample_population()?;
        self.samples_drawn += 1;
        log::debug!(
            "drew population #{} ({} candidates, fingerprint {:016x})",
            self.samples_drawn,
            population.len(),
            population.fingerprint()
        );
        self.population = Some(population);
        Ok(())
    }

    #[cfg(not(feature = "parallel"))]
    fn sample_population(&mut self) -> Result<Population> {
        Population::sample(
            &self.registry,
            self.config.population_size,
            self.config.risk_free_rate,
            &mut self.rng,
        )
    }

    #[cfg(feature = "parallel")]
    fn sample_population(&mut self) -> Result<Population> {
        use rand::Rng;

        let seed = self.rng.r#gen::<u64>();
        Population::par_sample(
            &self.registry,
            self.config.population_size,
            self.config.risk_free_rate,
            seed,
        )
    }

    // === Optimization ===

    /// Select the utility-maximizing candidate and write its weights to the registry.
    pub fn optimize(&mut self) -> Result<Optimization> {
        let risk_aversion = self.risk_aversion;
        let population = self.population()?;

        #[cfg(not(feature = "parallel"))]
        let index = crate::optimizer::best_index(population.candidates(), risk_aversion)?;
        #[cfg(feature = "parallel")]
        let index = crate::optimizer::par_best_index(population.candidates(), risk_aversion)?;

        let result =
            Optimization::from_candidate(index, &population.candidates()[index], risk_aversion);
        self.registry.apply_weights(&result.weights)?;

        log::debug!(
            "optimized at A={risk_aversion}: candidate {index}, return {:.4}, risk {:.4}",
            result.expected_return,
            result.risk
        );
        Ok(result)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self {
            registry: AssetRegistry::with_defaults(),
            risk_aversion: SessionConfig::default().risk_aversion,
            config: SessionConfig::default(),
            rng: StdRng::from_entropy(),
            population: None,
            samples_drawn: 0,
        }
    }
}
