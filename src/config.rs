//! Session configuration.

use crate::error::{Error, Result};
use crate::metrics::DEFAULT_RISK_FREE_RATE;
use crate::parse::ParsePolicy;
use crate::sampler::DEFAULT_POPULATION_SIZE;

/// Risk aversion a new session starts with.
pub const DEFAULT_RISK_AVERSION: f64 = 2.0;

/// Configuration for a [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Candidates drawn per population.
    pub population_size: usize,
    /// Risk-free rate for Sharpe ratios (e.g., 0.02 = 2%).
    pub risk_free_rate: f64,
    /// Starting risk-aversion coefficient.
    pub risk_aversion: f64,
    /// Policy for numeric field edits.
    pub parse_policy: ParsePolicy,
    /// RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl SessionConfig {
    /// Validate the config. Returns [`Error::Config`] describing the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(Error::Config("population_size must be > 0".into()));
        }
        if !self.risk_free_rate.is_finite() {
            return Err(Error::Config(format!(
                "risk_free_rate must be finite, got {}",
                self.risk_free_rate
            )));
        }
        if !self.risk_aversion.is_finite() {
            return Err(Error::Config(format!(
                "risk_aversion must be finite, got {}",
                self.risk_aversion
            )));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            risk_aversion: DEFAULT_RISK_AVERSION,
            parse_policy: ParsePolicy::Lenient,
            seed: None,
        }
    }
}
