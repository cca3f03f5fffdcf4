//! TOML configuration loading and validation.

use std::path::Path;

use opto::{DEFAULT_POPULATION_SIZE, DEFAULT_RISK_FREE_RATE, ParsePolicy};
use serde::Deserialize;

use crate::error::{Error, Result};

/// Top-level configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Population size when the request does not give one.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,
    /// Fixed RNG seed for reproducible runs.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Upper bound on a request's population size.
    #[serde(default = "default_max_population_size")]
    pub max_population_size: usize,
}

fn default_population_size() -> usize {
    DEFAULT_POPULATION_SIZE
}
fn default_risk_free_rate() -> f64 {
    DEFAULT_RISK_FREE_RATE
}
fn default_max_population_size() -> usize {
    1_000_000
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            risk_free_rate: default_risk_free_rate(),
            seed: None,
            max_population_size: default_max_population_size(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputConfig {
    /// How field edits with invalid numbers are handled.
    #[serde(default)]
    pub parse_policy: ParsePolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_true")]
    pub pretty: bool,
    /// Include the efficient frontier in responses.
    #[serde(default)]
    pub frontier: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            frontier: false,
        }
    }
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&contents)
    }

    /// Load config from a file if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("{} not found, using default config", path.display());
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config invariants.
    fn validate(&self) -> Result<()> {
        if self.engine.population_size == 0 {
            return Err(Error::Config("population_size must be > 0".into()));
        }
        if self.engine.max_population_size < self.engine.population_size {
            return Err(Error::Config(
                "max_population_size must be >= population_size".into(),
            ));
        }
        if !self.engine.risk_free_rate.is_finite() {
            return Err(Error::Config("risk_free_rate must be finite".into()));
        }
        Ok(())
    }
}
