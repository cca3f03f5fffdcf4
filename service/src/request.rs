//! Optimization request (request.json) loading and validation.

use std::path::Path;

use opto::{Asset, AssetField, AssetRegistry};
use serde::Deserialize;

use crate::error::{Error, Result};

/// A request to sample and optimize one asset set.
#[derive(Debug, Clone, Deserialize)]
pub struct OptimizeRequest {
    pub assets: Vec<Asset>,
    pub risk_aversion: f64,
    /// Overrides the configured population size.
    #[serde(default)]
    pub population_size: Option<usize>,
    /// Raw-text field edits applied in order before sampling.
    #[serde(default)]
    pub edits: Vec<FieldEdit>,
}

/// One field edit, as typed into an input box.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldEdit {
    pub index: usize,
    pub field: AssetField,
    pub value: String,
}

impl OptimizeRequest {
    /// Load and validate a request file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::RequestRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&contents)
    }

    /// Parse from a JSON string (useful for testing).
    pub fn from_json(json: &str) -> Result<Self> {
        let request: OptimizeRequest = serde_json::from_str(json)?;
        request.validate()?;
        Ok(request)
    }

    /// Validate the request.
    fn validate(&self) -> Result<()> {
        if self.assets.is_empty() {
            return Err(Error::Request("assets list is empty".into()));
        }

        for (i, a) in self.assets.iter().enumerate() {
            for (label, value) in [
                ("expected_return", a.expected_return),
                ("risk", a.risk),
                ("weight", a.weight),
            ] {
                if !value.is_finite() {
                    return Err(Error::Request(format!(
                        "asset {i} ({}) has non-finite {label}",
                        a.name
                    )));
                }
            }
        }

        if !self.risk_aversion.is_finite() {
            return Err(Error::Request(format!(
                "risk_aversion must be finite, got {}",
                self.risk_aversion
            )));
        }

        if self.population_size == Some(0) {
            return Err(Error::Request("population_size must be > 0".into()));
        }

        for edit in &self.edits {
            if edit.index >= self.assets.len() {
                return Err(Error::Request(format!(
                    "edit targets asset {} but only {} assets given",
                    edit.index,
                    self.assets.len()
                )));
            }
        }

        Ok(())
    }

    /// A registry snapshot of the request's assets.
    pub fn registry(&self) -> Result<AssetRegistry> {
        Ok(AssetRegistry::new(self.assets.clone())?)
    }
}
