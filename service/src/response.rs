//! Optimization response and its text rendering.

use opto::{Optimization, ScatterPoint};
use serde::Serialize;

use crate::error::{Error, Result};

/// Response to an [`OptimizeRequest`](crate::request::OptimizeRequest).
#[derive(Debug, Clone, Serialize)]
pub struct OptimizeResponse {
    /// Winning weights, index-aligned with the request's assets
    pub optimized_weights: Vec<f64>,
    /// Every sampled candidate as (risk %, return %, sharpe)
    pub population: Vec<ScatterPoint>,
    /// The request's own weights before optimization
    pub current: ScatterPoint,
    pub optimum: Optimum,
    /// Asset names in request order
    pub names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontier: Option<Vec<ScatterPoint>>,
}

/// Summary of the selected candidate.
#[derive(Debug, Clone, Serialize)]
pub struct Optimum {
    pub expected_return: f64,
    pub risk: f64,
    pub sharpe: f64,
    pub utility: f64,
    pub risk_aversion: f64,
}

impl From<&Optimization> for Optimum {
    fn from(o: &Optimization) -> Self {
        Self {
            expected_return: o.expected_return,
            risk: o.risk,
            sharpe: o.sharpe,
            utility: o.utility,
            risk_aversion: o.risk_aversion,
        }
    }
}

/// Response to a sample-only request.
#[derive(Debug, Clone, Serialize)]
pub struct SampleResponse {
    pub population: Vec<ScatterPoint>,
    pub current: ScatterPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontier: Option<Vec<ScatterPoint>>,
}

/// Serialize any response to JSON.
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.map_err(Error::Serialize)
}

impl std::fmt::Display for OptimizeResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "OPTIMAL ALLOCATION (risk aversion {:.1}):",
            self.optimum.risk_aversion
        )?;
        for (name, w) in self.names.iter().zip(&self.optimized_weights) {
            writeln!(f, "  {:<24} {:>7.2}%", name, w * 100.0)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "  Expected return: {:>7.2}%",
            self.optimum.expected_return * 100.0
        )?;
        writeln!(f, "  Risk:            {:>7.2}%", self.optimum.risk * 100.0)?;
        writeln!(f, "  Sharpe:          {:>7.2}", self.optimum.sharpe)?;
        writeln!(f, "  Utility:         {:>7.4}", self.optimum.utility)?;
        writeln!(f)?;
        writeln!(f, "  Before:  {}", self.current)?;
        writeln!(f, "  Sampled: {} portfolios", self.population.len())?;
        if let Some(frontier) = &self.frontier {
            writeln!(f, "  Frontier: {} portfolios", frontier.len())?;
        }
        Ok(())
    }
}

impl std::fmt::Display for SampleResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAMPLED PORTFOLIOS: {}", self.population.len())?;
        writeln!(f, "  Current: {}", self.current)?;
        if let Some(frontier) = &self.frontier {
            writeln!(f, "EFFICIENT FRONTIER:")?;
            for p in frontier {
                writeln!(f, "  {p}")?;
            }
        }
        Ok(())
    }
}
