//! Error types for sampling, optimization, and registry edits.

use crate::asset::AssetField;

/// Errors returned by the portfolio engine.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// The asset registry has no assets to sample or optimize over.
    #[error("asset registry is empty")]
    EmptyRegistry,

    /// A population was requested with size zero, or an empty population was optimized.
    #[error("population is empty")]
    EmptyPopulation,

    /// An edit addressed an asset that does not exist.
    #[error("asset index {index} out of range (registry has {len} assets)")]
    AssetIndex { index: usize, len: usize },

    /// Weights are set only by applying an optimization result.
    #[error("weight is read-only; it is set by the optimizer")]
    WeightNotEditable,

    /// A field name that is not one of `name`, `return`, `risk`.
    #[error("unknown asset field '{0}'")]
    UnknownField(String),

    /// A numeric edit failed to parse under the strict policy.
    #[error("invalid value for {field}: {value:?}")]
    Validation { field: AssetField, value: String },

    /// A weight vector does not line up with the registry.
    #[error("weight vector has {got} entries, registry has {expected} assets")]
    WeightLength { expected: usize, got: usize },

    /// A configuration value is out of range.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
