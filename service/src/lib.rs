//! opto-service: JSON front end for the opto portfolio optimizer.
//!
//! Reads a request (assets, risk aversion, optional field edits) from a JSON
//! file, samples a population over a snapshot of those assets, selects the
//! utility-maximizing allocation, and reports the optimized weights together
//! with the scatter data of the sampled population.

pub mod config;
pub mod engine;
pub mod error;
pub mod request;
pub mod response;
