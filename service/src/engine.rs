//! Request handling.
//!
//! Every request is served from its own registry snapshot and session;
//! nothing is shared between requests.

use log::{debug, info};
use opto::{Session, SessionConfig};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::request::OptimizeRequest;
use crate::response::{OptimizeResponse, Optimum, SampleResponse};

/// Build a session for `request`, with its edits applied.
fn open_session(config: &Config, request: &OptimizeRequest) -> Result<Session> {
    let population_size = request
        .population_size
        .unwrap_or(config.engine.population_size);
    if population_size > config.engine.max_population_size {
        return Err(Error::Request(format!(
            "population_size {population_size} exceeds limit {}",
            config.engine.max_population_size
        )));
    }

    let session_config = SessionConfig {
        population_size,
        risk_free_rate: config.engine.risk_free_rate,
        risk_aversion: request.risk_aversion,
        parse_policy: config.input.parse_policy,
        seed: config.engine.seed,
    };
    let mut session = Session::new(request.registry()?, session_config)?;

    for edit in &request.edits {
        debug!(
            "edit asset {} {} <- {:?}",
            edit.index, edit.field, edit.value
        );
        session.update_field(edit.index, edit.field, &edit.value)?;
    }
    Ok(session)
}

/// Sample, optimize, and report.
pub fn handle(config: &Config, request: &OptimizeRequest) -> Result<OptimizeResponse> {
    let mut session = open_session(config, request)?;
    let current = session.current_point();

    let (population, frontier) = {
        let pop = session.population()?;
        let frontier = config
            .output
            .frontier
            .then(|| opto::efficient_frontier(pop.candidates()))
            .map(|f| f.into_iter().map(|c| c.point()).collect());
        (pop.scatter(), frontier)
    };

    let optimization = session.optimize()?;
    info!(
        "optimized {} assets over {} portfolios at A={}: return {:.4}, risk {:.4}",
        session.registry().len(),
        population.len(),
        optimization.risk_aversion,
        optimization.expected_return,
        optimization.risk
    );

    Ok(OptimizeResponse {
        optimum: Optimum::from(&optimization),
        optimized_weights: optimization.weights,
        population,
        current,
        names: session
            .registry()
            .assets()
            .iter()
            .map(|a| a.name.clone())
            .collect(),
        frontier,
    })
}

/// Sample only; the request's weights are left as given.
pub fn sample(config: &Config, request: &OptimizeRequest) -> Result<SampleResponse> {
    let mut session = open_session(config, request)?;
    let current = session.current_point();
    let pop = session.population()?;
    info!("sampled {} portfolios", pop.len());

    let frontier = config
        .output
        .frontier
        .then(|| opto::efficient_frontier(pop.candidates()))
        .map(|f| f.into_iter().map(|c| c.point()).collect());

    Ok(SampleResponse {
        population: pop.scatter(),
        current,
        frontier,
    })
}
