//! `run_session`: hypothesis space + config in, report out.

use std::sync::Arc;

use coteach_core::config::CoteachConfig;
use coteach_core::errors::CoteachResult;
use coteach_core::models::SessionReport;
use coteach_core::traits::IHypothesisSpace;
use coteach_inference::LikelihoodTensor;
use coteach_sampling::QuerySampler;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::session::TeachingSession;
use crate::strategies::build_strategy;

/// Run one session to termination.
///
/// Nothing runs until this is called: the likelihood tensor is computed
/// here, once, and shared read-only with the strategy.
pub fn run_session(space: &dyn IHypothesisSpace, config: &CoteachConfig) -> CoteachResult<SessionReport> {
    config.validate()?;
    let likelihood = Arc::new(LikelihoodTensor::compute(space)?);
    let report = build_session(likelihood, config)?.run()?;
    info!(
        strategy = %report.strategy,
        true_hypothesis = report.true_hypothesis,
        state = %report.final_state,
        n_observations = report.n_observations,
        "session finished"
    );
    Ok(report)
}

/// Build a session without running it, e.g. to step or replay manually.
///
/// The configured seed drives the truth draw, the sampler and the rollout
/// sub-learners; without one a seed is drawn from entropy.
pub fn build_session(
    likelihood: Arc<LikelihoodTensor>,
    config: &CoteachConfig,
) -> CoteachResult<TeachingSession> {
    let seed = config
        .session
        .seed
        .unwrap_or_else(|| StdRng::from_entropy().gen());
    let mut rng = StdRng::seed_from_u64(seed);
    let true_hypothesis = match config.session.true_hypothesis {
        Some(h) => h,
        None => rng.gen_range(0..likelihood.dims().hypotheses),
    };
    let strategy = build_strategy(likelihood.clone(), config, seed);
    let sampler = QuerySampler::new(config.sampling.mode, rng)
        .with_tie_tolerance(config.sampling.tie_tolerance);
    TeachingSession::new(
        likelihood,
        strategy,
        sampler,
        true_hypothesis,
        config.session.step_budget,
    )
}
