//! Query-selection strategies.
//!
//! A strategy owns whatever inference state it needs and exposes two hooks:
//! weights over queries for the next draw, and the posterior after an
//! observation. The session owns the prior, the history, and the sampler.

mod cooperative_teacher;
mod information_gain;
mod rollout;
mod self_teaching;

pub use cooperative_teacher::CooperativeTeacher;
pub use information_gain::InformationGain;
pub use rollout::{derive_seed, RolloutTeacher};
pub use self_teaching::SelfTeaching;

use std::sync::Arc;

use coteach_core::config::{CoteachConfig, LearnerCoupling, StrategyKind};
use coteach_core::errors::CoteachResult;
use coteach_core::models::ObservationHistory;
use coteach_inference::{CooperativeInference, LikelihoodTensor};

/// Read-only view of the session handed to a strategy.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub likelihood: &'a LikelihoodTensor,
    /// Posterior after the observations so far; the prior for this step.
    pub prior: &'a [f64],
    pub history: &'a ObservationHistory,
    pub true_hypothesis: usize,
}

pub trait TeachingStrategy: Send {
    /// Stable name used in reports and spans.
    fn name(&self) -> &'static str;

    /// Unnormalised, non-negative weights over every query. The sampler
    /// masks observed queries.
    fn query_weights(&mut self, ctx: &StepContext<'_>) -> CoteachResult<Vec<f64>>;

    /// Posterior over hypotheses after observing `(query, outcome)`.
    fn collapse(
        &mut self,
        ctx: &StepContext<'_>,
        query: usize,
        outcome: usize,
    ) -> CoteachResult<Vec<f64>>;
}

/// Build the strategy named by `config.session.strategy`.
///
/// `seed` feeds the rollout sub-learners; other strategies ignore it.
pub fn build_strategy(
    likelihood: Arc<LikelihoodTensor>,
    config: &CoteachConfig,
    seed: u64,
) -> Box<dyn TeachingStrategy> {
    let inference = &config.inference;
    match config.session.strategy {
        StrategyKind::InformationGain => Box::new(InformationGain::new()),
        StrategyKind::SelfTeaching => Box::new(SelfTeaching::new(
            likelihood,
            inference.self_teaching_rounds,
            inference.self_teaching_coupling,
        )),
        StrategyKind::CooperativeTeacher => Box::new(CooperativeTeacher::new(
            likelihood,
            inference.cooperative_rounds,
        )),
        StrategyKind::Rollout => Box::new(RolloutTeacher::new(
            likelihood,
            inference.self_teaching_rounds,
            inference.teaching_floor,
            config.rollout.clone(),
            seed,
        )),
    }
}

/// Engine bookkeeping shared by the strategies that run cooperative
/// inference: the engine is rerun whenever the history has grown since the
/// last run, so weights and collapse always read the same engine state.
#[derive(Debug, Clone)]
pub(crate) struct SyncedEngine {
    engine: CooperativeInference,
    rounds: usize,
    synced_at: Option<usize>,
}

impl SyncedEngine {
    pub(crate) fn new(
        likelihood: Arc<LikelihoodTensor>,
        rounds: usize,
        coupling: LearnerCoupling,
        teaching_floor: f64,
    ) -> Self {
        Self {
            engine: CooperativeInference::new(likelihood)
                .with_coupling(coupling)
                .with_teaching_floor(teaching_floor),
            rounds,
            synced_at: None,
        }
    }

    /// Reset the prior and run the configured rounds, once per history length.
    /// `after_round` runs after every round, e.g. to reshape the teacher.
    pub(crate) fn sync(
        &mut self,
        ctx: &StepContext<'_>,
        mut after_round: impl FnMut(&mut CooperativeInference) -> CoteachResult<()>,
    ) -> CoteachResult<&CooperativeInference> {
        if self.synced_at != Some(ctx.history.len()) {
            let _span = coteach_observability::inference_span!(self.rounds).entered();
            self.engine.set_prior(ctx.prior)?;
            for _ in 0..self.rounds {
                self.engine.run(1)?;
                after_round(&mut self.engine)?;
            }
            self.synced_at = Some(ctx.history.len());
        }
        Ok(&self.engine)
    }

    pub(crate) fn engine(&self) -> &CooperativeInference {
        &self.engine
    }

    pub(crate) fn engine_mut(&mut self) -> &mut CooperativeInference {
        &mut self.engine
    }
}
