//! Self-teaching seeded by an active-learning rollout.
//!
//! Before the first draw, one active learner per hypothesis `h*` runs for
//! `n_steps` observations with `h*` as its truth. Their final posteriors
//! form the transition matrix `T[h*, h'] = P(h' | h*)`. While the host has
//! made fewer than `n_steps` observations, the teacher posterior is
//! replaced by `T · P(q | h')` after every round and queries are drawn from
//! `Σ_h T[h_true, h] · teaching[h, q]`. Afterwards every hypothesis row of
//! the teacher is the self-teaching marginal, so queries are drawn from that
//! marginal and the learner update is plain Bayes.
//!
//! Sub-learners that converge to the wrong hypothesis are counted and
//! logged but do not stop the rollout; their rows still enter `T`. This can
//! steer the host towards the wrong hypothesis early on.

use std::sync::Arc;

use coteach_core::config::{LearnerCoupling, RolloutConfig};
use coteach_core::errors::CoteachResult;
use coteach_core::models::SessionReport;
use coteach_core::tensor::Matrix;
use coteach_inference::{posterior, CooperativeInference, LikelihoodTensor};
use coteach_observability::rollout_span;
use coteach_observability::tracing_setup::events;
use coteach_sampling::QuerySampler;
use rayon::prelude::*;

use super::{InformationGain, StepContext, SyncedEngine, TeachingStrategy};
use crate::session::TeachingSession;

/// Seed of the sub-learner whose truth is `hypothesis`.
pub fn derive_seed(seed: u64, hypothesis: usize) -> u64 {
    seed ^ (hypothesis as u64)
        .wrapping_add(1)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

#[derive(Debug, Clone)]
pub struct RolloutTeacher {
    likelihood: Arc<LikelihoodTensor>,
    engine: SyncedEngine,
    config: RolloutConfig,
    seed: u64,
    transition: Option<Matrix>,
    wrong_convergences: usize,
}

impl RolloutTeacher {
    pub fn new(
        likelihood: Arc<LikelihoodTensor>,
        rounds: usize,
        teaching_floor: f64,
        config: RolloutConfig,
        seed: u64,
    ) -> Self {
        Self {
            engine: SyncedEngine::new(
                likelihood.clone(),
                rounds,
                LearnerCoupling::Teacher,
                teaching_floor,
            ),
            likelihood,
            config,
            seed,
            transition: None,
            wrong_convergences: 0,
        }
    }

    /// `T[h*, h']`, once the rollout has run.
    pub fn transition(&self) -> Option<&Matrix> {
        self.transition.as_ref()
    }

    /// Sub-learners that ended certain of a hypothesis other than their truth.
    pub fn wrong_convergences(&self) -> usize {
        self.wrong_convergences
    }

    /// Run the sub-learners and build `T`. No-op after the first call.
    pub fn build_transition(&mut self) -> CoteachResult<&Matrix> {
        let transition = match self.transition.take() {
            Some(t) => t,
            None => {
                let (t, wrong) = self.rollout()?;
                self.wrong_convergences = wrong;
                t
            }
        };
        Ok(self.transition.insert(transition))
    }

    fn rollout(&self) -> CoteachResult<(Matrix, usize)> {
        let n_hypotheses = self.likelihood.dims().hypotheses;
        let n_steps = self.config.n_steps;
        let _span = rollout_span!(n_hypotheses, n_steps).entered();

        let likelihood = &self.likelihood;
        let mode = self.config.sub_learner_sampling;
        let seed = self.seed;
        let run = |h: usize| -> CoteachResult<SessionReport> {
            let sampler = QuerySampler::with_seed(mode, derive_seed(seed, h));
            TeachingSession::new(
                likelihood.clone(),
                Box::new(InformationGain::new()),
                sampler,
                h,
                Some(n_steps),
            )?
            .run()
        };
        // Both paths collect in hypothesis order.
        let reports: Vec<SessionReport> = if self.config.parallel {
            (0..n_hypotheses)
                .into_par_iter()
                .map(run)
                .collect::<CoteachResult<_>>()?
        } else {
            (0..n_hypotheses).map(run).collect::<CoteachResult<_>>()?
        };

        let wrong = reports.iter().filter(|r| !r.anomalies.is_empty()).count();
        events::rollout_completed(n_hypotheses, n_steps, wrong);
        let rows = reports.into_iter().map(|r| r.final_posterior).collect();
        Ok((Matrix::from_rows(rows)?, wrong))
    }

    fn sync(&mut self, ctx: &StepContext<'_>) -> CoteachResult<bool> {
        let rollout_phase = ctx.history.len() < self.config.n_steps;
        if rollout_phase {
            self.build_transition()?;
        } else {
            // The teacher left over from the rollout phase is per-hypothesis;
            // share it before the first learner update of this step.
            share_teacher(self.engine.engine_mut(), ctx.prior)?;
        }
        let transition = if rollout_phase {
            self.transition.as_ref()
        } else {
            None
        };
        self.engine.sync(ctx, |engine| match transition {
            Some(t) => {
                let teaching = posterior::transition_weighted_teaching(t, engine.teacher_posterior())?;
                engine.set_teacher_posterior(teaching)
            }
            None => share_teacher(engine, ctx.prior),
        })?;
        Ok(rollout_phase)
    }
}

fn share_teacher(engine: &mut CooperativeInference, prior: &[f64]) -> CoteachResult<()> {
    let shared = posterior::broadcast_self_teaching(engine.teacher_posterior(), prior)?;
    engine.set_teacher_posterior(shared)
}

impl TeachingStrategy for RolloutTeacher {
    fn name(&self) -> &'static str {
        "rollout"
    }

    fn query_weights(&mut self, ctx: &StepContext<'_>) -> CoteachResult<Vec<f64>> {
        let rollout_phase = self.sync(ctx)?;
        let engine = self.engine.engine();
        match (&self.transition, rollout_phase) {
            (Some(t), true) => posterior::self_teaching_marginal(
                engine.teacher_posterior(),
                t.row(ctx.true_hypothesis),
            ),
            _ => engine.self_teaching_distribution(),
        }
    }

    fn collapse(
        &mut self,
        ctx: &StepContext<'_>,
        query: usize,
        outcome: usize,
    ) -> CoteachResult<Vec<f64>> {
        self.sync(ctx)?;
        self.engine.engine().collapse(query, outcome)
    }
}
