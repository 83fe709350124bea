use std::sync::Arc;

use coteach_core::config::LearnerCoupling;
use coteach_core::errors::CoteachResult;
use coteach_inference::LikelihoodTensor;

use super::{StepContext, SyncedEngine, TeachingStrategy};

/// A teacher who knows the true hypothesis samples from `teacher[h*, ·]`;
/// the learner collapses with the teacher-coupled learner posterior.
#[derive(Debug, Clone)]
pub struct CooperativeTeacher {
    engine: SyncedEngine,
}

impl CooperativeTeacher {
    pub fn new(likelihood: Arc<LikelihoodTensor>, rounds: usize) -> Self {
        Self {
            engine: SyncedEngine::new(likelihood, rounds, LearnerCoupling::Teacher, 0.0),
        }
    }
}

impl TeachingStrategy for CooperativeTeacher {
    fn name(&self) -> &'static str {
        "cooperative_teacher"
    }

    fn query_weights(&mut self, ctx: &StepContext<'_>) -> CoteachResult<Vec<f64>> {
        self.engine
            .sync(ctx, |_| Ok(()))?
            .teaching_distribution(ctx.true_hypothesis)
    }

    fn collapse(
        &mut self,
        ctx: &StepContext<'_>,
        query: usize,
        outcome: usize,
    ) -> CoteachResult<Vec<f64>> {
        self.engine.sync(ctx, |_| Ok(()))?.collapse(query, outcome)
    }
}
