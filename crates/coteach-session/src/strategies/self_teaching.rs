use std::sync::Arc;

use coteach_core::config::LearnerCoupling;
use coteach_core::errors::CoteachResult;
use coteach_inference::LikelihoodTensor;

use super::{StepContext, SyncedEngine, TeachingStrategy};

/// The learner teaches itself: before every draw it runs cooperative
/// inference against its current posterior and samples from the marginal
/// `Σ_h P(q | h) · p(h | D)`.
#[derive(Debug, Clone)]
pub struct SelfTeaching {
    engine: SyncedEngine,
}

impl SelfTeaching {
    pub fn new(likelihood: Arc<LikelihoodTensor>, rounds: usize, coupling: LearnerCoupling) -> Self {
        Self {
            engine: SyncedEngine::new(likelihood, rounds, coupling, 0.0),
        }
    }

    pub fn rounds_run(&self) -> usize {
        self.engine.engine().rounds_run()
    }
}

impl TeachingStrategy for SelfTeaching {
    fn name(&self) -> &'static str {
        "self_teaching"
    }

    fn query_weights(&mut self, ctx: &StepContext<'_>) -> CoteachResult<Vec<f64>> {
        self.engine.sync(ctx, |_| Ok(()))?.self_teaching_distribution()
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

#[cfg(test)]
mod tests {
    use super::*;
    use coteach_core::models::{ConceptSpace, ObservationHistory};

    #[test]
    fn runs_rounds_once_per_step() {
        let space = ConceptSpace::from_label_rows(vec![vec![1, 1], vec![0, 1], vec![0, 0]]).unwrap();
        let lik = Arc::new(LikelihoodTensor::compute(&space).unwrap());
        let mut strategy = SelfTeaching::new(lik.clone(), 10, LearnerCoupling::Literal);
        let history = ObservationHistory::new(2);
        let prior = [1.0 / 3.0; 3];
        let ctx = StepContext {
            likelihood: &lik,
            prior: &prior,
            history: &history,
            true_hypothesis: 0,
        };
        let weights = strategy.query_weights(&ctx).unwrap();
        strategy.collapse(&ctx, 0, 1).unwrap();
        assert_eq!(strategy.rounds_run(), 10);
        assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn literal_collapse_is_bayes() {
        let space = ConceptSpace::from_label_rows(vec![vec![1, 1], vec![0, 1], vec![0, 0]]).unwrap();
        let lik = Arc::new(LikelihoodTensor::compute(&space).unwrap());
        let mut strategy = SelfTeaching::new(lik.clone(), 3, LearnerCoupling::Literal);
        let history = ObservationHistory::new(2);
        let prior = [1.0 / 3.0; 3];
        let ctx = StepContext {
            likelihood: &lik,
            prior: &prior,
            history: &history,
            true_hypothesis: 0,
        };
        let post = strategy.collapse(&ctx, 0, 0).unwrap();
        assert_eq!(post[0], 0.0);
        assert!((post[1] - 0.5).abs() < 1e-12 && (post[2] - 0.5).abs() < 1e-12);
    }
}
