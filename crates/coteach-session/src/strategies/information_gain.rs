use coteach_core::errors::CoteachResult;
use coteach_inference::{information, posterior};

use super::{StepContext, TeachingStrategy};

/// Pure active learning: weight each unobserved query by its expected
/// information gain and update with Bayes' rule.
#[derive(Debug, Clone, Default)]
pub struct InformationGain;

impl InformationGain {
    pub fn new() -> Self {
        Self
    }
}

impl TeachingStrategy for InformationGain {
    fn name(&self) -> &'static str {
        "information_gain"
    }

    fn query_weights(&mut self, ctx: &StepContext<'_>) -> CoteachResult<Vec<f64>> {
        let gains = information::expected_information_gains(ctx.prior, ctx.likelihood, ctx.history)?;
        if gains.iter().any(|g| *g > 0.0) {
            return Ok(gains);
        }
        // No query can discriminate the remaining hypotheses: every
        // unobserved query is equally good.
        Ok((0..gains.len())
            .map(|q| if ctx.history.is_observed(q) { 0.0 } else { 1.0 })
            .collect())
    }

    fn collapse(
        &mut self,
        ctx: &StepContext<'_>,
        query: usize,
        outcome: usize,
    ) -> CoteachResult<Vec<f64>> {
        posterior::bayes_update(ctx.prior, ctx.likelihood, query, outcome)
    }
}
