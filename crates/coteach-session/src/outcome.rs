//! Answering a query on behalf of the true hypothesis.

use coteach_core::errors::{CoteachError, CoteachResult};
use coteach_inference::LikelihoodTensor;
use coteach_sampling::QuerySampler;

/// Outcome the true hypothesis produces for `query`.
///
/// Deterministic rows (a single outcome with probability 1) answer without
/// touching the RNG; otherwise the outcome is drawn from the row.
pub fn resolve_outcome(
    likelihood: &LikelihoodTensor,
    true_hypothesis: usize,
    query: usize,
    sampler: &mut QuerySampler,
) -> CoteachResult<usize> {
    let row = likelihood.outcome_row(true_hypothesis, query);
    if let Some(outcome) = row.iter().position(|p| *p == 1.0) {
        return Ok(outcome);
    }
    let mass: f64 = row.iter().sum();
    if mass <= 0.0 {
        return Err(CoteachError::invalid_mass(
            format!("outcome row of hypothesis {true_hypothesis}, query {query}"),
            mass,
        ));
    }
    sampler.draw_index(row)
}
