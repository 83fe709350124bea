//! Shannon entropy and expected information gain over hypotheses.

use coteach_core::errors::CoteachResult;
use coteach_core::models::ObservationHistory;

use crate::likelihood::LikelihoodTensor;
use crate::posterior;

/// Gains below this are numerical noise from renormalising an unchanged support.
const GAIN_EPSILON: f64 = 1e-12;

/// Entropy in nats over the support of `p`; zero-probability entries are skipped.
pub fn entropy(p: &[f64]) -> f64 {
    p.iter()
        .filter(|x| **x > 0.0)
        .fold(0.0, |acc, x| acc - x * x.ln())
}

/// `H(prior) − H(prior | q, o)` for one outcome.
pub fn information_gain(
    prior: &[f64],
    likelihood: &LikelihoodTensor,
    query: usize,
    outcome: usize,
) -> CoteachResult<f64> {
    let updated = posterior::bayes_update(prior, likelihood, query, outcome)?;
    Ok(entropy(prior) - entropy(&updated))
}

/// Expected reduction in entropy from asking `query`, with each outcome
/// weighted by its current predictive probability.
pub fn expected_information_gain(
    prior: &[f64],
    likelihood: &LikelihoodTensor,
    query: usize,
) -> CoteachResult<f64> {
    let mut gain = 0.0;
    for o in 0..likelihood.dims().outcomes {
        let weight = posterior::outcome_probability(prior, likelihood, query, o);
        if weight > 0.0 {
            gain += weight * information_gain(prior, likelihood, query, o)?;
        }
    }
    Ok(if gain < GAIN_EPSILON { 0.0 } else { gain })
}

/// Expected information gain of every query; observed queries get 0.
pub fn expected_information_gains(
    prior: &[f64],
    likelihood: &LikelihoodTensor,
    history: &ObservationHistory,
) -> CoteachResult<Vec<f64>> {
    (0..likelihood.dims().queries)
        .map(|q| {
            if history.is_observed(q) {
                Ok(0.0)
            } else {
                expected_information_gain(prior, likelihood, q)
            }
        })
        .collect()
}
