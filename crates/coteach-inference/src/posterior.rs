//! Posterior manipulation over the hypothesis axis.

use coteach_core::errors::{CoteachResult, InferenceError};
use coteach_core::numeric;
use coteach_core::tensor::Matrix;

use crate::likelihood::LikelihoodTensor;

/// Uniform prior over `n` hypotheses.
pub fn uniform(n: usize) -> Vec<f64> {
    vec![1.0 / n as f64; n]
}

/// Bayes rule for one observation: `normalize(prior ⊙ likelihood[:, q, o])`.
///
/// An observation no hypothesis explains yields the zero vector.
pub fn bayes_update(
    prior: &[f64],
    likelihood: &LikelihoodTensor,
    query: usize,
    outcome: usize,
) -> CoteachResult<Vec<f64>> {
    ensure_len(prior, likelihood.dims().hypotheses)?;
    let mut posterior: Vec<f64> = prior
        .iter()
        .zip(likelihood.hypothesis_slice(query, outcome))
        .map(|(p, l)| p * l)
        .collect();
    numeric::normalize_or_zero(&mut posterior);
    Ok(posterior)
}

/// `P(o | D, q) = Σ_h p(h) · P(o | h, q)`.
pub fn outcome_probability(
    prior: &[f64],
    likelihood: &LikelihoodTensor,
    query: usize,
    outcome: usize,
) -> f64 {
    prior
        .iter()
        .enumerate()
        .map(|(h, p)| p * likelihood.get(h, query, outcome))
        .sum()
}

/// Self-teaching marginal `p(q | D) ∝ Σ_h P(q | h) · p(h | D)`.
pub fn self_teaching_marginal(teacher: &Matrix, posterior: &[f64]) -> CoteachResult<Vec<f64>> {
    let mut marginal = teacher.weighted_row_sum(posterior)?;
    numeric::normalize_or_zero(&mut marginal);
    Ok(marginal)
}

/// Rollout teaching distribution `P(q | h*) = Σ_h' T[h*, h'] · P(q | h')`
/// for every assumed truth `h*`, rows renormalised.
pub fn transition_weighted_teaching(transition: &Matrix, teacher: &Matrix) -> CoteachResult<Matrix> {
    let mut teaching = transition.matmul(teacher)?;
    teaching.normalize_rows();
    Ok(teaching)
}

/// The self-teaching marginal repeated on every hypothesis row. As a
/// teacher it scales every hypothesis alike, so the learner update
/// reduces to Bayes' rule.
pub fn broadcast_self_teaching(teacher: &Matrix, posterior: &[f64]) -> CoteachResult<Matrix> {
    let marginal = self_teaching_marginal(teacher, posterior)?;
    Matrix::from_rows(vec![marginal; teacher.rows()])
}

/// Index of the hypothesis holding all of the mass, if any.
pub fn certain_hypothesis(posterior: &[f64]) -> Option<usize> {
    posterior.iter().position(|p| *p == 1.0)
}

fn ensure_len(values: &[f64], expected: usize) -> CoteachResult<()> {
    if values.len() != expected {
        return Err(InferenceError::ShapeMismatch {
            expected: format!("{expected} hypotheses"),
            actual: format!("{} hypotheses", values.len()),
        }
        .into());
    }
    Ok(())
}
