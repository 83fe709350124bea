//! `P(outcome | hypothesis, query)` for every cell of a hypothesis space.

use coteach_core::errors::{CoteachError, CoteachResult};
use coteach_core::models::Evaluation;
use coteach_core::tensor::{Dims3, Tensor3};
use coteach_core::traits::IHypothesisSpace;

/// Read-only likelihood tensor indexed `(hypothesis, query, outcome)`.
#[derive(Debug, Clone)]
pub struct LikelihoodTensor {
    tensor: Tensor3,
}

impl LikelihoodTensor {
    /// One query per query of the space.
    ///
    /// Deterministic hypotheses give indicator entries; probabilistic ones
    /// contribute their outcome probabilities unchanged.
    pub fn compute(space: &dyn IHypothesisSpace) -> CoteachResult<Self> {
        let dims = space_dims(space)?;
        let mut tensor = Tensor3::zeros(dims);
        for h in 0..dims.hypotheses {
            for q in 0..dims.queries {
                let evaluation = checked_evaluation(space, h, q, dims.outcomes)?;
                for o in 0..dims.outcomes {
                    tensor.set(h, q, o, evaluation.probability(o));
                }
            }
        }
        Self::from_tensor(tensor)
    }

    /// Paired-intervention variant: every ordered pair `(a, b)` of the
    /// space's queries becomes one query, with
    /// `P(o | h, (a, b)) = P(o | h, a) · P(o | h, b)`.
    ///
    /// The two interventions are simultaneous and independent. Pair `(a, b)`
    /// lives at index [`pair_index`]`(a, b, n_actions)`.
    pub fn compute_paired(space: &dyn IHypothesisSpace) -> CoteachResult<Self> {
        let single = Self::compute(space)?;
        let Dims3 {
            hypotheses,
            queries: n_actions,
            outcomes,
        } = single.dims();
        let dims = Dims3::new(hypotheses, n_actions * n_actions, outcomes);
        let tensor = Tensor3::from_fn(dims, |h, pair, o| {
            let (a, b) = pair_actions(pair, n_actions);
            single.get(h, a, o) * single.get(h, b, o)
        });
        Self::from_tensor(tensor)
    }

    /// Wrap an existing tensor. Every entry must be a probability.
    pub fn from_tensor(tensor: Tensor3) -> CoteachResult<Self> {
        if tensor.dims().is_empty() {
            return Err(CoteachError::malformed(format!(
                "likelihood tensor has empty shape {}",
                tensor.dims()
            )));
        }
        if let Some(bad) = tensor
            .as_slice()
            .iter()
            .find(|v| !(v.is_finite() && (0.0..=1.0).contains(*v)))
        {
            return Err(CoteachError::malformed(format!(
                "likelihood entry {bad} is not a probability"
            )));
        }
        Ok(Self { tensor })
    }

    pub fn dims(&self) -> Dims3 {
        self.tensor.dims()
    }

    pub fn tensor(&self) -> &Tensor3 {
        &self.tensor
    }

    pub fn get(&self, h: usize, q: usize, o: usize) -> f64 {
        self.tensor.get(h, q, o)
    }

    /// Outcome probabilities of one hypothesis at one query.
    pub fn outcome_row(&self, h: usize, q: usize) -> &[f64] {
        self.tensor.outcome_row(h, q)
    }

    /// Likelihood of one `(query, outcome)` across hypotheses.
    pub fn hypothesis_slice(&self, q: usize, o: usize) -> Vec<f64> {
        self.tensor.hypothesis_slice(q, o)
    }
}

/// Index of the ordered action pair `(a, b)`.
pub fn pair_index(a: usize, b: usize, n_actions: usize) -> usize {
    a * n_actions + b
}

/// Inverse of [`pair_index`].
pub fn pair_actions(index: usize, n_actions: usize) -> (usize, usize) {
    (index / n_actions, index % n_actions)
}

fn space_dims(space: &dyn IHypothesisSpace) -> CoteachResult<Dims3> {
    let dims = Dims3::new(space.n_hypotheses(), space.n_queries(), space.n_outcomes());
    if dims.hypotheses == 0 {
        return Err(CoteachError::malformed("no hypotheses"));
    }
    if dims.queries == 0 {
        return Err(CoteachError::malformed("query set is empty"));
    }
    if dims.outcomes == 0 {
        return Err(CoteachError::malformed("outcome set is empty"));
    }
    Ok(dims)
}

fn checked_evaluation(
    space: &dyn IHypothesisSpace,
    h: usize,
    q: usize,
    n_outcomes: usize,
) -> CoteachResult<Evaluation> {
    let evaluation = space.evaluate(h, q);
    match &evaluation {
        Evaluation::Label(label) if *label >= n_outcomes => Err(CoteachError::malformed(format!(
            "hypothesis {} labels query {q} with {label}, only {n_outcomes} outcomes exist",
            space.label(h)
        ))),
        Evaluation::Distribution(probs) if probs.len() != n_outcomes => {
            Err(CoteachError::malformed(format!(
                "hypothesis {} gives {} outcome probabilities at query {q}, expected {n_outcomes}",
                space.label(h),
                probs.len()
            )))
        }
        _ => Ok(evaluation),
    }
}
