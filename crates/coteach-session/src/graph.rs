//! Cooperative teaching over pairs of simultaneous interventions.

use std::sync::Arc;

use coteach_core::config::LearnerCoupling;
use coteach_core::errors::{CoteachResult, InferenceError};
use coteach_core::tensor::Matrix;
use coteach_core::traits::IHypothesisSpace;
use coteach_inference::likelihood::pair_index;
use coteach_inference::{CooperativeInference, LikelihoodTensor};

/// Probability of an unordered intervention pair `{first, second}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnorderedPair {
    pub first: usize,
    pub second: usize,
    pub probability: f64,
}

/// Teacher over action pairs `(a, b)` of a single-action space.
#[derive(Debug, Clone)]
pub struct GraphTeacher {
    n_actions: usize,
    engine: CooperativeInference,
}

impl GraphTeacher {
    pub fn new(space: &dyn IHypothesisSpace) -> CoteachResult<Self> {
        let likelihood = Arc::new(LikelihoodTensor::compute_paired(space)?);
        Ok(Self {
            n_actions: space.n_queries(),
            engine: CooperativeInference::new(likelihood).with_coupling(LearnerCoupling::Teacher),
        })
    }

    pub fn n_actions(&self) -> usize {
        self.n_actions
    }

    pub fn likelihood(&self) -> &Arc<LikelihoodTensor> {
        self.engine.likelihood()
    }

    pub fn run_cooperative_inference(&mut self, rounds: usize) -> CoteachResult<()> {
        self.engine.run(rounds)
    }

    /// `P((a, b) | h)`, one row per hypothesis, `n_actions²` columns.
    pub fn teacher_posterior(&self) -> &Matrix {
        self.engine.teacher_posterior()
    }

    pub fn engine(&self) -> &CooperativeInference {
        &self.engine
    }

    /// Fold `(a, b)` and `(b, a)` together: for three actions this yields the
    /// pairs `11, 12, 13, 22, 23, 33` (zero-based here), in that order.
    pub fn unordered_pair_posterior(&self, hypothesis: usize) -> CoteachResult<Vec<UnorderedPair>> {
        let teacher = self.engine.teacher_posterior();
        if hypothesis >= teacher.rows() {
            return Err(InferenceError::IndexOutOfRange {
                axis: "hypothesis",
                index: hypothesis,
                len: teacher.rows(),
            }
            .into());
        }
        let row = teacher.row(hypothesis);
        let n = self.n_actions;
        let mut pairs = Vec::with_capacity(n * (n + 1) / 2);
        for first in 0..n {
            for second in first..n {
                let mut probability = row[pair_index(first, second, n)];
                if first != second {
                    probability += row[pair_index(second, first, n)];
                }
                pairs.push(UnorderedPair {
                    first,
                    second,
                    probability,
                });
            }
        }
        Ok(pairs)
    }
}
