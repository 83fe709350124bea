//! Cooperative inference: the coupled learner/teacher recurrence.
//!
//! ```text
//! learner[h, q, o] ∝_h  teacher[h, q] · P(o | h, q) · prior[h]
//! teacher[h, q]    ∝_q  Σ_o learner[h, q, o] · 1 / (n_queries · n_outcomes)
//! ```
//!
//! Each round runs the learner update against the previous teacher, then the
//! teacher update against the fresh learner. Both write into new tensors.

use std::sync::Arc;

use coteach_core::config::LearnerCoupling;
use coteach_core::errors::{CoteachResult, InferenceError};
use coteach_core::numeric;
use coteach_core::tensor::{Dims3, Matrix, Tensor3};
use tracing::debug;

use crate::likelihood::LikelihoodTensor;
use crate::posterior;

/// State of the learner/teacher recurrence for one hypothesis space.
#[derive(Debug, Clone)]
pub struct CooperativeInference {
    likelihood: Arc<LikelihoodTensor>,
    /// Prior over hypotheses, fixed for the duration of a run.
    prior: Vec<f64>,
    coupling: LearnerCoupling,
    /// Replaces exactly-zero teacher mass in the learner update. 0 disables it.
    teaching_floor: f64,
    learner: Tensor3,
    teacher: Matrix,
    rounds_run: usize,
}

impl CooperativeInference {
    /// Start from a uniform prior and a uniform teacher.
    pub fn new(likelihood: Arc<LikelihoodTensor>) -> Self {
        let Dims3 {
            hypotheses,
            queries,
            outcomes,
        } = likelihood.dims();
        let prior = posterior::uniform(hypotheses);
        let learner = Tensor3::broadcast_hypotheses(&prior, queries, outcomes);
        let teacher = Matrix::filled(hypotheses, queries, 1.0 / queries as f64);
        Self {
            likelihood,
            prior,
            coupling: LearnerCoupling::Teacher,
            teaching_floor: 0.0,
            learner,
            teacher,
            rounds_run: 0,
        }
    }

    pub fn with_coupling(mut self, coupling: LearnerCoupling) -> Self {
        self.coupling = coupling;
        self
    }

    pub fn with_teaching_floor(mut self, floor: f64) -> Self {
        self.teaching_floor = floor;
        self
    }

    /// Replace the prior over hypotheses, e.g. with the collapsed posterior
    /// after an observation. The learner tensor is reset to the new prior;
    /// the teacher keeps its last value.
    pub fn set_prior(&mut self, prior: &[f64]) -> CoteachResult<()> {
        let Dims3 {
            hypotheses,
            queries,
            outcomes,
        } = self.likelihood.dims();
        if prior.len() != hypotheses {
            return Err(InferenceError::ShapeMismatch {
                expected: format!("{hypotheses} hypotheses"),
                actual: format!("{} hypotheses", prior.len()),
            }
            .into());
        }
        self.prior = prior.to_vec();
        self.learner = Tensor3::broadcast_hypotheses(&self.prior, queries, outcomes);
        Ok(())
    }

    /// Overwrite the teacher posterior. Rows must match the hypothesis space.
    pub fn set_teacher_posterior(&mut self, teacher: Matrix) -> CoteachResult<()> {
        let dims = self.likelihood.dims();
        if teacher.rows() != dims.hypotheses || teacher.cols() != dims.queries {
            return Err(InferenceError::ShapeMismatch {
                expected: format!("{}x{}", dims.hypotheses, dims.queries),
                actual: format!("{}x{}", teacher.rows(), teacher.cols()),
            }
            .into());
        }
        self.teacher = teacher;
        Ok(())
    }

    /// `learner ← normalize_h(teacher ⊙ likelihood ⊙ prior)`.
    pub fn learner_update(&mut self) -> CoteachResult<()> {
        let dims = self.likelihood.dims();
        // Prior broadcast along (query, outcome).
        let prior = Tensor3::broadcast_hypotheses(&self.prior, dims.queries, dims.outcomes);
        let mut learner = self.likelihood.tensor().hadamard(&prior)?;
        if self.coupling == LearnerCoupling::Teacher {
            let floor = self.teaching_floor;
            // Teacher broadcast along the outcome axis.
            let mut teacher = Tensor3::broadcast_outcomes(&self.teacher, dims.outcomes);
            if floor > 0.0 {
                teacher.map_in_place(|v| if v == 0.0 { floor } else { v });
            }
            learner = learner.hadamard(&teacher)?;
        }
        learner.normalize_over_hypotheses();
        self.learner = learner;
        Ok(())
    }

    /// `teacher[h, q] = P(q | h)` from the learner under a uniform prior over
    /// `(query, outcome)` pairs.
    pub fn teacher_update(&mut self) {
        let dims = self.likelihood.dims();
        let mut joint = self.learner.clone();
        joint.scale(1.0 / (dims.queries * dims.outcomes) as f64);
        let mut teacher = joint.sum_over_outcomes();
        teacher.normalize_rows();
        self.teacher = teacher;
    }

    /// Run `rounds` learner-then-teacher rounds.
    pub fn run(&mut self, rounds: usize) -> CoteachResult<()> {
        for _ in 0..rounds {
            self.learner_update()?;
            self.teacher_update();
            self.rounds_run += 1;
        }
        debug!(rounds, total = self.rounds_run, "cooperative inference rounds complete");
        Ok(())
    }

    pub fn learner_posterior(&self) -> &Tensor3 {
        &self.learner
    }

    pub fn teacher_posterior(&self) -> &Matrix {
        &self.teacher
    }

    pub fn prior(&self) -> &[f64] {
        &self.prior
    }

    pub fn likelihood(&self) -> &Arc<LikelihoodTensor> {
        &self.likelihood
    }

    pub fn rounds_run(&self) -> usize {
        self.rounds_run
    }

    /// Learner posterior over hypotheses after observing `(query, outcome)`.
    pub fn collapse(&self, query: usize, outcome: usize) -> CoteachResult<Vec<f64>> {
        let dims = self.likelihood.dims();
        if query >= dims.queries {
            return Err(InferenceError::IndexOutOfRange {
                axis: "query",
                index: query,
                len: dims.queries,
            }
            .into());
        }
        if outcome >= dims.outcomes {
            return Err(InferenceError::IndexOutOfRange {
                axis: "outcome",
                index: outcome,
                len: dims.outcomes,
            }
            .into());
        }
        Ok(self.learner.hypothesis_slice(query, outcome))
    }

    /// Self-teaching distribution over queries weighted by the current prior.
    pub fn self_teaching_distribution(&self) -> CoteachResult<Vec<f64>> {
        posterior::self_teaching_marginal(&self.teacher, &self.prior)
    }

    /// Teacher's distribution over queries for a known truth.
    pub fn teaching_distribution(&self, hypothesis: usize) -> CoteachResult<Vec<f64>> {
        if hypothesis >= self.teacher.rows() {
            return Err(InferenceError::IndexOutOfRange {
                axis: "hypothesis",
                index: hypothesis,
                len: self.teacher.rows(),
            }
            .into());
        }
        let mut row = self.teacher.row(hypothesis).to_vec();
        numeric::normalize_or_zero(&mut row);
        Ok(row)
    }
}
