use serde::{Deserialize, Serialize};

use super::{Observation, SessionState};

/// A wrong hypothesis reached probability 1 during a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceAnomaly {
    pub step: usize,
    pub true_hypothesis: usize,
    pub converged_to: usize,
}

/// What a finished session hands to reporting collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub strategy: String,
    pub true_hypothesis: usize,
    pub final_state: SessionState,
    pub n_observations: usize,
    /// Posterior mass on the true hypothesis: prior first, then one entry per step.
    pub trajectory: Vec<f64>,
    /// Masked, normalised query weights of the first draw.
    pub first_query_distribution: Vec<f64>,
    pub observations: Vec<Observation>,
    pub final_posterior: Vec<f64>,
    pub anomalies: Vec<ConvergenceAnomaly>,
}

impl SessionReport {
    pub fn converged(&self) -> bool {
        self.final_state == SessionState::Converged
    }

    /// Trajectory extended to `len` entries so sessions of different lengths
    /// can be averaged. Converged sessions pad with 1.0, others with their
    /// last value. Longer trajectories are returned unchanged.
    pub fn padded_trajectory(&self, len: usize) -> Vec<f64> {
        let mut out = self.trajectory.clone();
        let fill = if self.converged() {
            1.0
        } else {
            out.last().copied().unwrap_or(0.0)
        };
        if out.len() < len {
            out.resize(len, fill);
        }
        out
    }
}
