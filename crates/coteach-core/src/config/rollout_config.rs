use serde::{Deserialize, Serialize};

use super::defaults;
use super::SamplingMode;

/// Rollout teaching configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RolloutConfig {
    /// Observations each sub-learner makes, and the number of host steps
    /// that use the rollout prior.
    pub n_steps: usize,
    /// Run the per-hypothesis sub-learners on the rayon pool.
    pub parallel: bool,
    /// Sampling mode of the active-learning sub-learners.
    pub sub_learner_sampling: SamplingMode,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            n_steps: defaults::DEFAULT_ROLLOUT_STEPS,
            parallel: defaults::DEFAULT_ROLLOUT_PARALLEL,
            sub_learner_sampling: SamplingMode::Proportional,
        }
    }
}
