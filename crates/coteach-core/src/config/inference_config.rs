use serde::{Deserialize, Serialize};

use super::defaults;

/// How the learner update treats the teacher posterior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearnerCoupling {
    /// `teacher ⊙ likelihood ⊙ prior`: the learner assumes data was chosen by a teacher.
    Teacher,
    /// `likelihood ⊙ prior`: the learner ignores how data was chosen.
    #[default]
    Literal,
}

/// Cooperative inference configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Learner/teacher rounds for the fixed-round teacher.
    pub cooperative_rounds: usize,
    /// Rounds run before every self-teaching draw.
    pub self_teaching_rounds: usize,
    /// Learner coupling used by self-teaching sessions.
    pub self_teaching_coupling: LearnerCoupling,
    /// Stand-in for zero teaching mass in rollout learner updates.
    pub teaching_floor: f64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            cooperative_rounds: defaults::DEFAULT_COOPERATIVE_ROUNDS,
            self_teaching_rounds: defaults::DEFAULT_SELF_TEACHING_ROUNDS,
            self_teaching_coupling: LearnerCoupling::default(),
            teaching_floor: defaults::DEFAULT_TEACHING_FLOOR,
        }
    }
}
