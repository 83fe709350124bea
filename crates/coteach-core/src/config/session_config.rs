use serde::{Deserialize, Serialize};

/// Which query-selection strategy drives a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Pure active learning on expected information gain.
    #[default]
    InformationGain,
    /// The learner picks its own queries through the cooperative engine.
    SelfTeaching,
    /// A teacher who knows the true hypothesis picks queries.
    CooperativeTeacher,
    /// Self-teaching seeded by an active-learning rollout prior.
    Rollout,
}

/// Session configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub strategy: StrategyKind,
    /// Index of the hidden hypothesis. Drawn uniformly when unset.
    pub true_hypothesis: Option<usize>,
    /// Maximum number of observations. Defaults to the number of queries.
    pub step_budget: Option<usize>,
    /// Seed for every random draw in the session. Entropy when unset.
    pub seed: Option<u64>,
}
