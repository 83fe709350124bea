use serde::{Deserialize, Serialize};

use super::defaults;

/// How a weight vector over queries becomes a single query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMode {
    /// Uniform draw among the queries tied for maximum mass.
    #[default]
    Max,
    /// Draw with probability equal to the renormalised mass.
    Proportional,
}

/// Query sampler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub mode: SamplingMode,
    /// Two weights closer than this are treated as tied in `Max` mode.
    pub tie_tolerance: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            mode: SamplingMode::Max,
            tie_tolerance: defaults::DEFAULT_TIE_TOLERANCE,
        }
    }
}
