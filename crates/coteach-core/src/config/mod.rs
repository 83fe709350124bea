//! Layered configuration. Every section falls back to `defaults`.

pub mod defaults;
mod inference_config;
mod observability_config;
mod rollout_config;
mod sampling_config;
mod session_config;

pub use inference_config::{InferenceConfig, LearnerCoupling};
pub use observability_config::ObservabilityConfig;
pub use rollout_config::RolloutConfig;
pub use sampling_config::{SamplingConfig, SamplingMode};
pub use session_config::{SessionConfig, StrategyKind};

use serde::{Deserialize, Serialize};

use crate::constants::MAX_COOPERATIVE_ROUNDS;
use crate::errors::{ConfigError, CoteachResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoteachConfig {
    pub session: SessionConfig,
    pub inference: InferenceConfig,
    pub sampling: SamplingConfig,
    pub rollout: RolloutConfig,
    pub observability: ObservabilityConfig,
}

impl CoteachConfig {
    /// Parse a TOML document. Missing sections and fields keep their defaults.
    pub fn from_toml(source: &str) -> CoteachResult<Self> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no session can run with.
    pub fn validate(&self) -> CoteachResult<()> {
        for (field, rounds) in [
            ("inference.cooperative_rounds", self.inference.cooperative_rounds),
            ("inference.self_teaching_rounds", self.inference.self_teaching_rounds),
        ] {
            if rounds == 0 || rounds > MAX_COOPERATIVE_ROUNDS {
                return Err(invalid(
                    field,
                    &format!("must lie in 1..={MAX_COOPERATIVE_ROUNDS}"),
                ));
            }
        }
        if !(self.inference.teaching_floor >= 0.0 && self.inference.teaching_floor < 1.0) {
            return Err(invalid("inference.teaching_floor", "must lie in [0, 1)"));
        }
        if !(self.sampling.tie_tolerance >= 0.0 && self.sampling.tie_tolerance.is_finite()) {
            return Err(invalid("sampling.tie_tolerance", "must be finite and non-negative"));
        }
        if self.session.step_budget == Some(0) {
            return Err(invalid("session.step_budget", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> crate::errors::CoteachError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
    .into()
}
