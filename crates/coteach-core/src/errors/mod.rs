mod config_error;
mod inference_error;
mod session_error;
mod space_error;

pub use config_error::ConfigError;
pub use inference_error::InferenceError;
pub use session_error::SessionError;
pub use space_error::SpaceError;

/// Top-level error for every coteach subsystem.
#[derive(Debug, thiserror::Error)]
pub enum CoteachError {
    #[error("inference error: {0}")]
    Inference(#[from] InferenceError),

    #[error("hypothesis space error: {0}")]
    Space(#[from] SpaceError),

    #[error("session error: {0}")]
    Session(#[from] SessionError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl CoteachError {
    /// Shorthand for the sampler/outcome precondition violation.
    pub fn invalid_mass(context: impl Into<String>, mass: f64) -> Self {
        InferenceError::InvalidProbabilityMass {
            context: context.into(),
            mass,
        }
        .into()
    }

    /// Shorthand for a malformed hypothesis space.
    pub fn malformed(reason: impl Into<String>) -> Self {
        SpaceError::MalformedHypothesisSpace {
            reason: reason.into(),
        }
        .into()
    }
}

pub type CoteachResult<T> = Result<T, CoteachError>;
