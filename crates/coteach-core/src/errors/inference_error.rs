/// Posterior, likelihood, and sampling errors.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("invalid probability mass in {context}: total {mass}")]
    InvalidProbabilityMass { context: String, mass: f64 },

    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    #[error("{axis} index {index} out of range (len {len})")]
    IndexOutOfRange {
        axis: &'static str,
        index: usize,
        len: usize,
    },
}
