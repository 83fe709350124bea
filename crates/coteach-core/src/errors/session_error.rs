//! Teaching session errors.

/// Errors raised while driving a teaching session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    /// A hypothesis other than the true one reached probability 1.
    ///
    /// Sessions log this and keep going; it is never returned as `Err`
    /// from a step.
    #[error(
        "learner converged to hypothesis {converged_to} at step {step}, true hypothesis is {true_hypothesis}"
    )]
    AmbiguousConvergence {
        step: usize,
        true_hypothesis: usize,
        converged_to: usize,
    },

    #[error("true hypothesis {index} out of range ({n_hypotheses} hypotheses)")]
    InvalidTrueHypothesis { index: usize, n_hypotheses: usize },

    #[error("session already terminated in state {state}")]
    AlreadyTerminated { state: String },

    #[error("query {query} was already observed")]
    QueryAlreadyObserved { query: usize },
}
