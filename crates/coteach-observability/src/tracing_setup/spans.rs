//! Span definitions per operation: session, cooperative inference, rollout, sampling.

/// Create a teaching-session span.
#[macro_export]
macro_rules! session_span {
    ($strategy:expr, $true_hypothesis:expr) => {
        tracing::info_span!(
            "coteach.session",
            strategy = %$strategy,
            true_hypothesis = $true_hypothesis
        )
    };
}

/// Create a cooperative-inference span.
#[macro_export]
macro_rules! inference_span {
    ($rounds:expr) => {
        tracing::debug_span!("coteach.inference", rounds = $rounds)
    };
}

/// Create a rollout span covering the sub-learner fork-join group.
#[macro_export]
macro_rules! rollout_span {
    ($n_hypotheses:expr, $n_steps:expr) => {
        tracing::info_span!(
            "coteach.rollout",
            n_hypotheses = $n_hypotheses,
            n_steps = $n_steps
        )
    };
}

/// Create a query-sampling span.
#[macro_export]
macro_rules! sampling_span {
    ($mode:expr) => {
        tracing::trace_span!("coteach.sampling", mode = ?$mode)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const SESSION: &str = "coteach.session";
    pub const INFERENCE: &str = "coteach.inference";
    pub const ROLLOUT: &str = "coteach.rollout";
    pub const SAMPLING: &str = "coteach.sampling";
}
