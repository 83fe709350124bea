//! Structured log events for session milestones.

/// Log one applied observation.
pub fn observation_applied(step: usize, query: usize, outcome: usize, true_mass: f64) {
    tracing::debug!(
        event = "observation_applied",
        step,
        query,
        outcome,
        true_mass,
        "observation applied"
    );
}

/// Log a wrong hypothesis reaching probability 1. The session keeps going.
pub fn ambiguous_convergence(step: usize, true_hypothesis: usize, converged_to: usize) {
    tracing::warn!(
        event = "ambiguous_convergence",
        step,
        true_hypothesis,
        converged_to,
        "learner converged to the wrong hypothesis"
    );
}

/// Log the true hypothesis' answer contradicting every hypothesis with mass.
pub fn posterior_exhausted(step: usize, query: usize, outcome: usize) {
    tracing::warn!(
        event = "posterior_exhausted",
        step,
        query,
        outcome,
        "no hypothesis with mass explains the outcome; stopping"
    );
}

/// Log session termination.
pub fn session_terminated(strategy: &str, state: &str, n_observations: usize) {
    tracing::info!(
        event = "session_terminated",
        strategy = %strategy,
        state = %state,
        n_observations,
        "session terminated"
    );
}

/// Log completion of the rollout sub-learner group.
pub fn rollout_completed(n_hypotheses: usize, n_steps: usize, wrong_convergences: usize) {
    tracing::info!(
        event = "rollout_completed",
        n_hypotheses,
        n_steps,
        wrong_convergences,
        "rollout transition matrix built"
    );
}
