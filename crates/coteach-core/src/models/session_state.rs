use serde::{Deserialize, Serialize};

/// Lifecycle of a teaching session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Init,
    Iterating,
    /// The true hypothesis holds all posterior mass.
    Converged,
    /// The query set or the step budget ran out first.
    BudgetExhausted,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Converged | SessionState::BudgetExhausted)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionState::Init => "init",
            SessionState::Iterating => "iterating",
            SessionState::Converged => "converged",
            SessionState::BudgetExhausted => "budget_exhausted",
        };
        f.write_str(name)
    }
}
