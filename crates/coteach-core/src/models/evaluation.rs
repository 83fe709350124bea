use serde::{Deserialize, Serialize};

/// Result of evaluating a hypothesis at a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Evaluation {
    /// Deterministic hypotheses produce exactly one outcome.
    Label(usize),
    /// Probabilistic hypotheses assign a probability to every outcome.
    Distribution(Vec<f64>),
}

impl Evaluation {
    /// `P(outcome | hypothesis, query)`.
    pub fn probability(&self, outcome: usize) -> f64 {
        match self {
            Evaluation::Label(label) => {
                if *label == outcome {
                    1.0
                } else {
                    0.0
                }
            }
            Evaluation::Distribution(probs) => probs.get(outcome).copied().unwrap_or(0.0),
        }
    }
}
