use crate::models::Evaluation;

/// A finite, ordered, immutable set of hypotheses over a fixed query set.
///
/// Implementations are supplied by hypothesis-space generators. The core only
/// addresses hypotheses by index and never mutates the space.
pub trait IHypothesisSpace: Send + Sync {
    /// Number of hypotheses (`n_hyp`).
    fn n_hypotheses(&self) -> usize;

    /// Cardinality of the query set.
    fn n_queries(&self) -> usize;

    /// Cardinality of the outcome set of every query.
    fn n_outcomes(&self) -> usize;

    /// Opaque, human-readable identifier of a hypothesis.
    fn label(&self, hypothesis: usize) -> String;

    /// Evaluate a hypothesis at a query.
    fn evaluate(&self, hypothesis: usize, query: usize) -> Evaluation;
}
