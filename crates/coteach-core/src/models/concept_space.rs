use serde::{Deserialize, Serialize};

use super::Evaluation;
use crate::constants::BINARY_OUTCOMES;
use crate::errors::{CoteachError, CoteachResult};
use crate::traits::IHypothesisSpace;

/// A deterministic hypothesis: one label per feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub name: String,
    pub labels: Vec<usize>,
}

impl Concept {
    /// Name the concept after its label string, e.g. `[0, 1, 1]` → `"011"`.
    pub fn from_labels(labels: Vec<usize>) -> Self {
        let name = labels.iter().map(|l| l.to_string()).collect();
        Self { name, labels }
    }
}

/// Hypothesis space of deterministic concepts over `n_features` queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptSpace {
    concepts: Vec<Concept>,
    n_features: usize,
    n_labels: usize,
}

impl ConceptSpace {
    /// Validate and wrap a list of concepts.
    ///
    /// Fails when the list is empty, when concepts disagree on the number of
    /// features, or when a label falls outside `0..n_labels`.
    pub fn new(concepts: Vec<Concept>, n_labels: usize) -> CoteachResult<Self> {
        let first = concepts
            .first()
            .ok_or_else(|| CoteachError::malformed("no hypotheses"))?;
        let n_features = first.labels.len();
        if n_features == 0 {
            return Err(CoteachError::malformed("hypotheses have no features"));
        }
        if n_labels == 0 {
            return Err(CoteachError::malformed("outcome set is empty"));
        }
        for concept in &concepts {
            if concept.labels.len() != n_features {
                return Err(CoteachError::malformed(format!(
                    "hypothesis {} has {} features, expected {n_features}",
                    concept.name,
                    concept.labels.len()
                )));
            }
            if let Some(bad) = concept.labels.iter().find(|l| **l >= n_labels) {
                return Err(CoteachError::malformed(format!(
                    "hypothesis {} uses label {bad}, only {n_labels} labels exist",
                    concept.name
                )));
            }
        }
        Ok(Self {
            concepts,
            n_features,
            n_labels,
        })
    }

    /// Binary concepts from raw label vectors.
    pub fn from_label_rows(rows: Vec<Vec<usize>>) -> CoteachResult<Self> {
        Self::new(
            rows.into_iter().map(Concept::from_labels).collect(),
            BINARY_OUTCOMES,
        )
    }

    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    /// Index of the concept with exactly these labels.
    pub fn index_of(&self, labels: &[usize]) -> Option<usize> {
        self.concepts.iter().position(|c| c.labels == labels)
    }
}

impl IHypothesisSpace for ConceptSpace {
    fn n_hypotheses(&self) -> usize {
        self.concepts.len()
    }

    fn n_queries(&self) -> usize {
        self.n_features
    }

    fn n_outcomes(&self) -> usize {
        self.n_labels
    }

    fn label(&self, hypothesis: usize) -> String {
        self.concepts[hypothesis].name.clone()
    }

    fn evaluate(&self, hypothesis: usize, query: usize) -> Evaluation {
        Evaluation::Label(self.concepts[hypothesis].labels[query])
    }
}
