use serde::{Deserialize, Serialize};

use crate::errors::{CoteachResult, InferenceError, SessionError};

/// A revealed `(query, outcome)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub query: usize,
    pub outcome: usize,
}

/// Ordered observations of one session plus a mask of observed queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationHistory {
    entries: Vec<Observation>,
    observed: Vec<bool>,
}

impl ObservationHistory {
    pub fn new(n_queries: usize) -> Self {
        Self {
            entries: Vec::new(),
            observed: vec![false; n_queries],
        }
    }

    /// Append an observation. A query may be observed only once.
    pub fn record(&mut self, observation: Observation) -> CoteachResult<()> {
        let len = self.observed.len();
        let slot = self
            .observed
            .get_mut(observation.query)
            .ok_or(InferenceError::IndexOutOfRange {
                axis: "query",
                index: observation.query,
                len,
            })?;
        if *slot {
            return Err(SessionError::QueryAlreadyObserved {
                query: observation.query,
            }
            .into());
        }
        *slot = true;
        self.entries.push(observation);
        Ok(())
    }

    pub fn is_observed(&self, query: usize) -> bool {
        self.observed.get(query).copied().unwrap_or(false)
    }

    pub fn entries(&self) -> &[Observation] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn n_queries(&self) -> usize {
        self.observed.len()
    }

    /// Queries not yet observed, in index order.
    pub fn remaining(&self) -> impl Iterator<Item = usize> + '_ {
        self.observed
            .iter()
            .enumerate()
            .filter(|(_, seen)| !**seen)
            .map(|(q, _)| q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order_and_masks() {
        let mut history = ObservationHistory::new(3);
        history.record(Observation { query: 2, outcome: 1 }).unwrap();
        history.record(Observation { query: 0, outcome: 0 }).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0].query, 2);
        assert!(history.is_observed(0));
        assert!(!history.is_observed(1));
        assert_eq!(history.remaining().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn duplicate_query_rejected() {
        let mut history = ObservationHistory::new(2);
        history.record(Observation { query: 1, outcome: 0 }).unwrap();
        assert!(history.record(Observation { query: 1, outcome: 1 }).is_err());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn out_of_range_query_rejected() {
        let mut history = ObservationHistory::new(2);
        assert!(history.record(Observation { query: 5, outcome: 0 }).is_err());
    }
}
