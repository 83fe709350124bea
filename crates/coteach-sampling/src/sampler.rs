//! Query selection over a weight vector.

use coteach_core::config::{SamplingConfig, SamplingMode};
use coteach_core::errors::{CoteachError, CoteachResult, InferenceError};
use coteach_core::models::ObservationHistory;
use coteach_core::numeric;
use coteach_observability::sampling_span;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

/// Mask observed queries out of `weights` and renormalise.
///
/// Fails with `InvalidProbabilityMass` when a weight is negative or not
/// finite, or when no unobserved query carries any mass.
pub fn masked_distribution(
    weights: &[f64],
    history: &ObservationHistory,
) -> CoteachResult<Vec<f64>> {
    if weights.len() != history.n_queries() {
        return Err(InferenceError::ShapeMismatch {
            expected: format!("{} queries", history.n_queries()),
            actual: format!("{} queries", weights.len()),
        }
        .into());
    }
    if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(CoteachError::invalid_mass("query weights", *bad));
    }
    let mut masked: Vec<f64> = weights
        .iter()
        .enumerate()
        .map(|(q, w)| if history.is_observed(q) { 0.0 } else { *w })
        .collect();
    let mass = numeric::normalize_or_zero(&mut masked);
    if mass <= 0.0 {
        return Err(CoteachError::invalid_mass("unobserved query weights", mass));
    }
    Ok(masked)
}

/// Draws the next query. Holds only its configuration and RNG; recording the
/// drawn query is the caller's job.
#[derive(Debug, Clone)]
pub struct QuerySampler {
    mode: SamplingMode,
    tie_tolerance: f64,
    rng: StdRng,
}

impl QuerySampler {
    pub fn new(mode: SamplingMode, rng: StdRng) -> Self {
        Self {
            mode,
            tie_tolerance: coteach_core::config::defaults::DEFAULT_TIE_TOLERANCE,
            rng,
        }
    }

    pub fn with_seed(mode: SamplingMode, seed: u64) -> Self {
        Self::new(mode, StdRng::seed_from_u64(seed))
    }

    /// Build from config; `seed = None` draws from entropy.
    pub fn from_config(config: &SamplingConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(config.mode, rng).with_tie_tolerance(config.tie_tolerance)
    }

    pub fn with_tie_tolerance(mut self, tolerance: f64) -> Self {
        self.tie_tolerance = tolerance;
        self
    }

    pub fn mode(&self) -> SamplingMode {
        self.mode
    }

    /// Draw one unobserved query.
    pub fn select(&mut self, weights: &[f64], history: &ObservationHistory) -> CoteachResult<usize> {
        let _span = sampling_span!(self.mode).entered();
        let distribution = masked_distribution(weights, history)?;
        let query = match self.mode {
            SamplingMode::Max => self.select_max(&distribution, history),
            SamplingMode::Proportional => self.select_proportional(&distribution)?,
        };
        trace!(query, weight = distribution[query], "query selected");
        Ok(query)
    }

    /// Generic outcome draw from an unmasked distribution, e.g. a
    /// probabilistic hypothesis' outcome row.
    pub fn draw_index(&mut self, probabilities: &[f64]) -> CoteachResult<usize> {
        self.select_proportional(probabilities)
    }

    fn select_max(&mut self, distribution: &[f64], history: &ObservationHistory) -> usize {
        let max = distribution.iter().copied().fold(0.0_f64, f64::max);
        let tied: Vec<usize> = distribution
            .iter()
            .enumerate()
            .filter(|(q, w)| !history.is_observed(*q) && max - **w <= self.tie_tolerance)
            .map(|(q, _)| q)
            .collect();
        // The masked distribution has positive mass, so the maximum is among
        // the unobserved queries and `tied` is non-empty.
        tied[self.rng.gen_range(0..tied.len())]
    }

    fn select_proportional(&mut self, distribution: &[f64]) -> CoteachResult<usize> {
        let index = WeightedIndex::new(distribution).map_err(|_| {
            CoteachError::invalid_mass("proportional draw", distribution.iter().sum())
        })?;
        Ok(index.sample(&mut self.rng))
    }
}
