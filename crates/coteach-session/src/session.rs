//! The teaching session state machine.
//!
//! ```text
//! Init ──step/observe──▶ Iterating ──▶ Converged
//!                            │
//!                            └───────▶ BudgetExhausted
//! ```
//!
//! Each step asks the strategy for query weights, draws a query, lets the
//! true hypothesis answer it, and replaces the prior with the collapsed
//! posterior. A wrong hypothesis reaching probability 1 is recorded as an
//! anomaly; the session keeps going. If the true hypothesis later answers
//! against it, the posterior collapses to zero and the session stops with
//! its budget exhausted.

use std::sync::Arc;

use coteach_core::errors::{
    ConfigError, CoteachError, CoteachResult, InferenceError, SessionError,
};
use coteach_core::models::{
    ConvergenceAnomaly, Observation, ObservationHistory, SessionReport, SessionState,
};
use coteach_inference::{posterior, LikelihoodTensor};
use coteach_observability::session_span;
use coteach_observability::tracing_setup::events;
use coteach_sampling::{masked_distribution, QuerySampler};

use crate::convergence::{classify, Convergence};
use crate::outcome::resolve_outcome;
use crate::strategies::{StepContext, TeachingStrategy};

/// Where an applied observation's outcome came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    TrueHypothesis,
    Replay,
}

pub struct TeachingSession {
    likelihood: Arc<LikelihoodTensor>,
    strategy: Box<dyn TeachingStrategy>,
    sampler: QuerySampler,
    true_hypothesis: usize,
    budget: usize,
    state: SessionState,
    posterior: Vec<f64>,
    history: ObservationHistory,
    trajectory: Vec<f64>,
    first_query_distribution: Vec<f64>,
    anomalies: Vec<ConvergenceAnomaly>,
}

impl TeachingSession {
    /// Start from a uniform prior. The budget is capped at the number of
    /// queries; `None` means every query may be asked.
    pub fn new(
        likelihood: Arc<LikelihoodTensor>,
        strategy: Box<dyn TeachingStrategy>,
        sampler: QuerySampler,
        true_hypothesis: usize,
        step_budget: Option<usize>,
    ) -> CoteachResult<Self> {
        let dims = likelihood.dims();
        if true_hypothesis >= dims.hypotheses {
            return Err(SessionError::InvalidTrueHypothesis {
                index: true_hypothesis,
                n_hypotheses: dims.hypotheses,
            }
            .into());
        }
        if step_budget == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "session.step_budget".to_string(),
                message: "must be at least 1".to_string(),
            }
            .into());
        }
        let posterior = posterior::uniform(dims.hypotheses);
        let trajectory = vec![posterior[true_hypothesis]];
        Ok(Self {
            budget: step_budget.unwrap_or(dims.queries).min(dims.queries),
            history: ObservationHistory::new(dims.queries),
            likelihood,
            strategy,
            sampler,
            true_hypothesis,
            state: SessionState::Init,
            posterior,
            trajectory,
            first_query_distribution: Vec::new(),
            anomalies: Vec::new(),
        })
    }

    /// Draw a query, answer it with the true hypothesis, and update.
    pub fn step(&mut self) -> CoteachResult<SessionState> {
        self.ensure_running()?;
        let weights = self.strategy.query_weights(&StepContext {
            likelihood: &self.likelihood,
            prior: &self.posterior,
            history: &self.history,
            true_hypothesis: self.true_hypothesis,
        })?;
        if self.history.is_empty() {
            self.first_query_distribution = masked_distribution(&weights, &self.history)?;
        }
        let query = self.sampler.select(&weights, &self.history)?;
        let outcome = resolve_outcome(
            &self.likelihood,
            self.true_hypothesis,
            query,
            &mut self.sampler,
        )?;
        self.apply(Observation { query, outcome }, Source::TrueHypothesis)
    }

    /// Apply an externally supplied observation, e.g. to replay a recorded
    /// session. The outcome need not be the one the true hypothesis gives.
    pub fn observe(&mut self, query: usize, outcome: usize) -> CoteachResult<SessionState> {
        self.ensure_running()?;
        let dims = self.likelihood.dims();
        if query >= dims.queries {
            return Err(InferenceError::IndexOutOfRange {
                axis: "query",
                index: query,
                len: dims.queries,
            }
            .into());
        }
        if outcome >= dims.outcomes {
            return Err(InferenceError::IndexOutOfRange {
                axis: "outcome",
                index: outcome,
                len: dims.outcomes,
            }
            .into());
        }
        self.apply(Observation { query, outcome }, Source::Replay)
    }

    /// Step until the session terminates and report.
    pub fn run(mut self) -> CoteachResult<SessionReport> {
        let span = session_span!(self.strategy.name(), self.true_hypothesis);
        let _guard = span.enter();
        while !self.state.is_terminal() {
            self.step()?;
        }
        Ok(self.report())
    }

    fn ensure_running(&self) -> CoteachResult<()> {
        if self.state.is_terminal() {
            return Err(SessionError::AlreadyTerminated {
                state: self.state.to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn apply(&mut self, observation: Observation, source: Source) -> CoteachResult<SessionState> {
        let Observation { query, outcome } = observation;
        if self.history.is_observed(query) {
            return Err(SessionError::QueryAlreadyObserved { query }.into());
        }
        let collapsed = self.strategy.collapse(
            &StepContext {
                likelihood: &self.likelihood,
                prior: &self.posterior,
                history: &self.history,
                true_hypothesis: self.true_hypothesis,
            },
            query,
            outcome,
        )?;
        let exhausted = collapsed.iter().all(|p| *p == 0.0);
        if exhausted && source == Source::Replay {
            return Err(CoteachError::invalid_mass(
                format!("posterior after query {query}, outcome {outcome}"),
                0.0,
            ));
        }
        self.history.record(observation)?;
        self.posterior = collapsed;
        let step = self.history.len();
        let true_mass = self.posterior[self.true_hypothesis];
        self.trajectory.push(true_mass);
        events::observation_applied(step, query, outcome, true_mass);

        self.state = if exhausted {
            events::posterior_exhausted(step, query, outcome);
            SessionState::BudgetExhausted
        } else {
            match classify(&self.posterior, self.true_hypothesis) {
                Convergence::Correct => SessionState::Converged,
                Convergence::Wrong(converged_to) => {
                    self.record_anomaly(step, converged_to);
                    self.budget_state()
                }
                Convergence::Open => self.budget_state(),
            }
        };
        if self.state.is_terminal() {
            events::session_terminated(self.strategy.name(), &self.state.to_string(), step);
        }
        Ok(self.state)
    }

    fn budget_state(&self) -> SessionState {
        if self.history.len() >= self.budget {
            SessionState::BudgetExhausted
        } else {
            SessionState::Iterating
        }
    }

    fn record_anomaly(&mut self, step: usize, converged_to: usize) {
        // A wrong hypothesis stays certain once reached; log it once.
        if self.anomalies.last().map(|a| a.converged_to) == Some(converged_to) {
            return;
        }
        let error = SessionError::AmbiguousConvergence {
            step,
            true_hypothesis: self.true_hypothesis,
            converged_to,
        };
        tracing::warn!(%error, "continuing after ambiguous convergence");
        events::ambiguous_convergence(step, self.true_hypothesis, converged_to);
        self.anomalies.push(ConvergenceAnomaly {
            step,
            true_hypothesis: self.true_hypothesis,
            converged_to,
        });
    }

    pub fn report(&self) -> SessionReport {
        SessionReport {
            strategy: self.strategy.name().to_string(),
            true_hypothesis: self.true_hypothesis,
            final_state: self.state,
            n_observations: self.history.len(),
            trajectory: self.trajectory.clone(),
            first_query_distribution: self.first_query_distribution.clone(),
            observations: self.history.entries().to_vec(),
            final_posterior: self.posterior.clone(),
            anomalies: self.anomalies.clone(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn posterior(&self) -> &[f64] {
        &self.posterior
    }

    pub fn history(&self) -> &ObservationHistory {
        &self.history
    }

    pub fn trajectory(&self) -> &[f64] {
        &self.trajectory
    }

    pub fn true_hypothesis(&self) -> usize {
        self.true_hypothesis
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn anomalies(&self) -> &[ConvergenceAnomaly] {
        &self.anomalies
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }
}

impl std::fmt::Debug for TeachingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeachingSession")
            .field("strategy", &self.strategy.name())
            .field("true_hypothesis", &self.true_hypothesis)
            .field("state", &self.state)
            .field("observations", &self.history.len())
            .finish()
    }
}
