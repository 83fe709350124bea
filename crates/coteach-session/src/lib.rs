//! # coteach-session
//!
//! Drives a learner towards a hidden hypothesis one observation at a time.
//! A [`TeachingStrategy`](strategies::TeachingStrategy) turns the current
//! posterior into query weights, the sampler picks a query, the true
//! hypothesis answers it, and the strategy collapses the posterior.
//!
//! [`run_session`] is the single entry point that builds all of this from a
//! hypothesis space and a [`CoteachConfig`](coteach_core::CoteachConfig).

pub mod convergence;
pub mod graph;
pub mod outcome;
pub mod runner;
pub mod session;
pub mod strategies;

pub use graph::{GraphTeacher, UnorderedPair};
pub use runner::{build_session, run_session};
pub use session::TeachingSession;
pub use strategies::{StepContext, TeachingStrategy};
