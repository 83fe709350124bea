//! # coteach-observability
//!
//! Structured tracing for teaching sessions: subscriber setup driven by
//! `COTEACH_LOG` or the `[observability]` config section, span definitions
//! per operation, and structured events for session milestones.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, init_tracing_from_config, init_tracing_with_filter};
