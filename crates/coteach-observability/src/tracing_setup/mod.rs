//! Tracing setup: subscriber initialization, span definitions, and event types.

pub mod events;
pub mod spans;

use std::sync::Once;

use coteach_core::config::ObservabilityConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the filter directives.
pub const LOG_ENV_VAR: &str = "COTEACH_LOG";

/// Fallback when `COTEACH_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "coteach=info";

/// Initialize the global subscriber.
///
/// Reads `COTEACH_LOG` for per-crate levels, e.g.
/// `COTEACH_LOG=coteach_session=debug,coteach_inference=trace`.
/// Idempotent: later calls are no-ops.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    install(filter, false);
}

/// Initialize with an explicit filter string (for tests or embedding).
pub fn init_tracing_with_filter(filter: &str) {
    install(EnvFilter::new(filter), false);
}

/// Initialize from the `[observability]` config section. `COTEACH_LOG`
/// still wins when set.
pub fn init_tracing_from_config(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(config_directive(config)));
    install(filter, config.tracing_enabled);
}

/// Filter directive for a config: the level applies to every coteach crate.
pub fn config_directive(config: &ObservabilityConfig) -> String {
    let level = config.log_level.trim().to_ascii_lowercase();
    [
        "coteach_core",
        "coteach_inference",
        "coteach_sampling",
        "coteach_session",
    ]
    .iter()
    .map(|target| format!("{target}={level}"))
    .collect::<Vec<_>>()
    .join(",")
}

fn install(filter: EnvFilter, json: bool) {
    INIT.call_once(|| {
        let registry = tracing_subscriber::registry().with(filter);
        // try_init: a host application may already own the global subscriber.
        let _ = if json {
            registry
                .with(fmt::layer().json().with_target(true).with_thread_ids(true))
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .try_init()
        };
    });
}
