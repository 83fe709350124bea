/// coteach version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Outcomes of a binary concept query.
pub const BINARY_OUTCOMES: usize = 2;

/// Safety cap on cooperative rounds per draw.
pub const MAX_COOPERATIVE_ROUNDS: usize = 10_000;
