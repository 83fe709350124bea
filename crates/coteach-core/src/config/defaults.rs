// Single source of truth for all default values.

// --- Inference ---
pub const DEFAULT_COOPERATIVE_ROUNDS: usize = 1;
pub const DEFAULT_SELF_TEACHING_ROUNDS: usize = 10;
pub const DEFAULT_TEACHING_FLOOR: f64 = 1e-10;

// --- Sampling ---
pub const DEFAULT_TIE_TOLERANCE: f64 = 1e-12;

// --- Rollout ---
pub const DEFAULT_ROLLOUT_STEPS: usize = 2;
pub const DEFAULT_ROLLOUT_PARALLEL: bool = true;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_TRACING_ENABLED: bool = false;
