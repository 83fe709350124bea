//! # coteach-core
//!
//! Foundation crate for cooperative teaching and active learning.
//! Defines tensors, the zero-mass policy, the hypothesis-space contract,
//! session models, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod numeric;
pub mod tensor;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::CoteachConfig;
pub use errors::{CoteachError, CoteachResult};
pub use models::{Evaluation, Observation, ObservationHistory, SessionReport, SessionState};
pub use tensor::{Dims3, Matrix, Tensor3};
pub use traits::IHypothesisSpace;
