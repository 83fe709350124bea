mod concept_space;
mod evaluation;
mod observation;
mod session_report;
mod session_state;

pub use concept_space::{Concept, ConceptSpace};
pub use evaluation::Evaluation;
pub use observation::{Observation, ObservationHistory};
pub use session_report::{ConvergenceAnomaly, SessionReport};
pub use session_state::SessionState;
