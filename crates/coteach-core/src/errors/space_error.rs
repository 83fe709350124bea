/// Hypothesis space construction errors.
#[derive(Debug, thiserror::Error)]
pub enum SpaceError {
    #[error("malformed hypothesis space: {reason}")]
    MalformedHypothesisSpace { reason: String },
}
