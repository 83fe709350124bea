//! # coteach-inference
//!
//! Likelihood tensor → cooperative learner/teacher recurrence → posterior.
//! Also the expected-information-gain criterion used by pure active learning.

pub mod cooperative;
pub mod information;
pub mod likelihood;
pub mod posterior;

pub use cooperative::CooperativeInference;
pub use likelihood::LikelihoodTensor;
