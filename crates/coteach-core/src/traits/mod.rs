mod hypothesis_space;

pub use hypothesis_space::IHypothesisSpace;
