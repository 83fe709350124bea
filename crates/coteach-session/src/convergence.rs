//! Termination checks on a collapsed posterior.

use coteach_inference::posterior::certain_hypothesis;

/// Where a posterior stands relative to the true hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convergence {
    /// No hypothesis holds all of the mass.
    Open,
    /// The true hypothesis holds all of the mass.
    Correct,
    /// Some other hypothesis holds all of the mass.
    Wrong(usize),
}

pub fn classify(posterior: &[f64], true_hypothesis: usize) -> Convergence {
    match certain_hypothesis(posterior) {
        None => Convergence::Open,
        Some(h) if h == true_hypothesis => Convergence::Correct,
        Some(h) => Convergence::Wrong(h),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies() {
        assert_eq!(classify(&[0.5, 0.5], 0), Convergence::Open);
        assert_eq!(classify(&[0.0, 1.0], 1), Convergence::Correct);
        assert_eq!(classify(&[0.0, 1.0], 0), Convergence::Wrong(1));
        assert_eq!(classify(&[0.0, 0.0], 0), Convergence::Open);
    }

    #[test]
    fn near_certainty_is_not_convergence() {
        assert_eq!(classify(&[1e-17, 1.0 - 1e-16], 1), Convergence::Open);
    }
}
