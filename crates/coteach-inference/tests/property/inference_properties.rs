//! Property tests for the cooperative recurrence and information gain.

use std::sync::Arc;

use proptest::prelude::*;

use coteach_core::models::ConceptSpace;
use coteach_core::numeric::is_distribution_or_zero;
use coteach_core::tensor::{Dims3, Tensor3};
use coteach_inference::information::{entropy, expected_information_gain};
use coteach_inference::{CooperativeInference, LikelihoodTensor};

fn concept_space_strategy() -> impl Strategy<Value = ConceptSpace> {
    (1_usize..7, 1_usize..6).prop_flat_map(|(n_hyp, n_features)| {
        prop::collection::vec(prop::collection::vec(0_usize..2, n_features), n_hyp)
            .prop_map(|rows| ConceptSpace::from_label_rows(rows).unwrap())
    })
}

fn probabilistic_likelihood() -> impl Strategy<Value = LikelihoodTensor> {
    (1_usize..5, 1_usize..5, 1_usize..4).prop_flat_map(|(h, q, o)| {
        prop::collection::vec(prop_oneof![Just(0.0), 0.0_f64..=1.0], h * q * o).prop_map(
            move |values| {
                let mut iter = values.into_iter();
                let tensor = Tensor3::from_fn(Dims3::new(h, q, o), |_, _, _| {
                    iter.next().unwrap_or(0.0)
                });
                LikelihoodTensor::from_tensor(tensor).unwrap()
            },
        )
    })
}

fn assert_invariants(engine: &CooperativeInference) -> Result<(), TestCaseError> {
    let dims = engine.likelihood().dims();
    for q in 0..dims.queries {
        for o in 0..dims.outcomes {
            let slice = engine.learner_posterior().hypothesis_slice(q, o);
            prop_assert!(slice.iter().all(|v| v.is_finite()));
            prop_assert!(is_distribution_or_zero(&slice), "learner slice {:?}", slice);
        }
    }
    for h in 0..dims.hypotheses {
        let row = engine.teacher_posterior().row(h);
        prop_assert!(is_distribution_or_zero(row), "teacher row {:?}", row);
    }
    Ok(())
}

proptest! {
    #[test]
    fn concept_spaces_keep_posteriors_normalized(
        space in concept_space_strategy(),
        rounds in 1_usize..6,
    ) {
        let likelihood = Arc::new(LikelihoodTensor::compute(&space).unwrap());
        let mut engine = CooperativeInference::new(likelihood);
        engine.run(rounds).unwrap();
        assert_invariants(&engine)?;
    }

    #[test]
    fn probabilistic_likelihoods_keep_posteriors_normalized(
        likelihood in probabilistic_likelihood(),
        rounds in 1_usize..4,
    ) {
        let mut engine = CooperativeInference::new(Arc::new(likelihood)).with_teaching_floor(1e-10);
        engine.run(rounds).unwrap();
        assert_invariants(&engine)?;
    }

    #[test]
    fn information_gain_is_bounded_by_prior_entropy(space in concept_space_strategy()) {
        let likelihood = LikelihoodTensor::compute(&space).unwrap();
        let n = likelihood.dims().hypotheses;
        let prior = vec![1.0 / n as f64; n];
        for q in 0..likelihood.dims().queries {
            let gain = expected_information_gain(&prior, &likelihood, q).unwrap();
            prop_assert!(gain >= 0.0);
            prop_assert!(gain <= entropy(&prior) + 1e-9);
        }
    }
}
