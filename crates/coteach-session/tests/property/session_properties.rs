use std::sync::Arc;

use coteach_core::config::{CoteachConfig, SamplingMode, StrategyKind};
use coteach_core::models::ConceptSpace;
use coteach_core::numeric::is_distribution;
use coteach_inference::LikelihoodTensor;
use coteach_session::{build_session, run_session};
use proptest::prelude::*;

const N_FEATURES: usize = 4;

fn concept_space() -> impl Strategy<Value = ConceptSpace> {
    prop::sample::subsequence((0..1usize << N_FEATURES).collect::<Vec<_>>(), 2..10).prop_map(
        |codes| {
            let rows = codes
                .into_iter()
                .map(|code| (0..N_FEATURES).map(|f| (code >> f) & 1).collect())
                .collect();
            ConceptSpace::from_label_rows(rows).unwrap()
        },
    )
}

fn strategy_kind() -> impl Strategy<Value = StrategyKind> {
    prop_oneof![
        Just(StrategyKind::InformationGain),
        Just(StrategyKind::SelfTeaching),
        Just(StrategyKind::CooperativeTeacher),
        Just(StrategyKind::Rollout),
    ]
}

fn config(strategy: StrategyKind, truth: usize, seed: u64, mode: SamplingMode) -> CoteachConfig {
    let mut config = CoteachConfig::default();
    config.session.strategy = strategy;
    config.session.true_hypothesis = Some(truth);
    config.session.seed = Some(seed);
    config.sampling.mode = mode;
    config.rollout.parallel = false;
    config
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn distinct_concepts_always_identified(
        space in concept_space(),
        truth in any::<prop::sample::Index>(),
        strategy in strategy_kind(),
        proportional in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let truth = truth.index(space.concepts().len());
        let mode = if proportional { SamplingMode::Proportional } else { SamplingMode::Max };
        let report = run_session(&space, &config(strategy, truth, seed, mode)).unwrap();
        prop_assert!(report.converged());
        prop_assert!(report.n_observations <= N_FEATURES);
        prop_assert_eq!(report.final_posterior[truth], 1.0);
        prop_assert!(report.anomalies.is_empty());
        for window in report.observations.windows(2) {
            prop_assert_ne!(window[0].query, window[1].query);
        }
    }

    #[test]
    fn posteriors_stay_distributions_under_replay(
        space in concept_space(),
        truth in any::<prop::sample::Index>(),
        strategy in strategy_kind(),
        seed in any::<u64>(),
    ) {
        let truth = truth.index(space.concepts().len());
        let likelihood = Arc::new(LikelihoodTensor::compute(&space).unwrap());
        let cfg = config(strategy, truth, seed, SamplingMode::Max);
        let original = build_session(likelihood.clone(), &cfg).unwrap().run().unwrap();

        let mut replay = build_session(likelihood, &cfg).unwrap();
        for obs in &original.observations {
            replay.observe(obs.query, obs.outcome).unwrap();
            prop_assert!(is_distribution(replay.posterior()));
        }
        prop_assert_eq!(replay.posterior(), original.final_posterior.as_slice());
    }
}
