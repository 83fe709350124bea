use coteach_core::config::SamplingMode;
use coteach_core::models::{Observation, ObservationHistory};
use coteach_sampling::QuerySampler;
use proptest::prelude::*;

fn mode_strategy() -> impl Strategy<Value = SamplingMode> {
    prop_oneof![Just(SamplingMode::Max), Just(SamplingMode::Proportional)]
}

proptest! {
    #[test]
    fn never_returns_observed_query(
        weights in prop::collection::vec(0.01f64..1.0, 2..12),
        mask in prop::collection::vec(any::<bool>(), 12),
        mode in mode_strategy(),
        seed in any::<u64>(),
    ) {
        let n = weights.len();
        let mut history = ObservationHistory::new(n);
        for q in 0..n - 1 {
            if mask[q] {
                history.record(Observation { query: q, outcome: 0 }).unwrap();
            }
        }
        let mut sampler = QuerySampler::with_seed(mode, seed);
        for _ in 0..8 {
            let q = sampler.select(&weights, &history).unwrap();
            prop_assert!(!history.is_observed(q));
        }
    }

    #[test]
    fn unique_max_always_chosen(
        mut weights in prop::collection::vec(0.0f64..0.5, 2..10),
        winner in 0usize..10,
        seed in any::<u64>(),
    ) {
        let winner = winner % weights.len();
        weights[winner] = 1.0;
        let history = ObservationHistory::new(weights.len());
        let mut sampler = QuerySampler::with_seed(SamplingMode::Max, seed);
        prop_assert_eq!(sampler.select(&weights, &history).unwrap(), winner);
    }
}
