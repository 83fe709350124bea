//! Property tests for the normalisation primitives.

use proptest::prelude::*;

use coteach_core::numeric::{is_distribution_or_zero, normalize_or_zero};
use coteach_core::tensor::{Dims3, Tensor3};

// Entries are either exactly zero or a positive weight, so dead slices occur often.
fn entry() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), 0.0_f64..1.0]
}

fn tensor_strategy() -> impl Strategy<Value = Tensor3> {
    (1_usize..6, 1_usize..5, 1_usize..4).prop_flat_map(|(h, q, o)| {
        prop::collection::vec(entry(), h * q * o).prop_map(move |values| {
            let dims = Dims3::new(h, q, o);
            let mut iter = values.into_iter();
            Tensor3::from_fn(dims, |_, _, _| iter.next().unwrap_or(0.0))
        })
    })
}

proptest! {
    #[test]
    fn normalized_slices_sum_to_one_or_zero(mut t in tensor_strategy()) {
        t.normalize_over_hypotheses();
        let dims = t.dims();
        for q in 0..dims.queries {
            for o in 0..dims.outcomes {
                let slice = t.hypothesis_slice(q, o);
                prop_assert!(slice.iter().all(|v| !v.is_nan()));
                prop_assert!(is_distribution_or_zero(&slice), "slice {:?}", slice);
            }
        }
    }

    #[test]
    fn marginal_rows_sum_to_one_or_zero(t in tensor_strategy()) {
        let mut m = t.sum_over_outcomes();
        m.normalize_rows();
        for h in 0..m.rows() {
            prop_assert!(is_distribution_or_zero(m.row(h)), "row {:?}", m.row(h));
        }
    }

    #[test]
    fn normalize_reports_original_mass(values in prop::collection::vec(entry(), 1..10)) {
        let expected: f64 = values.iter().sum();
        let mut v = values.clone();
        let mass = normalize_or_zero(&mut v);
        prop_assert!((mass - expected).abs() < 1e-12);
        prop_assert!(is_distribution_or_zero(&v));
    }
}
