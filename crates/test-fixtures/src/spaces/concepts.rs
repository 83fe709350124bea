use coteach_core::models::ConceptSpace;

/// Threshold concepts: hypothesis `i` labels the first `i` features 0 and
/// the rest 1, for `i` in `0..=n_features`.
///
/// `boundary_space(3)` is `[111, 011, 001, 000]`.
///
/// # Panics
/// Panics if `n_features` is zero.
pub fn boundary_space(n_features: usize) -> ConceptSpace {
    assert!(n_features > 0, "boundary space needs at least one feature");
    let rows = (0..=n_features)
        .map(|i| (0..n_features).map(|f| usize::from(f >= i)).collect())
        .collect();
    ConceptSpace::from_label_rows(rows).expect("boundary rows are well formed")
}

/// Contiguous-interval concepts: every run of 1s of length `1..=n_features`
/// at every offset. `n (n + 1) / 2` hypotheses, shortest runs first.
///
/// # Panics
/// Panics if `n_features` is zero.
pub fn line_space(n_features: usize) -> ConceptSpace {
    assert!(n_features > 0, "line space needs at least one feature");
    let mut rows = Vec::with_capacity(n_features * (n_features + 1) / 2);
    for len in 1..=n_features {
        for start in 0..=(n_features - len) {
            rows.push(
                (0..n_features)
                    .map(|f| usize::from(f >= start && f < start + len))
                    .collect(),
            );
        }
    }
    ConceptSpace::from_label_rows(rows).expect("line rows are well formed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use coteach_core::traits::IHypothesisSpace;

    #[test]
    fn boundary_three_features() {
        let space = boundary_space(3);
        let names: Vec<String> = (0..space.n_hypotheses()).map(|h| space.label(h)).collect();
        assert_eq!(names, vec!["111", "011", "001", "000"]);
    }

    #[test]
    fn boundary_size() {
        assert_eq!(boundary_space(4).n_hypotheses(), 5);
    }

    #[test]
    fn line_space_size_and_order() {
        let space = line_space(11);
        assert_eq!(space.n_hypotheses(), 66);
        let small = line_space(3);
        let names: Vec<String> = (0..small.n_hypotheses()).map(|h| small.label(h)).collect();
        assert_eq!(names, vec!["100", "010", "001", "110", "011", "111"]);
    }
}
