use std::sync::Arc;

use coteach_core::config::SamplingMode;
use coteach_core::models::SessionState;
use coteach_inference::likelihood::pair_index;
use coteach_sampling::QuerySampler;
use coteach_session::strategies::CooperativeTeacher;
use coteach_session::{GraphTeacher, TeachingSession};
use test_fixtures::spaces::{all_graph_space, canonical_graph_space};

#[test]
fn one_round_teacher_is_symmetric_in_intervention_order() {
    let space = canonical_graph_space(0.8, 0.01);
    let mut teacher = GraphTeacher::new(&space).unwrap();
    teacher.run_cooperative_inference(1).unwrap();
    let posterior = teacher.teacher_posterior();
    assert_eq!(posterior.rows(), 3);
    assert_eq!(posterior.cols(), 9);
    for h in 0..3 {
        for a in 0..3 {
            for b in 0..3 {
                let ab = posterior.get(h, pair_index(a, b, 3));
                let ba = posterior.get(h, pair_index(b, a, 3));
                assert!((ab - ba).abs() < 1e-12, "h {h} pair ({a}, {b})");
            }
        }
    }
}

#[test]
fn unordered_pairs_fold_to_six_and_keep_mass() {
    let space = canonical_graph_space(0.9, 0.05);
    let mut teacher = GraphTeacher::new(&space).unwrap();
    teacher.run_cooperative_inference(3).unwrap();
    for h in 0..3 {
        let pairs = teacher.unordered_pair_posterior(h).unwrap();
        let labels: Vec<(usize, usize)> = pairs.iter().map(|p| (p.first, p.second)).collect();
        assert_eq!(labels, vec![(0, 0), (0, 1), (0, 2), (1, 1), (1, 2), (2, 2)]);
        let total: f64 = pairs.iter().map(|p| p.probability).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
    assert!(teacher.unordered_pair_posterior(3).is_err());
}

#[test]
fn cooperative_teaching_session_over_all_graphs_terminates() {
    let space = all_graph_space(0.9, 0.05);
    let teacher = GraphTeacher::new(&space).unwrap();
    let likelihood = Arc::clone(teacher.likelihood());
    for truth in [0, 5, 11] {
        let session = TeachingSession::new(
            likelihood.clone(),
            Box::new(CooperativeTeacher::new(likelihood.clone(), 2)),
            QuerySampler::with_seed(SamplingMode::Proportional, truth as u64),
            truth,
            None,
        )
        .unwrap();
        let report = session.run().unwrap();
        assert!(report.final_state.is_terminal());
        assert!(report.n_observations <= 9);
        assert!(report.final_posterior[truth] > 0.0);
        assert!(report
            .trajectory
            .iter()
            .all(|m| (0.0..=1.0).contains(m)));
        if report.final_state == SessionState::Converged {
            assert_eq!(report.final_posterior[truth], 1.0);
        }
    }
}
