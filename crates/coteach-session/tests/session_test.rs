use std::sync::Arc;

use coteach_core::config::{CoteachConfig, SamplingMode, StrategyKind};
use coteach_core::models::SessionState;
use coteach_core::traits::IHypothesisSpace;
use coteach_inference::LikelihoodTensor;
use coteach_session::{build_session, run_session};
use test_fixtures::spaces::{boundary_space, line_space};

fn config(strategy: StrategyKind, truth: usize, seed: u64) -> CoteachConfig {
    let mut config = CoteachConfig::default();
    config.session.strategy = strategy;
    config.session.true_hypothesis = Some(truth);
    config.session.seed = Some(seed);
    config
}

fn one_hot(n: usize, h: usize) -> Vec<f64> {
    let mut v = vec![0.0; n];
    v[h] = 1.0;
    v
}

#[test]
fn active_learning_identifies_every_boundary_hypothesis() {
    let space = boundary_space(4);
    for truth in 0..space.n_hypotheses() {
        for seed in 0..5 {
            let report = run_session(&space, &config(StrategyKind::InformationGain, truth, seed)).unwrap();
            assert!(report.converged(), "truth {truth} seed {seed}");
            assert!(report.n_observations <= 4);
            assert_eq!(report.final_posterior, one_hot(5, truth));
            assert!(report.anomalies.is_empty());
        }
    }
}

#[test]
fn boundary_three_truth_two() {
    let space = boundary_space(3);
    let report = run_session(&space, &config(StrategyKind::InformationGain, 2, 0)).unwrap();
    assert_eq!(report.final_posterior, vec![0.0, 0.0, 1.0, 0.0]);
    assert!(report.n_observations <= 3);
    assert_eq!(report.trajectory.len(), report.n_observations + 1);
    assert_eq!(report.trajectory[0], 0.25);
    assert_eq!(*report.trajectory.last().unwrap(), 1.0);
}

#[test]
fn proportional_active_learning_also_converges() {
    let space = boundary_space(4);
    let mut cfg = config(StrategyKind::InformationGain, 3, 12);
    cfg.sampling.mode = SamplingMode::Proportional;
    let report = run_session(&space, &cfg).unwrap();
    assert_eq!(report.final_posterior, one_hot(5, 3));
}

#[test]
fn every_strategy_converges_on_line_concepts() {
    let space = line_space(4);
    for strategy in [
        StrategyKind::InformationGain,
        StrategyKind::SelfTeaching,
        StrategyKind::CooperativeTeacher,
        StrategyKind::Rollout,
    ] {
        for truth in [0, 4, 7, 9] {
            let report = run_session(&space, &config(strategy, truth, 21)).unwrap();
            assert!(report.converged(), "{strategy:?} truth {truth}");
            assert_eq!(report.final_posterior, one_hot(10, truth));
            assert!(report.n_observations <= 4);
        }
    }
}

#[test]
fn rollout_sessions_on_larger_spaces_never_fail() {
    for space in [boundary_space(6), line_space(7)] {
        let n = space.n_hypotheses();
        for n_steps in 1..=3 {
            for seed in 0..4 {
                for truth in 0..n {
                    let mut cfg = config(StrategyKind::Rollout, truth, seed);
                    cfg.sampling.mode = SamplingMode::Proportional;
                    cfg.rollout.n_steps = n_steps;
                    let report = run_session(&space, &cfg).unwrap_or_else(|e| {
                        panic!("n={n} truth {truth} seed {seed} n_steps {n_steps}: {e}")
                    });
                    assert!(report.converged(), "n={n} truth {truth} seed {seed} n_steps {n_steps}");
                    assert!(report.anomalies.is_empty());
                }
            }
        }
    }
}

#[test]
fn same_seed_same_trajectory() {
    let space = line_space(5);
    for strategy in [StrategyKind::InformationGain, StrategyKind::Rollout] {
        let mut cfg = config(strategy, 6, 314);
        cfg.sampling.mode = SamplingMode::Proportional;
        let a = run_session(&space, &cfg).unwrap();
        let b = run_session(&space, &cfg).unwrap();
        assert_eq!(a.observations, b.observations);
        assert_eq!(a.trajectory, b.trajectory);
        assert_eq!(a.first_query_distribution, b.first_query_distribution);
    }
}

#[test]
fn replaying_observations_reproduces_posteriors() {
    let space = line_space(4);
    let likelihood = Arc::new(LikelihoodTensor::compute(&space).unwrap());
    for strategy in [
        StrategyKind::InformationGain,
        StrategyKind::SelfTeaching,
        StrategyKind::CooperativeTeacher,
        StrategyKind::Rollout,
    ] {
        let cfg = config(strategy, 5, 77);
        let original = build_session(likelihood.clone(), &cfg).unwrap().run().unwrap();

        let mut replay = build_session(likelihood.clone(), &cfg).unwrap();
        for obs in &original.observations {
            replay.observe(obs.query, obs.outcome).unwrap();
        }
        assert_eq!(replay.state(), original.final_state, "{strategy:?}");
        assert_eq!(replay.trajectory(), original.trajectory.as_slice());
        assert_eq!(replay.posterior(), original.final_posterior.as_slice());
    }
}

#[test]
fn first_query_distribution_is_normalised() {
    let space = boundary_space(5);
    let report = run_session(&space, &config(StrategyKind::SelfTeaching, 2, 1)).unwrap();
    let sum: f64 = report.first_query_distribution.iter().sum();
    assert_eq!(report.first_query_distribution.len(), 5);
    assert!((sum - 1.0).abs() < 1e-9);
}

#[test]
fn step_budget_stops_early() {
    let space = line_space(5);
    let mut cfg = config(StrategyKind::InformationGain, 14, 4);
    cfg.session.step_budget = Some(1);
    let report = run_session(&space, &cfg).unwrap();
    assert_eq!(report.n_observations, 1);
    assert_eq!(report.final_state, SessionState::BudgetExhausted);
    assert_eq!(report.padded_trajectory(6).len(), 6);
}

#[test]
fn out_of_range_truth_is_an_error() {
    let space = boundary_space(3);
    assert!(run_session(&space, &config(StrategyKind::InformationGain, 9, 0)).is_err());
}

#[test]
fn report_serializes() {
    let space = boundary_space(3);
    let report = run_session(&space, &config(StrategyKind::CooperativeTeacher, 1, 0)).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["strategy"], "cooperative_teacher");
    assert_eq!(json["final_state"], "converged");
}
