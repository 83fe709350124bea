use coteach_core::config::*;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = CoteachConfig::from_toml("").unwrap();

    // Session defaults
    assert_eq!(config.session.strategy, StrategyKind::InformationGain);
    assert!(config.session.true_hypothesis.is_none());
    assert!(config.session.step_budget.is_none());
    assert!(config.session.seed.is_none());

    // Inference defaults
    assert_eq!(config.inference.cooperative_rounds, 1);
    assert_eq!(config.inference.self_teaching_rounds, 10);
    assert_eq!(config.inference.self_teaching_coupling, LearnerCoupling::Literal);
    assert_eq!(config.inference.teaching_floor, 1e-10);

    // Sampling defaults
    assert_eq!(config.sampling.mode, SamplingMode::Max);

    // Rollout defaults
    assert_eq!(config.rollout.n_steps, 2);
    assert!(config.rollout.parallel);
    assert_eq!(config.rollout.sub_learner_sampling, SamplingMode::Proportional);

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
    assert!(!config.observability.tracing_enabled);
}

#[test]
fn coupling_default_matches_inference_default() {
    assert_eq!(LearnerCoupling::default(), LearnerCoupling::Literal);
    assert_eq!(
        InferenceConfig::default().self_teaching_coupling,
        LearnerCoupling::default()
    );
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[session]
strategy = "rollout"
true_hypothesis = 2
seed = 7

[sampling]
mode = "proportional"
"#;
    let config = CoteachConfig::from_toml(toml).unwrap();
    assert_eq!(config.session.strategy, StrategyKind::Rollout);
    assert_eq!(config.session.true_hypothesis, Some(2));
    assert_eq!(config.session.seed, Some(7));
    assert_eq!(config.sampling.mode, SamplingMode::Proportional);
    // Non-overridden fields keep defaults
    assert_eq!(config.sampling.tie_tolerance, 1e-12);
    assert_eq!(config.inference.self_teaching_rounds, 10);
}

#[test]
fn config_serde_roundtrip() {
    let mut config = CoteachConfig::default();
    config.session.strategy = StrategyKind::CooperativeTeacher;
    config.session.seed = Some(11);
    let toml_str = toml::to_string(&config).unwrap();
    let roundtripped = CoteachConfig::from_toml(&toml_str).unwrap();
    assert_eq!(roundtripped.session.strategy, StrategyKind::CooperativeTeacher);
    assert_eq!(roundtripped.session.seed, Some(11));
    assert_eq!(
        roundtripped.inference.cooperative_rounds,
        config.inference.cooperative_rounds
    );
}

#[test]
fn zero_rounds_rejected() {
    let err = CoteachConfig::from_toml("[inference]\ncooperative_rounds = 0\n").unwrap_err();
    assert!(err.to_string().contains("inference.cooperative_rounds"));
}

#[test]
fn zero_step_budget_rejected() {
    assert!(CoteachConfig::from_toml("[session]\nstep_budget = 0\n").is_err());
}

#[test]
fn unknown_strategy_is_a_parse_error() {
    let err = CoteachConfig::from_toml("[session]\nstrategy = \"oracle\"\n").unwrap_err();
    assert!(err.to_string().contains("parse"));
}
