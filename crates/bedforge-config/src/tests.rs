//! Tests for solver configuration.

use super::*;

#[test]
fn test_defaults() {
    let config = SolverConfig::default();
    assert_eq!(config.environment_mode, EnvironmentMode::NoAssert);
    assert!(!config.environment_mode.is_asserted());
    assert_eq!(config.random_seed, None);
    assert_eq!(config.penalty_weights, PenaltyWeights::default());
    assert_eq!(config.construction.retry_budget, 10_000);
    assert_eq!(config.tabu.tenure, 10);
    assert_eq!(config.tabu.move_sample_size, 256);
    assert!(config.tabu.aspiration_enabled);
    assert_eq!(config.termination.iteration_limit, 1000);
    assert_eq!(config.time_limit(), None);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_toml_matches_defaults() {
    let config = SolverConfig::from_toml_str("").unwrap();
    assert_eq!(config, SolverConfig::default());
    assert_eq!(config.parallel_runs, 1);
}

#[test]
fn test_toml_parsing() {
    let toml = r#"
        environment_mode = "full_assert"
        random_seed = 42
        parallel_runs = 4

        [penalty_weights]
        gender = 80
        delay = 5

        [construction]
        retry_budget = 50

        [tabu]
        tenure = 7
        move_sample_size = 64
        aspiration_enabled = false

        [termination]
        iteration_limit = 200
        millis_spent_limit = 1500
        unimproved_iteration_limit = 40
    "#;

    let config = SolverConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::FullAssert);
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.parallel_runs, 4);
    assert_eq!(config.penalty_weights.gender, 80);
    assert_eq!(config.penalty_weights.delay, 5);
    assert_eq!(config.penalty_weights.transfer, 100);
    assert_eq!(config.construction.retry_budget, 50);
    assert_eq!(config.tabu.tenure, 7);
    assert_eq!(config.tabu.move_sample_size, 64);
    assert!(!config.tabu.aspiration_enabled);
    assert_eq!(config.termination.iteration_limit, 200);
    assert_eq!(config.termination.unimproved_iteration_limit, Some(40));
    assert_eq!(config.time_limit(), Some(Duration::from_millis(1500)));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        environment_mode: fast_assert
        random_seed: 42
        tabu:
          tenure: 12
        termination:
          seconds_spent_limit: 30
    "#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::FastAssert);
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.tabu.tenure, 12);
    assert_eq!(config.tabu.move_sample_size, 256);
    assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
}

#[test]
fn test_reproducibility_is_not_an_environment_mode() {
    for mode in ["reproducible", "non_reproducible"] {
        let toml = format!("environment_mode = \"{mode}\"");
        let err = SolverConfig::from_toml_str(&toml).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)), "{mode}");
    }
}

#[test]
fn test_huge_time_limit_saturates() {
    let config = SolverConfig::new().with_termination_seconds(u64::MAX);
    assert_eq!(config.time_limit(), Some(Duration::from_millis(u64::MAX)));

    let mut config = config;
    config.termination.millis_spent_limit = Some(500);
    assert_eq!(config.time_limit(), Some(Duration::from_millis(u64::MAX)));
}

#[test]
fn test_invalid_toml() {
    let err = SolverConfig::from_toml_str("random_seed = \"abc\"").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_missing_file() {
    let err = SolverConfig::load("/nonexistent/bedforge.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_validate_rejects_zero_values() {
    let cases = [
        (SolverConfig::new().with_retry_budget(0), "construction.retry_budget"),
        (SolverConfig::new().with_tabu_tenure(0), "tabu.tenure"),
        (SolverConfig::new().with_move_sample_size(0), "tabu.move_sample_size"),
        (SolverConfig::new().with_parallel_runs(0), "parallel_runs"),
    ];

    for (config, key) in cases {
        match config.validate() {
            Err(ConfigError::Invalid(msg)) => assert!(msg.contains(key), "{msg}"),
            other => panic!("expected invalid {key}, got {other:?}"),
        }
    }
}

#[test]
fn test_builder() {
    let config = SolverConfig::new()
        .with_random_seed(123)
        .with_termination_seconds(60)
        .with_iteration_limit(10)
        .with_environment_mode(EnvironmentMode::FastAssert);

    assert_eq!(config.random_seed, Some(123));
    assert_eq!(config.termination.iteration_limit, 10);
    assert_eq!(config.time_limit(), Some(Duration::from_secs(60)));
    assert!(config.environment_mode.is_asserted());
    assert!(!config.environment_mode.is_full_assert());
}
