//! Tests for configuration defaults, parsing and validation.
use kensho::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_defaults() {
    let config = OptimizationConfig::default();

    assert_eq!(config.target, OptimizationTarget::Balanced);
    assert_eq!(config.auto_mode, AutoMode::Medium);
    assert_eq!(config.max_rounds, 3);
    assert_eq!(config.max_bootstrapped_demos, 4);
    assert_eq!(config.max_labeled_demos, 16);
    assert_eq!(config.num_candidate_programs, 10);
    assert_eq!(config.num_threads, 4);
    assert_eq!(config.weight_behavioral, 0.7);
    assert_eq!(config.weight_performance, 0.3);
    assert_eq!(config.footprint_agreement_threshold, 1.0);
    assert_eq!(config.performance_improvement_threshold, 0.1);
    assert!(config.validate().is_ok());
}

#[test]
fn test_names_parse_case_insensitively() {
    let config = OptimizationConfig::from_names("Behavioral", " HEAVY ").expect("Valid names");
    assert_eq!(config.target, OptimizationTarget::Behavioral);
    assert_eq!(config.auto_mode, AutoMode::Heavy);

    assert_eq!("custom".parse::<AutoMode>(), Ok(AutoMode::Custom));
    assert_eq!(OptimizationTarget::Performance.to_string(), "performance");
    assert_eq!(AutoMode::Light.to_string(), "light");
}

#[test]
fn test_unknown_names_are_rejected() {
    assert_eq!(
        "speed".parse::<OptimizationTarget>(),
        Err(ConfigurationError::InvalidTarget("speed".to_string()))
    );
    assert_eq!(
        "".parse::<AutoMode>(),
        Err(ConfigurationError::InvalidAutoMode(String::new()))
    );
}

#[test]
fn test_from_toml_str_overrides_defaults() {
    let config = OptimizationConfig::from_toml_str(
        r#"
        [optimization]
        target = "behavioral"
        auto_mode = "light"
        max_labeled_demos = 8
        footprint_agreement_threshold = 0.95
        "#,
    )
    .expect("Valid configuration");

    assert_eq!(config.target, OptimizationTarget::Behavioral);
    assert_eq!(config.auto_mode, AutoMode::Light);
    assert_eq!(config.max_labeled_demos, 8);
    assert_eq!(config.footprint_agreement_threshold, 0.95);
    assert_eq!(config.max_rounds, 3);
}

#[test]
fn test_empty_toml_gives_defaults() {
    let config = OptimizationConfig::from_toml_str("").expect("Valid configuration");
    assert_eq!(config, OptimizationConfig::default());
}

#[test]
fn test_from_toml_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("kensho.toml");
    fs::write(
        &path,
        "[optimization]\ntarget = \"performance\"\nnum_threads = 8\n",
    )
    .expect("Failed to write config");

    let config = OptimizationConfig::from_toml(&path).expect("Valid configuration");

    assert_eq!(config.target, OptimizationTarget::Performance);
    assert_eq!(config.num_threads, 8);
}

#[test]
fn test_missing_file_is_a_read_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = OptimizationConfig::from_toml(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigurationError::Read { .. })));
}

#[test]
fn test_invalid_toml_values() {
    assert!(matches!(
        OptimizationConfig::from_toml_str("[optimization]\nmax_rounds = \"many\""),
        Err(ConfigurationError::Parse(_))
    ));
    assert!(matches!(
        OptimizationConfig::from_toml_str("[optimization]\ntarget = \"fastest\""),
        Err(ConfigurationError::InvalidTarget(_))
    ));
    assert!(matches!(
        OptimizationConfig::from_toml_str("[optimization]\nweight_performance = -0.1"),
        Err(ConfigurationError::OutOfRange {
            field: "weight_performance",
            ..
        })
    ));
    assert!(matches!(
        OptimizationConfig::from_toml_str("[optimization]\nnum_threads = 0"),
        Err(ConfigurationError::OutOfRange {
            field: "num_threads",
            ..
        })
    ));
}

#[test]
fn test_unbalanced_weights_are_allowed() {
    let config = OptimizationConfig::default().with_weights(0.5, 0.2);
    assert!(config.validate().is_ok());
}

#[test]
fn test_thresholds_must_be_unit_interval() {
    let config = OptimizationConfig::default().with_footprint_threshold(-0.01);
    assert!(config.validate().is_err());

    let mut config = OptimizationConfig::default();
    config.performance_improvement_threshold = f64::NAN;
    assert!(config.validate().is_err());
}

#[test]
fn test_performance_improvement_threshold_is_loaded_and_checked() {
    let config = OptimizationConfig::from_toml_str(
        "[optimization]\nperformance_improvement_threshold = 0.25\n",
    )
    .expect("Valid configuration");
    assert_eq!(config.performance_improvement_threshold, 0.25);

    let out_of_range = "[optimization]\nperformance_improvement_threshold = 1.5";
    assert!(matches!(
        OptimizationConfig::from_toml_str(out_of_range),
        Err(ConfigurationError::OutOfRange {
            field: "performance_improvement_threshold",
            ..
        })
    ));
}
