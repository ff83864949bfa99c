//! Unit tests for core Kensho functionality.
use kensho::confidence::{
    DEFAULT_CONFIDENCE, confidence_from_value, confidence_or_default, parse_confidence,
};
use kensho::error::{GraphError, SerializationError, TransformerError, ValidationError};
use kensho::footprint::FootprintExtractor;
use kensho::logging::LoggingConfig;
use kensho::objective::clamp_unit;
use kensho::prelude::*;
use kensho::time::format_utc;
use kensho::transformer::StrategyTier;
use serde_json::json;

#[test]
fn test_parse_confidence_fractions() {
    assert_eq!(parse_confidence("0.85"), Some(0.85));
    assert_eq!(parse_confidence("  1 "), Some(1.0));
    assert_eq!(parse_confidence("0"), Some(0.0));
}

#[test]
fn test_parse_confidence_percentages() {
    assert_eq!(parse_confidence("85%"), Some(0.85));
    assert_eq!(parse_confidence("85 %"), Some(0.85));
    assert_eq!(parse_confidence("42 percent"), Some(0.42));
    assert_eq!(parse_confidence("50PCT"), Some(0.5));
}

#[test]
fn test_parse_confidence_clamps() {
    assert_eq!(parse_confidence("1.5"), Some(1.0));
    assert_eq!(parse_confidence("250%"), Some(1.0));
    assert_eq!(parse_confidence("-0.2"), Some(0.0));
}

#[test]
fn test_parse_confidence_rejects_garbage() {
    for raw in ["", "   ", "high", "%", "NaN", "inf", "0.8 maybe"] {
        assert_eq!(parse_confidence(raw), None, "accepted {:?}", raw);
    }
    assert_eq!(confidence_or_default("high"), DEFAULT_CONFIDENCE);
}

#[test]
fn test_confidence_from_json() {
    assert_eq!(confidence_from_value(&json!(0.3)), Some(0.3));
    assert_eq!(confidence_from_value(&json!(3)), Some(1.0));
    assert_eq!(confidence_from_value(&json!("30%")), Some(0.3));
    assert_eq!(confidence_from_value(&json!(null)), None);
    assert_eq!(confidence_from_value(&json!([0.3])), None);
}

#[test]
fn test_clamp_unit() {
    assert_eq!(clamp_unit(0.5), 0.5);
    assert_eq!(clamp_unit(-1.0), 0.0);
    assert_eq!(clamp_unit(2.0), 1.0);
    assert_eq!(clamp_unit(f64::NAN), 0.0);
}

#[test]
fn test_split_kind_display_and_parse() {
    assert_eq!(SplitKind::Xor.to_string(), "xor");
    assert_eq!("Or".parse::<SplitKind>(), Ok(SplitKind::Or));
    assert_eq!("nand".parse::<SplitKind>(), Err("nand".to_string()));
    assert_eq!(SplitKind::default(), SplitKind::And);
}

#[test]
fn test_split_relation_mapping() {
    assert_eq!(
        FootprintExtractor::split_relation(SplitKind::And),
        RelationKind::Concurrency
    );
    assert_eq!(
        FootprintExtractor::split_relation(SplitKind::Or),
        RelationKind::Concurrency
    );
    assert_eq!(
        FootprintExtractor::split_relation(SplitKind::Xor),
        RelationKind::Exclusivity
    );
}

#[test]
fn test_relation_kind_names() {
    let names: Vec<_> = RelationKind::ALL.iter().map(|k| k.to_string()).collect();
    assert_eq!(names, ["direct_succession", "concurrency", "exclusivity"]);
    assert!(!RelationKind::DirectSuccession.is_symmetric());
    assert!(RelationKind::Exclusivity.is_symmetric());
}

#[test]
fn test_strategy_tier_display() {
    assert_eq!(StrategyTier::Primary.to_string(), "primary");
    assert_eq!(StrategyTier::IdentityFallback.to_string(), "identity_fallback");
}

#[test]
fn test_error_display() {
    let err = ConfigurationError::InvalidTarget("fastest".to_string());
    assert!(err.to_string().contains("'fastest'"));

    let err = ConfigurationError::OutOfRange {
        field: "num_threads",
        value: "0".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Configuration value 'num_threads' is out of range: 0"
    );

    let err = ValidationError::MissingOutput { index: 3 };
    assert!(err.to_string().starts_with("Training record 3"));

    let err = TransformerError::Unavailable {
        strategy: "evolution".to_string(),
        reason: "not installed".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Strategy 'evolution' is unavailable: not installed"
    );

    let err = GraphError::InvalidSplitKind {
        transition_id: "t1".to_string(),
        value: "nand".to_string(),
    };
    assert!(err.to_string().contains("'t1'"));

    let err = SerializationError::HashMismatch {
        expected: "abc".to_string(),
        actual: "def".to_string(),
    };
    assert!(err.to_string().contains("'abc'"));
}

#[test]
fn test_format_utc() {
    let timestamp = chrono::DateTime::parse_from_rfc3339("2024-03-01T12:30:45.5+02:00")
        .expect("Valid timestamp")
        .with_timezone(&chrono::Utc);
    assert_eq!(format_utc(&timestamp), "2024-03-01T10:30:45.500Z");
}

#[test]
fn test_logging_config_defaults() {
    let config = LoggingConfig::default();
    assert_eq!(config.level_filter, "info,kensho=info");
    assert!(!config.json);
    assert!(config.timestamps);
}
