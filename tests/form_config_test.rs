// ABOUTME: Unit tests for form analysis configuration
// ABOUTME: Validates defaults, band ordering, JSON loading and PIERRE_FORM_* environment overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use pierre_form_coach::config::{FormAnalysisConfig, PhaseBands};
use pierre_form_coach::constants::{env_config, feedback_codes};
use pierre_form_coach::models::{ExerciseType, FeedbackCode};
use pierre_form_coach::ConfigError;
use serial_test::serial;
use std::env;

fn clear_env() {
    for name in env_config::ALL {
        env::remove_var(name);
    }
}

#[test]
fn test_default_config_validation() {
    let config = FormAnalysisConfig::default();
    assert!(config.validate().is_ok());
    assert!((config.calculator.min_landmark_confidence - 0.5).abs() < f64::EPSILON);
    assert!((config.squat.bands.bottom_enter_deg - 100.0).abs() < f64::EPSILON);
    assert!((config.lunge.shallow_back_knee_deg - 130.0).abs() < f64::EPSILON);
}

#[test]
fn test_overlapping_bands_rejected() {
    let mut config = FormAnalysisConfig::default();
    config.squat.bands.bottom_exit_deg = config.squat.bands.descent_start_deg + 1.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidRange(_))
    ));

    let bands = PhaseBands {
        standing_enter_deg: 150.0,
        descent_start_deg: 150.0,
        bottom_enter_deg: 90.0,
        bottom_exit_deg: 100.0,
        reversal_margin_deg: 5.0,
    };
    assert!(bands.validate().is_err());
}

#[test]
fn test_out_of_range_values_rejected() {
    let mut config = FormAnalysisConfig::default();
    config.calculator.min_landmark_confidence = 1.2;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValueOutOfRange(_))
    ));

    let mut config = FormAnalysisConfig::default();
    config.lunge.quality.min_rep_duration_ms = 20_000;
    assert!(config.validate().is_err());

    let mut config = FormAnalysisConfig::default();
    config.squat.bands.reversal_margin_deg = f64::NAN;
    assert!(config.validate().is_err());
}

#[test]
fn test_partial_json_falls_back_to_defaults() {
    let config = FormAnalysisConfig::from_json_str(
        r#"{"smoothing": {"alpha": 0.5}, "squat": {"shallow_knee_deg": 105.0}}"#,
    )
    .unwrap();
    assert!((config.smoothing.alpha - 0.5).abs() < f64::EPSILON);
    assert!((config.squat.shallow_knee_deg - 105.0).abs() < f64::EPSILON);
    assert_eq!(config.lunge, FormAnalysisConfig::default().lunge);
}

#[test]
fn test_partial_nested_sections_keep_exercise_defaults() {
    let config = FormAnalysisConfig::from_json_str(
        r#"{
            "squat": {"bands": {"bottom_enter_deg": 95.0}},
            "lunge": {"bands": {"reversal_margin_deg": 8.0}, "quality": {"max_knee_travel_ratio": 0.5}}
        }"#,
    )
    .unwrap();
    let defaults = FormAnalysisConfig::default();

    assert!((config.squat.bands.bottom_enter_deg - 95.0).abs() < f64::EPSILON);
    assert!((config.squat.bands.standing_enter_deg - defaults.squat.bands.standing_enter_deg).abs() < f64::EPSILON);
    assert_eq!(config.squat.quality, defaults.squat.quality);

    // Lunge keeps its own defaults, not the squat ones
    assert!((config.lunge.bands.reversal_margin_deg - 8.0).abs() < f64::EPSILON);
    assert!((config.lunge.bands.bottom_enter_deg - defaults.lunge.bands.bottom_enter_deg).abs() < f64::EPSILON);
    assert!((config.lunge.quality.max_knee_travel_ratio - 0.5).abs() < f64::EPSILON);
    assert!((config.lunge.quality.max_trunk_lean_deg - defaults.lunge.quality.max_trunk_lean_deg).abs() < f64::EPSILON);
}

#[test]
fn test_config_json_round_trip() {
    let defaults = FormAnalysisConfig::default();
    let json = serde_json::to_string(&defaults).unwrap();
    let parsed = FormAnalysisConfig::from_json_str(&json).unwrap();
    assert_eq!(parsed.squat.bands, defaults.squat.bands);
    assert_eq!(parsed.lunge.quality, defaults.lunge.quality);
}

#[test]
fn test_nested_override_is_still_validated() {
    let err = FormAnalysisConfig::from_json_str(r#"{"squat": {"bands": {"bottom_enter_deg": 130.0}}}"#)
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidRange(_)));
}

#[test]
fn test_malformed_json_is_parse_error() {
    let err = FormAnalysisConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));

    let err = FormAnalysisConfig::from_json_str(r#"{"smoothing": {"alpha": 2.0}}"#).unwrap_err();
    assert!(matches!(err, ConfigError::ValueOutOfRange(_)));
}

#[test]
#[serial]
fn test_environment_variable_override() {
    clear_env();
    env::set_var(env_config::EMA_ALPHA, "0.6");
    env::set_var(env_config::SQUAT_BOTTOM_DEG, "95");
    env::set_var(env_config::LUNGE_SHALLOW_DEG, " 110 ");

    let config = FormAnalysisConfig::load().unwrap();
    assert!((config.smoothing.alpha - 0.6).abs() < 1e-12);
    assert!((config.squat.bands.bottom_enter_deg - 95.0).abs() < 1e-12);
    assert!((config.lunge.shallow_front_knee_deg - 110.0).abs() < 1e-12);

    clear_env();
}

#[test]
#[serial]
fn test_environment_override_must_parse() {
    clear_env();
    env::set_var(env_config::MIN_CONFIDENCE, "high");
    let err = FormAnalysisConfig::load().unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().contains(env_config::MIN_CONFIDENCE));
    clear_env();
}

#[test]
#[serial]
fn test_environment_override_is_validated() {
    clear_env();
    env::set_var(env_config::SQUAT_BOTTOM_DEG, "140");
    assert!(FormAnalysisConfig::load().is_err());
    clear_env();
    assert_eq!(FormAnalysisConfig::load().unwrap(), FormAnalysisConfig::default());
}

#[test]
fn test_exercise_type_parsing() {
    assert_eq!("squat".parse::<ExerciseType>().unwrap(), ExerciseType::Squat);
    assert_eq!("LUNGE".parse::<ExerciseType>().unwrap(), ExerciseType::Lunge);
    assert!(matches!(
        "deadlift".parse::<ExerciseType>(),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_feedback_code_registry() {
    let codes: Vec<_> = FeedbackCode::ALL.iter().map(|c| c.as_str()).collect();
    assert_eq!(codes, feedback_codes::FEEDBACK_CODES);
    for code in FeedbackCode::ALL {
        assert_eq!(FeedbackCode::from_code(code.as_str()), Some(code));
        assert_eq!(
            serde_json::to_value(code).unwrap(),
            serde_json::Value::from(code.as_str())
        );
    }
    assert_eq!(FeedbackCode::from_code("bad_posture"), None);
}
