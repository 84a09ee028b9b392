// ABOUTME: Form analysis configuration with environment overrides and validation
// ABOUTME: Bundles the confidence gate, smoothing factor, and per-exercise thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Form Analysis Configuration
//!
//! Defaults come from `pierre_form_core::constants`. `FormAnalysisConfig::load`
//! applies `PIERRE_FORM_*` environment overrides on top and validates the
//! result; invalid configuration is a caller error and is never patched up.

mod thresholds;

pub use thresholds::{LungeThresholds, PhaseBands, RepQualityBounds, SquatThresholds};

use pierre_form_core::constants::{calculator_defaults, env_config, smoothing_defaults};
use pierre_form_core::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::debug;

/// Landmark gating for the metrics calculator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Landmarks below this confidence make the frame's metrics undefined
    pub min_landmark_confidence: f64,
    /// Segments shorter than this (pixels) are treated as degenerate
    pub min_segment_length: f64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            min_landmark_confidence: calculator_defaults::MIN_LANDMARK_CONFIDENCE,
            min_segment_length: calculator_defaults::MIN_SEGMENT_LENGTH,
        }
    }
}

/// Signal smoothing settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// EMA weight of the newest sample, in (0, 1]
    pub alpha: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            alpha: smoothing_defaults::EMA_ALPHA,
        }
    }
}

/// Complete analysis configuration for one session
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormAnalysisConfig {
    /// Landmark gating
    pub calculator: CalculatorConfig,
    /// EMA smoothing
    pub smoothing: SmoothingConfig,
    /// Squat thresholds
    pub squat: SquatThresholds,
    /// Lunge thresholds
    pub lunge: LungeThresholds,
}

impl FormAnalysisConfig {
    /// Defaults plus environment overrides, validated
    ///
    /// # Errors
    ///
    /// Returns an error if an override does not parse or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document (missing sections fall back to defaults), then validate
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON or a validation error
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `PIERRE_FORM_*` environment variable overrides
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if a set variable is not a number
    pub fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(value) = env_parse::<f64>(env_config::MIN_CONFIDENCE)? {
            self.calculator.min_landmark_confidence = value;
        }
        if let Some(value) = env_parse::<f64>(env_config::EMA_ALPHA)? {
            self.smoothing.alpha = value;
        }
        if let Some(value) = env_parse::<f64>(env_config::SQUAT_BOTTOM_DEG)? {
            self.squat.bands.bottom_enter_deg = value;
        }
        if let Some(value) = env_parse::<f64>(env_config::SQUAT_SHALLOW_DEG)? {
            self.squat.shallow_knee_deg = value;
        }
        if let Some(value) = env_parse::<f64>(env_config::LUNGE_BOTTOM_DEG)? {
            self.lunge.bands.bottom_enter_deg = value;
        }
        if let Some(value) = env_parse::<f64>(env_config::LUNGE_SHALLOW_DEG)? {
            self.lunge.shallow_front_knee_deg = value;
        }
        Ok(self)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` describing the first violated constraint
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.calculator.min_landmark_confidence) {
            return Err(ConfigError::ValueOutOfRange(
                "min_landmark_confidence must be within [0, 1]",
            ));
        }
        if !self.calculator.min_segment_length.is_finite()
            || self.calculator.min_segment_length <= 0.0
        {
            return Err(ConfigError::ValueOutOfRange(
                "min_segment_length must be a positive number",
            ));
        }
        if !(self.smoothing.alpha > 0.0 && self.smoothing.alpha <= 1.0) {
            return Err(ConfigError::ValueOutOfRange(
                "smoothing alpha must be within (0, 1]",
            ));
        }
        self.squat.validate()?;
        self.lunge.validate()?;
        Ok(())
    }
}

fn env_parse<T>(name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => {
            debug!(variable = name, value = %raw, "applying form config override");
            raw.trim()
                .parse()
                .map(Some)
                .map_err(|e| ConfigError::Parse(format!("{name}: {e}")))
        }
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
