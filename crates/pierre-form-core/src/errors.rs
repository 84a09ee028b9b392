// ABOUTME: Error types for the form analysis engine
// ABOUTME: Separates caller-must-fix configuration errors from frame contract violations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Form Analysis Errors
//!
//! Noisy or missing sensor data is never an error in this engine: it shows up as
//! `None` metrics and the state machines hold their phase. The variants here cover
//! the two things a caller has to fix:
//! - invalid configuration, rejected at construction time
//! - frames delivered out of timestamp order

use std::env;
use thiserror::Error;

/// Result alias used throughout the form analysis crates
pub type FormResult<T> = Result<T, FormAnalysisError>;

/// Errors raised by the form analysis engine
#[derive(Debug, Error)]
pub enum FormAnalysisError {
    /// EMA smoothing factor outside (0, 1]
    #[error("Invalid EMA alpha {0}: must be in (0, 1]")]
    InvalidAlpha(f64),

    /// Frame timestamp went backwards
    #[error("Out-of-order frame: received ts={received_ms} after ts={previous_ms}")]
    OutOfOrderFrame {
        /// Timestamp of the last accepted frame
        previous_ms: i64,
        /// Timestamp of the rejected frame
        received_ms: i64,
    },

    /// Analysis configuration failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Thresholds are not ordered the way the hysteresis bands require
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Environment variable access error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] env::VarError),

    /// Failed to parse a configuration value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
