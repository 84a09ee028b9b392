// ABOUTME: Core types and constants for the Pierre form analysis engine
// ABOUTME: Foundation crate with pose frame model, feedback registry, and error handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Form Core
//!
//! Foundation crate providing shared types and constants for the Pierre form
//! coaching engine. The pose detector, the intelligence crate and the session
//! pipeline all speak in these types.
//!
//! ## Modules
//!
//! - **errors**: `FormAnalysisError` and `ConfigError`
//! - **constants**: feedback code registry, default thresholds, log field keys
//! - **models**: landmarks, frames, sides, calibration, metrics, phases, feedback

/// Error types for configuration and frame-ordering failures
pub mod errors;

/// Feedback registry, default tuning values and log keys organized by domain
pub mod constants;

/// Pose data model (landmarks, frames, metrics, exercise phases)
pub mod models;

pub use errors::{ConfigError, FormAnalysisError, FormResult};
