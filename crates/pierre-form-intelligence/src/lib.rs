// ABOUTME: Form analysis engine: signal smoothing, joint geometry, and rep state machines
// ABOUTME: Pure synchronous value-in/value-out algorithms driven one pose frame at a time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Form Intelligence
//!
//! Turns a stream of pose frames into joint metrics, phase transitions, rep
//! counts and form feedback.
//!
//! ```text
//! PoseFrame ─▶ PoseMetricsCalculator ─▶ MetricsSmoother (EmaFilter per signal)
//!           ─▶ RepTracker (SquatStateMachine | LungeStateMachine) ─▶ RepUpdate
//! ```
//!
//! Nothing here blocks or allocates per frame beyond the feedback set, and no
//! state is shared between instances: one smoother and one tracker per session.

/// Analysis configuration: confidence gate, smoothing, phase bands, form bounds
pub mod config;

/// Stateful smoothing filters
pub mod filters;

/// 2D vector helpers for joint angles
pub mod geometry;

/// Per-frame joint metrics from landmarks
pub mod pose_metrics;

/// Squat and lunge phase/rep state machines
pub mod state_machine;

pub use config::{
    CalculatorConfig, FormAnalysisConfig, LungeThresholds, PhaseBands, RepQualityBounds,
    SmoothingConfig, SquatThresholds,
};
pub use filters::{EmaFilter, MetricsSmoother};
pub use pose_metrics::PoseMetricsCalculator;
pub use state_machine::{
    LungeStateMachine, RepTracker, RepUpdate, SquatStateMachine, TransitionLog,
};
