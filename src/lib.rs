// ABOUTME: Main library entry point for the Pierre form coach
// ABOUTME: Wires pose frames through metrics, smoothing and rep tracking into coaching sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Form Coach
//!
//! Real-time squat and lunge form analysis from skeletal pose landmarks.
//!
//! ## Architecture
//!
//! - **`pierre_form_core`**: landmarks, frames, metrics, phases, feedback codes, errors
//! - **`pierre_form_intelligence`**: EMA smoothing, joint geometry, rep state machines
//! - **Session**: per-athlete pipeline with observers and poll snapshots
//! - **Detector**: pose detector capability and a JSON-lines replay implementation
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pierre_form_coach::models::{ExerciseType, PoseSide};
//! use pierre_form_coach::session::{ExerciseSession, SideSelection};
//! use pierre_form_coach::config::FormAnalysisConfig;
//!
//! # fn frames() -> Vec<pierre_form_coach::models::PoseFrame> { Vec::new() }
//! fn main() -> anyhow::Result<()> {
//!     let config = FormAnalysisConfig::load()?;
//!     let mut session = ExerciseSession::new(
//!         ExerciseType::Squat,
//!         SideSelection::Fixed(PoseSide::Left),
//!         config,
//!         None,
//!     )?;
//!     for frame in frames() {
//!         let outcome = session.process_frame(&frame)?;
//!         if outcome.update.rep_completed {
//!             println!("rep {}", session.rep_count());
//!         }
//!     }
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────

/// Pose detector capability and recorded-frame replay
pub mod detector;

/// Logging configuration and subscriber bootstrap
pub mod logging;

/// Recorded-frame replay driver
pub mod replay;

/// Per-athlete analysis session
pub mod session;

pub use pierre_form_core::{constants, errors, models};
pub use pierre_form_intelligence::{config, filters, geometry, pose_metrics, state_machine};

pub use pierre_form_core::{ConfigError, FormAnalysisError, FormResult};
