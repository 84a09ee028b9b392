// ABOUTME: Structured record of one phase transition, rendered in the fixed key=value log format
// ABOUTME: Emitted through tracing with the same values as structured fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_form_core::constants::log_keys;
use pierre_form_core::models::{ExercisePhase, PoseSide};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// One phase transition with the metrics that caused it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionLog {
    /// Phase left
    pub from: ExercisePhase,
    /// Phase entered
    pub to: ExercisePhase,
    /// Frame timestamp (ms)
    pub ts: i64,
    /// Tracked body side
    pub side: PoseSide,
    /// Smoothed knee angle at the transition
    pub knee: f64,
    /// Smoothed trunk lean at the transition
    pub trunk: f64,
}

impl TransitionLog {
    /// Exercise-qualified name of the entered phase (`SQUAT_BOTTOM`)
    #[must_use]
    pub fn phase(&self) -> String {
        self.to.qualified_name()
    }

    /// Write the record to the transition log target
    pub fn emit(&self) {
        info!(
            target: log_keys::TRANSITION_TARGET,
            from = self.from.name(),
            to = self.to.name(),
            ts = self.ts,
            side = self.side.as_str(),
            phase = %self.phase(),
            knee = self.knee,
            trunk = self.trunk,
            "{self}"
        );
    }
}

impl fmt::Display for TransitionLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={} {}={} {}={} {}={} {}={} {}={:.1} {}={:.1}",
            log_keys::FROM,
            self.from.name(),
            log_keys::TO,
            self.to.name(),
            log_keys::TS,
            self.ts,
            log_keys::SIDE,
            self.side,
            log_keys::PHASE,
            self.phase(),
            log_keys::KNEE,
            self.knee,
            log_keys::TRUNK,
            self.trunk,
        )
    }
}
