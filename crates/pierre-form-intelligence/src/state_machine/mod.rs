// ABOUTME: Squat and lunge phase/rep state machines and the tagged RepTracker wrapper
// ABOUTME: One smoothed metrics sample in, one RepUpdate out
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Phase and rep tracking
//!
//! Both exercises run the same hysteresis cycle on the tracked knee angle and
//! differ only in phase names and in the feedback judged when a cycle closes.

mod cycle;
mod lunge;
mod squat;
mod transition_log;

pub use lunge::LungeStateMachine;
pub use squat::SquatStateMachine;
pub use transition_log::TransitionLog;

use pierre_form_core::models::{ExercisePhase, ExerciseType, FeedbackCode, PoseMetrics};
use std::collections::BTreeSet;

use crate::config::FormAnalysisConfig;
use cycle::CycleStep;

/// What one metrics sample changed
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RepUpdate {
    /// The phase differs from the previous sample's phase
    pub phase_changed: bool,
    /// A qualifying cycle closed and the rep counter went up by one
    pub rep_completed: bool,
    /// Codes judged at cycle close; empty on every other sample
    pub feedback: BTreeSet<FeedbackCode>,
    /// Transition record, present iff `phase_changed`
    pub transition: Option<TransitionLog>,
}

impl RepUpdate {
    /// Update that changed nothing
    #[must_use]
    pub fn unchanged() -> Self {
        Self::default()
    }

    fn for_step(
        step: &CycleStep,
        metrics: &PoseMetrics,
        ts: i64,
        phase_of: fn(cycle::CyclePhase) -> ExercisePhase,
    ) -> Self {
        let transition = TransitionLog {
            from: phase_of(step.from),
            to: phase_of(step.to),
            ts,
            side: metrics.side,
            knee: metrics.knee_angle,
            trunk: metrics.trunk_lean_angle,
        };
        transition.emit();
        Self {
            phase_changed: true,
            rep_completed: false,
            feedback: BTreeSet::new(),
            transition: Some(transition),
        }
    }
}

/// Rep tracker for whichever exercise a session runs
#[derive(Debug, Clone)]
pub enum RepTracker {
    /// Squat tracking
    Squat(SquatStateMachine),
    /// Lunge tracking
    Lunge(LungeStateMachine),
}

impl RepTracker {
    /// Tracker for `exercise` with thresholds from `config`
    #[must_use]
    pub fn new(exercise: ExerciseType, config: &FormAnalysisConfig) -> Self {
        match exercise {
            ExerciseType::Squat => Self::Squat(SquatStateMachine::new(config.squat)),
            ExerciseType::Lunge => Self::Lunge(LungeStateMachine::new(config.lunge)),
        }
    }

    /// Feed one smoothed sample (`None` when the frame had no usable metrics)
    pub fn on_metrics(&mut self, metrics: Option<&PoseMetrics>, timestamp_ms: i64) -> RepUpdate {
        match self {
            Self::Squat(machine) => machine.on_metrics(metrics, timestamp_ms),
            Self::Lunge(machine) => machine.on_metrics(metrics, timestamp_ms),
        }
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> ExercisePhase {
        match self {
            Self::Squat(machine) => ExercisePhase::Squat(machine.phase()),
            Self::Lunge(machine) => ExercisePhase::Lunge(machine.phase()),
        }
    }

    /// Reps counted since creation or the last reset
    #[must_use]
    pub const fn rep_count(&self) -> u32 {
        match self {
            Self::Squat(machine) => machine.rep_count(),
            Self::Lunge(machine) => machine.rep_count(),
        }
    }

    /// Exercise being tracked
    #[must_use]
    pub const fn exercise(&self) -> ExerciseType {
        match self {
            Self::Squat(_) => ExerciseType::Squat,
            Self::Lunge(_) => ExerciseType::Lunge,
        }
    }

    /// Back to Standing with zero reps
    pub fn reset(&mut self) {
        match self {
            Self::Squat(machine) => machine.reset(),
            Self::Lunge(machine) => machine.reset(),
        }
    }
}
