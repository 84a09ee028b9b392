// ABOUTME: Squat phase/rep state machine on the smoothed knee angle
// ABOUTME: Judges depth, knee tracking, trunk lean and tempo when each cycle closes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_form_core::models::{ExercisePhase, FeedbackCode, PoseMetrics, SquatPhase};
use std::collections::BTreeSet;
use tracing::debug;

use super::cycle::{CycleEngine, CycleEvent, CyclePhase, CycleStats};
use super::RepUpdate;
use crate::config::SquatThresholds;

/// Squat tracking: Standing → Descending → Bottom → Ascending → Standing
#[derive(Debug, Clone)]
pub struct SquatStateMachine {
    thresholds: SquatThresholds,
    engine: CycleEngine,
    reps: u32,
}

impl SquatStateMachine {
    /// Create a machine in Standing with zero reps
    #[must_use]
    pub const fn new(thresholds: SquatThresholds) -> Self {
        Self {
            thresholds,
            engine: CycleEngine::new(thresholds.bands),
            reps: 0,
        }
    }

    /// Feed one smoothed sample.
    ///
    /// Missing or non-finite metrics hold the phase; a timestamp older than the
    /// last accepted one is ignored.
    pub fn on_metrics(&mut self, metrics: Option<&PoseMetrics>, timestamp_ms: i64) -> RepUpdate {
        let event = self.engine.advance(metrics, timestamp_ms);
        let (CycleEvent::Transition(step), Some(metrics)) = (event, metrics) else {
            return RepUpdate::unchanged();
        };

        let mut update = RepUpdate::for_step(&step, metrics, timestamp_ms, |p| {
            ExercisePhase::Squat(squat_phase(p))
        });
        if let Some(stats) = step.closed {
            if stats.reached_bottom {
                self.reps += 1;
                update.rep_completed = true;
            }
            update.feedback = self.judge(&stats);
            debug!(
                reps = self.reps,
                counted = stats.reached_bottom,
                min_knee = stats.min_knee,
                duration_ms = stats.duration_ms(),
                feedback = ?update.feedback,
                "squat cycle closed"
            );
        }
        update
    }

    fn judge(&self, stats: &CycleStats) -> BTreeSet<FeedbackCode> {
        let mut feedback = BTreeSet::new();
        if stats.min_knee > self.thresholds.shallow_knee_deg {
            feedback.insert(FeedbackCode::TooShallow);
        }
        if stats.reached_bottom {
            if stats.min_knee < self.thresholds.too_deep_knee_deg {
                feedback.insert(FeedbackCode::TooDeep);
            }
            stats.quality_feedback(&self.thresholds.quality, &mut feedback);
        }
        feedback
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> SquatPhase {
        squat_phase(self.engine.phase())
    }

    /// Reps counted so far
    #[must_use]
    pub const fn rep_count(&self) -> u32 {
        self.reps
    }

    /// Thresholds in use
    #[must_use]
    pub const fn thresholds(&self) -> &SquatThresholds {
        &self.thresholds
    }

    /// Back to Standing with zero reps
    pub fn reset(&mut self) {
        self.engine.reset();
        self.reps = 0;
    }
}

const fn squat_phase(phase: CyclePhase) -> SquatPhase {
    match phase {
        CyclePhase::Standing => SquatPhase::Standing,
        CyclePhase::Lowering => SquatPhase::Descending,
        CyclePhase::Bottom => SquatPhase::Bottom,
        CyclePhase::Rising => SquatPhase::Ascending,
    }
}
