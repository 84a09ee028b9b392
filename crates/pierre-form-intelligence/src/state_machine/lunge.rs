// ABOUTME: Lunge phase/rep state machine driven by the front (tracked-side) knee
// ABOUTME: Judges front and back knee depth plus the shared form bounds at cycle close
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_form_core::models::{ExercisePhase, FeedbackCode, LungePhase, PoseMetrics};
use std::collections::BTreeSet;
use tracing::debug;

use super::cycle::{CycleEngine, CycleEvent, CyclePhase, CycleStats};
use super::RepUpdate;
use crate::config::LungeThresholds;

/// Lunge tracking: Standing → Lowering → Bottom → Rising → Standing
#[derive(Debug, Clone)]
pub struct LungeStateMachine {
    thresholds: LungeThresholds,
    engine: CycleEngine,
    reps: u32,
}

impl LungeStateMachine {
    /// Create a machine in Standing with zero reps
    #[must_use]
    pub const fn new(thresholds: LungeThresholds) -> Self {
        Self {
            thresholds,
            engine: CycleEngine::new(thresholds.bands),
            reps: 0,
        }
    }

    /// Feed one smoothed sample; `knee_angle` is the front knee and
    /// `opposite_knee_angle` the back knee.
    pub fn on_metrics(&mut self, metrics: Option<&PoseMetrics>, timestamp_ms: i64) -> RepUpdate {
        let event = self.engine.advance(metrics, timestamp_ms);
        let (CycleEvent::Transition(step), Some(metrics)) = (event, metrics) else {
            return RepUpdate::unchanged();
        };

        let mut update = RepUpdate::for_step(&step, metrics, timestamp_ms, |p| {
            ExercisePhase::Lunge(lunge_phase(p))
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
                min_front_knee = stats.min_knee,
                min_back_knee = ?stats.min_opposite_knee,
                duration_ms = stats.duration_ms(),
                feedback = ?update.feedback,
                "lunge cycle closed"
            );
        }
        update
    }

    fn judge(&self, stats: &CycleStats) -> BTreeSet<FeedbackCode> {
        let mut feedback = BTreeSet::new();
        if stats.min_knee > self.thresholds.shallow_front_knee_deg {
            feedback.insert(FeedbackCode::TooShallowFront);
        }
        if stats.reached_bottom {
            if stats.min_knee < self.thresholds.too_deep_front_knee_deg {
                feedback.insert(FeedbackCode::TooDeepFront);
            }
            // Back knee is only judged when it was seen during the cycle
            if stats
                .min_opposite_knee
                .is_some_and(|back| back > self.thresholds.shallow_back_knee_deg)
            {
                feedback.insert(FeedbackCode::TooShallowBack);
            }
            stats.quality_feedback(&self.thresholds.quality, &mut feedback);
        }
        feedback
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> LungePhase {
        lunge_phase(self.engine.phase())
    }

    /// Reps counted so far
    #[must_use]
    pub const fn rep_count(&self) -> u32 {
        self.reps
    }

    /// Thresholds in use
    #[must_use]
    pub const fn thresholds(&self) -> &LungeThresholds {
        &self.thresholds
    }

    /// Back to Standing with zero reps
    pub fn reset(&mut self) {
        self.engine.reset();
        self.reps = 0;
    }
}

const fn lunge_phase(phase: CyclePhase) -> LungePhase {
    match phase {
        CyclePhase::Standing => LungePhase::Standing,
        CyclePhase::Lowering => LungePhase::Lowering,
        CyclePhase::Bottom => LungePhase::Bottom,
        CyclePhase::Rising => LungePhase::Rising,
    }
}
