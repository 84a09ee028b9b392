// ABOUTME: Per-athlete analysis session: frame → metrics → smoothing → rep tracking
// ABOUTME: Pushes updates to registered observers and keeps a pollable snapshot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Exercise session
//!
//! A session owns one calculator, one smoother and one rep tracker. Frames must
//! arrive in non-decreasing timestamp order; an older frame is refused with
//! `FormAnalysisError::OutOfOrderFrame` and leaves the session untouched.
//! Sessions share nothing, so each camera feed gets its own.
//!
//! Observers see every feedback code as it is raised; pollers call
//! `drain_feedback`. Undrained codes are capped at `MAX_PENDING_FEEDBACK`,
//! oldest dropped first, so observer-only consumers never need to drain.

use pierre_form_core::constants::session_defaults;
use pierre_form_core::models::{
    CalibrationOffset, ExercisePhase, ExerciseType, FeedbackCode, PoseFrame, PoseMetrics, PoseSide,
};
use pierre_form_core::{FormAnalysisError, FormResult};
use pierre_form_intelligence::{
    FormAnalysisConfig, MetricsSmoother, PoseMetricsCalculator, RepTracker, RepUpdate,
    TransitionLog,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Which body side drives the metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideSelection {
    /// Always track this side
    Fixed(PoseSide),
    /// Track the side the detector sees best, re-checked while standing
    Auto,
}

/// Result of processing one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutcome {
    /// Frame timestamp
    pub timestamp_ms: i64,
    /// Side the metrics were computed for
    pub side: PoseSide,
    /// Smoothed metrics, `None` when the frame lacked usable landmarks
    pub metrics: Option<PoseMetrics>,
    /// What the rep tracker did with this frame
    pub update: RepUpdate,
}

/// Point-in-time view of a session for polling consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Session identifier
    pub session_id: Uuid,
    /// Exercise being tracked
    pub exercise: ExerciseType,
    /// Current phase
    pub phase: ExercisePhase,
    /// Reps counted
    pub rep_count: u32,
    /// Side currently tracked
    pub side: PoseSide,
    /// Metrics from the most recent frame
    pub latest_metrics: Option<PoseMetrics>,
    /// Feedback raised since the last drain
    pub pending_feedback: Vec<FeedbackCode>,
    /// Frames accepted
    pub frames_processed: u64,
    /// Accepted frames that produced no metrics
    pub frames_without_metrics: u64,
}

/// Push-style consumer of session events. Every callback defaults to a no-op.
pub trait SessionObserver: Send {
    /// Phase changed
    fn on_phase_change(&mut self, _session_id: Uuid, _from: ExercisePhase, _to: ExercisePhase) {}

    /// A rep was counted; `rep_count` is the new total
    fn on_rep_completed(&mut self, _session_id: Uuid, _rep_count: u32) {}

    /// A closed cycle raised feedback (never called with an empty set)
    fn on_feedback(&mut self, _session_id: Uuid, _feedback: &BTreeSet<FeedbackCode>) {}

    /// Structured transition record
    fn on_transition(&mut self, _session_id: Uuid, _log: &TransitionLog) {}
}

/// One athlete, one exercise, one camera feed
pub struct ExerciseSession {
    id: Uuid,
    config: FormAnalysisConfig,
    calibration: Option<CalibrationOffset>,
    side_selection: SideSelection,
    active_side: PoseSide,
    calculator: PoseMetricsCalculator,
    smoother: MetricsSmoother,
    tracker: RepTracker,
    latest_metrics: Option<PoseMetrics>,
    pending_feedback: Vec<FeedbackCode>,
    last_timestamp_ms: Option<i64>,
    frames_processed: u64,
    frames_without_metrics: u64,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl fmt::Debug for ExerciseSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExerciseSession")
            .field("id", &self.id)
            .field("exercise", &self.tracker.exercise())
            .field("phase", &self.tracker.phase())
            .field("rep_count", &self.tracker.rep_count())
            .field("active_side", &self.active_side)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl ExerciseSession {
    /// Create a session
    ///
    /// # Errors
    ///
    /// Returns `FormAnalysisError::Config` if `config` fails validation
    pub fn new(
        exercise: ExerciseType,
        side_selection: SideSelection,
        config: FormAnalysisConfig,
        calibration: Option<CalibrationOffset>,
    ) -> FormResult<Self> {
        config.validate()?;
        let smoother = MetricsSmoother::new(config.smoothing.alpha)?;
        let active_side = match side_selection {
            SideSelection::Fixed(side) => side,
            SideSelection::Auto => PoseSide::Left,
        };
        let id = Uuid::new_v4();
        info!(session_id = %id, %exercise, ?side_selection, "exercise session created");

        Ok(Self {
            id,
            config,
            calibration,
            side_selection,
            active_side,
            calculator: PoseMetricsCalculator::new(config.calculator),
            smoother,
            tracker: RepTracker::new(exercise, &config),
            latest_metrics: None,
            pending_feedback: Vec::new(),
            last_timestamp_ms: None,
            frames_processed: 0,
            frames_without_metrics: 0,
            observers: Vec::new(),
        })
    }

    /// Register an observer; observers are called in registration order
    pub fn add_observer(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    /// Run one frame through the pipeline
    ///
    /// # Errors
    ///
    /// Returns `FormAnalysisError::OutOfOrderFrame` if the frame is older than
    /// the last accepted one
    pub fn process_frame(&mut self, frame: &PoseFrame) -> FormResult<FrameOutcome> {
        let ts = frame.timestamp_ms;
        if let Some(previous_ms) = self.last_timestamp_ms {
            if ts < previous_ms {
                warn!(session_id = %self.id, previous_ms, received_ms = ts, "out-of-order frame rejected");
                return Err(FormAnalysisError::OutOfOrderFrame {
                    previous_ms,
                    received_ms: ts,
                });
            }
        }
        self.last_timestamp_ms = Some(ts);
        self.frames_processed += 1;

        self.select_side(frame);

        let metrics = self
            .calculator
            .calculate(frame, self.calibration.as_ref(), self.active_side)
            .map(|raw| self.smoother.smooth(&raw));
        if metrics.is_none() {
            self.frames_without_metrics += 1;
            debug!(session_id = %self.id, ts, "frame produced no metrics");
        }
        self.latest_metrics = metrics;

        let update = self.tracker.on_metrics(metrics.as_ref(), ts);
        self.dispatch(&update);
        self.queue_feedback(&update.feedback);

        Ok(FrameOutcome {
            timestamp_ms: ts,
            side: self.active_side,
            metrics,
            update,
        })
    }

    fn queue_feedback(&mut self, feedback: &BTreeSet<FeedbackCode>) {
        self.pending_feedback.extend(feedback.iter().copied());
        let excess = self
            .pending_feedback
            .len()
            .saturating_sub(session_defaults::MAX_PENDING_FEEDBACK);
        if excess > 0 {
            debug!(session_id = %self.id, dropped = excess, "pending feedback full, dropping oldest");
            self.pending_feedback.drain(..excess);
        }
    }

    /// With `SideSelection::Auto`, switch to the clearly better-seen side while standing
    fn select_side(&mut self, frame: &PoseFrame) {
        if self.side_selection != SideSelection::Auto || !self.tracker.phase().is_standing() {
            return;
        }
        let current = frame.side_confidence(self.active_side);
        let other = frame.side_confidence(self.active_side.opposite());
        if other > current + session_defaults::SIDE_SWITCH_MARGIN {
            debug!(
                session_id = %self.id,
                from = %self.active_side,
                to = %self.active_side.opposite(),
                current,
                other,
                "switching tracked side"
            );
            self.active_side = self.active_side.opposite();
        }
    }

    fn dispatch(&mut self, update: &RepUpdate) {
        if self.observers.is_empty() {
            return;
        }
        let id = self.id;
        let rep_count = self.tracker.rep_count();
        for observer in &mut self.observers {
            if let Some(log) = &update.transition {
                observer.on_phase_change(id, log.from, log.to);
                observer.on_transition(id, log);
            }
            if update.rep_completed {
                observer.on_rep_completed(id, rep_count);
            }
            if !update.feedback.is_empty() {
                observer.on_feedback(id, &update.feedback);
            }
        }
    }

    /// Take the feedback raised since the last drain, oldest first (at most
    /// `MAX_PENDING_FEEDBACK` codes)
    pub fn drain_feedback(&mut self) -> Vec<FeedbackCode> {
        std::mem::take(&mut self.pending_feedback)
    }

    /// Back to Standing with zero reps and fresh filters; observers and calibration stay
    pub fn reset(&mut self) {
        self.smoother.reset();
        self.tracker.reset();
        self.latest_metrics = None;
        self.pending_feedback.clear();
        self.last_timestamp_ms = None;
        self.frames_processed = 0;
        self.frames_without_metrics = 0;
        if let SideSelection::Fixed(side) = self.side_selection {
            self.active_side = side;
        }
        info!(session_id = %self.id, "exercise session reset");
    }

    /// Switch exercise; resets all tracking state
    pub fn change_exercise(&mut self, exercise: ExerciseType) {
        self.tracker = RepTracker::new(exercise, &self.config);
        self.reset();
        info!(session_id = %self.id, %exercise, "exercise changed");
    }

    /// Replace the calibration used for subsequent frames
    pub fn set_calibration(&mut self, calibration: Option<CalibrationOffset>) {
        self.calibration = calibration;
    }

    /// Poll the current state
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            exercise: self.tracker.exercise(),
            phase: self.tracker.phase(),
            rep_count: self.tracker.rep_count(),
            side: self.active_side,
            latest_metrics: self.latest_metrics,
            pending_feedback: self.pending_feedback.clone(),
            frames_processed: self.frames_processed,
            frames_without_metrics: self.frames_without_metrics,
        }
    }

    /// Session identifier
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Exercise being tracked
    #[must_use]
    pub const fn exercise(&self) -> ExerciseType {
        self.tracker.exercise()
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> ExercisePhase {
        self.tracker.phase()
    }

    /// Reps counted
    #[must_use]
    pub const fn rep_count(&self) -> u32 {
        self.tracker.rep_count()
    }

    /// Metrics from the most recent frame
    #[must_use]
    pub const fn latest_metrics(&self) -> Option<&PoseMetrics> {
        self.latest_metrics.as_ref()
    }

    /// Side currently tracked
    #[must_use]
    pub const fn active_side(&self) -> PoseSide {
        self.active_side
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &FormAnalysisConfig {
        &self.config
    }

    /// Calibration in use
    #[must_use]
    pub const fn calibration(&self) -> Option<&CalibrationOffset> {
        self.calibration.as_ref()
    }
}
