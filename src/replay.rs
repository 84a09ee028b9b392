// ABOUTME: Drives recorded pose frames through a session and collects a replay report
// ABOUTME: Out-of-order frames are counted and skipped instead of aborting the replay
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_form_core::models::{ExerciseType, FeedbackCode, PoseFrame};
use pierre_form_intelligence::TransitionLog;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::session::ExerciseSession;

/// Feedback raised when one cycle closed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleFeedback {
    /// Timestamp of the closing frame
    pub ts: i64,
    /// Whether the cycle counted as a rep
    pub counted: bool,
    /// Rep total after the cycle closed
    pub rep_count: u32,
    /// Codes raised, in registry order
    pub codes: Vec<FeedbackCode>,
}

/// Everything a replay produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    /// Session used for the replay
    pub session_id: Uuid,
    /// Exercise tracked
    pub exercise: ExerciseType,
    /// Frames accepted by the session
    pub frames_processed: u64,
    /// Accepted frames without usable metrics
    pub frames_without_metrics: u64,
    /// Frames refused for going back in time
    pub frames_rejected: u64,
    /// Reps counted
    pub rep_count: u32,
    /// Every phase transition in order
    pub transitions: Vec<TransitionLog>,
    /// Feedback per closed cycle (cycles without feedback are omitted)
    pub feedback: Vec<CycleFeedback>,
}

/// Feed `frames` through `session` in order
pub fn replay_frames<I>(session: &mut ExerciseSession, frames: I) -> ReplayReport
where
    I: IntoIterator<Item = PoseFrame>,
{
    let mut transitions = Vec::new();
    let mut feedback = Vec::new();
    let mut frames_rejected = 0;

    for frame in frames {
        let outcome = match session.process_frame(&frame) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "skipping frame during replay");
                frames_rejected += 1;
                continue;
            }
        };
        if let Some(log) = outcome.update.transition {
            transitions.push(log);
        }
        if !outcome.update.feedback.is_empty() {
            feedback.push(CycleFeedback {
                ts: outcome.timestamp_ms,
                counted: outcome.update.rep_completed,
                rep_count: session.rep_count(),
                codes: outcome.update.feedback.into_iter().collect(),
            });
        }
    }

    let snapshot = session.snapshot();
    info!(
        session_id = %snapshot.session_id,
        frames = snapshot.frames_processed,
        rejected = frames_rejected,
        reps = snapshot.rep_count,
        "replay finished"
    );
    ReplayReport {
        session_id: snapshot.session_id,
        exercise: snapshot.exercise,
        frames_processed: snapshot.frames_processed,
        frames_without_metrics: snapshot.frames_without_metrics,
        frames_rejected,
        rep_count: snapshot.rep_count,
        transitions,
        feedback,
    }
}
