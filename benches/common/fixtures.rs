// ABOUTME: Benchmark fixtures generating synthetic squat recordings
// ABOUTME: Deterministic knee sweeps so measurements are reproducible across runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Deterministic pose frame generation for benchmarks.

use pierre_form_coach::models::{BodyJointId, PoseFrame, PoseLandmark, PoseSide};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;
const THIGH: f64 = 100.0;
const SHIN: f64 = 100.0;
const TORSO: f64 = 150.0;

/// Predefined recording lengths for benchmark scenarios
#[derive(Debug, Clone, Copy)]
pub enum RecordingLength {
    /// One squat cycle
    SingleRep,
    /// A ten rep set
    Set,
}

impl RecordingLength {
    #[must_use]
    pub const fn reps(self) -> usize {
        match self {
            Self::SingleRep => 1,
            Self::Set => 10,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SingleRep => "single_rep",
            Self::Set => "set_of_10",
        }
    }
}

/// Side-view frame with the given knee and trunk angles (degrees)
#[must_use]
pub fn squat_frame(timestamp_ms: i64, knee_deg: f64, trunk_deg: f64) -> PoseFrame {
    let side = PoseSide::Left;
    let (kx, ky) = (320.0, 330.0);
    let ankle = (kx, ky + SHIN);
    let knee_rad = knee_deg.to_radians();
    let hip = (kx - THIGH * knee_rad.sin(), ky - THIGH * knee_rad.cos());
    let trunk_rad = trunk_deg.to_radians();
    let shoulder = (hip.0 + TORSO * trunk_rad.sin(), hip.1 - TORSO * trunk_rad.cos());

    let landmark = |joint, (x, y): (f64, f64)| PoseLandmark::new(joint, x, y, 0.0, 0.95);
    PoseFrame::new(
        vec![
            landmark(BodyJointId::shoulder(side), shoulder),
            landmark(BodyJointId::hip(side), hip),
            landmark(BodyJointId::knee(side), (kx, ky)),
            landmark(BodyJointId::ankle(side), ankle),
        ],
        timestamp_ms,
        WIDTH,
        HEIGHT,
    )
}

/// Repeated 175° → 85° → 175° squats at 30 fps
#[must_use]
pub fn generate_recording(length: RecordingLength) -> Vec<PoseFrame> {
    let sweep: Vec<f64> = (0..60)
        .map(|i| {
            let phase = f64::from(i) / 60.0 * std::f64::consts::TAU;
            130.0 + 45.0 * phase.cos()
        })
        .collect();
    sweep
        .iter()
        .cycle()
        .take(sweep.len() * length.reps())
        .zip(0_i64..)
        .map(|(knee, i)| squat_frame(i * 33, *knee, 20.0))
        .collect()
}
