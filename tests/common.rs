// ABOUTME: Shared test utilities and synthetic pose builders for integration tests
// ABOUTME: Builds side-view squat and lunge frames with exact knee and trunk angles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::cast_precision_loss,
    clippy::suboptimal_flops
)]
//! Shared test utilities for `pierre_form_coach`
//!
//! Poses are built in upright image space and then written into the buffer the
//! way a camera would deliver them (rotation, front-camera mirroring).

use pierre_form_coach::models::{BodyJointId, PoseFrame, PoseLandmark, PoseSide};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

pub const WIDTH: u32 = 640;
pub const HEIGHT: u32 = 480;
pub const CONFIDENCE: f64 = 0.9;

const THIGH: f64 = 100.0;
const SHIN: f64 = 100.0;
const TORSO: f64 = 150.0;
const FRONT_KNEE: (f64, f64) = (320.0, 330.0);

/// Upright-space joint positions for one frame
#[derive(Debug, Clone, Default)]
pub struct PoseBuilder {
    points: Vec<(BodyJointId, f64, f64, f64)>,
}

impl PoseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn joint(mut self, joint: BodyJointId, x: f64, y: f64) -> Self {
        self.points.push((joint, x, y, CONFIDENCE));
        self
    }

    pub fn joint_with_confidence(mut self, joint: BodyJointId, x: f64, y: f64, confidence: f64) -> Self {
        self.points.push((joint, x, y, confidence));
        self
    }

    /// Side-view leg with a vertical shin: the knee angle is exact, trunk lean from vertical is exact
    pub fn leg_with_torso(self, side: PoseSide, knee_deg: f64, trunk_deg: f64) -> Self {
        let (kx, ky) = FRONT_KNEE;
        let knee_rad = knee_deg.to_radians();
        let hip = (kx + THIGH * knee_rad.sin(), ky + THIGH * knee_rad.cos());
        let lean = trunk_deg.to_radians();
        let shoulder = (hip.0 + TORSO * lean.sin(), hip.1 - TORSO * lean.cos());
        self.joint(BodyJointId::shoulder(side), shoulder.0, shoulder.1)
            .joint(BodyJointId::hip(side), hip.0, hip.1)
            .joint(BodyJointId::knee(side), kx, ky)
            .joint(BodyJointId::ankle(side), kx, ky + SHIN)
    }

    /// Back leg hanging from the front leg's hip: vertical thigh, shin swung backwards
    pub fn back_leg(self, side: PoseSide, front_knee_deg: f64, back_knee_deg: f64) -> Self {
        let (kx, ky) = FRONT_KNEE;
        let front = front_knee_deg.to_radians();
        let hip = (kx + THIGH * front.sin(), ky + THIGH * front.cos());
        let knee = (hip.0, hip.1 + THIGH);
        let back = back_knee_deg.to_radians();
        let ankle = (knee.0 - SHIN * back.sin(), knee.1 - SHIN * back.cos());
        self.joint(BodyJointId::hip(side), hip.0, hip.1)
            .joint(BodyJointId::knee(side), knee.0, knee.1)
            .joint(BodyJointId::ankle(side), ankle.0, ankle.1)
    }

    /// Upright rear-camera frame
    pub fn build(&self, timestamp_ms: i64) -> PoseFrame {
        PoseFrame::new(self.landmarks(|x, y| (x, y)), timestamp_ms, WIDTH, HEIGHT)
    }

    /// Front-camera frame whose buffer is horizontally mirrored
    pub fn build_mirrored(&self, timestamp_ms: i64) -> PoseFrame {
        let width = f64::from(WIDTH);
        PoseFrame::new(self.landmarks(|x, y| (width - x, y)), timestamp_ms, WIDTH, HEIGHT)
            .with_front_camera(true)
    }

    /// Rear-camera frame reflected left-right with the joint sides swapped
    pub fn build_reflected_swapped(&self, timestamp_ms: i64) -> PoseFrame {
        let width = f64::from(WIDTH);
        let landmarks = self
            .points
            .iter()
            .map(|(joint, x, y, c)| PoseLandmark::new(swap_side(*joint), width - x, *y, 0.0, *c))
            .collect();
        PoseFrame::new(landmarks, timestamp_ms, WIDTH, HEIGHT)
    }

    /// Buffer that needs `rotation` degrees clockwise to become upright
    pub fn build_rotated(&self, timestamp_ms: i64, rotation: i32) -> PoseFrame {
        let (w, h) = (f64::from(WIDTH), f64::from(HEIGHT));
        let frame = match rotation {
            90 => PoseFrame::new(self.landmarks(|x, y| (y, w - x)), timestamp_ms, HEIGHT, WIDTH),
            180 => PoseFrame::new(self.landmarks(|x, y| (w - x, h - y)), timestamp_ms, WIDTH, HEIGHT),
            270 => PoseFrame::new(self.landmarks(|x, y| (h - y, x)), timestamp_ms, HEIGHT, WIDTH),
            _ => self.build(timestamp_ms),
        };
        frame.with_rotation(rotation)
    }

    fn landmarks(&self, to_buffer: impl Fn(f64, f64) -> (f64, f64)) -> Vec<PoseLandmark> {
        self.points
            .iter()
            .map(|(joint, x, y, c)| {
                let (bx, by) = to_buffer(*x, *y);
                PoseLandmark::new(*joint, bx, by, 0.0, *c)
            })
            .collect()
    }
}

fn swap_side(joint: BodyJointId) -> BodyJointId {
    match joint {
        BodyJointId::LeftShoulder => BodyJointId::RightShoulder,
        BodyJointId::RightShoulder => BodyJointId::LeftShoulder,
        BodyJointId::LeftHip => BodyJointId::RightHip,
        BodyJointId::RightHip => BodyJointId::LeftHip,
        BodyJointId::LeftKnee => BodyJointId::RightKnee,
        BodyJointId::RightKnee => BodyJointId::LeftKnee,
        BodyJointId::LeftAnkle => BodyJointId::RightAnkle,
        BodyJointId::RightAnkle => BodyJointId::LeftAnkle,
        other => other,
    }
}

/// Side-view squat frame
pub fn squat_frame(timestamp_ms: i64, side: PoseSide, knee_deg: f64, trunk_deg: f64) -> PoseFrame {
    PoseBuilder::new()
        .leg_with_torso(side, knee_deg, trunk_deg)
        .build(timestamp_ms)
}

/// Side-view lunge frame; `side` is the front leg
pub fn lunge_frame(
    timestamp_ms: i64,
    side: PoseSide,
    front_knee_deg: f64,
    back_knee_deg: f64,
    trunk_deg: f64,
) -> PoseFrame {
    PoseBuilder::new()
        .leg_with_torso(side, front_knee_deg, trunk_deg)
        .back_leg(side.opposite(), front_knee_deg, back_knee_deg)
        .build(timestamp_ms)
}

/// Knee trajectory for one cycle: hold top, descend in 10° steps, hold bottom, ascend, hold top
pub fn knee_sweep(top: f64, bottom: f64) -> Vec<f64> {
    let mut knees = vec![top; 3];
    let mut knee = top;
    while knee - 10.0 > bottom {
        knee -= 10.0;
        knees.push(knee);
    }
    knees.extend(std::iter::repeat(bottom).take(6));
    let mut knee = bottom;
    while knee + 10.0 < top {
        knee += 10.0;
        knees.push(knee);
    }
    knees.extend(std::iter::repeat(top).take(10));
    knees
}

/// Frames for one squat cycle starting at `start_ms`
pub fn squat_cycle(
    start_ms: i64,
    step_ms: i64,
    side: PoseSide,
    bottom_deg: f64,
    trunk_deg: f64,
) -> Vec<PoseFrame> {
    knee_sweep(175.0, bottom_deg)
        .into_iter()
        .enumerate()
        .map(|(i, knee)| squat_frame(start_ms + i as i64 * step_ms, side, knee, trunk_deg))
        .collect()
}

/// Frames for one lunge cycle; the back knee bends in proportion to the front knee
pub fn lunge_cycle(
    start_ms: i64,
    step_ms: i64,
    side: PoseSide,
    front_bottom_deg: f64,
    back_bottom_deg: f64,
) -> Vec<PoseFrame> {
    let top = 175.0;
    knee_sweep(top, front_bottom_deg)
        .into_iter()
        .enumerate()
        .map(|(i, front)| {
            let progress = (top - front) / (top - front_bottom_deg);
            let back = top - progress * (top - back_bottom_deg);
            lunge_frame(start_ms + i as i64 * step_ms, side, front, back, 10.0)
        })
        .collect()
}
