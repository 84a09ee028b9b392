// ABOUTME: Pose frame value type delivered by the landmark detector
// ABOUTME: Carries landmarks plus the image geometry needed to normalize coordinates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{BodyJointId, PoseLandmark};

/// Body side whose landmarks drive the metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PoseSide {
    /// Athlete's anatomical left
    Left,
    /// Athlete's anatomical right
    Right,
}

impl PoseSide {
    /// The other side
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Uppercase label used in logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
        }
    }
}

impl fmt::Display for PoseSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One camera frame's detection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseFrame {
    /// Detected landmarks, at most one meaningful entry per joint
    pub landmarks: Vec<PoseLandmark>,
    /// Capture timestamp (ms, monotonic within a session)
    pub timestamp_ms: i64,
    /// Width of the delivered buffer in pixels
    pub image_width: u32,
    /// Height of the delivered buffer in pixels
    pub image_height: u32,
    /// Clockwise rotation that makes the buffer upright
    #[serde(default)]
    pub rotation_degrees: i32,
    /// Frame came from the front (selfie) camera
    #[serde(default)]
    pub is_front_camera: bool,
    /// Buffer is horizontally mirrored
    #[serde(default)]
    pub is_mirrored: bool,
}

impl PoseFrame {
    /// Create an upright, rear-camera frame
    #[must_use]
    pub const fn new(
        landmarks: Vec<PoseLandmark>,
        timestamp_ms: i64,
        image_width: u32,
        image_height: u32,
    ) -> Self {
        Self {
            landmarks,
            timestamp_ms,
            image_width,
            image_height,
            rotation_degrees: 0,
            is_front_camera: false,
            is_mirrored: false,
        }
    }

    /// Set the buffer rotation
    #[must_use]
    pub const fn with_rotation(mut self, rotation_degrees: i32) -> Self {
        self.rotation_degrees = rotation_degrees;
        self
    }

    /// Mark the frame as coming from the front camera, optionally mirrored
    #[must_use]
    pub const fn with_front_camera(mut self, mirrored: bool) -> Self {
        self.is_front_camera = true;
        self.is_mirrored = mirrored;
        self
    }

    /// First landmark for `joint`, if detected
    #[must_use]
    pub fn landmark(&self, joint: BodyJointId) -> Option<&PoseLandmark> {
        self.landmarks.iter().find(|l| l.joint == joint)
    }

    /// Front-camera mirrored buffers have an inverted horizontal axis
    #[must_use]
    pub const fn horizontal_inverted(&self) -> bool {
        self.is_front_camera && self.is_mirrored
    }

    /// Rotation snapped to the nearest quarter turn, in `{0, 90, 180, 270}`
    #[must_use]
    pub fn quarter_turn_rotation(&self) -> i32 {
        let normalized = self.rotation_degrees.rem_euclid(360);
        ((normalized + 45) / 90 % 4) * 90
    }

    /// Mean confidence of the shoulder, hip, knee and ankle on `side`.
    /// Missing joints count as zero confidence.
    #[must_use]
    pub fn side_confidence(&self, side: PoseSide) -> f64 {
        let joints = [
            BodyJointId::shoulder(side),
            BodyJointId::hip(side),
            BodyJointId::knee(side),
            BodyJointId::ankle(side),
        ];
        let total: f64 = joints
            .iter()
            .map(|joint| {
                self.landmark(*joint)
                    .map_or(0.0, |l| if l.confidence.is_finite() { l.confidence } else { 0.0 })
            })
            .sum();
        total / joints.len() as f64
    }
}
