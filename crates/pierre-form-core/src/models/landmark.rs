// ABOUTME: Body landmark identifiers and per-joint detection results
// ABOUTME: Defines the 33-point body model and the immutable PoseLandmark value
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::PoseSide;

/// Identifier of a detected anatomical point (33-point body model)
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyJointId {
    /// Nose tip
    Nose,
    /// Left eye, inner corner
    LeftEyeInner,
    /// Left eye center
    LeftEye,
    /// Left eye, outer corner
    LeftEyeOuter,
    /// Right eye, inner corner
    RightEyeInner,
    /// Right eye center
    RightEye,
    /// Right eye, outer corner
    RightEyeOuter,
    /// Left ear
    LeftEar,
    /// Right ear
    RightEar,
    /// Left mouth corner
    LeftMouth,
    /// Right mouth corner
    RightMouth,
    /// Left shoulder
    LeftShoulder,
    /// Right shoulder
    RightShoulder,
    /// Left elbow
    LeftElbow,
    /// Right elbow
    RightElbow,
    /// Left wrist
    LeftWrist,
    /// Right wrist
    RightWrist,
    /// Left pinky knuckle
    LeftPinky,
    /// Right pinky knuckle
    RightPinky,
    /// Left index knuckle
    LeftIndex,
    /// Right index knuckle
    RightIndex,
    /// Left thumb
    LeftThumb,
    /// Right thumb
    RightThumb,
    /// Left hip
    LeftHip,
    /// Right hip
    RightHip,
    /// Left knee
    LeftKnee,
    /// Right knee
    RightKnee,
    /// Left ankle
    LeftAnkle,
    /// Right ankle
    RightAnkle,
    /// Left heel
    LeftHeel,
    /// Right heel
    RightHeel,
    /// Left foot index (toe)
    LeftFootIndex,
    /// Right foot index (toe)
    RightFootIndex,
}

impl BodyJointId {
    /// Shoulder on the given side
    #[must_use]
    pub const fn shoulder(side: PoseSide) -> Self {
        match side {
            PoseSide::Left => Self::LeftShoulder,
            PoseSide::Right => Self::RightShoulder,
        }
    }

    /// Hip on the given side
    #[must_use]
    pub const fn hip(side: PoseSide) -> Self {
        match side {
            PoseSide::Left => Self::LeftHip,
            PoseSide::Right => Self::RightHip,
        }
    }

    /// Knee on the given side
    #[must_use]
    pub const fn knee(side: PoseSide) -> Self {
        match side {
            PoseSide::Left => Self::LeftKnee,
            PoseSide::Right => Self::RightKnee,
        }
    }

    /// Ankle on the given side
    #[must_use]
    pub const fn ankle(side: PoseSide) -> Self {
        match side {
            PoseSide::Left => Self::LeftAnkle,
            PoseSide::Right => Self::RightAnkle,
        }
    }
}

/// One detected joint in one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseLandmark {
    /// Which joint this is
    #[serde(rename = "type")]
    pub joint: BodyJointId,
    /// Horizontal pixel coordinate in the delivered buffer
    pub x: f64,
    /// Vertical pixel coordinate in the delivered buffer (grows downward)
    pub y: f64,
    /// Detector-relative depth
    #[serde(default)]
    pub z: f64,
    /// Detection confidence in [0, 1]
    pub confidence: f64,
}

impl PoseLandmark {
    /// Create a landmark
    #[must_use]
    pub const fn new(joint: BodyJointId, x: f64, y: f64, z: f64, confidence: f64) -> Self {
        Self {
            joint,
            x,
            y,
            z,
            confidence,
        }
    }

    /// True when every coordinate and the confidence are finite
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.confidence.is_finite()
    }
}
