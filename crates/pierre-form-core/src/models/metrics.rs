// ABOUTME: Derived joint metrics and per-user calibration offsets
// ABOUTME: PoseMetrics is recomputed every frame and never mutated after construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::PoseSide;

/// Additive per-user corrections for stance and body-proportion bias (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CalibrationOffset {
    /// Added to the knee angles
    #[serde(default)]
    pub knee_deg: f64,
    /// Added to the trunk lean angle
    #[serde(default)]
    pub trunk_deg: f64,
    /// Added to the hip angle
    #[serde(default)]
    pub hip_deg: f64,
}

impl CalibrationOffset {
    /// Offsets for knee and trunk only
    #[must_use]
    pub const fn new(knee_deg: f64, trunk_deg: f64) -> Self {
        Self {
            knee_deg,
            trunk_deg,
            hip_deg: 0.0,
        }
    }
}

/// Joint metrics for one frame and one body side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseMetrics {
    /// Side the metrics were computed for
    pub side: PoseSide,
    /// Timestamp of the source frame
    pub timestamp_ms: i64,
    /// Knee flexion angle, 180 = straight leg
    pub knee_angle: f64,
    /// Torso angle from vertical, 0 = upright
    pub trunk_lean_angle: f64,
    /// Angle at the hip between torso and thigh
    pub hip_angle: f64,
    /// Knee angle of the other leg (lunge back leg)
    pub opposite_knee_angle: Option<f64>,
    /// Horizontal knee-past-ankle distance over shin length
    pub knee_travel_ratio: Option<f64>,
    /// Inward knee deviation over leg length, positive toward the midline
    pub knee_valgus_ratio: Option<f64>,
}

impl PoseMetrics {
    /// True when every present value is finite
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.knee_angle.is_finite()
            && self.trunk_lean_angle.is_finite()
            && self.hip_angle.is_finite()
            && self.opposite_knee_angle.map_or(true, f64::is_finite)
            && self.knee_travel_ratio.map_or(true, f64::is_finite)
            && self.knee_valgus_ratio.map_or(true, f64::is_finite)
    }
}
