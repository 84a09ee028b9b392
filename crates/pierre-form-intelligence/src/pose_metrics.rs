// ABOUTME: Joint metrics from one pose frame: knee flexion, trunk lean, hip angle and knee tracking
// ABOUTME: Pure function gated by landmark confidence; undefined metrics are None, never NaN
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Pose Metrics Calculator
//!
//! 1. Pick shoulder, hip, knee and ankle for the requested side; any of them
//!    missing or under the confidence threshold means no metrics this frame.
//! 2. Move every landmark into upright image space (undo buffer rotation, then
//!    undo front-camera mirroring) so sides and axes mean the same thing for
//!    every camera.
//! 3. Compute the primary angles, then the optional signals that need extra
//!    landmarks (other leg, foot, opposite hip).
//! 4. Add calibration offsets and clamp to [0°, 180°].

use pierre_form_core::models::{
    BodyJointId, CalibrationOffset, PoseFrame, PoseLandmark, PoseMetrics, PoseSide,
};
use tracing::trace;

use crate::config::CalculatorConfig;
use crate::geometry::{angle_from_vertical_deg, joint_angle_deg, Point2};

/// Landmarks needed for the primary metrics, in upright coordinates
#[derive(Debug, Clone, Copy)]
struct LegChain {
    shoulder: Point2,
    hip: Point2,
    knee: Point2,
    ankle: Point2,
}

/// Stateless calculator; identical frames give identical metrics
#[derive(Debug, Clone, Copy, Default)]
pub struct PoseMetricsCalculator {
    config: CalculatorConfig,
}

impl PoseMetricsCalculator {
    /// Create a calculator with the given gating
    #[must_use]
    pub const fn new(config: CalculatorConfig) -> Self {
        Self { config }
    }

    /// Active gating configuration
    #[must_use]
    pub const fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Compute metrics for `side`, or `None` when the frame cannot support them
    #[must_use]
    pub fn calculate(
        &self,
        frame: &PoseFrame,
        calibration: Option<&CalibrationOffset>,
        side: PoseSide,
    ) -> Option<PoseMetrics> {
        let Some(chain) = self.leg_chain(frame, side) else {
            trace!(ts = frame.timestamp_ms, %side, "required landmarks missing or low confidence");
            return None;
        };
        let min_len = self.config.min_segment_length;

        let knee_angle = joint_angle_deg(chain.hip, chain.knee, chain.ankle, min_len)?;
        let trunk_lean_angle = angle_from_vertical_deg(chain.hip, chain.shoulder, min_len)?;
        let hip_angle = joint_angle_deg(chain.shoulder, chain.hip, chain.knee, min_len)?;

        let opposite_knee_angle = self.opposite_knee_angle(frame, side);
        let knee_travel_ratio = self.knee_travel_ratio(frame, side, &chain);
        let knee_valgus_ratio = self.knee_valgus_ratio(frame, side, &chain);

        let offset = calibration.copied().unwrap_or_default();
        Some(PoseMetrics {
            side,
            timestamp_ms: frame.timestamp_ms,
            knee_angle: calibrated(knee_angle, offset.knee_deg),
            trunk_lean_angle: calibrated(trunk_lean_angle, offset.trunk_deg),
            hip_angle: calibrated(hip_angle, offset.hip_deg),
            opposite_knee_angle: opposite_knee_angle.map(|a| calibrated(a, offset.knee_deg)),
            knee_travel_ratio,
            knee_valgus_ratio,
        })
    }

    fn leg_chain(&self, frame: &PoseFrame, side: PoseSide) -> Option<LegChain> {
        Some(LegChain {
            shoulder: self.gated_point(frame, BodyJointId::shoulder(side))?,
            hip: self.gated_point(frame, BodyJointId::hip(side))?,
            knee: self.gated_point(frame, BodyJointId::knee(side))?,
            ankle: self.gated_point(frame, BodyJointId::ankle(side))?,
        })
    }

    /// Upright position of `joint` if detected with enough confidence
    fn gated_point(&self, frame: &PoseFrame, joint: BodyJointId) -> Option<Point2> {
        let landmark = frame.landmark(joint)?;
        if !landmark.is_finite() || landmark.confidence < self.config.min_landmark_confidence {
            return None;
        }
        let point = upright_point(frame, landmark);
        point.is_finite().then_some(point)
    }

    fn opposite_knee_angle(&self, frame: &PoseFrame, side: PoseSide) -> Option<f64> {
        let other = side.opposite();
        let hip = self.gated_point(frame, BodyJointId::hip(other))?;
        let knee = self.gated_point(frame, BodyJointId::knee(other))?;
        let ankle = self.gated_point(frame, BodyJointId::ankle(other))?;
        joint_angle_deg(hip, knee, ankle, self.config.min_segment_length)
    }

    /// Knee-past-ankle distance over shin length.
    /// With a visible toe only forward travel counts; otherwise either direction does.
    fn knee_travel_ratio(&self, frame: &PoseFrame, side: PoseSide, chain: &LegChain) -> Option<f64> {
        let shin = chain.knee.distance(chain.ankle);
        if shin < self.config.min_segment_length {
            return None;
        }
        let offset = chain.knee.x - chain.ankle.x;
        let toe_joint = match side {
            PoseSide::Left => BodyJointId::LeftFootIndex,
            PoseSide::Right => BodyJointId::RightFootIndex,
        };
        let travel = match self.gated_point(frame, toe_joint) {
            Some(toe) if (toe.x - chain.ankle.x).abs() >= self.config.min_segment_length => {
                (offset * (toe.x - chain.ankle.x).signum()).max(0.0)
            }
            _ => offset.abs(),
        };
        Some(travel / shin)
    }

    /// Knee deviation from the hip→ankle line toward the hip midline, over leg length.
    /// Needs both hips spread apart, so it is only defined for frontal views.
    fn knee_valgus_ratio(&self, frame: &PoseFrame, side: PoseSide, chain: &LegChain) -> Option<f64> {
        let min_len = self.config.min_segment_length;
        let other_hip = self.gated_point(frame, BodyJointId::hip(side.opposite()))?;
        let midline_x = (chain.hip.x + other_hip.x) / 2.0;
        let inward = midline_x - chain.hip.x;
        if inward.abs() < min_len {
            return None;
        }

        let leg = chain.hip.to(chain.ankle);
        let leg_length = leg.length();
        if leg_length < min_len || leg.y.abs() < min_len {
            return None;
        }
        let t = (chain.knee.y - chain.hip.y) / leg.y;
        let line_x = t.mul_add(leg.x, chain.hip.x);
        let deviation = (chain.knee.x - line_x) * inward.signum();
        let ratio = deviation / leg_length;
        ratio.is_finite().then_some(ratio)
    }
}

fn calibrated(angle: f64, offset: f64) -> f64 {
    (angle + offset).clamp(0.0, 180.0)
}

/// Map a buffer landmark into upright image space.
///
/// `rotation_degrees` is the clockwise turn that makes the buffer upright; after
/// rotating, front-camera mirrored frames get their horizontal axis flipped back.
fn upright_point(frame: &PoseFrame, landmark: &PoseLandmark) -> Point2 {
    let width = f64::from(frame.image_width);
    let height = f64::from(frame.image_height);
    let (x, y, upright_width) = match frame.quarter_turn_rotation() {
        90 => (height - landmark.y, landmark.x, height),
        180 => (width - landmark.x, height - landmark.y, width),
        270 => (landmark.y, width - landmark.x, height),
        _ => (landmark.x, landmark.y, width),
    };
    if frame.horizontal_inverted() {
        Point2::new(upright_width - x, y)
    } else {
        Point2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landmark(joint: BodyJointId, x: f64, y: f64) -> PoseLandmark {
        PoseLandmark::new(joint, x, y, 0.0, 0.9)
    }

    #[test]
    fn test_rotation_keeps_knee_angle() {
        // Upright right angle: hip above knee, ankle to the side
        let upright = PoseFrame::new(
            vec![
                landmark(BodyJointId::LeftShoulder, 100.0, 0.0),
                landmark(BodyJointId::LeftHip, 100.0, 100.0),
                landmark(BodyJointId::LeftKnee, 100.0, 200.0),
                landmark(BodyJointId::LeftAnkle, 200.0, 200.0),
            ],
            0,
            400,
            300,
        );
        // Same pose delivered in a buffer that needs a 90 degree clockwise turn:
        // upright (x, y) came from buffer (y, H' - x) with H' = upright width
        let rotated = PoseFrame::new(
            upright
                .landmarks
                .iter()
                .map(|l| landmark(l.joint, l.y, 400.0 - l.x))
                .collect(),
            0,
            300,
            400,
        )
        .with_rotation(90);

        let calc = PoseMetricsCalculator::default();
        let a = calc.calculate(&upright, None, PoseSide::Left).unwrap();
        let b = calc.calculate(&rotated, None, PoseSide::Left).unwrap();
        assert!((a.knee_angle - b.knee_angle).abs() < 1e-9);
        assert!((a.trunk_lean_angle - b.trunk_lean_angle).abs() < 1e-9);
        assert!(b.trunk_lean_angle < 1e-9);
    }

    #[test]
    fn test_calibration_is_clamped() {
        let frame = PoseFrame::new(
            vec![
                landmark(BodyJointId::RightShoulder, 0.0, 0.0),
                landmark(BodyJointId::RightHip, 0.0, 100.0),
                landmark(BodyJointId::RightKnee, 0.0, 200.0),
                landmark(BodyJointId::RightAnkle, 0.0, 300.0),
            ],
            0,
            640,
            480,
        );
        let calc = PoseMetricsCalculator::default();
        let offset = CalibrationOffset::new(15.0, -5.0);
        let metrics = calc.calculate(&frame, Some(&offset), PoseSide::Right).unwrap();
        assert!((metrics.knee_angle - 180.0).abs() < 1e-9);
        assert!(metrics.trunk_lean_angle.abs() < 1e-9);
    }
}
