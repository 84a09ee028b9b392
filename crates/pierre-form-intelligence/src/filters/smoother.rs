// ABOUTME: Per-signal EMA smoothing of pose metrics
// ABOUTME: Optional signals missing from a frame stay missing and leave their filter untouched
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_form_core::models::{PoseMetrics, PoseSide};
use pierre_form_core::FormResult;
use tracing::debug;

use super::EmaFilter;

/// One `EmaFilter` per tracked metrics signal
#[derive(Debug, Clone)]
pub struct MetricsSmoother {
    knee: EmaFilter,
    trunk: EmaFilter,
    hip: EmaFilter,
    opposite_knee: EmaFilter,
    knee_travel: EmaFilter,
    knee_valgus: EmaFilter,
    side: Option<PoseSide>,
}

impl MetricsSmoother {
    /// Create a smoother with the same alpha for every signal
    ///
    /// # Errors
    ///
    /// Returns `FormAnalysisError::InvalidAlpha` if `alpha` is not in (0, 1]
    pub fn new(alpha: f64) -> FormResult<Self> {
        Ok(Self {
            knee: EmaFilter::new(alpha)?,
            trunk: EmaFilter::new(alpha)?,
            hip: EmaFilter::new(alpha)?,
            opposite_knee: EmaFilter::new(alpha)?,
            knee_travel: EmaFilter::new(alpha)?,
            knee_valgus: EmaFilter::new(alpha)?,
            side: None,
        })
    }

    /// Smooth one frame's raw metrics.
    ///
    /// Switching the tracked side restarts every filter, since the history
    /// belongs to the other leg.
    pub fn smooth(&mut self, raw: &PoseMetrics) -> PoseMetrics {
        if self.side.is_some_and(|side| side != raw.side) {
            debug!(from = ?self.side, to = %raw.side, "tracked side changed, restarting filters");
            self.reset();
        }
        self.side = Some(raw.side);

        PoseMetrics {
            side: raw.side,
            timestamp_ms: raw.timestamp_ms,
            knee_angle: self.knee.update(raw.knee_angle),
            trunk_lean_angle: self.trunk.update(raw.trunk_lean_angle),
            hip_angle: self.hip.update(raw.hip_angle),
            opposite_knee_angle: raw.opposite_knee_angle.map(|v| self.opposite_knee.update(v)),
            knee_travel_ratio: raw.knee_travel_ratio.map(|v| self.knee_travel.update(v)),
            knee_valgus_ratio: raw.knee_valgus_ratio.map(|v| self.knee_valgus.update(v)),
        }
    }

    /// Latest smoothed knee angle
    #[must_use]
    pub const fn knee_angle(&self) -> Option<f64> {
        self.knee.current()
    }

    /// Smoothing factor shared by all filters
    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.knee.alpha()
    }

    /// Clear every filter
    pub fn reset(&mut self) {
        self.knee.reset();
        self.trunk.reset();
        self.hip.reset();
        self.opposite_knee.reset();
        self.knee_travel.reset();
        self.knee_valgus.reset();
        self.side = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(side: PoseSide, knee: f64, travel: Option<f64>) -> PoseMetrics {
        PoseMetrics {
            side,
            timestamp_ms: 0,
            knee_angle: knee,
            trunk_lean_angle: 10.0,
            hip_angle: knee,
            opposite_knee_angle: None,
            knee_travel_ratio: travel,
            knee_valgus_ratio: None,
        }
    }

    #[test]
    fn test_first_sample_seeds_every_signal() {
        let mut smoother = MetricsSmoother::new(0.5).unwrap();
        let out = smoother.smooth(&raw(PoseSide::Left, 170.0, Some(0.2)));
        assert!((out.knee_angle - 170.0).abs() < 1e-12);
        assert_eq!(out.knee_travel_ratio, Some(0.2));
        assert!(out.knee_valgus_ratio.is_none());

        let out = smoother.smooth(&raw(PoseSide::Left, 150.0, Some(0.4)));
        assert!((out.knee_angle - 160.0).abs() < 1e-12);
        assert!((out.knee_travel_ratio.unwrap() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_missing_optional_signal_keeps_history() {
        let mut smoother = MetricsSmoother::new(0.5).unwrap();
        smoother.smooth(&raw(PoseSide::Left, 170.0, Some(0.2)));
        let out = smoother.smooth(&raw(PoseSide::Left, 170.0, None));
        assert!(out.knee_travel_ratio.is_none());
        let out = smoother.smooth(&raw(PoseSide::Left, 170.0, Some(0.4)));
        assert!((out.knee_travel_ratio.unwrap() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_side_change_restarts_filters() {
        let mut smoother = MetricsSmoother::new(0.2).unwrap();
        smoother.smooth(&raw(PoseSide::Left, 170.0, None));
        let out = smoother.smooth(&raw(PoseSide::Right, 100.0, None));
        assert!((out.knee_angle - 100.0).abs() < 1e-12);
        assert_eq!(smoother.knee_angle(), Some(100.0));

        smoother.reset();
        assert!(smoother.knee_angle().is_none());
        assert!(MetricsSmoother::new(0.0).is_err());
    }
}
