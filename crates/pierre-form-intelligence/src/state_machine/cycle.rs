// ABOUTME: Hysteresis cycle engine shared by the squat and lunge machines
// ABOUTME: Tracks the knee-angle phase, per-cycle extremes, and frame ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Cycle engine
//!
//! ```text
//!            knee < descent_start          knee <= bottom_enter
//! Standing ────────────────────▶ Lowering ────────────────────▶ Bottom
//!    ▲                            │  ▲                            │
//!    │ knee >= standing_enter     │  │ drop of margin             │ knee > bottom_exit
//!    │                 rise of    ▼  │ (reversal)                 ▼
//!    └────────────────────────── Rising ◀─────────────────────────┘
//!                       margin
//! ```
//!
//! Lowering can also close straight back to Standing. A cycle counts as a rep
//! only if Bottom was reached before it closed.

use pierre_form_core::models::{FeedbackCode, PoseMetrics};
use std::collections::BTreeSet;
use tracing::warn;

use crate::config::{PhaseBands, RepQualityBounds};

/// Exercise-neutral phase; each machine maps it to its own phase names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CyclePhase {
    Standing,
    Lowering,
    Bottom,
    Rising,
}

/// Extremes collected between leaving and re-entering Standing
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CycleStats {
    pub started_ms: i64,
    pub ended_ms: i64,
    pub min_knee: f64,
    pub max_trunk: f64,
    pub max_knee_travel: Option<f64>,
    pub max_knee_valgus: Option<f64>,
    pub min_opposite_knee: Option<f64>,
    pub reached_bottom: bool,
    pub reversals: u32,
}

impl CycleStats {
    fn open(metrics: &PoseMetrics, ts: i64) -> Self {
        Self {
            started_ms: ts,
            ended_ms: ts,
            min_knee: metrics.knee_angle,
            max_trunk: metrics.trunk_lean_angle,
            max_knee_travel: metrics.knee_travel_ratio,
            max_knee_valgus: metrics.knee_valgus_ratio,
            min_opposite_knee: metrics.opposite_knee_angle,
            reached_bottom: false,
            reversals: 0,
        }
    }

    fn absorb(&mut self, metrics: &PoseMetrics, ts: i64) {
        self.ended_ms = ts;
        self.min_knee = self.min_knee.min(metrics.knee_angle);
        self.max_trunk = self.max_trunk.max(metrics.trunk_lean_angle);
        self.max_knee_travel = fold(self.max_knee_travel, metrics.knee_travel_ratio, f64::max);
        self.max_knee_valgus = fold(self.max_knee_valgus, metrics.knee_valgus_ratio, f64::max);
        self.min_opposite_knee =
            fold(self.min_opposite_knee, metrics.opposite_knee_angle, f64::min);
    }

    /// Cycle length in milliseconds
    pub const fn duration_ms(&self) -> i64 {
        self.ended_ms - self.started_ms
    }

    /// Form codes shared by both exercises, judged on a counted rep
    pub fn quality_feedback(&self, bounds: &RepQualityBounds, feedback: &mut BTreeSet<FeedbackCode>) {
        if self.max_trunk > bounds.max_trunk_lean_deg {
            feedback.insert(FeedbackCode::TorsoLeanForward);
        }
        if self
            .max_knee_travel
            .is_some_and(|travel| travel > bounds.max_knee_travel_ratio)
        {
            feedback.insert(FeedbackCode::KneeTooForward);
        }
        if self
            .max_knee_valgus
            .is_some_and(|valgus| valgus > bounds.max_knee_valgus_ratio)
        {
            feedback.insert(FeedbackCode::KneeCollapseInward);
        }
        let duration = self.duration_ms();
        if duration < bounds.min_rep_duration_ms
            || duration > bounds.max_rep_duration_ms
            || self.reversals > bounds.max_direction_reversals
        {
            feedback.insert(FeedbackCode::Unstable);
        }
    }
}

fn fold(acc: Option<f64>, value: Option<f64>, pick: fn(f64, f64) -> f64) -> Option<f64> {
    match (acc, value) {
        (Some(a), Some(v)) => Some(pick(a, v)),
        (None, v) => v,
        (a, None) => a,
    }
}

/// Result of feeding one accepted, finite sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CycleStep {
    pub from: CyclePhase,
    pub to: CyclePhase,
    /// Present when this step returned to Standing
    pub closed: Option<CycleStats>,
}

/// Outcome of one `CycleEngine::advance` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum CycleEvent {
    /// Timestamp went backwards; nothing changed
    Rejected,
    /// No usable metrics; phase held
    Held,
    /// Sample absorbed without a phase change
    Steady,
    /// Phase changed
    Transition(CycleStep),
}

#[derive(Debug, Clone)]
pub(crate) struct CycleEngine {
    bands: PhaseBands,
    phase: CyclePhase,
    stats: Option<CycleStats>,
    /// Running minimum while lowering, running maximum while rising
    extreme: f64,
    last_ts: Option<i64>,
}

impl CycleEngine {
    pub const fn new(bands: PhaseBands) -> Self {
        Self {
            bands,
            phase: CyclePhase::Standing,
            stats: None,
            extreme: 0.0,
            last_ts: None,
        }
    }

    pub const fn phase(&self) -> CyclePhase {
        self.phase
    }

    pub fn reset(&mut self) {
        self.phase = CyclePhase::Standing;
        self.stats = None;
        self.extreme = 0.0;
        self.last_ts = None;
    }

    fn reached_bottom(&self) -> bool {
        self.stats.is_some_and(|stats| stats.reached_bottom)
    }

    pub fn advance(&mut self, metrics: Option<&PoseMetrics>, ts: i64) -> CycleEvent {
        if let Some(previous) = self.last_ts {
            if ts < previous {
                warn!(previous_ms = previous, received_ms = ts, "out-of-order frame ignored");
                return CycleEvent::Rejected;
            }
        }
        self.last_ts = Some(ts);

        let Some(metrics) = metrics.filter(|m| m.is_finite()) else {
            return CycleEvent::Held;
        };
        let knee = metrics.knee_angle;
        if let Some(stats) = self.stats.as_mut() {
            stats.absorb(metrics, ts);
        }

        let from = self.phase;
        let to = match from {
            CyclePhase::Standing => {
                if knee < self.bands.descent_start_deg {
                    self.stats = Some(CycleStats::open(metrics, ts));
                    self.extreme = knee;
                    CyclePhase::Lowering
                } else {
                    from
                }
            }
            CyclePhase::Lowering => {
                if knee <= self.bands.bottom_enter_deg {
                    if let Some(stats) = self.stats.as_mut() {
                        stats.reached_bottom = true;
                    }
                    CyclePhase::Bottom
                } else if knee >= self.bands.standing_enter_deg && !self.reached_bottom() {
                    CyclePhase::Standing
                } else if knee >= self.bands.standing_enter_deg
                    || knee > self.extreme + self.bands.reversal_margin_deg
                {
                    // A cycle that reached the bottom only closes from Rising
                    self.extreme = knee;
                    CyclePhase::Rising
                } else {
                    self.extreme = self.extreme.min(knee);
                    from
                }
            }
            CyclePhase::Bottom => {
                if knee > self.bands.bottom_exit_deg {
                    self.extreme = knee;
                    CyclePhase::Rising
                } else {
                    from
                }
            }
            CyclePhase::Rising => {
                if knee >= self.bands.standing_enter_deg {
                    CyclePhase::Standing
                } else if knee < self.extreme - self.bands.reversal_margin_deg {
                    if let Some(stats) = self.stats.as_mut() {
                        stats.reversals += 1;
                    }
                    self.extreme = knee;
                    CyclePhase::Lowering
                } else {
                    self.extreme = self.extreme.max(knee);
                    from
                }
            }
        };

        if to == from {
            return CycleEvent::Steady;
        }
        self.phase = to;
        let closed = if to == CyclePhase::Standing {
            self.stats.take()
        } else {
            None
        };
        CycleEvent::Transition(CycleStep { from, to, closed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SquatThresholds;
    use pierre_form_core::models::PoseSide;

    fn metrics(knee: f64) -> PoseMetrics {
        PoseMetrics {
            side: PoseSide::Left,
            timestamp_ms: 0,
            knee_angle: knee,
            trunk_lean_angle: 10.0,
            hip_angle: knee,
            opposite_knee_angle: None,
            knee_travel_ratio: None,
            knee_valgus_ratio: None,
        }
    }

    fn feed(engine: &mut CycleEngine, knees: &[f64]) -> Vec<CycleEvent> {
        knees
            .iter()
            .enumerate()
            .map(|(i, k)| engine.advance(Some(&metrics(*k)), i64::try_from(i).unwrap() * 100))
            .collect()
    }

    #[test]
    fn test_full_cycle_reaches_bottom() {
        let mut engine = CycleEngine::new(SquatThresholds::default().bands);
        let events = feed(&mut engine, &[175.0, 140.0, 95.0, 115.0, 165.0]);
        let phases: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                CycleEvent::Transition(step) => Some(step.to),
                _ => None,
            })
            .collect();
        assert_eq!(
            phases,
            vec![
                CyclePhase::Lowering,
                CyclePhase::Bottom,
                CyclePhase::Rising,
                CyclePhase::Standing
            ]
        );
        let CycleEvent::Transition(last) = events[4] else {
            panic!("expected transition");
        };
        let stats = last.closed.unwrap();
        assert!(stats.reached_bottom);
        assert!((stats.min_knee - 95.0).abs() < 1e-9);
        assert_eq!(stats.duration_ms(), 300);
    }

    #[test]
    fn test_band_holds_phase() {
        let mut engine = CycleEngine::new(SquatThresholds::default().bands);
        // Between descent_start and standing_enter nothing changes
        let events = feed(&mut engine, &[155.0, 152.0, 158.0]);
        assert!(events.iter().all(|e| *e == CycleEvent::Steady));
        assert_eq!(engine.phase(), CyclePhase::Standing);
    }

    #[test]
    fn test_rejects_backwards_timestamp() {
        let mut engine = CycleEngine::new(SquatThresholds::default().bands);
        assert_eq!(engine.advance(Some(&metrics(170.0)), 500), CycleEvent::Steady);
        assert_eq!(engine.advance(Some(&metrics(120.0)), 400), CycleEvent::Rejected);
        assert_eq!(engine.phase(), CyclePhase::Standing);
        assert_eq!(engine.advance(None, 500), CycleEvent::Held);
    }

    #[test]
    fn test_counted_cycle_closes_from_rising() {
        let mut engine = CycleEngine::new(SquatThresholds::default().bands);
        let events = feed(
            &mut engine,
            &[175.0, 140.0, 95.0, 115.0, 125.0, 112.0, 165.0, 170.0],
        );
        let CycleEvent::Transition(jump) = events[6] else {
            panic!("expected transition");
        };
        assert_eq!(jump.from, CyclePhase::Lowering);
        assert_eq!(jump.to, CyclePhase::Rising);
        assert!(jump.closed.is_none());

        let CycleEvent::Transition(close) = events[7] else {
            panic!("expected transition");
        };
        assert_eq!(close.from, CyclePhase::Rising);
        assert_eq!(close.to, CyclePhase::Standing);
        let stats = close.closed.unwrap();
        assert!(stats.reached_bottom);
        assert_eq!(stats.reversals, 1);
    }

    #[test]
    fn test_uncounted_cycle_may_close_from_lowering() {
        let mut engine = CycleEngine::new(SquatThresholds::default().bands);
        let events = feed(&mut engine, &[175.0, 140.0, 165.0]);
        let CycleEvent::Transition(close) = events[2] else {
            panic!("expected transition");
        };
        assert_eq!(close.from, CyclePhase::Lowering);
        assert!(!close.closed.unwrap().reached_bottom);
    }

    #[test]
    fn test_reversal_counted_in_rising() {
        let mut engine = CycleEngine::new(SquatThresholds::default().bands);
        let events = feed(&mut engine, &[140.0, 95.0, 130.0, 115.0, 95.0, 125.0, 170.0]);
        let CycleEvent::Transition(last) = events[6] else {
            panic!("expected transition");
        };
        assert_eq!(last.closed.unwrap().reversals, 1);
    }
}
