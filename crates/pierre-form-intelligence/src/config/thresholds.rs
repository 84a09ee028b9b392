// ABOUTME: Phase hysteresis bands and form bounds for squat and lunge tracking
// ABOUTME: Defaults come from the core tuning constants; every struct validates its own ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Squat and lunge thresholds
//!
//! Phases are driven by the smoothed knee angle (180° = straight leg) through
//! four nested thresholds:
//!
//! ```text
//!  standing_enter ─┐ band: no transition between these two
//!  descent_start  ─┘
//!  bottom_exit    ─┐ band: no transition between these two
//!  bottom_enter   ─┘
//! ```
//!
//! Exercise sections deserialize as overrides: any field left out of a JSON
//! document, including fields of the nested `bands` and `quality` objects,
//! keeps that exercise's default.

use pierre_form_core::constants::{lunge_defaults, squat_defaults};
use pierre_form_core::ConfigError;
use serde::{Deserialize, Serialize};

/// Knee-angle hysteresis bands shared by both exercises (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseBands {
    /// At or above: standing
    pub standing_enter_deg: f64,
    /// Below: descent starts
    pub descent_start_deg: f64,
    /// At or below: bottom reached, rep depth criterion met
    pub bottom_enter_deg: f64,
    /// Above: leaving the bottom
    pub bottom_exit_deg: f64,
    /// Distance from the running extreme that counts as turning around
    pub reversal_margin_deg: f64,
}

impl PhaseBands {
    /// Check threshold ordering
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRange` if the bands overlap or are out of order
    pub fn validate(&self) -> Result<(), ConfigError> {
        let values = [
            self.standing_enter_deg,
            self.descent_start_deg,
            self.bottom_enter_deg,
            self.bottom_exit_deg,
            self.reversal_margin_deg,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::ValueOutOfRange(
                "phase thresholds must be finite",
            ));
        }
        if self.standing_enter_deg > 180.0 || self.bottom_enter_deg <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "phase thresholds must lie within (0, 180] degrees",
            ));
        }
        if self.bottom_enter_deg >= self.bottom_exit_deg {
            return Err(ConfigError::InvalidRange(
                "bottom_enter_deg must be < bottom_exit_deg",
            ));
        }
        if self.bottom_exit_deg >= self.descent_start_deg {
            return Err(ConfigError::InvalidRange(
                "bottom_exit_deg must be < descent_start_deg",
            ));
        }
        if self.descent_start_deg >= self.standing_enter_deg {
            return Err(ConfigError::InvalidRange(
                "descent_start_deg must be < standing_enter_deg",
            ));
        }
        if self.reversal_margin_deg <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "reversal_margin_deg must be positive",
            ));
        }
        Ok(())
    }
}

/// Form bounds applied to every counted rep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepQualityBounds {
    /// Peak trunk lean above this raises `torso_lean_forward`
    pub max_trunk_lean_deg: f64,
    /// Peak knee travel ratio above this raises `knee_too_forward`
    pub max_knee_travel_ratio: f64,
    /// Peak knee valgus ratio above this raises `knee_collapse_inward`
    pub max_knee_valgus_ratio: f64,
    /// Reps faster than this are `unstable`
    pub min_rep_duration_ms: i64,
    /// Reps slower than this are `unstable`
    pub max_rep_duration_ms: i64,
    /// More ascending→descending reversals than this are `unstable`
    pub max_direction_reversals: u32,
}

impl RepQualityBounds {
    /// Check bound ranges
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a bound is negative, non-finite, or the duration window is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=180.0).contains(&self.max_trunk_lean_deg) {
            return Err(ConfigError::ValueOutOfRange(
                "max_trunk_lean_deg must be within [0, 180]",
            ));
        }
        if !self.max_knee_travel_ratio.is_finite() || self.max_knee_travel_ratio < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "max_knee_travel_ratio must be a non-negative number",
            ));
        }
        if !self.max_knee_valgus_ratio.is_finite() || self.max_knee_valgus_ratio < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "max_knee_valgus_ratio must be a non-negative number",
            ));
        }
        if self.min_rep_duration_ms <= 0 || self.min_rep_duration_ms >= self.max_rep_duration_ms {
            return Err(ConfigError::InvalidRange(
                "min_rep_duration_ms must be positive and < max_rep_duration_ms",
            ));
        }
        Ok(())
    }
}

/// Squat phase bands, depth bounds and form bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "SquatThresholdsDoc")]
pub struct SquatThresholds {
    /// Phase hysteresis bands
    pub bands: PhaseBands,
    /// Cycle minimum knee angle above this raises `too_shallow`
    pub shallow_knee_deg: f64,
    /// Cycle minimum knee angle below this raises `too_deep`
    pub too_deep_knee_deg: f64,
    /// Trunk, knee and timing bounds
    pub quality: RepQualityBounds,
}

impl Default for SquatThresholds {
    fn default() -> Self {
        Self {
            bands: PhaseBands {
                standing_enter_deg: squat_defaults::STANDING_ENTER_DEG,
                descent_start_deg: squat_defaults::DESCENT_START_DEG,
                bottom_enter_deg: squat_defaults::BOTTOM_ENTER_DEG,
                bottom_exit_deg: squat_defaults::BOTTOM_EXIT_DEG,
                reversal_margin_deg: squat_defaults::REVERSAL_MARGIN_DEG,
            },
            shallow_knee_deg: squat_defaults::SHALLOW_KNEE_DEG,
            too_deep_knee_deg: squat_defaults::TOO_DEEP_KNEE_DEG,
            quality: RepQualityBounds {
                max_trunk_lean_deg: squat_defaults::MAX_TRUNK_LEAN_DEG,
                max_knee_travel_ratio: squat_defaults::MAX_KNEE_TRAVEL_RATIO,
                max_knee_valgus_ratio: squat_defaults::MAX_KNEE_VALGUS_RATIO,
                min_rep_duration_ms: squat_defaults::MIN_REP_DURATION_MS,
                max_rep_duration_ms: squat_defaults::MAX_REP_DURATION_MS,
                max_direction_reversals: squat_defaults::MAX_DIRECTION_REVERSALS,
            },
        }
    }
}

impl SquatThresholds {
    /// Validate bands, depth bounds and form bounds
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` describing the first violated constraint
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bands.validate()?;
        self.quality.validate()?;
        if !(self.too_deep_knee_deg.is_finite() && self.shallow_knee_deg.is_finite()) {
            return Err(ConfigError::ValueOutOfRange(
                "squat depth bounds must be finite",
            ));
        }
        if self.too_deep_knee_deg >= self.shallow_knee_deg {
            return Err(ConfigError::InvalidRange(
                "squat too_deep_knee_deg must be < shallow_knee_deg",
            ));
        }
        Ok(())
    }
}

/// Lunge phase bands, front/back depth bounds and form bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "LungeThresholdsDoc")]
pub struct LungeThresholds {
    /// Phase hysteresis bands on the front knee
    pub bands: PhaseBands,
    /// Front knee cycle minimum above this raises `too_shallow_front`
    pub shallow_front_knee_deg: f64,
    /// Front knee cycle minimum below this raises `too_deep_front`
    pub too_deep_front_knee_deg: f64,
    /// Back knee cycle minimum above this raises `too_shallow_back`
    pub shallow_back_knee_deg: f64,
    /// Trunk, knee and timing bounds
    pub quality: RepQualityBounds,
}

impl Default for LungeThresholds {
    fn default() -> Self {
        Self {
            bands: PhaseBands {
                standing_enter_deg: lunge_defaults::STANDING_ENTER_DEG,
                descent_start_deg: lunge_defaults::DESCENT_START_DEG,
                bottom_enter_deg: lunge_defaults::BOTTOM_ENTER_DEG,
                bottom_exit_deg: lunge_defaults::BOTTOM_EXIT_DEG,
                reversal_margin_deg: lunge_defaults::REVERSAL_MARGIN_DEG,
            },
            shallow_front_knee_deg: lunge_defaults::SHALLOW_FRONT_KNEE_DEG,
            too_deep_front_knee_deg: lunge_defaults::TOO_DEEP_FRONT_KNEE_DEG,
            shallow_back_knee_deg: lunge_defaults::SHALLOW_BACK_KNEE_DEG,
            quality: RepQualityBounds {
                max_trunk_lean_deg: lunge_defaults::MAX_TRUNK_LEAN_DEG,
                max_knee_travel_ratio: lunge_defaults::MAX_KNEE_TRAVEL_RATIO,
                max_knee_valgus_ratio: lunge_defaults::MAX_KNEE_VALGUS_RATIO,
                min_rep_duration_ms: lunge_defaults::MIN_REP_DURATION_MS,
                max_rep_duration_ms: lunge_defaults::MAX_REP_DURATION_MS,
                max_direction_reversals: lunge_defaults::MAX_DIRECTION_REVERSALS,
            },
        }
    }
}

impl LungeThresholds {
    /// Validate bands, depth bounds and form bounds
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` describing the first violated constraint
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bands.validate()?;
        self.quality.validate()?;
        let depths = [
            self.shallow_front_knee_deg,
            self.too_deep_front_knee_deg,
            self.shallow_back_knee_deg,
        ];
        if depths.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::ValueOutOfRange(
                "lunge depth bounds must be finite",
            ));
        }
        if self.too_deep_front_knee_deg >= self.shallow_front_knee_deg {
            return Err(ConfigError::InvalidRange(
                "lunge too_deep_front_knee_deg must be < shallow_front_knee_deg",
            ));
        }
        Ok(())
    }
}

/// Partial `PhaseBands` as it appears in a config document
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PhaseBandsDoc {
    standing_enter_deg: Option<f64>,
    descent_start_deg: Option<f64>,
    bottom_enter_deg: Option<f64>,
    bottom_exit_deg: Option<f64>,
    reversal_margin_deg: Option<f64>,
}

impl PhaseBandsDoc {
    fn merge(self, base: PhaseBands) -> PhaseBands {
        PhaseBands {
            standing_enter_deg: self.standing_enter_deg.unwrap_or(base.standing_enter_deg),
            descent_start_deg: self.descent_start_deg.unwrap_or(base.descent_start_deg),
            bottom_enter_deg: self.bottom_enter_deg.unwrap_or(base.bottom_enter_deg),
            bottom_exit_deg: self.bottom_exit_deg.unwrap_or(base.bottom_exit_deg),
            reversal_margin_deg: self.reversal_margin_deg.unwrap_or(base.reversal_margin_deg),
        }
    }
}

/// Partial `RepQualityBounds` as it appears in a config document
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RepQualityDoc {
    max_trunk_lean_deg: Option<f64>,
    max_knee_travel_ratio: Option<f64>,
    max_knee_valgus_ratio: Option<f64>,
    min_rep_duration_ms: Option<i64>,
    max_rep_duration_ms: Option<i64>,
    max_direction_reversals: Option<u32>,
}

impl RepQualityDoc {
    fn merge(self, base: RepQualityBounds) -> RepQualityBounds {
        RepQualityBounds {
            max_trunk_lean_deg: self.max_trunk_lean_deg.unwrap_or(base.max_trunk_lean_deg),
            max_knee_travel_ratio: self
                .max_knee_travel_ratio
                .unwrap_or(base.max_knee_travel_ratio),
            max_knee_valgus_ratio: self
                .max_knee_valgus_ratio
                .unwrap_or(base.max_knee_valgus_ratio),
            min_rep_duration_ms: self.min_rep_duration_ms.unwrap_or(base.min_rep_duration_ms),
            max_rep_duration_ms: self.max_rep_duration_ms.unwrap_or(base.max_rep_duration_ms),
            max_direction_reversals: self
                .max_direction_reversals
                .unwrap_or(base.max_direction_reversals),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SquatThresholdsDoc {
    bands: PhaseBandsDoc,
    shallow_knee_deg: Option<f64>,
    too_deep_knee_deg: Option<f64>,
    quality: RepQualityDoc,
}

impl From<SquatThresholdsDoc> for SquatThresholds {
    fn from(doc: SquatThresholdsDoc) -> Self {
        let base = Self::default();
        Self {
            bands: doc.bands.merge(base.bands),
            shallow_knee_deg: doc.shallow_knee_deg.unwrap_or(base.shallow_knee_deg),
            too_deep_knee_deg: doc.too_deep_knee_deg.unwrap_or(base.too_deep_knee_deg),
            quality: doc.quality.merge(base.quality),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LungeThresholdsDoc {
    bands: PhaseBandsDoc,
    shallow_front_knee_deg: Option<f64>,
    too_deep_front_knee_deg: Option<f64>,
    shallow_back_knee_deg: Option<f64>,
    quality: RepQualityDoc,
}

impl From<LungeThresholdsDoc> for LungeThresholds {
    fn from(doc: LungeThresholdsDoc) -> Self {
        let base = Self::default();
        Self {
            bands: doc.bands.merge(base.bands),
            shallow_front_knee_deg: doc
                .shallow_front_knee_deg
                .unwrap_or(base.shallow_front_knee_deg),
            too_deep_front_knee_deg: doc
                .too_deep_front_knee_deg
                .unwrap_or(base.too_deep_front_knee_deg),
            shallow_back_knee_deg: doc
                .shallow_back_knee_deg
                .unwrap_or(base.shallow_back_knee_deg),
            quality: doc.quality.merge(base.quality),
        }
    }
}
