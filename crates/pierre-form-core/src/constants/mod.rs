// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Feedback code registry, default tuning values, and transition log keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain. The feedback codes and log keys are an
//! external contract with the coaching UI and the analysis tooling; change them
//! only together with their consumers.

/// Feedback code strings emitted by the rep state machines
pub mod feedback_codes {
    /// Squat cycle never reached the required depth
    pub const TOO_SHALLOW: &str = "too_shallow";
    /// Squat went below the safe depth
    pub const TOO_DEEP: &str = "too_deep";
    /// Lunge front knee did not bend enough
    pub const TOO_SHALLOW_FRONT: &str = "too_shallow_front";
    /// Lunge front knee bent too far
    pub const TOO_DEEP_FRONT: &str = "too_deep_front";
    /// Lunge back knee did not drop enough
    pub const TOO_SHALLOW_BACK: &str = "too_shallow_back";
    /// Knee travelled too far past the ankle
    pub const KNEE_TOO_FORWARD: &str = "knee_too_forward";
    /// Torso leaned too far forward
    pub const TORSO_LEAN_FORWARD: &str = "torso_lean_forward";
    /// Knee collapsed toward the body midline
    pub const KNEE_COLLAPSE_INWARD: &str = "knee_collapse_inward";
    /// Rep timing was erratic
    pub const UNSTABLE: &str = "unstable";

    /// Every registered feedback code, in registry order
    pub const FEEDBACK_CODES: &[&str] = &[
        TOO_SHALLOW,
        TOO_DEEP,
        TOO_SHALLOW_FRONT,
        TOO_DEEP_FRONT,
        TOO_SHALLOW_BACK,
        KNEE_TOO_FORWARD,
        TORSO_LEAN_FORWARD,
        KNEE_COLLAPSE_INWARD,
        UNSTABLE,
    ];
}

/// Keys of the transition log line (`key=value` pairs, in this order)
pub mod log_keys {
    /// Phase being left
    pub const FROM: &str = "from";
    /// Phase being entered
    pub const TO: &str = "to";
    /// Frame timestamp in milliseconds
    pub const TS: &str = "ts";
    /// Tracked body side
    pub const SIDE: &str = "side";
    /// Exercise-qualified phase identifier
    pub const PHASE: &str = "phase";
    /// Smoothed knee angle (degrees)
    pub const KNEE: &str = "knee";
    /// Smoothed trunk lean angle (degrees)
    pub const TRUNK: &str = "trunk";

    /// Tracing target for transition records
    pub const TRANSITION_TARGET: &str = "pierre_form::transition";
}

/// Landmark confidence and geometry defaults
pub mod calculator_defaults {
    /// Landmarks below this confidence make the frame's metrics undefined
    pub const MIN_LANDMARK_CONFIDENCE: f64 = 0.5;
    /// Segments shorter than this (pixels) are degenerate
    pub const MIN_SEGMENT_LENGTH: f64 = 1e-6;
}

/// Smoothing defaults
pub mod smoothing_defaults {
    /// EMA weight of the newest sample (~5 frame time constant at 30 fps)
    pub const EMA_ALPHA: f64 = 0.35;
}

/// Session behavior
pub mod session_defaults {
    /// Auto side selection switches only when the other side's mean landmark
    /// confidence is higher by more than this
    pub const SIDE_SWITCH_MARGIN: f64 = 0.1;
    /// Undrained feedback codes kept for polling consumers; older codes are dropped first
    pub const MAX_PENDING_FEEDBACK: usize = 64;
}

/// Squat phase thresholds and form bounds (degrees unless noted)
pub mod squat_defaults {
    /// Knee angle at or above which the athlete is standing
    pub const STANDING_ENTER_DEG: f64 = 160.0;
    /// Knee angle below which a descent starts
    pub const DESCENT_START_DEG: f64 = 150.0;
    /// Knee angle at or below which the bottom is reached
    pub const BOTTOM_ENTER_DEG: f64 = 100.0;
    /// Knee angle above which the athlete leaves the bottom
    pub const BOTTOM_EXIT_DEG: f64 = 110.0;
    /// Rise/drop from the running extreme that counts as a direction reversal
    pub const REVERSAL_MARGIN_DEG: f64 = 10.0;
    /// Minimum knee angle above which the cycle is too shallow
    pub const SHALLOW_KNEE_DEG: f64 = 100.0;
    /// Minimum knee angle below which the squat is too deep
    pub const TOO_DEEP_KNEE_DEG: f64 = 50.0;
    /// Maximum acceptable trunk lean
    pub const MAX_TRUNK_LEAN_DEG: f64 = 45.0;
    /// Maximum knee travel past the ankle (fraction of shin length)
    pub const MAX_KNEE_TRAVEL_RATIO: f64 = 0.35;
    /// Maximum inward knee deviation (fraction of leg length)
    pub const MAX_KNEE_VALGUS_RATIO: f64 = 0.10;
    /// Shortest plausible rep (ms)
    pub const MIN_REP_DURATION_MS: i64 = 400;
    /// Longest plausible rep (ms)
    pub const MAX_REP_DURATION_MS: i64 = 10_000;
    /// Direction reversals tolerated within one cycle
    pub const MAX_DIRECTION_REVERSALS: u32 = 1;
}

/// Lunge phase thresholds and form bounds (degrees unless noted)
pub mod lunge_defaults {
    /// Front knee angle at or above which the athlete is standing
    pub const STANDING_ENTER_DEG: f64 = 155.0;
    /// Front knee angle below which lowering starts
    pub const DESCENT_START_DEG: f64 = 145.0;
    /// Front knee angle at or below which the bottom is reached
    pub const BOTTOM_ENTER_DEG: f64 = 105.0;
    /// Front knee angle above which the athlete leaves the bottom
    pub const BOTTOM_EXIT_DEG: f64 = 115.0;
    /// Rise/drop from the running extreme that counts as a direction reversal
    pub const REVERSAL_MARGIN_DEG: f64 = 10.0;
    /// Front knee minimum above which the lunge is too shallow
    pub const SHALLOW_FRONT_KNEE_DEG: f64 = 105.0;
    /// Front knee minimum below which the lunge is too deep
    pub const TOO_DEEP_FRONT_KNEE_DEG: f64 = 60.0;
    /// Back knee minimum above which the back leg did not drop enough
    pub const SHALLOW_BACK_KNEE_DEG: f64 = 130.0;
    /// Maximum acceptable trunk lean
    pub const MAX_TRUNK_LEAN_DEG: f64 = 30.0;
    /// Maximum front knee travel past the ankle (fraction of shin length)
    pub const MAX_KNEE_TRAVEL_RATIO: f64 = 0.40;
    /// Maximum inward front knee deviation (fraction of leg length)
    pub const MAX_KNEE_VALGUS_RATIO: f64 = 0.12;
    /// Shortest plausible rep (ms)
    pub const MIN_REP_DURATION_MS: i64 = 500;
    /// Longest plausible rep (ms)
    pub const MAX_REP_DURATION_MS: i64 = 12_000;
    /// Direction reversals tolerated within one cycle
    pub const MAX_DIRECTION_REVERSALS: u32 = 1;
}

/// Environment variable names for configuration overrides
pub mod env_config {
    /// Minimum landmark confidence override
    pub const MIN_CONFIDENCE: &str = "PIERRE_FORM_MIN_CONFIDENCE";
    /// EMA alpha override
    pub const EMA_ALPHA: &str = "PIERRE_FORM_EMA_ALPHA";
    /// Squat bottom threshold override
    pub const SQUAT_BOTTOM_DEG: &str = "PIERRE_FORM_SQUAT_BOTTOM_DEG";
    /// Squat shallow threshold override
    pub const SQUAT_SHALLOW_DEG: &str = "PIERRE_FORM_SQUAT_SHALLOW_DEG";
    /// Lunge front bottom threshold override
    pub const LUNGE_BOTTOM_DEG: &str = "PIERRE_FORM_LUNGE_BOTTOM_DEG";
    /// Lunge front shallow threshold override
    pub const LUNGE_SHALLOW_DEG: &str = "PIERRE_FORM_LUNGE_SHALLOW_DEG";

    /// All override variables (handy for tests that need a clean environment)
    pub const ALL: &[&str] = &[
        MIN_CONFIDENCE,
        EMA_ALPHA,
        SQUAT_BOTTOM_DEG,
        SQUAT_SHALLOW_DEG,
        LUNGE_BOTTOM_DEG,
        LUNGE_SHALLOW_DEG,
    ];
}
