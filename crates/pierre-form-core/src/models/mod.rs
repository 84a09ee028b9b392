// ABOUTME: Pose data model module
// ABOUTME: Re-exports landmark, frame, metrics and exercise types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod exercise;
mod frame;
mod landmark;
mod metrics;

pub use exercise::{ExercisePhase, ExerciseType, FeedbackCode, LungePhase, SquatPhase};
pub use frame::{PoseFrame, PoseSide};
pub use landmark::{BodyJointId, PoseLandmark};
pub use metrics::{CalibrationOffset, PoseMetrics};
