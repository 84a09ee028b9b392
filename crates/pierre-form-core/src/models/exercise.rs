// ABOUTME: Exercise types, per-exercise phase sets, and form feedback codes
// ABOUTME: Tagged enums replace UI state classes; string codes form the coaching contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::feedback_codes;
use crate::errors::ConfigError;

/// Exercise being tracked by a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    /// Bilateral squat
    Squat,
    /// Split-stance lunge (tracked side = front leg)
    Lunge,
}

impl ExerciseType {
    /// Uppercase label used to qualify phase names
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Squat => "SQUAT",
            Self::Lunge => "LUNGE",
        }
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Squat => f.write_str("squat"),
            Self::Lunge => f.write_str("lunge"),
        }
    }
}

impl FromStr for ExerciseType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "squat" => Ok(Self::Squat),
            "lunge" => Ok(Self::Lunge),
            other => Err(ConfigError::Parse(format!("unknown exercise type: {other}"))),
        }
    }
}

/// Squat repetition phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SquatPhase {
    /// Upright, knees extended
    Standing,
    /// Lowering toward the bottom
    Descending,
    /// At or below depth
    Bottom,
    /// Driving back up
    Ascending,
}

impl SquatPhase {
    /// Uppercase phase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standing => "STANDING",
            Self::Descending => "DESCENDING",
            Self::Bottom => "BOTTOM",
            Self::Ascending => "ASCENDING",
        }
    }
}

/// Lunge repetition phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LungePhase {
    /// Upright in split stance
    Standing,
    /// Front knee bending, back knee dropping
    Lowering,
    /// Front knee at or below depth
    Bottom,
    /// Returning to standing
    Rising,
}

impl LungePhase {
    /// Uppercase phase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standing => "STANDING",
            Self::Lowering => "LOWERING",
            Self::Bottom => "BOTTOM",
            Self::Rising => "RISING",
        }
    }
}

/// Current phase of whichever exercise is being tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "exercise", content = "phase", rename_all = "snake_case")]
pub enum ExercisePhase {
    /// Squat phase
    Squat(SquatPhase),
    /// Lunge phase
    Lunge(LungePhase),
}

impl ExercisePhase {
    /// Exercise this phase belongs to
    #[must_use]
    pub const fn exercise(self) -> ExerciseType {
        match self {
            Self::Squat(_) => ExerciseType::Squat,
            Self::Lunge(_) => ExerciseType::Lunge,
        }
    }

    /// Bare phase name (`BOTTOM`)
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Squat(phase) => phase.as_str(),
            Self::Lunge(phase) => phase.as_str(),
        }
    }

    /// Exercise-qualified phase name (`SQUAT_BOTTOM`)
    #[must_use]
    pub fn qualified_name(self) -> String {
        format!("{}_{}", self.exercise().label(), self.name())
    }

    /// True for the resting phase of either exercise
    #[must_use]
    pub const fn is_standing(self) -> bool {
        matches!(
            self,
            Self::Squat(SquatPhase::Standing) | Self::Lunge(LungePhase::Standing)
        )
    }
}

impl fmt::Display for ExercisePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Qualitative form issue raised by a rep state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCode {
    /// Squat cycle stayed above depth
    TooShallow,
    /// Squat went below safe depth
    TooDeep,
    /// Lunge front knee stayed above depth
    TooShallowFront,
    /// Lunge front knee went below safe depth
    TooDeepFront,
    /// Lunge back knee did not drop enough
    TooShallowBack,
    /// Knee travelled too far past the ankle
    KneeTooForward,
    /// Torso leaned too far forward
    TorsoLeanForward,
    /// Knee collapsed toward the midline
    KneeCollapseInward,
    /// Rep timing was erratic
    Unstable,
}

impl FeedbackCode {
    /// All codes in registry order
    pub const ALL: [Self; 9] = [
        Self::TooShallow,
        Self::TooDeep,
        Self::TooShallowFront,
        Self::TooDeepFront,
        Self::TooShallowBack,
        Self::KneeTooForward,
        Self::TorsoLeanForward,
        Self::KneeCollapseInward,
        Self::Unstable,
    ];

    /// Stable string code
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TooShallow => feedback_codes::TOO_SHALLOW,
            Self::TooDeep => feedback_codes::TOO_DEEP,
            Self::TooShallowFront => feedback_codes::TOO_SHALLOW_FRONT,
            Self::TooDeepFront => feedback_codes::TOO_DEEP_FRONT,
            Self::TooShallowBack => feedback_codes::TOO_SHALLOW_BACK,
            Self::KneeTooForward => feedback_codes::KNEE_TOO_FORWARD,
            Self::TorsoLeanForward => feedback_codes::TORSO_LEAN_FORWARD,
            Self::KneeCollapseInward => feedback_codes::KNEE_COLLAPSE_INWARD,
            Self::Unstable => feedback_codes::UNSTABLE,
        }
    }

    /// Look up a code by its string form
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == code)
    }

    /// Default English coaching message
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::TooShallow => "Go deeper: bend your knees until your thighs are near parallel",
            Self::TooDeep => "Don't sink so low: stop just below parallel",
            Self::TooShallowFront => "Bend your front knee more",
            Self::TooDeepFront => "Don't drop so far over the front knee",
            Self::TooShallowBack => "Lower your back knee toward the floor",
            Self::KneeTooForward => "Keep your knee behind your toes",
            Self::TorsoLeanForward => "Keep your chest up",
            Self::KneeCollapseInward => "Push your knee out in line with your toes",
            Self::Unstable => "Slow down and control the movement",
        }
    }
}

impl fmt::Display for FeedbackCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
