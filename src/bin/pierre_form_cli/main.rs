// ABOUTME: Pierre form CLI - replay recorded pose sessions and inspect form analysis settings
// ABOUTME: Thin clap front end over the session, detector and configuration APIs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Replay a recorded squat session tracking the left leg
//! pierre-form-cli replay --input session.jsonl --exercise squat --side left
//!
//! # Replay a lunge, pick the side automatically, print a JSON report
//! pierre-form-cli replay --input lunge.jsonl --exercise lunge --side auto --json
//!
//! # Apply per-user calibration and a threshold file
//! pierre-form-cli replay --input session.jsonl --calibration-knee 4 --config form.json
//!
//! # List feedback codes and their coaching messages
//! pierre-form-cli codes
//!
//! # Validate configuration (defaults + PIERRE_FORM_* overrides, or a file)
//! pierre-form-cli check-config --config form.json
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use pierre_form_coach::logging::LoggingConfig;
use pierre_form_coach::models::{ExerciseType, PoseSide};
use pierre_form_coach::session::SideSelection;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "pierre-form-cli",
    about = "Pierre Form Coach CLI",
    long_about = "Replay recorded pose frames through the squat/lunge form analysis engine."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Replay a JSON-lines frame recording through a session
    Replay {
        /// Recorded frames, one JSON `PoseFrame` per line
        #[arg(long, short = 'i')]
        input: PathBuf,

        /// Exercise to track
        #[arg(long, short = 'e', value_enum, default_value = "squat")]
        exercise: ExerciseArg,

        /// Body side to track
        #[arg(long, short = 's', value_enum, default_value = "auto")]
        side: SideArg,

        /// Knee angle calibration offset (degrees)
        #[arg(long, allow_hyphen_values = true)]
        calibration_knee: Option<f64>,

        /// Trunk lean calibration offset (degrees)
        #[arg(long, allow_hyphen_values = true)]
        calibration_trunk: Option<f64>,

        /// Hip angle calibration offset (degrees)
        #[arg(long, allow_hyphen_values = true)]
        calibration_hip: Option<f64>,

        /// JSON configuration file (defaults and environment when omitted)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List feedback codes
    Codes,

    /// Load and validate configuration
    CheckConfig {
        /// JSON configuration file (defaults and environment when omitted)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExerciseArg {
    Squat,
    Lunge,
}

impl From<ExerciseArg> for ExerciseType {
    fn from(arg: ExerciseArg) -> Self {
        match arg {
            ExerciseArg::Squat => Self::Squat,
            ExerciseArg::Lunge => Self::Lunge,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SideArg {
    Left,
    Right,
    Auto,
}

impl From<SideArg> for SideSelection {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::Left => Self::Fixed(PoseSide::Left),
            SideArg::Right => Self::Fixed(PoseSide::Right),
            SideArg::Auto => Self::Auto,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env().with_stderr();
    if cli.verbose {
        "debug".clone_into(&mut logging.level);
    }
    logging.init()?;
    debug!("Pierre form CLI");

    match cli.command {
        Command::Replay {
            input,
            exercise,
            side,
            calibration_knee,
            calibration_trunk,
            calibration_hip,
            config,
            json,
        } => {
            let calibration = commands::replay::calibration_from_args(
                calibration_knee,
                calibration_trunk,
                calibration_hip,
            );
            commands::replay::run(
                &input,
                exercise.into(),
                side.into(),
                calibration,
                config.as_deref(),
                json,
            )?;
        }
        Command::Codes => commands::codes::run(),
        Command::CheckConfig { config } => commands::check_config::run(config.as_deref())?,
    }

    Ok(())
}
