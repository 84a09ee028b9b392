// ABOUTME: Replay command for pierre-form-cli
// ABOUTME: Runs a JSON-lines recording through a session and prints transitions, feedback and totals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{Context, Result};
use pierre_form_coach::detector::JsonLineDetector;
use pierre_form_coach::models::{CalibrationOffset, ExerciseType};
use pierre_form_coach::replay::{replay_frames, ReplayReport};
use pierre_form_coach::session::{ExerciseSession, SideSelection};
use std::path::Path;
use tracing::info;

use super::load_config;

/// Build a calibration offset when any component was given
pub fn calibration_from_args(
    knee: Option<f64>,
    trunk: Option<f64>,
    hip: Option<f64>,
) -> Option<CalibrationOffset> {
    if knee.is_none() && trunk.is_none() && hip.is_none() {
        return None;
    }
    Some(CalibrationOffset {
        knee_deg: knee.unwrap_or_default(),
        trunk_deg: trunk.unwrap_or_default(),
        hip_deg: hip.unwrap_or_default(),
    })
}

/// Replay `input` and print the report
pub fn run(
    input: &Path,
    exercise: ExerciseType,
    side: SideSelection,
    calibration: Option<CalibrationOffset>,
    config_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let detector = JsonLineDetector::from_path(input)
        .with_context(|| format!("loading recording {}", input.display()))?;
    info!(frames = detector.len(), input = %input.display(), "replaying recording");

    let mut session = ExerciseSession::new(exercise, side, config, calibration)?;
    let report = replay_frames(&mut session, detector);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &ReplayReport) {
    println!("Session {} ({})", report.session_id, report.exercise);
    println!();
    for transition in &report.transitions {
        println!("  {transition}");
    }
    if !report.feedback.is_empty() {
        println!();
        println!("Feedback:");
        for cycle in &report.feedback {
            let label = if cycle.counted {
                format!("rep {}", cycle.rep_count)
            } else {
                "partial".to_owned()
            };
            for code in &cycle.codes {
                println!("  ts={} {label}: {code} - {}", cycle.ts, code.message());
            }
        }
    }
    println!();
    println!(
        "Reps: {}  frames: {}  without metrics: {}  rejected: {}",
        report.rep_count,
        report.frames_processed,
        report.frames_without_metrics,
        report.frames_rejected
    );
}
