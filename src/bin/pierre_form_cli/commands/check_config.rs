// ABOUTME: Configuration check for pierre-form-cli
// ABOUTME: Loads, validates and prints the effective form analysis configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use std::path::Path;
use tracing::info;

use super::load_config;

/// Validate configuration and print it as JSON
pub fn run(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;
    info!(
        alpha = config.smoothing.alpha,
        min_confidence = config.calculator.min_landmark_confidence,
        "configuration valid"
    );
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
