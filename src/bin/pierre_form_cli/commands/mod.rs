// ABOUTME: Command modules for pierre-form-cli
// ABOUTME: Provides replay, feedback code listing, and configuration checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod check_config;
pub mod codes;
pub mod replay;

use anyhow::{Context, Result};
use pierre_form_coach::config::FormAnalysisConfig;
use std::fs;
use std::path::Path;

/// Configuration from a JSON file, or defaults plus environment overrides
pub fn load_config(path: Option<&Path>) -> Result<FormAnalysisConfig> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            FormAnalysisConfig::from_json_str(&raw)
                .with_context(|| format!("invalid config file {}", path.display()))
        }
        None => FormAnalysisConfig::load().context("invalid environment configuration"),
    }
}
