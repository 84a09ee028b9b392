// ABOUTME: Pose detector capability and a JSON-lines detector that replays recorded frames
// ABOUTME: Keeps the engine independent of any concrete landmark model SDK
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Pose detection capability
//!
//! The engine never runs a landmark model itself. Anything that turns an image
//! into a `PoseFrame` implements `PoseDetector`; `JsonLineDetector` replays
//! frames recorded one JSON object per line (camelCase `PoseFrame` fields).

use pierre_form_core::models::PoseFrame;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Turns an image into landmarks
pub trait PoseDetector {
    /// Image representation this detector consumes
    type Image;

    /// Detect a pose; `None` when no person was found
    fn detect(&mut self, image: &Self::Image) -> Option<PoseFrame>;
}

/// Errors reading a recorded frame file
#[derive(Error, Debug)]
pub enum DetectorError {
    /// File could not be opened or read
    #[error("failed to read frames from {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// A line was not a valid frame
    #[error("invalid frame on line {line}: {source}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

/// Replays recorded frames; the "image" is the frame index
#[derive(Debug, Clone, Default)]
pub struct JsonLineDetector {
    frames: Vec<PoseFrame>,
    cursor: usize,
}

impl JsonLineDetector {
    /// Wrap already-loaded frames
    #[must_use]
    pub const fn from_frames(frames: Vec<PoseFrame>) -> Self {
        Self { frames, cursor: 0 }
    }

    /// Parse JSON lines; blank lines and lines starting with `#` are skipped
    ///
    /// # Errors
    ///
    /// Returns `DetectorError::Parse` for the first malformed line
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, DetectorError> {
        let mut frames = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| DetectorError::Io {
                path: PathBuf::from("<reader>"),
                source,
            })?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let frame = serde_json::from_str(trimmed).map_err(|source| DetectorError::Parse {
                line: index + 1,
                source,
            })?;
            frames.push(frame);
        }
        debug!(frames = frames.len(), "loaded recorded pose frames");
        Ok(Self::from_frames(frames))
    }

    /// Load a JSON-lines file
    ///
    /// # Errors
    ///
    /// Returns `DetectorError::Io` if the file cannot be read or
    /// `DetectorError::Parse` for a malformed line
    pub fn from_path(path: &Path) -> Result<Self, DetectorError> {
        let file = File::open(path).map_err(|source| DetectorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file)).map_err(|e| match e {
            DetectorError::Io { source, .. } => DetectorError::Io {
                path: path.to_path_buf(),
                source,
            },
            parse @ DetectorError::Parse { .. } => parse,
        })
    }

    /// Number of recorded frames
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True when nothing was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Next frame in recording order
    pub fn next_frame(&mut self) -> Option<PoseFrame> {
        let frame = self.frames.get(self.cursor).cloned();
        if frame.is_some() {
            self.cursor += 1;
        }
        frame
    }
}

impl PoseDetector for JsonLineDetector {
    type Image = usize;

    fn detect(&mut self, image: &usize) -> Option<PoseFrame> {
        let frame = self.frames.get(*image).cloned();
        if frame.is_none() {
            warn!(index = image, total = self.frames.len(), "no recorded frame at index");
        }
        frame
    }
}

impl Iterator for JsonLineDetector {
    type Item = PoseFrame;

    fn next(&mut self) -> Option<PoseFrame> {
        self.next_frame()
    }
}
