// ABOUTME: Common benchmark utilities for form analysis performance testing
// ABOUTME: Provides reusable pose frame generators for Criterion benchmarks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Common benchmark utilities and pose fixtures.

pub mod fixtures;
