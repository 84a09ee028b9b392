// ABOUTME: Smoothing filters module
// ABOUTME: Re-exports the EMA filter and the multi-signal metrics smoother
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod ema;
mod smoother;

pub use ema::EmaFilter;
pub use smoother::MetricsSmoother;
