// ABOUTME: Feedback code listing for pierre-form-cli
// ABOUTME: Prints every stable code with its default coaching message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_form_coach::models::FeedbackCode;

/// Print the feedback registry
pub fn run() {
    let width = FeedbackCode::ALL
        .iter()
        .map(|code| code.as_str().len())
        .max()
        .unwrap_or_default();
    for code in FeedbackCode::ALL {
        println!("{:<width$}  {}", code.as_str(), code.message());
    }
}
