// ABOUTME: Exponential moving average filter for noisy joint angle signals
// ABOUTME: Seeds on the first sample; alpha validated at construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_form_core::{FormAnalysisError, FormResult};

/// Single-value exponential moving average
///
/// `current = alpha * value + (1 - alpha) * current`. Higher alpha follows the
/// raw signal more closely; `alpha = 1.0` disables smoothing.
#[derive(Debug, Clone, PartialEq)]
pub struct EmaFilter {
    alpha: f64,
    current: Option<f64>,
}

impl EmaFilter {
    /// Create a filter
    ///
    /// # Errors
    ///
    /// Returns `FormAnalysisError::InvalidAlpha` if `alpha` is not in (0, 1]
    pub fn new(alpha: f64) -> FormResult<Self> {
        if !alpha.is_finite() || alpha <= 0.0 || alpha > 1.0 {
            return Err(FormAnalysisError::InvalidAlpha(alpha));
        }
        Ok(Self {
            alpha,
            current: None,
        })
    }

    /// Feed one sample and return the smoothed value
    pub fn update(&mut self, value: f64) -> f64 {
        let next = match self.current {
            None => value,
            Some(prev) => self.alpha.mul_add(value, (1.0 - self.alpha) * prev),
        };
        self.current = Some(next);
        next
    }

    /// Latest smoothed value, `None` before the first update
    #[must_use]
    pub const fn current(&self) -> Option<f64> {
        self.current
    }

    /// Smoothing factor
    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Forget all history; the next update seeds again
    pub fn reset(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_update_seeds() {
        let mut filter = EmaFilter::new(0.2).unwrap();
        assert_eq!(filter.current(), None);
        assert!((filter.update(42.5) - 42.5).abs() < f64::EPSILON);
        assert_eq!(filter.current(), Some(42.5));
    }

    #[test]
    fn test_half_alpha_averages() {
        let mut filter = EmaFilter::new(0.5).unwrap();
        filter.update(10.0);
        assert!((filter.update(14.0) - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_alpha_bounds() {
        assert!(EmaFilter::new(1.0).is_ok());
        assert!(EmaFilter::new(0.0).is_err());
        assert!(EmaFilter::new(-0.1).is_err());
        assert!(EmaFilter::new(1.01).is_err());
        assert!(EmaFilter::new(f64::NAN).is_err());
    }

    #[test]
    fn test_reset_forgets_history() {
        let mut filter = EmaFilter::new(0.3).unwrap();
        filter.update(100.0);
        filter.update(50.0);
        filter.reset();
        assert_eq!(filter.current(), None);
        assert!((filter.update(7.0) - 7.0).abs() < f64::EPSILON);
    }
}
