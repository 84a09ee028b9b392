// ABOUTME: 2D vector math for joint angles in upright image coordinates
// ABOUTME: Degenerate segments yield None instead of NaN
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Joint angle geometry
//!
//! Coordinates are upright image pixels: x grows to the right, y grows downward.
//! Angles come from the dot product, `cos(θ) = (v1 · v2) / (|v1| |v2|)`, clamped
//! before `acos` so rounding can never push the result out of [0°, 180°].

/// Point or vector in upright image space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2 {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate (down is positive)
    pub y: f64,
}

impl Point2 {
    /// Screen-space "up"
    pub const UP: Self = Self { x: 0.0, y: -1.0 };

    /// Create a point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector from `self` to `other`
    #[must_use]
    pub fn to(self, other: Self) -> Self {
        Self::new(other.x - self.x, other.y - self.y)
    }

    /// Dot product
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x.mul_add(other.x, self.y * other.y)
    }

    /// Euclidean length
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Distance between two points
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.to(other).length()
    }

    /// True when both coordinates are finite
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Angle between two vectors in degrees, `None` if either is shorter than `min_length`
#[must_use]
pub fn angle_between_deg(v1: Point2, v2: Point2, min_length: f64) -> Option<f64> {
    let mag1 = v1.length();
    let mag2 = v2.length();
    if !(mag1.is_finite() && mag2.is_finite()) || mag1 < min_length || mag2 < min_length {
        return None;
    }
    let cos_angle = (v1.dot(v2) / (mag1 * mag2)).clamp(-1.0, 1.0);
    let angle = cos_angle.acos().to_degrees();
    angle.is_finite().then_some(angle)
}

/// Angle at `vertex` between the segments to `a` and to `b`
#[must_use]
pub fn joint_angle_deg(a: Point2, vertex: Point2, b: Point2, min_length: f64) -> Option<f64> {
    angle_between_deg(vertex.to(a), vertex.to(b), min_length)
}

/// Angle of the segment `from → to` away from screen-up
#[must_use]
pub fn angle_from_vertical_deg(from: Point2, to: Point2, min_length: f64) -> Option<f64> {
    angle_between_deg(from.to(to), Point2::UP, min_length)
}
