// Copyright 2025 the Coinpack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composition formulas for each recognizer.
//!
//! Pans compose incrementally: each change is already a delta since the last
//! one, so it is left-multiplied onto the current value. Pinches and rotations
//! are reported cumulatively since begin, so each change is re-derived from the
//! begin-time snapshot instead of being stacked onto the previous result.

use coinpack_matrix::Matrix4;
use kurbo::{Point, Vec2};

/// `Translate(delta) * current`.
#[must_use]
pub fn compose_pan(current: Matrix4, delta: Vec2) -> Matrix4 {
    Matrix4::translate(delta) * current
}

/// `offset * ScaleAbout(scale, scale, pivot)`.
#[must_use]
pub fn compose_pinch(offset: Matrix4, pivot: Point, scale: f64) -> Matrix4 {
    offset * Matrix4::scale_about(scale, scale, pivot)
}

/// `offset * RotateZAbout(radians, anchor)`.
#[must_use]
pub fn compose_rotate(offset: Matrix4, anchor: Point, radians: f64) -> Matrix4 {
    offset * Matrix4::rotate_z_about(radians, anchor)
}

/// Pivot and snapshot captured when a pinch or rotation begins.
///
/// Both stay fixed for the lifetime of the gesture and are dropped with it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PivotSession {
    /// Focal (pinch) or anchor (rotate) point at begin time.
    pub pivot: Point,
    /// The shared transform at begin time.
    pub offset: Matrix4,
}

impl PivotSession {
    /// Captures a session.
    #[must_use]
    pub const fn new(pivot: Point, offset: Matrix4) -> Self {
        Self { pivot, offset }
    }

    /// The pinch result for a cumulative `scale`.
    #[must_use]
    pub fn pinch(&self, scale: f64) -> Matrix4 {
        compose_pinch(self.offset, self.pivot, scale)
    }

    /// The rotation result for a cumulative `radians`.
    #[must_use]
    pub fn rotate(&self, radians: f64) -> Matrix4 {
        compose_rotate(self.offset, self.pivot, radians)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pan_left_multiplies() {
        let current = Matrix4::scale(2.0, 2.0);
        let out = compose_pan(current, Vec2::new(5.0, 1.0));
        let p = out * Point::new(1.0, 1.0);
        assert_eq!(p, Point::new(7.0, 3.0));
    }

    #[test]
    fn pinch_identity_scale_is_noop() {
        let offset = Matrix4::translate(Vec2::new(3.0, 9.0));
        let session = PivotSession::new(Point::new(40.0, 12.0), offset);
        assert!(session.pinch(1.0).approx_eq(&offset, 1e-12));
    }

    #[test]
    fn rotate_zero_is_noop() {
        let offset = Matrix4::scale_about(1.5, 1.5, Point::new(2.0, 2.0));
        let session = PivotSession::new(Point::new(-8.0, 5.0), offset);
        assert!(session.rotate(0.0).approx_eq(&offset, 1e-12));
    }

    #[test]
    fn rotate_keeps_anchor_fixed_from_identity() {
        let anchor = Point::new(30.0, -20.0);
        let m = compose_rotate(Matrix4::IDENTITY, anchor, 2.1);
        let p = m * anchor;
        assert!((p - anchor).hypot() < 1e-9);
    }
}
