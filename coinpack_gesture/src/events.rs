// Copyright 2025 the Coinpack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed gesture payloads.
//!
//! Positions are in device-independent pixels, rotations in radians and
//! scales are unitless ratios.

use kurbo::{Point, Vec2};

/// The three competing recognizers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// One-finger (or more) translation.
    Pan,
    /// Two-finger scale about a focal point.
    Pinch,
    /// Two-finger rotation about an anchor point.
    Rotate,
}

/// Pan movement since the previous pan change event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanDelta {
    /// `changeX`, `changeY`.
    pub change: Vec2,
}

impl PanDelta {
    /// Creates a delta from its components.
    #[must_use]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self {
            change: Vec2::new(dx, dy),
        }
    }
}

/// Pinch state as reported by the recognizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchUpdate {
    /// Current focal point between the touches.
    pub focal: Point,
    /// Scale factor accumulated since the pinch began.
    pub scale: f64,
}

impl PinchUpdate {
    /// Creates an update with a cumulative `scale` about `focal`.
    #[must_use]
    pub const fn new(focal: Point, scale: f64) -> Self {
        Self { focal, scale }
    }
}

/// Rotation state as reported by the recognizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotateUpdate {
    /// Current anchor point of the rotation.
    pub anchor: Point,
    /// Rotation in radians accumulated since the gesture began.
    pub rotation: f64,
}

impl RotateUpdate {
    /// Creates an update with a cumulative `rotation` about `anchor`.
    #[must_use]
    pub const fn new(anchor: Point, rotation: f64) -> Self {
        Self { anchor, rotation }
    }
}

/// Data available when a recognizer begins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureStart {
    /// A pan began. Pans need no begin-time data.
    Pan,
    /// A pinch began around `focal`.
    Pinch {
        /// Focal point at begin time; becomes the pinch pivot.
        focal: Point,
    },
    /// A rotation began around `anchor`.
    Rotate {
        /// Anchor point at begin time; becomes the rotation pivot.
        anchor: Point,
    },
}

impl GestureStart {
    /// The recognizer this start belongs to.
    #[must_use]
    pub fn kind(&self) -> GestureKind {
        match self {
            Self::Pan => GestureKind::Pan,
            Self::Pinch { .. } => GestureKind::Pinch,
            Self::Rotate { .. } => GestureKind::Rotate,
        }
    }

    /// The pivot captured by this start, if the recognizer uses one.
    #[must_use]
    pub fn pivot(&self) -> Option<Point> {
        match *self {
            Self::Pan => None,
            Self::Pinch { focal } => Some(focal),
            Self::Rotate { anchor } => Some(anchor),
        }
    }
}

/// A change reported by one recognizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureUpdate {
    /// Incremental pan movement.
    Pan(PanDelta),
    /// Cumulative pinch scale.
    Pinch(PinchUpdate),
    /// Cumulative rotation.
    Rotate(RotateUpdate),
}

impl GestureUpdate {
    /// The recognizer this update belongs to.
    #[must_use]
    pub fn kind(&self) -> GestureKind {
        match self {
            Self::Pan(_) => GestureKind::Pan,
            Self::Pinch(_) => GestureKind::Pinch,
            Self::Rotate(_) => GestureKind::Rotate,
        }
    }

    /// The start this update implies when its recognizer never saw a begin.
    #[must_use]
    pub fn implied_start(&self) -> GestureStart {
        match *self {
            Self::Pan(_) => GestureStart::Pan,
            Self::Pinch(p) => GestureStart::Pinch { focal: p.focal },
            Self::Rotate(r) => GestureStart::Rotate { anchor: r.anchor },
        }
    }
}

impl From<PanDelta> for GestureUpdate {
    fn from(delta: PanDelta) -> Self {
        Self::Pan(delta)
    }
}

impl From<PinchUpdate> for GestureUpdate {
    fn from(update: PinchUpdate) -> Self {
        Self::Pinch(update)
    }
}

impl From<RotateUpdate> for GestureUpdate {
    fn from(update: RotateUpdate) -> Self {
        Self::Rotate(update)
    }
}

/// One event in a touch sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// A recognizer saw enough touches to start tracking.
    Begin(GestureStart),
    /// A recognizer reported new data.
    Change(GestureUpdate),
    /// A recognizer finished normally.
    End(GestureKind),
    /// A recognizer was interrupted (for example by the system).
    Cancel(GestureKind),
}

impl GestureEvent {
    /// The recognizer this event belongs to.
    #[must_use]
    pub fn kind(&self) -> GestureKind {
        match self {
            Self::Begin(start) => start.kind(),
            Self::Change(update) => update.kind(),
            Self::End(kind) | Self::Cancel(kind) => *kind,
        }
    }
}

impl From<GestureUpdate> for GestureEvent {
    fn from(update: GestureUpdate) -> Self {
        Self::Change(update)
    }
}
