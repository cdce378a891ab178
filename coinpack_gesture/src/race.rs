// Copyright 2025 the Coinpack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbitration between competing recognizers.

use crate::compose::PivotSession;
use crate::events::GestureKind;

bitflags::bitflags! {
    /// Recognizers taking part in the race.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct GestureMask: u8 {
        /// Pan recognizer.
        const PAN    = 0b0000_0001;
        /// Pinch recognizer.
        const PINCH  = 0b0000_0010;
        /// Rotation recognizer.
        const ROTATE = 0b0000_0100;
    }
}

impl Default for GestureMask {
    fn default() -> Self {
        Self::all()
    }
}

impl From<GestureKind> for GestureMask {
    fn from(kind: GestureKind) -> Self {
        match kind {
            GestureKind::Pan => Self::PAN,
            GestureKind::Pinch => Self::PINCH,
            GestureKind::Rotate => Self::ROTATE,
        }
    }
}

impl GestureMask {
    /// Returns `true` if `kind` takes part in the race.
    #[must_use]
    pub fn allows(self, kind: GestureKind) -> bool {
        self.contains(kind.into())
    }
}

/// Thresholds a pending recognizer must cross before it claims the sequence.
///
/// The defaults are all zero, so the first change event of any recognizer
/// wins.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ActivationCriteria {
    /// Distance a pan must travel while pending.
    pub pan_min_distance: f64,
    /// Minimum `|scale - 1|` for a pinch.
    pub pinch_min_scale_delta: f64,
    /// Minimum `|rotation|` in radians for a rotation.
    pub rotate_min_radians: f64,
}

impl ActivationCriteria {
    /// Sets [`pan_min_distance`](Self::pan_min_distance).
    #[must_use]
    pub fn with_pan_min_distance(mut self, distance: f64) -> Self {
        self.pan_min_distance = distance;
        self
    }

    /// Sets [`pinch_min_scale_delta`](Self::pinch_min_scale_delta).
    #[must_use]
    pub fn with_pinch_min_scale_delta(mut self, delta: f64) -> Self {
        self.pinch_min_scale_delta = delta;
        self
    }

    /// Sets [`rotate_min_radians`](Self::rotate_min_radians).
    #[must_use]
    pub fn with_rotate_min_radians(mut self, radians: f64) -> Self {
        self.rotate_min_radians = radians;
        self
    }
}

/// Which recognizer, if any, owns the current touch sequence.
///
/// Pinch and rotate sessions carry their pivot and begin-time snapshot, so
/// those live exactly as long as the recognizer holds the sequence.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Arbitration {
    /// No recognizer has activated.
    #[default]
    NoneActive,
    /// The pan recognizer won.
    PanActive,
    /// The pinch recognizer won.
    PinchActive(PivotSession),
    /// The rotation recognizer won.
    RotateActive(PivotSession),
}

impl Arbitration {
    /// The winning recognizer, if any.
    #[must_use]
    pub fn active_kind(&self) -> Option<GestureKind> {
        match self {
            Self::NoneActive => None,
            Self::PanActive => Some(GestureKind::Pan),
            Self::PinchActive(_) => Some(GestureKind::Pinch),
            Self::RotateActive(_) => Some(GestureKind::Rotate),
        }
    }

    /// The pivot session of the winner, if it has one.
    #[must_use]
    pub fn session(&self) -> Option<&PivotSession> {
        match self {
            Self::PinchActive(session) | Self::RotateActive(session) => Some(session),
            Self::NoneActive | Self::PanActive => None,
        }
    }
}
