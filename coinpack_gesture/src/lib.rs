// Copyright 2025 the Coinpack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coinpack Gesture: pan, pinch and rotate composed into one shared transform.
//!
//! Raw touch handling stays with the host platform. Its recognizers report
//! typed events ([`GestureEvent`]) and this crate turns them into writes on a
//! [`SharedTransform`]:
//!
//! - **Pan** changes are deltas since the previous change and are
//!   left-multiplied onto the current value: `shared = Translate(d) * shared`.
//! - **Pinch** and **rotate** capture a pivot and a snapshot (`offset`) when
//!   they begin, and re-derive `shared = offset * ScaleAbout(s, pivot)` or
//!   `shared = offset * RotateZAbout(θ, pivot)` from the cumulative value on
//!   every change.
//! - The recognizers race: the first to activate owns the touch sequence
//!   and the others are suppressed until it ends.
//!
//! ```rust
//! use coinpack_gesture::{
//!     GestureComposer, GestureEvent, GestureKind, GestureStart, Outcome, PanDelta, PinchUpdate,
//! };
//! use coinpack_state::SharedTransform;
//! use kurbo::Point;
//!
//! let shared = SharedTransform::new();
//! let mut composer = GestureComposer::new(shared.clone());
//!
//! let focal = Point::new(50.0, 50.0);
//! composer.handle(GestureEvent::Begin(GestureStart::Pinch { focal }));
//! composer.handle(GestureEvent::Begin(GestureStart::Pan));
//! let won = composer.handle(GestureEvent::Change(PinchUpdate::new(focal, 2.0).into()));
//! assert_eq!(won, Outcome::Activated);
//!
//! // The pan lost this sequence.
//! let lost = composer.handle(GestureEvent::Change(PanDelta::new(5.0, 0.0).into()));
//! assert_eq!(lost, Outcome::Suppressed);
//!
//! composer.handle(GestureEvent::End(GestureKind::Pinch));
//! let p = shared.get() * focal;
//! assert!((p.x - 50.0).abs() < 1e-9 && (p.y - 50.0).abs() < 1e-9);
//! ```
//!
//! Nothing here can fail. Out-of-range touch data is the host recognizer's
//! problem to filter before it reaches this crate.
//!
//! [`SharedTransform`]: coinpack_state::SharedTransform

pub mod compose;
mod composer;
mod events;
mod race;

pub use compose::PivotSession;
pub use composer::{GestureComposer, Outcome};
pub use events::{
    GestureEvent, GestureKind, GestureStart, GestureUpdate, PanDelta, PinchUpdate, RotateUpdate,
};
pub use race::{ActivationCriteria, Arbitration, GestureMask};
