// Copyright 2025 the Coinpack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coinpack State: the shared transform cell between gestures and views.
//!
//! A visual element has exactly one current transform. Gesture callbacks
//! write it (one recognizer at a time) and presentation code reads it, often
//! from another thread. This crate provides:
//!
//! - [`SharedTransform`]: a cloneable handle to a single [`Matrix4`] cell.
//!   Writes replace the whole value, bump a revision counter and notify
//!   observers synchronously.
//! - [`DerivedTransform`]: a reader-side cache that re-derives a style value
//!   only when the revision moves.
//!
//! ```rust
//! use coinpack_matrix::Matrix4;
//! use coinpack_state::{DerivedTransform, SharedTransform};
//!
//! let shared = SharedTransform::new();
//! let mut style = DerivedTransform::new();
//!
//! shared.set(Matrix4::scale(2.0, 2.0));
//! let det = *style.get(&shared, |m| m.determinant_2d());
//! assert_eq!(det, 4.0);
//! ```
//!
//! There is no validation and no error path: writers are trusted to supply
//! affine matrices.
//!
//! [`Matrix4`]: coinpack_matrix::Matrix4

mod derived;
mod shared;

pub use derived::DerivedTransform;
pub use shared::{ObserverId, SharedTransform, Snapshot};
