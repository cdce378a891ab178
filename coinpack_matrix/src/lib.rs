// Copyright 2025 the Coinpack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coinpack Matrix: 4x4 homogeneous matrices carrying 2D affine transforms.
//!
//! Gesture code composes pans, pinches and rotations into a single
//! [`Matrix4`] by multiplication. This crate provides:
//! - The matrix type with translation, scale and Z-rotation constructors.
//! - Pivot variants ([`Matrix4::scale_about`], [`Matrix4::rotate_z_about`])
//!   that leave a chosen point fixed.
//! - Point mapping and conversion to and from Kurbo's [`kurbo::Affine`].
//! - A [`display`] module that resolves cell order for a rendering surface
//!   and derives the centre-origin display transform for a view.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use coinpack_matrix::Matrix4;
//!
//! let pivot = Point::new(50.0, 50.0);
//! let m = Matrix4::translate(Vec2::new(10.0, 0.0)) * Matrix4::scale_about(2.0, 2.0, pivot);
//!
//! // The pinch pivot only moves by the outer pan.
//! let mapped = m * pivot;
//! assert!((mapped.x - 60.0).abs() < 1e-9);
//! assert!((mapped.y - 50.0).abs() < 1e-9);
//! ```
//!
//! ## Conventions
//!
//! - Storage is row-major; points are column vectors, so `a * b` applies `b` first.
//! - Nothing here can fail. Callers are trusted to pass finite inputs.
//!
//! This crate is `no_std`.

#![no_std]

pub mod display;
mod matrix;

pub use display::{DisplayTransform, MatrixLayout, SurfaceMatrix, TransformOp};
pub use matrix::Matrix4;
