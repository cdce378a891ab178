// Copyright 2025 the Coinpack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point, Vec2};

/// A 4x4 homogeneous matrix used to carry a 2D affine transform.
///
/// Cells are stored row-major (`m[row * 4 + col]`) and points are treated as
/// column vectors, so `a * b` applies `b` first and then `a`. Translation
/// lives in cells 3 and 7.
///
/// Only translation, rotation about the Z axis and (non-)uniform XY scale are
/// ever produced by the constructors on this type. The Z row and column, and
/// the projective last row, stay at identity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix4 {
    m: [f64; 16],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4 {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Creates a matrix from cells in row-major order.
    #[must_use]
    pub const fn from_row_major(m: [f64; 16]) -> Self {
        Self { m }
    }

    /// Creates a matrix from cells in column-major order.
    #[must_use]
    pub fn from_column_major(m: [f64; 16]) -> Self {
        Self { m: transpose(m) }
    }

    /// A translation by `offset`.
    #[must_use]
    pub const fn translate(offset: Vec2) -> Self {
        Self {
            m: [
                1.0, 0.0, 0.0, offset.x, //
                0.0, 1.0, 0.0, offset.y, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// A scale about the origin.
    #[must_use]
    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self {
            m: [
                sx, 0.0, 0.0, 0.0, //
                0.0, sy, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// A counter-clockwise (in a y-up frame) rotation about the Z axis through the origin.
    #[must_use]
    pub fn rotate_z(radians: f64) -> Self {
        let (s, c) = (radians.sin(), radians.cos());
        Self {
            m: [
                c, -s, 0.0, 0.0, //
                s, c, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// A scale that leaves `pivot` fixed.
    ///
    /// Equivalent to `translate(pivot) * scale(sx, sy) * translate(-pivot)`.
    #[must_use]
    pub fn scale_about(sx: f64, sy: f64, pivot: Point) -> Self {
        let p = pivot.to_vec2();
        Self::translate(p) * Self::scale(sx, sy) * Self::translate(-p)
    }

    /// A rotation about the Z axis that leaves `pivot` fixed.
    ///
    /// Equivalent to `translate(pivot) * rotate_z(radians) * translate(-pivot)`.
    #[must_use]
    pub fn rotate_z_about(radians: f64, pivot: Point) -> Self {
        let p = pivot.to_vec2();
        Self::translate(p) * Self::rotate_z(radians) * Self::translate(-p)
    }

    /// Returns the cell at `row`, `col`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not in `0..4`.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < 4 && col < 4, "matrix index out of range");
        self.m[row * 4 + col]
    }

    /// Returns the cells in row-major order.
    #[must_use]
    pub const fn to_row_major(&self) -> [f64; 16] {
        self.m
    }

    /// Returns the cells in column-major order.
    #[must_use]
    pub fn to_column_major(&self) -> [f64; 16] {
        transpose(self.m)
    }

    /// The translation component.
    #[must_use]
    pub const fn translation(&self) -> Vec2 {
        Vec2::new(self.m[3], self.m[7])
    }

    /// Maps a 2D point through this transform (z = 0, w = 1).
    #[must_use]
    pub fn map_point(&self, p: Point) -> Point {
        let m = &self.m;
        Point::new(
            m[0] * p.x + m[1] * p.y + m[3],
            m[4] * p.x + m[5] * p.y + m[7],
        )
    }

    /// Returns the 2D affine subset as a Kurbo [`Affine`].
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        let m = &self.m;
        Affine::new([m[0], m[4], m[1], m[5], m[3], m[7]])
    }

    /// Embeds a Kurbo [`Affine`] into a 4x4 matrix.
    #[must_use]
    pub fn from_affine(affine: Affine) -> Self {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        Self {
            m: [
                a, c, 0.0, e, //
                b, d, 0.0, f, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Determinant of the 2x2 linear part.
    #[must_use]
    pub fn determinant_2d(&self) -> f64 {
        self.m[0] * self.m[5] - self.m[1] * self.m[4]
    }

    /// Returns `true` if this matrix carries no Z or projective terms.
    #[must_use]
    pub fn is_affine(&self) -> bool {
        let m = &self.m;
        m[2] == 0.0
            && m[6] == 0.0
            && m[8] == 0.0
            && m[9] == 0.0
            && m[10] == 1.0
            && m[11] == 0.0
            && m[12] == 0.0
            && m[13] == 0.0
            && m[14] == 0.0
            && m[15] == 1.0
    }

    /// Compares cell-by-cell with an absolute `tolerance`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }

    /// Returns `true` if every cell is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.m.iter().all(|c| c.is_finite())
    }
}

impl core::ops::Mul for Matrix4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let (a, b) = (&self.m, &rhs.m);
        let mut out = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                out[row * 4 + col] = a[row * 4] * b[col]
                    + a[row * 4 + 1] * b[4 + col]
                    + a[row * 4 + 2] * b[8 + col]
                    + a[row * 4 + 3] * b[12 + col];
            }
        }
        Self { m: out }
    }
}

impl core::ops::Mul<Point> for Matrix4 {
    type Output = Point;

    fn mul(self, rhs: Point) -> Point {
        self.map_point(rhs)
    }
}

impl From<Affine> for Matrix4 {
    fn from(affine: Affine) -> Self {
        Self::from_affine(affine)
    }
}

fn transpose(m: [f64; 16]) -> [f64; 16] {
    let mut out = [0.0; 16];
    for row in 0..4 {
        for col in 0..4 {
            out[col * 4 + row] = m[row * 4 + col];
        }
    }
    out
}
