// Copyright 2025 the Coinpack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation-boundary helpers.
//!
//! Rendering surfaces disagree on how a transform is handed over: some take
//! all 16 cells in column-major order, others only the six coefficients of a
//! 2D affine. That choice is made once, here, and never inside gesture code.

use kurbo::{Size, Vec2};

use crate::Matrix4;

/// Cell order expected by a rendering surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MatrixLayout {
    /// Cells in row-major order (the in-memory order of [`Matrix4`]).
    RowMajor,
    /// Cells in column-major order, as most native graphics stacks expect.
    #[default]
    ColumnMajor,
    /// The six coefficients `[a, b, c, d, tx, ty]` of a 2D affine.
    Affine2D,
}

/// A matrix already converted into a surface's preferred representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceMatrix {
    /// All 16 cells in the requested order.
    Cells16([f64; 16]),
    /// `[a, b, c, d, tx, ty]`, mapping `(x, y)` to `(a*x + c*y + tx, b*x + d*y + ty)`.
    Affine6([f64; 6]),
}

impl SurfaceMatrix {
    /// Converts `matrix` for a surface using `layout`.
    #[must_use]
    pub fn export(matrix: &Matrix4, layout: MatrixLayout) -> Self {
        match layout {
            MatrixLayout::RowMajor => Self::Cells16(matrix.to_row_major()),
            MatrixLayout::ColumnMajor => Self::Cells16(matrix.to_column_major()),
            MatrixLayout::Affine2D => Self::Affine6(matrix.to_affine().as_coeffs()),
        }
    }

    /// Returns the cells as a slice, whatever the representation.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        match self {
            Self::Cells16(cells) => cells,
            Self::Affine6(coeffs) => coeffs,
        }
    }
}

/// One entry of a host transform list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformOp {
    /// A plain translation.
    Translate(Vec2),
    /// An arbitrary matrix.
    Matrix(Matrix4),
}

impl TransformOp {
    fn to_matrix(self) -> Matrix4 {
        match self {
            Self::Translate(v) => Matrix4::translate(v),
            Self::Matrix(m) => m,
        }
    }
}

/// The transform a view applies to display a gesture matrix.
///
/// Hosts that rotate and scale elements about their centre would otherwise
/// apply the gesture matrix about the wrong origin. The list moves the
/// element's centre onto the host origin, applies the matrix, and moves it
/// back by half the element size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayTransform {
    ops: [TransformOp; 3],
}

impl DisplayTransform {
    /// Builds the transform list for `matrix` on an element of `size`.
    #[must_use]
    pub fn new(matrix: Matrix4, size: Size) -> Self {
        let half = Vec2::new(size.width / 2.0, size.height / 2.0);
        Self {
            ops: [
                TransformOp::Translate(-half),
                TransformOp::Matrix(matrix),
                TransformOp::Translate(half),
            ],
        }
    }

    /// The transform list in host order.
    #[must_use]
    pub fn ops(&self) -> &[TransformOp] {
        &self.ops
    }

    /// The list folded into a single matrix.
    ///
    /// Hosts compose transform lists left to right, so the first entry is the
    /// outermost factor.
    #[must_use]
    pub fn composed(&self) -> Matrix4 {
        self.ops
            .iter()
            .fold(Matrix4::IDENTITY, |acc, op| acc * op.to_matrix())
    }

    /// The composed matrix with the host's centre origin folded in.
    ///
    /// This is what a point in element-local, top-left-origin coordinates
    /// actually goes through on screen. It reduces to the gesture matrix.
    #[must_use]
    pub fn effective(&self, size: Size) -> Matrix4 {
        let centre = Vec2::new(size.width / 2.0, size.height / 2.0);
        Matrix4::translate(centre) * self.composed() * Matrix4::translate(-centre)
    }

    /// Exports the composed matrix for a surface.
    #[must_use]
    pub fn export(&self, layout: MatrixLayout) -> SurfaceMatrix {
        SurfaceMatrix::export(&self.composed(), layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn export_layouts() {
        let m = Matrix4::translate(Vec2::new(7.0, 9.0)) * Matrix4::scale(2.0, 3.0);

        let SurfaceMatrix::Cells16(row) = SurfaceMatrix::export(&m, MatrixLayout::RowMajor) else {
            panic!("row-major export should produce 16 cells");
        };
        assert_eq!(row[3], 7.0);

        let SurfaceMatrix::Cells16(col) = SurfaceMatrix::export(&m, MatrixLayout::ColumnMajor)
        else {
            panic!("column-major export should produce 16 cells");
        };
        assert_eq!(col[12], 7.0);
        assert_eq!(col[13], 9.0);

        let affine = SurfaceMatrix::export(&m, MatrixLayout::Affine2D);
        assert_eq!(affine.as_slice(), &[2.0, 0.0, 0.0, 3.0, 7.0, 9.0]);
    }

    #[test]
    fn display_list_has_three_entries() {
        let m = Matrix4::scale(2.0, 2.0);
        let display = DisplayTransform::new(m, Size::new(100.0, 40.0));
        assert_eq!(
            display.ops(),
            &[
                TransformOp::Translate(Vec2::new(-50.0, -20.0)),
                TransformOp::Matrix(m),
                TransformOp::Translate(Vec2::new(50.0, 20.0)),
            ]
        );
    }

    #[test]
    fn centre_origin_cancels_out() {
        let size = Size::new(120.0, 80.0);
        let m = Matrix4::rotate_z_about(0.4, Point::new(10.0, 30.0))
            * Matrix4::translate(Vec2::new(5.0, -2.0));
        let display = DisplayTransform::new(m, size);
        assert!(display.effective(size).approx_eq(&m, 1e-9));
    }

    #[test]
    fn identity_display_is_identity() {
        let size = Size::new(64.0, 64.0);
        let display = DisplayTransform::new(Matrix4::IDENTITY, size);
        assert!(display.composed().approx_eq(&Matrix4::IDENTITY, 1e-12));
    }
}
