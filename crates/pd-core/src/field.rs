// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Orientation fields sampled on a regular 2D lattice.

use ndarray::{Array2, ArrayView2, Zip};

use crate::error::{FieldError, FieldResult};

/// A 2D field of director angles, immutable once built.
///
/// Axis 0 is the x (column) axis of length `sx`, axis 1 the y (row) axis of
/// length `sy`; `angle(i, j)` reads the site at column `i`, row `j`.  Angles
/// are radians in the `atan2` range `(-pi, pi]`.  Values are not validated for
/// finiteness: NaN or infinite samples propagate through the scan rather than
/// being rejected here.
#[derive(Clone, Debug)]
pub struct OrientationField {
    angles: Array2<f64>,
}

impl OrientationField {
    /// Wraps a grid of precomputed angles.
    ///
    /// Fails only when an axis has zero length.
    pub fn from_angles(angles: Array2<f64>) -> FieldResult<Self> {
        let (sx, sy) = angles.dim();
        if sx == 0 || sy == 0 {
            return Err(FieldError::EmptyField);
        }
        Ok(Self { angles })
    }

    /// Builds the angle field from the x and y components of a vector field.
    ///
    /// This is the loader-facing constructor: the two grids must share a
    /// shape, and each site's angle is `atan2(ny, nx)`.
    pub fn from_components(
        nx: ArrayView2<'_, f64>,
        ny: ArrayView2<'_, f64>,
    ) -> FieldResult<Self> {
        if nx.dim() != ny.dim() {
            let (nx_rows, nx_cols) = nx.dim();
            let (ny_rows, ny_cols) = ny.dim();
            return Err(FieldError::ShapeMismatch {
                nx_rows,
                nx_cols,
                ny_rows,
                ny_cols,
            });
        }
        let mut angles = Array2::zeros(nx.dim());
        Zip::from(&mut angles)
            .and(&ny)
            .and(&nx)
            .for_each(|phi, &y, &x| *phi = y.atan2(x));
        Self::from_angles(angles)
    }

    /// Lattice extent as `(sx, sy)`.
    pub fn shape(&self) -> (usize, usize) {
        self.angles.dim()
    }

    /// View of the underlying angle grid.
    pub fn angles(&self) -> ArrayView2<'_, f64> {
        self.angles.view()
    }

    /// Angle at column `i`, row `j`.
    #[inline]
    pub fn angle(&self, i: usize, j: usize) -> f64 {
        self.angles[[i, j]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn components_yield_atan2_angles() {
        let nx = array![[1.0, 0.0], [-1.0, 0.0]];
        let ny = array![[0.0, 1.0], [0.0, -1.0]];
        let field = OrientationField::from_components(nx.view(), ny.view()).unwrap();
        assert_abs_diff_eq!(field.angle(0, 0), 0.0);
        assert_abs_diff_eq!(field.angle(0, 1), std::f64::consts::FRAC_PI_2);
        assert_abs_diff_eq!(field.angle(1, 0), std::f64::consts::PI);
        assert_abs_diff_eq!(field.angle(1, 1), -std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn mismatched_components_are_rejected() {
        let nx = Array2::<f64>::zeros((3, 2));
        let ny = Array2::<f64>::zeros((2, 3));
        let err = OrientationField::from_components(nx.view(), ny.view()).unwrap_err();
        assert!(matches!(err, FieldError::ShapeMismatch { .. }));
    }

    #[test]
    fn empty_axes_are_rejected() {
        let err = OrientationField::from_angles(Array2::<f64>::zeros((0, 4))).unwrap_err();
        assert!(matches!(err, FieldError::EmptyField));
        let err = OrientationField::from_angles(Array2::<f64>::zeros((4, 0))).unwrap_err();
        assert!(matches!(err, FieldError::EmptyField));
    }

    #[test]
    fn non_finite_angles_are_accepted_verbatim() {
        let field =
            OrientationField::from_angles(array![[f64::NAN, 0.0], [0.5, f64::INFINITY]]).unwrap();
        assert!(field.angle(0, 0).is_nan());
        assert!(field.angle(1, 1).is_infinite());
    }
}
