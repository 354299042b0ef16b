// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Plaquette winding scan.
//!
//! For every lattice cell `(i, j)` the scanner walks the elementary loop
//! `(i, j) -> (i+1, j) -> (i+1, j+1) -> (i, j+1)` under periodic wrap-around
//! and sums the four wrapped angular increments along its boundary.  The loop
//! integral of a closed walk is an exact integer multiple of 2π (every edge
//! contributes its shortest rotation, and the raw differences telescope to
//! zero), so thresholding it well below 2π cleanly separates charged
//! plaquettes from smooth-field noise.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::angle::wrap_diff;
use crate::error::{ScanError, ScanResult};
use crate::field::OrientationField;
use crate::lattice::{advance, CORE_LATTICE_OFFSETS};

/// Default winding threshold: 80% of a full turn.
///
/// Generous against floating-point noise on smooth textures while still far
/// below the 2π loop sum of a genuine ±1 defect.
pub const DEFAULT_THRESHOLD: f64 = 0.8 * TAU;

/// Scan parameters, validated at construction.
#[derive(Clone, Copy, Debug)]
pub struct ScanConfig {
    threshold: f64,
}

impl ScanConfig {
    /// Creates a configuration with an explicit winding threshold (radians).
    pub fn new(threshold: f64) -> ScanResult<Self> {
        if !(threshold.is_finite() && threshold > 0.0) {
            return Err(ScanError::InvalidThreshold { value: threshold });
        }
        Ok(Self { threshold })
    }

    /// Winding magnitude above which a plaquette is accepted as a defect.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// A detected point defect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Defect {
    /// Lattice column of the anchoring plaquette.
    pub x: usize,
    /// Lattice row of the anchoring plaquette.
    pub y: usize,
    /// Quantized winding number; ±1 for elementary defects.
    pub charge: i32,
    /// Core orientation in `[0, 2π)`.
    pub phase: f64,
}

/// Defects collected by one scan, in row-major scan order.
///
/// The ordering (outer loop over rows `y`, inner loop over columns `x`) is an
/// explicit contract so that repeated scans of the same field compare equal
/// record-for-record.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DefectSet {
    defects: Vec<Defect>,
}

impl DefectSet {
    /// Number of detected defects.
    pub fn len(&self) -> usize {
        self.defects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defects.is_empty()
    }

    /// Records in row-major scan order.
    pub fn defects(&self) -> &[Defect] {
        &self.defects
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Defect> {
        self.defects.iter()
    }

    /// Column coordinates, aligned with [`ys`](Self::ys), [`charges`](Self::charges)
    /// and [`phases`](Self::phases).
    pub fn xs(&self) -> Vec<usize> {
        self.defects.iter().map(|d| d.x).collect()
    }

    /// Row coordinates of the detected defects.
    pub fn ys(&self) -> Vec<usize> {
        self.defects.iter().map(|d| d.y).collect()
    }

    /// Quantized winding numbers of the detected defects.
    pub fn charges(&self) -> Vec<i32> {
        self.defects.iter().map(|d| d.charge).collect()
    }

    /// Core phases of the detected defects, each in `[0, 2π)`.
    pub fn phases(&self) -> Vec<f64> {
        self.defects.iter().map(|d| d.phase).collect()
    }

    /// Net topological charge of the scan.
    ///
    /// Zero on any fully periodic field whose charged plaquettes were all
    /// detected: each lattice edge is traversed once in either direction, so
    /// the winding numbers cancel over the torus.
    pub fn total_charge(&self) -> i64 {
        self.defects.iter().map(|d| i64::from(d.charge)).sum()
    }

    /// Splits the records by charge sign, `(positive, negative)`.
    ///
    /// Zero-charge records (possible only with thresholds below the noise
    /// floor) land in neither half.
    pub fn by_sign(&self) -> (Vec<&Defect>, Vec<&Defect>) {
        let positive = self.defects.iter().filter(|d| d.charge > 0).collect();
        let negative = self.defects.iter().filter(|d| d.charge < 0).collect();
        (positive, negative)
    }
}

impl<'a> IntoIterator for &'a DefectSet {
    type Item = &'a Defect;
    type IntoIter = std::slice::Iter<'a, Defect>;

    fn into_iter(self) -> Self::IntoIter {
        self.defects.iter()
    }
}

/// Scans every plaquette of `field` and collects the charged ones.
///
/// Per cell the four corner angles are read in the fixed counter-clockwise
/// order `t1=(i,j)`, `t2=(i+1,j)`, `t3=(i+1,j+1)`, `t4=(i,j+1)` (indices
/// periodic), the wrapped increments are summed into the loop integral
/// `dphi`, and cells with `|dphi|` above the threshold are recorded with
/// charge `round(dphi / 2π)`.  Rounding is `f64::round`, half away from zero;
/// loop integrals sit on integer multiples of 2π up to float rounding, so the
/// half-integer boundary is never exercised in practice.
///
/// Non-finite field values are not screened; they propagate into `dphi`, the
/// charge and the phase of the affected plaquettes.
pub fn find_defects(field: &OrientationField, config: &ScanConfig) -> DefectSet {
    let (sx, sy) = field.shape();
    let phi = field.angles();
    let mut defects = Vec::new();

    for j in 0..sy {
        let jnext = advance(j, sy);
        for i in 0..sx {
            let inext = advance(i, sx);
            let corners = [
                phi[[i, j]],
                phi[[inext, j]],
                phi[[inext, jnext]],
                phi[[i, jnext]],
            ];
            let dphi = wrap_diff(corners[1], corners[0])
                + wrap_diff(corners[2], corners[1])
                + wrap_diff(corners[3], corners[2])
                + wrap_diff(corners[0], corners[3]);

            if dphi.abs() > config.threshold {
                let charge = (dphi / TAU).round() as i32;
                let phase = core_phase(&corners, charge);
                defects.push(Defect {
                    x: i,
                    y: j,
                    charge,
                    phase,
                });
            }
        }
    }

    DefectSet { defects }
}

/// Core orientation of a charged plaquette.
///
/// Sums the unit phasors of the corner angles after unwinding the reference
/// texture rotated by the charge; the argument of the resultant is the
/// defect's continuous orientation label, mapped into `[0, 2π)`.
fn core_phase(corners: &[f64; 4], charge: i32) -> f64 {
    let mut resultant = Complex64::new(0.0, 0.0);
    for (&t, &offset) in corners.iter().zip(CORE_LATTICE_OFFSETS.iter()) {
        resultant += Complex64::from_polar(1.0, t - f64::from(charge) * offset);
    }
    resultant.arg().rem_euclid(TAU)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::Array2;

    #[test]
    fn uniform_fields_carry_no_defects() {
        for &value in &[0.0, 1.3, -2.9] {
            let field =
                OrientationField::from_angles(Array2::from_elem((8, 6), value)).unwrap();
            let found = find_defects(&field, &ScanConfig::default());
            assert!(found.is_empty(), "constant field {value} produced defects");
        }
    }

    #[test]
    fn charge_quantization_rounds_whole_turns() {
        assert_eq!((TAU / TAU).round() as i32, 1);
        assert_eq!((2.0 * TAU / TAU).round() as i32, 2);
        assert_eq!((-TAU / TAU).round() as i32, -1);
        // Values just off a whole turn still quantize to it.
        assert_eq!(((TAU - 1e-9) / TAU).round() as i32, 1);
        assert_eq!(((-TAU + 1e-9) / TAU).round() as i32, -1);
    }

    #[test]
    fn invalid_thresholds_are_rejected() {
        for &bad in &[0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = ScanConfig::new(bad).unwrap_err();
            assert!(matches!(err, ScanError::InvalidThreshold { .. }));
        }
        assert_abs_diff_eq!(ScanConfig::default().threshold(), 0.8 * TAU);
    }

    #[test]
    fn projections_stay_aligned() {
        let mut angles = Array2::from_elem((5, 5), 0.0);
        // One engineered +1 plaquette at (1, 1).
        angles[[1, 1]] = 0.0;
        angles[[2, 1]] = std::f64::consts::FRAC_PI_2;
        angles[[2, 2]] = std::f64::consts::PI;
        angles[[1, 2]] = -std::f64::consts::FRAC_PI_2;
        let field = OrientationField::from_angles(angles).unwrap();
        let found = find_defects(&field, &ScanConfig::default());

        assert!(!found.is_empty());
        assert_eq!(found.xs().len(), found.len());
        assert_eq!(found.ys().len(), found.len());
        assert_eq!(found.charges().len(), found.len());
        assert_eq!(found.phases().len(), found.len());
        for defect in &found {
            assert!(defect.phase >= 0.0 && defect.phase < TAU);
        }
    }

    #[test]
    fn scan_order_is_row_major() {
        let mut angles = Array2::from_elem((6, 6), 0.0);
        for (i, j) in [(1usize, 1usize), (3, 4)] {
            angles[[i, j]] = 0.0;
            angles[[advance(i, 6), j]] = std::f64::consts::FRAC_PI_2;
            angles[[advance(i, 6), advance(j, 6)]] = std::f64::consts::PI;
            angles[[i, advance(j, 6)]] = -std::f64::consts::FRAC_PI_2;
        }
        let field = OrientationField::from_angles(angles).unwrap();
        let found = find_defects(&field, &ScanConfig::default());

        let order: Vec<(usize, usize)> = found.iter().map(|d| (d.y, d.x)).collect();
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(order, sorted, "records must arrive sorted by (y, x)");
    }

    #[test]
    fn degenerate_unit_axis_scans_without_panicking() {
        let field = OrientationField::from_angles(Array2::from_elem((1, 4), 0.3)).unwrap();
        let found = find_defects(&field, &ScanConfig::default());
        assert!(found.is_empty());
    }

    #[test]
    fn non_finite_samples_propagate_silently() {
        let mut angles = Array2::from_elem((4, 4), 0.0);
        angles[[2, 2]] = f64::NAN;
        let field = OrientationField::from_angles(angles).unwrap();
        // NaN never compares above the threshold; the scan completes and the
        // poisoned plaquettes are simply not reported.
        let found = find_defects(&field, &ScanConfig::default());
        assert!(found.is_empty());
    }
}
