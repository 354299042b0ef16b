// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Angle arithmetic on the circle.

use std::f64::consts::{PI, TAU};

/// Signed angular difference `next - prev`, folded into `(-pi, pi]`.
///
/// Both inputs are expected to come from the `atan2` range, so the raw
/// difference lies within one full period and a single ±2π correction is
/// always sufficient.  This resolves the periodic ambiguity of angle
/// subtraction: the wrapped difference is the shortest rotation taking `prev`
/// to `next`.
#[inline]
pub fn wrap_diff(next: f64, prev: f64) -> f64 {
    let mut dt = next - prev;
    if dt > PI {
        dt -= TAU;
    } else if dt < -PI {
        dt += TAU;
    }
    dt
}
