// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Periodic lattice indexing and the fixed core-phase reference texture.

use std::f64::consts::FRAC_PI_4;

/// Orientation offsets of the canonical 4-fold reference texture.
///
/// Core-phase extraction compares the four plaquette corner angles against
/// this texture rotated by the detected charge; the offsets are the corner
/// directions of a unit cell seen from its centre, listed in the same cyclic
/// order as the plaquette walk.
pub const CORE_LATTICE_OFFSETS: [f64; 4] = [
    -3.0 * FRAC_PI_4,
    -FRAC_PI_4,
    FRAC_PI_4,
    3.0 * FRAC_PI_4,
];

/// Single-step index advance under periodic (toroidal) boundary conditions.
///
/// `i` must lie in `[0, n)` with `n >= 1`; the last index wraps back to the
/// first.  An axis of length 1 self-loops, which is exactly the degenerate
/// plaquette behaviour the scanner relies on.
#[inline]
pub fn advance(i: usize, n: usize) -> usize {
    if i == n - 1 {
        0
    } else {
        i + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_stays_in_range_and_wraps_only_at_the_end() {
        for n in 1usize..=7 {
            for i in 0..n {
                let next = advance(i, n);
                assert!(next < n);
                if i == n - 1 {
                    assert_eq!(next, 0);
                } else {
                    assert_eq!(next, i + 1);
                }
            }
        }
    }

    #[test]
    fn unit_axis_self_loops() {
        assert_eq!(advance(0, 1), 0);
    }

    #[test]
    fn reference_offsets_span_the_four_quadrant_diagonals() {
        let expected = [-2.356194490192345, -0.7853981633974483, 0.7853981633974483, 2.356194490192345];
        for (offset, want) in CORE_LATTICE_OFFSETS.iter().zip(expected.iter()) {
            assert!((offset - want).abs() < 1e-15);
        }
    }
}
