// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Topological defect detection for 2D orientation fields on periodic lattices.
//!
//! A director field sampled on a torus carries quantized winding numbers around
//! its elementary plaquettes.  This crate walks every unit lattice loop, sums
//! the wrapped angular increments along its boundary, and reports each cell
//! whose loop integral exceeds a detection threshold as a point defect with an
//! integer charge and a continuous core phase.
//!
//! The scan itself is a pure transform: construction of an
//! [`OrientationField`] and of a [`ScanConfig`] are the only fallible
//! boundaries, and [`find_defects`] is total over any finite (or non-finite)
//! field it is handed.

pub mod angle;
pub mod error;
pub mod field;
pub mod lattice;
pub mod scan;

pub use angle::wrap_diff;
pub use error::{FieldError, FieldResult, ScanError, ScanResult};
pub use field::OrientationField;
pub use lattice::{advance, CORE_LATTICE_OFFSETS};
pub use scan::{find_defects, Defect, DefectSet, ScanConfig, DEFAULT_THRESHOLD};
