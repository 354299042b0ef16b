// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

use thiserror::Error;

/// Errors raised while constructing an orientation field.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("orientation field requires at least one sample along each axis")]
    EmptyField,
    #[error(
        "component grids do not match (nx is {nx_rows}x{nx_cols}, ny is {ny_rows}x{ny_cols})"
    )]
    ShapeMismatch {
        nx_rows: usize,
        nx_cols: usize,
        ny_rows: usize,
        ny_cols: usize,
    },
}

/// Errors raised while configuring a defect scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("detection threshold must be positive and finite (got {value})")]
    InvalidThreshold { value: f64 },
}

pub type FieldResult<T> = Result<T, FieldError>;
pub type ScanResult<T> = Result<T, ScanError>;
