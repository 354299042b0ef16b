// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Process-wide configuration for the polar defect tooling: tracing setup and
//! environment-driven scan defaults.

pub mod scan_defaults;
pub mod tracing;

pub use scan_defaults::ScanDefaults;
pub use tracing::{init_tracing, InitError};
