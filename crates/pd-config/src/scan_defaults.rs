// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

use std::sync::OnceLock;

use pd_core::DEFAULT_THRESHOLD;

/// Environment-driven defaults for defect scans.
#[derive(Clone, Copy, Debug)]
pub struct ScanDefaults {
    /// Winding threshold (radians) used when the caller does not pass one.
    pub threshold: f64,
}

impl ScanDefaults {
    /// Builds a defaults snapshot from environment variables.
    ///
    /// `PD_SCAN_THRESHOLD` overrides the core's built-in threshold; values
    /// that fail to parse, or that are non-positive or non-finite, fall back
    /// silently.
    fn from_env() -> Self {
        let threshold = std::env::var("PD_SCAN_THRESHOLD")
            .ok()
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite() && *value > 0.0)
            .unwrap_or(DEFAULT_THRESHOLD);
        Self { threshold }
    }
}

static DEFAULTS: OnceLock<ScanDefaults> = OnceLock::new();

/// Returns the lazily initialised scan defaults.
pub fn defaults() -> &'static ScanDefaults {
    DEFAULTS.get_or_init(ScanDefaults::from_env)
}

/// Overrides the scan defaults. Intended for tests.
pub fn configure(snapshot: ScanDefaults) -> &'static ScanDefaults {
    DEFAULTS.get_or_init(|| snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn with_env(vars: &[(&str, Option<&str>)], test: impl FnOnce()) {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        let _lock = GUARD.get_or_init(|| Mutex::new(())).lock().unwrap();

        let snapshot: Vec<(String, Option<String>)> = vars
            .iter()
            .map(|(key, value)| {
                let previous = std::env::var(key).ok();
                match value {
                    Some(val) => std::env::set_var(key, val),
                    None => std::env::remove_var(key),
                }
                ((*key).to_string(), previous)
            })
            .collect();

        test();

        for (key, previous) in snapshot {
            match previous {
                Some(val) => std::env::set_var(&key, val),
                None => std::env::remove_var(&key),
            }
        }
    }

    #[test]
    fn absent_variable_falls_back_to_core_default() {
        with_env(&[("PD_SCAN_THRESHOLD", None)], || {
            let snapshot = ScanDefaults::from_env();
            assert_eq!(snapshot.threshold, DEFAULT_THRESHOLD);
        });
    }

    #[test]
    fn valid_override_is_honoured() {
        with_env(&[("PD_SCAN_THRESHOLD", Some("4.5"))], || {
            let snapshot = ScanDefaults::from_env();
            assert_eq!(snapshot.threshold, 4.5);
        });
    }

    #[test]
    fn malformed_or_out_of_range_values_fall_back() {
        for bad in ["not-a-number", "-1.0", "0", "inf"] {
            with_env(&[("PD_SCAN_THRESHOLD", Some(bad))], || {
                let snapshot = ScanDefaults::from_env();
                assert_eq!(snapshot.threshold, DEFAULT_THRESHOLD, "input {bad:?}");
            });
        }
    }
}
