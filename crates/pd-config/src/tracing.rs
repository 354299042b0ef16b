// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

static INITIALISED: OnceLock<()> = OnceLock::new();
static CHROME_GUARD: OnceLock<Mutex<Option<tracing_chrome::FlushGuard>>> = OnceLock::new();

/// Configures the global tracing subscriber for the defect tooling.
///
/// Event filtering follows `RUST_LOG` (default `info`). Setting
/// `PD_TRACE_CHROME` to a file path additionally records a Chrome trace of
/// the scan pipeline for timeline inspection.
pub fn init_tracing() -> Result<(), InitError> {
    INITIALISED
        .set(())
        .map_err(|_| InitError::AlreadyInitialised)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(std::io::stdout().is_terminal())
        .with_span_events(FmtSpan::CLOSE);
    let registry = Registry::default().with(filter).with(fmt_layer);

    if let Some(path) = chrome_trace_path()? {
        let (chrome_layer, guard) = tracing_chrome::ChromeLayerBuilder::new()
            .file(path)
            .include_args(true)
            .build();
        stash_chrome_guard(guard);
        registry.with(chrome_layer).init();
    } else {
        registry.init();
    }

    Ok(())
}

// The flush guard must outlive the process' tracing use or the trace file is
// truncated on drop.
fn stash_chrome_guard(guard: tracing_chrome::FlushGuard) {
    if let Some(cell) = CHROME_GUARD.get() {
        if let Ok(mut slot) = cell.lock() {
            *slot = Some(guard);
        }
    } else {
        let _ = CHROME_GUARD.set(Mutex::new(Some(guard)));
    }
}

fn chrome_trace_path() -> Result<Option<PathBuf>, InitError> {
    match std::env::var("PD_TRACE_CHROME") {
        Ok(raw) if !raw.trim().is_empty() => Ok(Some(PathBuf::from(raw))),
        Ok(_) => Ok(None),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(InitError::Env(err)),
    }
}

/// Errors emitted when configuring the tracing subscriber.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("tracing has already been initialised")]
    AlreadyInitialised,
    #[error("failed to read PD_TRACE_CHROME: {0}")]
    Env(std::env::VarError),
}
