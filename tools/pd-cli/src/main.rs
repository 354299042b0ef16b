// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

use clap::{Parser, ValueHint};
use ndarray::Array2;
use pd_core::{find_defects, Defect, DefectSet, OrientationField, ScanConfig};
use serde::Serialize;
use std::error::Error;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

type DynError = Box<dyn Error>;

type Result<T> = std::result::Result<T, DynError>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Scan a 2D orientation field for topological point defects"
)]
struct Cli {
    /// Whitespace-separated text grid with the x components of the field
    #[arg(long, value_hint = ValueHint::FilePath)]
    nx: PathBuf,

    /// Whitespace-separated text grid with the y components of the field
    #[arg(long, value_hint = ValueHint::FilePath)]
    ny: PathBuf,

    /// Winding threshold in radians (default 0.8 * 2pi, or PD_SCAN_THRESHOLD)
    #[arg(long)]
    threshold: Option<f64>,

    /// Destination for the defect charges, one integer per line
    #[arg(long, default_value = "charge.txt", value_hint = ValueHint::FilePath)]
    charge_out: PathBuf,

    /// Destination for the defect core phases, one value per line
    #[arg(long, default_value = "phase.txt", value_hint = ValueHint::FilePath)]
    phase_out: PathBuf,

    /// Optional JSON scan report with the full defect records
    #[arg(long, value_hint = ValueHint::FilePath)]
    report: Option<PathBuf>,

    /// Print every defect record to STDOUT after the summary
    #[arg(long)]
    print_defects: bool,
}

#[derive(Serialize)]
struct ScanReport {
    sx: usize,
    sy: usize,
    threshold: f64,
    total_charge: i64,
    defects: Vec<Defect>,
}

fn main() {
    if let Err(err) = pd_config::init_tracing() {
        eprintln!("warning: {err}");
    }
    if let Err(err) = try_main() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();

    let nx = read_grid(&cli.nx)?;
    let ny = read_grid(&cli.ny)?;
    let field = OrientationField::from_components(nx.view(), ny.view())?;
    let (sx, sy) = field.shape();

    let threshold = cli
        .threshold
        .unwrap_or_else(|| pd_config::scan_defaults::defaults().threshold);
    let config = ScanConfig::new(threshold)?;

    tracing::info!(sx, sy, threshold, "scanning orientation field");
    let defects = find_defects(&field, &config);
    tracing::info!(
        count = defects.len(),
        total_charge = defects.total_charge(),
        "scan complete"
    );

    write_charges(&defects, &cli.charge_out)?;
    write_phases(&defects, &cli.phase_out)?;

    if let Some(path) = cli.report.as_ref() {
        let report = ScanReport {
            sx,
            sy,
            threshold,
            total_charge: defects.total_charge(),
            defects: defects.defects().to_vec(),
        };
        write_report(&report, path)?;
    }

    print_summary(&defects, cli.print_defects);
    Ok(())
}

fn print_summary(defects: &DefectSet, print_defects: bool) {
    let (positive, negative) = defects.by_sign();
    println!(
        "{} defect(s): {} positive, {} negative, total charge {}",
        defects.len(),
        positive.len(),
        negative.len(),
        defects.total_charge()
    );
    if print_defects {
        for defect in defects {
            println!(
                "x={} y={} charge={:+} phase={:.6}",
                defect.x, defect.y, defect.charge, defect.phase
            );
        }
    }
}

/// Reads a rectangular numeric text grid in the plain `loadtxt` layout: one
/// lattice row per line, columns separated by whitespace, blank lines skipped.
/// File rows map to the x axis of the field.
fn read_grid(path: &Path) -> Result<Array2<f64>> {
    let contents = fs::read_to_string(path)?;
    let mut values = Vec::new();
    let mut cols = None;
    let mut rows = 0usize;

    for (lineno, line) in contents.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let mut width = 0usize;
        for token in trimmed.split_whitespace() {
            let value: f64 = token.parse().map_err(|_| {
                Box::new(io::Error::new(
                    ErrorKind::InvalidData,
                    format!(
                        "{}: line {}: invalid number {token:?}",
                        path.display(),
                        lineno + 1
                    ),
                )) as DynError
            })?;
            values.push(value);
            width += 1;
        }
        match cols {
            None => cols = Some(width),
            Some(expected) if expected != width => {
                return Err(Box::new(io::Error::new(
                    ErrorKind::InvalidData,
                    format!(
                        "{}: line {}: expected {expected} columns, found {width}",
                        path.display(),
                        lineno + 1
                    ),
                )));
            }
            Some(_) => {}
        }
        rows += 1;
    }

    let cols = cols.ok_or_else(|| {
        Box::new(io::Error::new(
            ErrorKind::InvalidData,
            format!("{}: grid file contains no data", path.display()),
        )) as DynError
    })?;
    Array2::from_shape_vec((rows, cols), values).map_err(|err| Box::new(err) as DynError)
}

fn write_charges(defects: &DefectSet, path: &Path) -> Result<()> {
    let mut payload = String::new();
    for charge in defects.charges() {
        payload.push_str(&format!("{charge}\n"));
    }
    write_text(path, &payload)
}

fn write_phases(defects: &DefectSet, path: &Path) -> Result<()> {
    let mut payload = String::new();
    for phase in defects.phases() {
        payload.push_str(&format!("{phase}\n"));
    }
    write_text(path, &payload)
}

fn write_report(report: &ScanReport, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let payload = serde_json::to_string_pretty(report)?;
    fs::write(path, payload)?;
    Ok(())
}

fn write_text(path: &Path, payload: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, payload)?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
