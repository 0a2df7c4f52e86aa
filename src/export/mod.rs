//! Export Module
//!
//! Writes the run artifacts:
//!
//! - `business_kpis.csv`: enriched, scored table in original row order
//! - `risk_summary.csv`: one row per risk level
//! - `kpi_summary.json`: optional machine-readable digest
//! - three PNG bar charts
//!
//! Output directories are created when missing and existing files are
//! overwritten.

mod charts;
mod csv_export;
mod json_summary;

pub use charts::{render_charts, BarChart};
pub use csv_export::{write_business_kpis, write_risk_summary};
pub use json_summary::{write_json_summary, KpiSummaryDocument};

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while writing run artifacts.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to render chart {path}: {message}")]
    Chart { path: PathBuf, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Create `dir` and its parents if needed.
pub fn ensure_dir(dir: &Path) -> Result<(), ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

fn create_file(path: &Path) -> Result<File, ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn create_writer(path: &Path) -> Result<csv::Writer<File>, ExportError> {
    Ok(csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(create_file(path)?))
}
