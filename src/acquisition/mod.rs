//! Dataset acquisition module
//!
//! Handles ingestion of the machine observation table from CSV.

pub mod csv_loader;

use std::path::PathBuf;
use thiserror::Error;

pub use csv_loader::{load_from_reader, load_observations, REQUIRED_COLUMNS};

/// Errors raised while loading the observation table.
///
/// All of them are fatal for a run.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Dataset not found: {0}")]
    DataNotFound(PathBuf),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Schema mismatch in {path}: missing column(s) {}", .missing.join(", "))]
    SchemaMismatch { path: PathBuf, missing: Vec<String> },

    #[error("Parse error at line {line}, column '{column}': {message}")]
    Parse {
        line: usize,
        column: String,
        message: String,
    },

    #[error("Invalid flag at line {line}, column '{column}': expected 0 or 1, got '{value}'")]
    InvalidFlag {
        line: usize,
        column: String,
        value: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
