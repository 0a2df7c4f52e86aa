//! AI4I Dataset Loader
//!
//! Reads the fixed-schema predictive-maintenance CSV into `Observation`
//! records. Column positions are resolved from the header row, so column
//! order does not matter and extra columns are ignored, but every required
//! column must be present.
//!
//! # Usage
//!
//! ```ignore
//! use pdm_risk::acquisition::load_observations;
//!
//! let observations = load_observations("ai4i2020.csv")?;
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::LoadError;
use crate::types::{FailureFlags, FailureMode, Observation};

// ============================================================================
// Column Names
// ============================================================================

pub const COL_UDI: &str = "UDI";
pub const COL_PRODUCT_ID: &str = "Product ID";
pub const COL_TYPE: &str = "Type";
pub const COL_AIR_TEMP: &str = "Air temperature [K]";
pub const COL_PROCESS_TEMP: &str = "Process temperature [K]";
pub const COL_ROTATIONAL_SPEED: &str = "Rotational speed [rpm]";
pub const COL_TORQUE: &str = "Torque [Nm]";
pub const COL_TOOL_WEAR: &str = "Tool wear [min]";
pub const COL_MACHINE_FAILURE: &str = "Machine failure";

/// Every column the loader requires, in dataset order.
pub const REQUIRED_COLUMNS: [&str; 14] = [
    COL_UDI,
    COL_PRODUCT_ID,
    COL_TYPE,
    COL_AIR_TEMP,
    COL_PROCESS_TEMP,
    COL_ROTATIONAL_SPEED,
    COL_TORQUE,
    COL_TOOL_WEAR,
    COL_MACHINE_FAILURE,
    "TWF",
    "HDF",
    "PWF",
    "OSF",
    "RNF",
];

// ============================================================================
// Column Mapping
// ============================================================================

/// Header positions of the required columns.
#[derive(Debug, Clone)]
struct ColumnMap {
    udi: usize,
    product_id: usize,
    product_type: usize,
    air_temp: usize,
    process_temp: usize,
    rotational_speed: usize,
    torque: usize,
    tool_wear: usize,
    machine_failure: usize,
    modes: [usize; 5],
}

impl ColumnMap {
    /// Resolve every required column, reporting all missing names at once.
    fn from_header(headers: &StringRecord, source: &Path) -> Result<Self, LoadError> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| position(name).is_none())
            .map(|name| (*name).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::SchemaMismatch {
                path: source.to_path_buf(),
                missing,
            });
        }

        // All present: the lookups below cannot fail.
        let at = |name: &str| position(name).unwrap_or_default();
        Ok(Self {
            udi: at(COL_UDI),
            product_id: at(COL_PRODUCT_ID),
            product_type: at(COL_TYPE),
            air_temp: at(COL_AIR_TEMP),
            process_temp: at(COL_PROCESS_TEMP),
            rotational_speed: at(COL_ROTATIONAL_SPEED),
            torque: at(COL_TORQUE),
            tool_wear: at(COL_TOOL_WEAR),
            machine_failure: at(COL_MACHINE_FAILURE),
            modes: FailureMode::ALL.map(|m| at(m.column())),
        })
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load observations from a CSV file on disk.
pub fn load_observations(path: impl AsRef<Path>) -> Result<Vec<Observation>, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::DataNotFound(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let observations = load_from_reader(BufReader::new(file), path)?;
    tracing::info!(
        file = %path.display(),
        rows = observations.len(),
        "Loaded dataset"
    );
    Ok(observations)
}

/// Load observations from any reader; `source` is only used in errors.
pub fn load_from_reader<R: Read>(reader: R, source: &Path) -> Result<Vec<Observation>, LoadError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns = ColumnMap::from_header(&headers, source)?;

    let extra = headers.len().saturating_sub(REQUIRED_COLUMNS.len());
    if extra > 0 {
        tracing::debug!(extra_columns = extra, "Ignoring columns outside the schema");
    }

    let mut observations = Vec::new();
    for (idx, result) in csv_reader.records().enumerate() {
        let record = result?;
        // Header is line 1
        let line = record
            .position()
            .map_or(idx + 2, |p| usize::try_from(p.line()).unwrap_or(idx + 2));
        observations.push(parse_row(&record, &columns, &headers, line)?);
    }

    Ok(observations)
}

// ============================================================================
// Row Parsing
// ============================================================================

fn parse_row(
    record: &StringRecord,
    cols: &ColumnMap,
    headers: &StringRecord,
    line: usize,
) -> Result<Observation, LoadError> {
    let cell = |idx: usize| record.get(idx).unwrap_or("");
    let column = |idx: usize| headers.get(idx).unwrap_or("").to_string();

    let parse_error = |idx: usize, message: String| LoadError::Parse {
        line,
        column: column(idx),
        message,
    };

    let udi = cell(cols.udi)
        .parse::<u64>()
        .map_err(|e| parse_error(cols.udi, format!("'{}': {e}", cell(cols.udi))))?;

    let number = |idx: usize| -> Result<f64, LoadError> {
        let raw = cell(idx);
        let value = raw
            .parse::<f64>()
            .map_err(|e| parse_error(idx, format!("'{raw}': {e}")))?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(parse_error(idx, format!("'{raw}' is not a finite number")))
        }
    };

    let flag = |idx: usize| -> Result<bool, LoadError> {
        parse_flag(cell(idx)).ok_or_else(|| LoadError::InvalidFlag {
            line,
            column: column(idx),
            value: cell(idx).to_string(),
        })
    };

    let mut failure_modes = FailureFlags::default();
    for (mode, idx) in FailureMode::ALL.iter().zip(cols.modes) {
        failure_modes.set(*mode, flag(idx)?);
    }

    Ok(Observation {
        udi,
        product_id: cell(cols.product_id).to_string(),
        product_type: cell(cols.product_type).to_string(),
        air_temperature_k: number(cols.air_temp)?,
        process_temperature_k: number(cols.process_temp)?,
        rotational_speed_rpm: number(cols.rotational_speed)?,
        torque_nm: number(cols.torque)?,
        tool_wear_min: number(cols.tool_wear)?,
        machine_failure: flag(cols.machine_failure)?,
        failure_modes,
    })
}

/// Parse a 0/1 indicator. Boolean literals are accepted as well.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw {
        "0" | "0.0" => Some(false),
        "1" | "1.0" => Some(true),
        _ if raw.eq_ignore_ascii_case("false") => Some(false),
        _ if raw.eq_ignore_ascii_case("true") => Some(true),
        _ => None,
    }
}
