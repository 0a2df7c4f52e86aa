//! CSV exports: enriched business table and risk summary

use std::path::Path;

use serde::{Serialize, Serializer};

use super::{create_writer, ExportError};
use crate::reporting::round2;
use crate::types::{RiskSummary, ScoredObservation};

/// Largest magnitude at which every integer is exactly representable.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Write whole-valued readings (speed, tool wear) without a fractional part.
#[allow(clippy::cast_possible_truncation, clippy::trivially_copy_pass_by_ref)]
fn whole_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn flag<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}

/// One row of `business_kpis.csv`.
///
/// Normalized sub-scores and `wear_rate_proxy` stay out of this export.
#[derive(Serialize)]
struct BusinessKpiRow<'a> {
    #[serde(rename = "UDI")]
    udi: u64,
    #[serde(rename = "Product ID")]
    product_id: &'a str,
    #[serde(rename = "Type")]
    product_type: &'a str,
    #[serde(rename = "Air temperature [K]")]
    air_temperature_k: f64,
    #[serde(rename = "Process temperature [K]")]
    process_temperature_k: f64,
    #[serde(rename = "Rotational speed [rpm]", serialize_with = "whole_number")]
    rotational_speed_rpm: f64,
    #[serde(rename = "Torque [Nm]")]
    torque_nm: f64,
    #[serde(rename = "Tool wear [min]", serialize_with = "whole_number")]
    tool_wear_min: f64,
    delta_temp: f64,
    power_proxy: f64,
    #[serde(rename = "Machine failure", serialize_with = "flag")]
    machine_failure: bool,
    #[serde(rename = "TWF", serialize_with = "flag")]
    twf: bool,
    #[serde(rename = "HDF", serialize_with = "flag")]
    hdf: bool,
    #[serde(rename = "PWF", serialize_with = "flag")]
    pwf: bool,
    #[serde(rename = "OSF", serialize_with = "flag")]
    osf: bool,
    #[serde(rename = "RNF", serialize_with = "flag")]
    rnf: bool,
    risk_score: f64,
    risk_level: &'static str,
}

impl<'a> From<&'a ScoredObservation> for BusinessKpiRow<'a> {
    fn from(row: &'a ScoredObservation) -> Self {
        let obs = &row.observation;
        let modes = &obs.failure_modes;
        Self {
            udi: obs.udi,
            product_id: &obs.product_id,
            product_type: &obs.product_type,
            air_temperature_k: obs.air_temperature_k,
            process_temperature_k: obs.process_temperature_k,
            rotational_speed_rpm: obs.rotational_speed_rpm,
            torque_nm: obs.torque_nm,
            tool_wear_min: obs.tool_wear_min,
            delta_temp: row.features.delta_temp,
            power_proxy: row.features.power_proxy,
            machine_failure: obs.machine_failure,
            twf: modes.tool_wear,
            hdf: modes.heat_dissipation,
            pwf: modes.power,
            osf: modes.overstrain,
            rnf: modes.random,
            risk_score: row.risk_score,
            risk_level: row.risk_level.as_str(),
        }
    }
}

/// One row of `risk_summary.csv`; undefined values are written as empty cells.
#[derive(Serialize)]
struct RiskSummaryRow {
    risk_level: &'static str,
    units: usize,
    failure_rate_pct: Option<f64>,
    lift_vs_baseline: Option<f64>,
}

/// Write the enriched table in original row order.
pub fn write_business_kpis(path: &Path, rows: &[ScoredObservation]) -> Result<(), ExportError> {
    let mut writer = create_writer(path)?;
    for row in rows {
        writer.serialize(BusinessKpiRow::from(row))?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(file = %path.display(), rows = rows.len(), "Wrote business KPI export");
    Ok(())
}

/// Write the risk validation summary, Low -> Medium -> High.
pub fn write_risk_summary(path: &Path, summary: &RiskSummary) -> Result<(), ExportError> {
    let mut writer = create_writer(path)?;
    for b in &summary.buckets {
        writer.serialize(RiskSummaryRow {
            risk_level: b.level.as_str(),
            units: b.units,
            failure_rate_pct: b.failure_rate_pct.map(round2),
            lift_vs_baseline: b.lift_vs_baseline.map(round2),
        })?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(file = %path.display(), "Wrote risk summary");
    Ok(())
}
