//! Reliability KPI types

use serde::{Deserialize, Serialize};

use super::FailureMode;

/// Failure rate for one product type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeFailureRate {
    pub product_type: String,
    pub units: usize,
    pub failures: usize,
    /// Fraction of units that failed (0..=1)
    pub failure_rate: f64,
}

/// One entry of the failure-mode Pareto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureModeShare {
    pub mode: FailureMode,
    pub count: usize,
    /// Share of all recorded mode flags, in percent
    pub share_pct: f64,
}

/// Mean operating readings over a group of observations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConditionMeans {
    pub units: usize,
    pub delta_temp: f64,
    pub torque_nm: f64,
    pub rotational_speed_rpm: f64,
    pub tool_wear_min: f64,
}

/// Operating conditions split by one failure-mode flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingProfile {
    pub mode: FailureMode,
    /// Rows where the flag is 0
    pub without_failure: Option<ConditionMeans>,
    /// Rows where the flag is 1
    pub with_failure: Option<ConditionMeans>,
}

/// All reliability KPIs computed over the cleaned table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiReport {
    pub row_count: usize,
    pub failure_count: usize,
    /// Fraction of rows with `Machine failure` set (0..=1)
    pub global_failure_rate: f64,
    /// Sorted by failure rate, highest first
    pub failure_rate_by_type: Vec<TypeFailureRate>,
    /// Pareto ranking, largest share first
    pub failure_modes: Vec<FailureModeShare>,
    pub operating_conditions: Vec<OperatingProfile>,
}

impl KpiReport {
    pub fn global_failure_rate_pct(&self) -> f64 {
        self.global_failure_rate * 100.0
    }
}
