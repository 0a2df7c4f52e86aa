//! Machine observation records (AI4I layout)

use serde::{Deserialize, Serialize};

/// One of the five failure-mode indicators recorded per observation.
///
/// Modes are not mutually exclusive: a single event may carry several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FailureMode {
    /// Tool wear failure
    #[serde(rename = "TWF")]
    ToolWear,
    /// Heat dissipation failure
    #[serde(rename = "HDF")]
    HeatDissipation,
    /// Power failure
    #[serde(rename = "PWF")]
    Power,
    /// Overstrain failure
    #[serde(rename = "OSF")]
    Overstrain,
    /// Random failure
    #[serde(rename = "RNF")]
    Random,
}

impl FailureMode {
    /// All modes in dataset column order.
    pub const ALL: [Self; 5] = [
        Self::ToolWear,
        Self::HeatDissipation,
        Self::Power,
        Self::Overstrain,
        Self::Random,
    ];

    /// Modes whose operating-condition profiles are reported.
    pub const PROFILED: [Self; 3] = [Self::HeatDissipation, Self::Overstrain, Self::Power];

    /// Column header used in the dataset.
    pub const fn column(self) -> &'static str {
        match self {
            Self::ToolWear => "TWF",
            Self::HeatDissipation => "HDF",
            Self::Power => "PWF",
            Self::Overstrain => "OSF",
            Self::Random => "RNF",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::ToolWear => "tool wear failure",
            Self::HeatDissipation => "heat dissipation failure",
            Self::Power => "power failure",
            Self::Overstrain => "overstrain failure",
            Self::Random => "random failure",
        }
    }
}

impl std::fmt::Display for FailureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

/// Failure-mode indicator flags for one observation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FailureFlags {
    pub tool_wear: bool,
    pub heat_dissipation: bool,
    pub power: bool,
    pub overstrain: bool,
    pub random: bool,
}

impl FailureFlags {
    pub const fn get(&self, mode: FailureMode) -> bool {
        match mode {
            FailureMode::ToolWear => self.tool_wear,
            FailureMode::HeatDissipation => self.heat_dissipation,
            FailureMode::Power => self.power,
            FailureMode::Overstrain => self.overstrain,
            FailureMode::Random => self.random,
        }
    }

    pub fn set(&mut self, mode: FailureMode, value: bool) {
        match mode {
            FailureMode::ToolWear => self.tool_wear = value,
            FailureMode::HeatDissipation => self.heat_dissipation = value,
            FailureMode::Power => self.power = value,
            FailureMode::Overstrain => self.overstrain = value,
            FailureMode::Random => self.random = value,
        }
    }
}

/// A single machine-event record as loaded from the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Unique row identifier (`UDI`)
    pub udi: u64,
    /// Product serial (`Product ID`)
    pub product_id: String,
    /// Product quality variant (`Type`), L/M/H in the AI4I dataset
    pub product_type: String,
    /// Air temperature (K)
    pub air_temperature_k: f64,
    /// Process temperature (K)
    pub process_temperature_k: f64,
    /// Rotational speed (rpm)
    pub rotational_speed_rpm: f64,
    /// Torque (Nm)
    pub torque_nm: f64,
    /// Tool wear (min)
    pub tool_wear_min: f64,
    /// Overall failure indicator (`Machine failure`)
    pub machine_failure: bool,
    /// Individual failure-mode indicators
    pub failure_modes: FailureFlags,
}

/// Physical-proxy features derived from an observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedFeatures {
    /// Process minus air temperature (K)
    pub delta_temp: f64,
    /// Torque x rotational speed, a mechanical load stand-in
    pub power_proxy: f64,
    /// Tool wear per rpm; exactly 0 when the machine is not rotating
    pub wear_rate_proxy: f64,
}

/// Observation plus its derived features.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedObservation {
    pub observation: Observation,
    pub features: DerivedFeatures,
}
