//! Physical-proxy feature derivation
//!
//! - `delta_temp = process_temperature - air_temperature`
//! - `power_proxy = torque * rotational_speed`
//! - `wear_rate_proxy = tool_wear / rotational_speed`, 0 when the speed is 0

use crate::types::{DerivedFeatures, EnrichedObservation, Observation};

/// Tool wear accumulated per rpm.
///
/// A stationary machine (speed exactly 0) has a wear rate of 0 rather than
/// an undefined ratio. This masking is a business rule, not an error path.
pub fn wear_rate_proxy(tool_wear_min: f64, rotational_speed_rpm: f64) -> f64 {
    if rotational_speed_rpm == 0.0 {
        0.0
    } else {
        tool_wear_min / rotational_speed_rpm
    }
}

/// Derive all proxy features for one observation.
pub fn derive_features(obs: &Observation) -> DerivedFeatures {
    DerivedFeatures {
        delta_temp: obs.process_temperature_k - obs.air_temperature_k,
        power_proxy: obs.torque_nm * obs.rotational_speed_rpm,
        wear_rate_proxy: wear_rate_proxy(obs.tool_wear_min, obs.rotational_speed_rpm),
    }
}

/// Attach derived features to every observation, preserving order.
pub fn enrich(observations: Vec<Observation>) -> Vec<EnrichedObservation> {
    let enriched: Vec<EnrichedObservation> = observations
        .into_iter()
        .map(|observation| {
            let features = derive_features(&observation);
            EnrichedObservation {
                observation,
                features,
            }
        })
        .collect();

    let stationary = enriched
        .iter()
        .filter(|e| e.observation.rotational_speed_rpm == 0.0)
        .count();
    if stationary > 0 {
        tracing::debug!(rows = stationary, "Zero rotational speed, wear rate masked to 0");
    }

    enriched
}
