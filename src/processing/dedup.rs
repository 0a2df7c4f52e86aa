//! Exact-duplicate removal
//!
//! Two observations are duplicates when every column matches: string
//! columns byte-for-byte, numeric columns by bit pattern. The first
//! occurrence is kept and the survivors keep their relative order, which
//! gives the dense 0-based reindex for free.

use std::collections::HashSet;

use crate::types::{FailureFlags, Observation};

/// Hashable identity of an observation across all columns.
#[derive(Debug, PartialEq, Eq, Hash)]
struct ObservationKey<'a> {
    udi: u64,
    product_id: &'a str,
    product_type: &'a str,
    readings: [u64; 5],
    machine_failure: bool,
    failure_modes: FailureFlags,
}

impl<'a> From<&'a Observation> for ObservationKey<'a> {
    fn from(obs: &'a Observation) -> Self {
        Self {
            udi: obs.udi,
            product_id: &obs.product_id,
            product_type: &obs.product_type,
            readings: [
                obs.air_temperature_k.to_bits(),
                obs.process_temperature_k.to_bits(),
                obs.rotational_speed_rpm.to_bits(),
                obs.torque_nm.to_bits(),
                obs.tool_wear_min.to_bits(),
            ],
            machine_failure: obs.machine_failure,
            failure_modes: obs.failure_modes,
        }
    }
}

/// Result of a deduplication pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DedupOutcome {
    pub observations: Vec<Observation>,
    pub removed: usize,
}

/// Drop exact duplicates, keeping the first occurrence.
///
/// Idempotent: a second pass over the output removes nothing.
pub fn deduplicate(observations: Vec<Observation>) -> DedupOutcome {
    let before = observations.len();

    let keep: Vec<bool> = {
        let mut seen = HashSet::with_capacity(before);
        observations
            .iter()
            .map(|obs| seen.insert(ObservationKey::from(obs)))
            .collect()
    };

    let observations: Vec<Observation> = observations
        .into_iter()
        .zip(keep)
        .filter_map(|(obs, keep)| keep.then_some(obs))
        .collect();

    let removed = before - observations.len();
    if removed > 0 {
        tracing::info!(removed, remaining = observations.len(), "Removed duplicate rows");
    } else {
        tracing::debug!(rows = before, "No duplicate rows");
    }

    DedupOutcome {
        observations,
        removed,
    }
}
