//! Failure rates: global and by product type

use std::collections::BTreeMap;

use crate::types::{EnrichedObservation, TypeFailureRate};

/// Fraction of rows with the machine failure flag set.
///
/// An empty table has a rate of 0.
pub fn global_failure_rate(rows: &[EnrichedObservation]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let failures = rows.iter().filter(|r| r.observation.machine_failure).count();
    failures as f64 / rows.len() as f64
}

/// Failure rate per product type, highest first.
///
/// Equal rates are ordered by type name so the ranking is deterministic.
pub fn failure_rate_by_type(rows: &[EnrichedObservation]) -> Vec<TypeFailureRate> {
    let mut groups: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for r in rows {
        let entry = groups.entry(r.observation.product_type.as_str()).or_default();
        entry.0 += 1;
        if r.observation.machine_failure {
            entry.1 += 1;
        }
    }

    let mut rates: Vec<TypeFailureRate> = groups
        .into_iter()
        .map(|(product_type, (units, failures))| TypeFailureRate {
            product_type: product_type.to_string(),
            units,
            failures,
            failure_rate: failures as f64 / units as f64,
        })
        .collect();

    // BTreeMap already yields name order; the stable sort keeps it for ties.
    rates.sort_by(|a, b| b.failure_rate.total_cmp(&a.failure_rate));
    rates
}
