//! Reliability KPI aggregation
//!
//! Grouped means and sums over the cleaned, feature-enriched table:
//!
//! - `failure_rates`: global failure rate and failure rate by product type
//! - `pareto`: failure-mode share ranking
//! - `operating`: operating-condition means split by failure-mode flag

mod failure_rates;
mod operating;
mod pareto;

pub use failure_rates::{failure_rate_by_type, global_failure_rate};
pub use operating::{operating_profile, operating_profiles};
pub use pareto::failure_mode_pareto;

use crate::types::{EnrichedObservation, FailureMode, KpiReport};

/// Compute every KPI over the table.
pub fn compute_kpis(rows: &[EnrichedObservation]) -> KpiReport {
    let failure_count = rows.iter().filter(|r| r.observation.machine_failure).count();
    let global = global_failure_rate(rows);
    let by_type = failure_rate_by_type(rows);
    let modes = failure_mode_pareto(rows);
    let profiles = operating_profiles(rows, &FailureMode::PROFILED);

    tracing::info!(
        rows = rows.len(),
        failures = failure_count,
        global_failure_rate_pct = global * 100.0,
        types = by_type.len(),
        "Computed reliability KPIs"
    );
    for t in &by_type {
        tracing::debug!(
            product_type = %t.product_type,
            units = t.units,
            failure_rate_pct = t.failure_rate * 100.0,
            "Failure rate by type"
        );
    }

    KpiReport {
        row_count: rows.len(),
        failure_count,
        global_failure_rate: global,
        failure_rate_by_type: by_type,
        failure_modes: modes,
        operating_conditions: profiles,
    }
}
