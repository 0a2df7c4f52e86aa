//! Risk bucket validation against observed failures

use statrs::statistics::Statistics;

use super::independence_test;
use crate::types::{RiskBucket, RiskLevel, RiskSummary, ScoredObservation};

/// Round to two decimals for reporting, halves to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Failure rate and lift per risk level, always Low -> Medium -> High.
///
/// `global_failure_rate` is a fraction (0..=1). Lift is `None` when the
/// global rate is 0 or the bucket is empty.
pub fn summarize_risk(rows: &[ScoredObservation], global_failure_rate: f64) -> RiskSummary {
    let baseline_pct = global_failure_rate * 100.0;

    let buckets: Vec<RiskBucket> = RiskLevel::ALL
        .iter()
        .map(|&level| {
            let members: Vec<&ScoredObservation> =
                rows.iter().filter(|r| r.risk_level == level).collect();
            let units = members.len();
            let failures = members
                .iter()
                .filter(|r| r.observation.machine_failure)
                .count();

            let failure_rate_pct = (units > 0).then(|| failures as f64 / units as f64 * 100.0);
            let lift_vs_baseline = failure_rate_pct
                .filter(|_| baseline_pct > 0.0)
                .map(|rate| rate / baseline_pct);
            let mean_risk_score =
                (units > 0).then(|| members.iter().map(|r| r.risk_score).mean());

            RiskBucket {
                level,
                units,
                failures,
                failure_rate_pct,
                lift_vs_baseline,
                mean_risk_score,
            }
        })
        .collect();

    if baseline_pct == 0.0 {
        tracing::warn!("Global failure rate is 0, lift vs. baseline is undefined");
    }

    let independence = independence_test(&buckets);
    for b in &buckets {
        tracing::info!(
            level = %b.level,
            units = b.units,
            failure_rate_pct = b.failure_rate_pct.map(round2),
            lift = b.lift_vs_baseline.map(round2),
            "Risk bucket"
        );
    }

    RiskSummary {
        baseline_failure_rate_pct: baseline_pct,
        buckets,
        independence,
    }
}
