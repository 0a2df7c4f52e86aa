//! Human-readable run summary for stdout.

use std::fmt::Write;

use super::round2;
use crate::types::{ConditionMeans, KpiReport, RiskSummary};

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}", round2(v)))
}

/// Render the console summary: risk validation table, global failure
/// rate, failure rate by level and type, failure-mode shares, operating
/// profiles and the independence test.
pub fn render_summary(kpis: &KpiReport, risk: &RiskSummary) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_summary(&mut out, kpis, risk);
    out
}

fn write_summary(out: &mut String, kpis: &KpiReport, risk: &RiskSummary) -> std::fmt::Result {
    writeln!(out, "=== Risk Validation Summary ===")?;
    writeln!(
        out,
        "{:<10} {:>8} {:>18} {:>18}",
        "risk_level", "units", "failure_rate_pct", "lift_vs_baseline"
    )?;
    for b in &risk.buckets {
        writeln!(
            out,
            "{:<10} {:>8} {:>18} {:>18}",
            b.level.as_str(),
            b.units,
            fmt_opt(b.failure_rate_pct),
            fmt_opt(b.lift_vs_baseline)
        )?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "Global failure rate: {:.2} % ({} of {} units)",
        round2(kpis.global_failure_rate_pct()),
        kpis.failure_count,
        kpis.row_count
    )?;

    writeln!(out)?;
    writeln!(out, "Failure rate by risk level (%):")?;
    for b in &risk.buckets {
        writeln!(out, "  {:<8} {}", b.level.as_str(), fmt_opt(b.failure_rate_pct))?;
    }

    writeln!(out)?;
    writeln!(out, "Failure rate by product type (%):")?;
    for t in &kpis.failure_rate_by_type {
        writeln!(
            out,
            "  {:<8} {:.2} ({} units)",
            t.product_type,
            round2(t.failure_rate * 100.0),
            t.units
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Top failure modes (%):")?;
    for m in &kpis.failure_modes {
        writeln!(
            out,
            "  {:<4} {:>6.2}  ({} flagged, {})",
            m.mode.column(),
            round2(m.share_pct),
            m.count,
            m.mode.description()
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Operating conditions by failure mode (means):")?;
    writeln!(
        out,
        "  {:<4} {:<5} {:>7} {:>10} {:>10} {:>10} {:>10}",
        "mode", "flag", "units", "delta_temp", "torque", "speed", "tool_wear"
    )?;
    for p in &kpis.operating_conditions {
        for (flag, means) in [(0, &p.without_failure), (1, &p.with_failure)] {
            write_condition_row(out, p.mode.column(), flag, means.as_ref())?;
        }
    }

    writeln!(out)?;
    match risk.independence {
        Some(t) => writeln!(
            out,
            "Risk level vs. failure: chi2 = {:.2} (df = {}), p = {:.3e}",
            t.chi_squared, t.degrees_of_freedom, t.p_value
        )?,
        None => writeln!(out, "Risk level vs. failure: test undefined for this data")?,
    }

    Ok(())
}

fn write_condition_row(
    out: &mut String,
    mode: &str,
    flag: u8,
    means: Option<&ConditionMeans>,
) -> std::fmt::Result {
    match means {
        Some(m) => writeln!(
            out,
            "  {:<4} {:<5} {:>7} {:>10.2} {:>10.2} {:>10.1} {:>10.1}",
            mode, flag, m.units, m.delta_temp, m.torque_nm, m.rotational_speed_rpm, m.tool_wear_min
        ),
        None => writeln!(out, "  {mode:<4} {flag:<5} {:>7}", 0),
    }
}
