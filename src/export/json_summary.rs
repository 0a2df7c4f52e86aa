//! Machine-readable run digest (`kpi_summary.json`).

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{create_file, ExportError};
use crate::config::ScoringConfig;
use crate::types::{KpiReport, RiskSummary};

/// Everything the console summary shows, plus run provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummaryDocument {
    pub input_path: PathBuf,
    pub rows_loaded: usize,
    pub duplicates_removed: usize,
    pub scoring: ScoringConfig,
    pub kpis: KpiReport,
    pub risk: RiskSummary,
}

/// Pretty-print `doc` to `path`. Undefined rates and lifts become `null`.
pub fn write_json_summary(path: &Path, doc: &KpiSummaryDocument) -> Result<(), ExportError> {
    let mut file = create_file(path)?;
    serde_json::to_writer_pretty(&mut file, doc)?;
    writeln!(file).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(file = %path.display(), "Wrote JSON summary");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RiskBucket, RiskLevel};

    #[test]
    fn test_json_summary_round_trips_with_nulls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kpi_summary.json");
        let doc = KpiSummaryDocument {
            input_path: PathBuf::from("ai4i2020.csv"),
            rows_loaded: 2,
            duplicates_removed: 0,
            scoring: ScoringConfig::default(),
            kpis: KpiReport {
                row_count: 2,
                failure_count: 0,
                global_failure_rate: 0.0,
                failure_rate_by_type: Vec::new(),
                failure_modes: Vec::new(),
                operating_conditions: Vec::new(),
            },
            risk: RiskSummary {
                baseline_failure_rate_pct: 0.0,
                buckets: vec![RiskBucket {
                    level: RiskLevel::Low,
                    units: 2,
                    failures: 0,
                    failure_rate_pct: Some(0.0),
                    lift_vs_baseline: None,
                    mean_risk_score: Some(0.5),
                }],
                independence: None,
            },
        };
        write_json_summary(&path, &doc).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"lift_vs_baseline\": null"));
        let parsed: KpiSummaryDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, doc);
    }
}
