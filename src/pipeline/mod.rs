//! Batch Analysis Pipeline
//!
//! ```text
//! STAGE 1: Load CSV            (schema + value checks, fatal on error)
//! STAGE 2: Deduplicate         (exact full-row duplicates, first kept)
//! STAGE 3: Derive features     (delta_temp, power_proxy, wear_rate_proxy)
//! STAGE 4: KPIs                (global / by type / failure modes / profiles)
//! STAGE 5: Risk score          (min-max weighted composite + tertiles)
//! STAGE 6: Validation          (failure rate and lift per risk level)
//! STAGE 7: Export              (CSV, optional JSON, PNG charts)
//! ```
//!
//! Stages 1-6 are pure apart from reading the input file; `analyze` can be
//! used without touching the output directories.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::acquisition::{load_observations, LoadError};
use crate::config::defaults::{BUSINESS_KPIS_FILE, KPI_SUMMARY_JSON_FILE, RISK_SUMMARY_FILE};
use crate::config::{ConfigError, OutputConfig, RiskConfig, ScoringConfig};
use crate::export::{
    ensure_dir, render_charts, write_business_kpis, write_json_summary, write_risk_summary,
    ExportError, KpiSummaryDocument,
};
use crate::kpi::compute_kpis;
use crate::processing::{deduplicate, enrich};
use crate::reporting::summarize_risk;
use crate::scoring::{score_table, ScoringError};
use crate::types::{KpiReport, Observation, RiskSummary, ScoredObservation};

/// Any failure that aborts a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Result of stages 1-6.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub input_path: PathBuf,
    pub rows_loaded: usize,
    pub duplicates_removed: usize,
    /// Scored table in original row order.
    pub rows: Vec<ScoredObservation>,
    pub kpis: KpiReport,
    pub risk: RiskSummary,
}

impl Analysis {
    pub fn stats(&self) -> RunStats {
        RunStats {
            rows_loaded: self.rows_loaded,
            duplicates_removed: self.duplicates_removed,
            rows_scored: self.rows.len(),
            failures: self.kpis.failure_count,
        }
    }
}

/// Row counts of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub rows_loaded: usize,
    pub duplicates_removed: usize,
    pub rows_scored: usize,
    pub failures: usize,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pipeline: {} rows loaded, {} duplicates removed, {} scored, {} failures",
            self.rows_loaded, self.duplicates_removed, self.rows_scored, self.failures
        )
    }
}

/// Which optional artifacts to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub charts: bool,
    pub json_summary: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            charts: true,
            json_summary: false,
        }
    }
}

/// Stages 1-6 on a file.
pub fn analyze(input_path: &Path, scoring: &ScoringConfig) -> Result<Analysis, PipelineError> {
    let observations = load_observations(input_path)?;
    analyze_observations(input_path, observations, scoring)
}

/// Stages 2-6 on an already loaded table; `input_path` is kept for provenance.
pub fn analyze_observations(
    input_path: &Path,
    observations: Vec<Observation>,
    scoring: &ScoringConfig,
) -> Result<Analysis, PipelineError> {
    let rows_loaded = observations.len();

    let dedup = deduplicate(observations);
    if dedup.observations.is_empty() {
        return Err(ScoringError::EmptyDataset.into());
    }

    let enriched = enrich(dedup.observations);
    let kpis = compute_kpis(&enriched);
    let rows = score_table(enriched, scoring)?;
    let risk = summarize_risk(&rows, kpis.global_failure_rate);

    let analysis = Analysis {
        input_path: input_path.to_path_buf(),
        rows_loaded,
        duplicates_removed: dedup.removed,
        rows,
        kpis,
        risk,
    };
    tracing::info!("{}", analysis.stats());
    Ok(analysis)
}

/// Stage 7: write the CSV exports, then the optional JSON digest and charts.
///
/// Returns the paths written, in that order.
pub fn export(
    analysis: &Analysis,
    output: &OutputConfig,
    scoring: &ScoringConfig,
    options: ExportOptions,
) -> Result<Vec<PathBuf>, PipelineError> {
    ensure_dir(&output.export_dir)?;

    let mut written = Vec::new();

    let business = output.export_dir.join(BUSINESS_KPIS_FILE);
    write_business_kpis(&business, &analysis.rows)?;
    written.push(business);

    let summary = output.export_dir.join(RISK_SUMMARY_FILE);
    write_risk_summary(&summary, &analysis.risk)?;
    written.push(summary);

    if options.json_summary {
        let path = output.export_dir.join(KPI_SUMMARY_JSON_FILE);
        let doc = KpiSummaryDocument {
            input_path: analysis.input_path.clone(),
            rows_loaded: analysis.rows_loaded,
            duplicates_removed: analysis.duplicates_removed,
            scoring: scoring.clone(),
            kpis: analysis.kpis.clone(),
            risk: analysis.risk.clone(),
        };
        write_json_summary(&path, &doc)?;
        written.push(path);
    }

    if options.charts {
        written.extend(render_charts(&analysis.kpis, &analysis.risk, output)?);
    } else {
        tracing::info!("Chart rendering disabled");
    }

    Ok(written)
}

/// Full run: analyze `config.data.input_path` and export every artifact.
pub fn run(config: &RiskConfig, options: ExportOptions) -> Result<Analysis, PipelineError> {
    config.validate()?;
    let analysis = analyze(&config.data.input_path, &config.scoring)?;
    let written = export(&analysis, &config.output, &config.scoring, options)?;
    tracing::info!(files = written.len(), "Export complete");
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FailureFlags, RiskLevel};

    fn obs(udi: u64, torque: f64, wear: f64, failed: bool) -> Observation {
        Observation {
            udi,
            product_id: format!("L{udi}"),
            product_type: "L".to_string(),
            air_temperature_k: 298.0,
            process_temperature_k: 308.0,
            rotational_speed_rpm: 1500.0,
            torque_nm: torque,
            tool_wear_min: wear,
            machine_failure: failed,
            failure_modes: FailureFlags {
                overstrain: failed,
                ..FailureFlags::default()
            },
        }
    }

    fn table() -> Vec<Observation> {
        (0..6_u32)
            .map(|i| {
                let x = f64::from(i);
                obs(u64::from(i) + 1, 20.0 + 10.0 * x, 30.0 * x, i == 5)
            })
            .collect()
    }

    #[test]
    fn test_analyze_observations_end_to_end() {
        let mut rows = table();
        rows.push(rows[0].clone());

        let analysis =
            analyze_observations(Path::new("inline.csv"), rows, &ScoringConfig::default())
                .unwrap();
        assert_eq!(analysis.rows_loaded, 7);
        assert_eq!(analysis.duplicates_removed, 1);
        assert_eq!(analysis.rows.len(), 6);
        assert_eq!(analysis.risk.total_units(), 6);

        let high = analysis.risk.bucket(RiskLevel::High).unwrap();
        assert_eq!((high.units, high.failures), (2, 1));
        assert_eq!(high.failure_rate_pct, Some(50.0));
        assert!((high.lift_vs_baseline.unwrap() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_duplicates_of_nothing_is_empty() {
        let err = analyze_observations(Path::new("x.csv"), Vec::new(), &ScoringConfig::default())
            .unwrap_err();
        assert!(matches!(err, PipelineError::Scoring(ScoringError::EmptyDataset)));
    }

    #[test]
    fn test_export_writes_requested_files() {
        let dir = tempfile::tempdir().unwrap();
        let output = OutputConfig {
            export_dir: dir.path().join("export"),
            charts_dir: dir.path().join("outputs"),
            ..OutputConfig::default()
        };
        let analysis =
            analyze_observations(Path::new("inline.csv"), table(), &ScoringConfig::default())
                .unwrap();

        let written = export(
            &analysis,
            &output,
            &ScoringConfig::default(),
            ExportOptions {
                charts: false,
                json_summary: true,
            },
        )
        .unwrap();

        assert_eq!(written.len(), 3);
        assert!(output.export_dir.join(BUSINESS_KPIS_FILE).exists());
        assert!(output.export_dir.join(RISK_SUMMARY_FILE).exists());
        assert!(output.export_dir.join(KPI_SUMMARY_JSON_FILE).exists());
        assert!(!output.charts_dir.exists());
    }

    #[test]
    fn test_analyze_rejects_weights_outside_unit_sum() {
        let cfg = ScoringConfig {
            torque_weight: 0.9,
            tool_wear_weight: 0.9,
            power_proxy_weight: 0.9,
            ..ScoringConfig::default()
        };
        let err = analyze_observations(Path::new("inline.csv"), table(), &cfg).unwrap_err();
        assert!(matches!(err, PipelineError::Scoring(ScoringError::InvalidWeights(_))));
    }

    #[test]
    fn test_stats_display() {
        let stats = RunStats {
            rows_loaded: 10,
            duplicates_removed: 1,
            rows_scored: 9,
            failures: 2,
        };
        assert_eq!(
            stats.to_string(),
            "Pipeline: 10 rows loaded, 1 duplicates removed, 9 scored, 2 failures"
        );
    }
}
