//! Pipeline Integration Tests
//!
//! Runs the full load -> dedup -> KPI -> score -> validate -> export path
//! against small AI4I-shaped CSV files written to a temp directory.

use std::fs;
use std::path::{Path, PathBuf};

use pdm_risk::acquisition::LoadError;
use pdm_risk::config::{OutputConfig, RiskConfig};
use pdm_risk::pipeline::{self, ExportOptions, PipelineError};
use pdm_risk::scoring::ScoringError;
use pdm_risk::{FailureMode, RiskLevel};

const HEADER: &str = "UDI,Product ID,Type,Air temperature [K],Process temperature [K],\
Rotational speed [rpm],Torque [Nm],Tool wear [min],Machine failure,TWF,HDF,PWF,OSF,RNF";

/// Nine distinct machines, risk rising with UDI, plus one exact duplicate
/// of UDI 1. Failures sit on UDI 8 (OSF) and 9 (HDF + OSF).
const ROWS: &[&str] = &[
    "1,L1,L,298.0,308.0,1500,20.0,0,0,0,0,0,0,0",
    "2,M2,M,298.1,308.4,1490,25.0,20,0,0,0,0,0,0",
    "3,H3,H,298.2,308.8,1480,30.0,40,0,0,0,0,0,0",
    "4,L4,L,298.3,309.2,1470,35.0,60,0,0,0,0,0,0",
    "5,M5,M,298.4,309.6,1460,40.0,80,0,0,0,0,0,0",
    "6,H6,H,298.5,310.0,1450,45.0,100,0,0,0,0,0,0",
    "7,L7,L,298.6,310.4,1440,50.0,120,0,0,0,0,0,0",
    "8,L8,L,298.7,310.8,1430,55.0,140,1,0,0,0,1,0",
    "9,L9,L,298.8,311.2,1420,60.0,160,1,0,1,0,1,0",
    "1,L1,L,298.0,308.0,1500,20.0,0,0,0,0,0,0,0",
];

fn write_dataset(dir: &Path, rows: &[&str]) -> PathBuf {
    let path = dir.join("ai4i2020.csv");
    let mut text = String::from(HEADER);
    text.push('\n');
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    fs::write(&path, text).unwrap();
    path
}

fn config_for(dir: &Path, input: PathBuf) -> RiskConfig {
    let mut config = RiskConfig::default();
    config.data.input_path = input;
    config.output = OutputConfig {
        export_dir: dir.join("export"),
        charts_dir: dir.join("outputs"),
        chart_width: 480,
        chart_height: 360,
        ..OutputConfig::default()
    };
    config
}

#[test]
fn full_run_writes_exports_and_validates_buckets() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_dataset(dir.path(), ROWS);
    let config = config_for(dir.path(), input);

    let analysis = pipeline::run(
        &config,
        ExportOptions {
            charts: false,
            json_summary: true,
        },
    )
    .unwrap();

    assert_eq!(analysis.rows_loaded, 10);
    assert_eq!(analysis.duplicates_removed, 1);
    assert_eq!(analysis.rows.len(), 9);
    assert_eq!(analysis.kpis.failure_count, 2);

    // Both failures land in the top tertile.
    let high = analysis.risk.bucket(RiskLevel::High).unwrap();
    assert_eq!((high.units, high.failures), (3, 2));
    let low = analysis.risk.bucket(RiskLevel::Low).unwrap();
    assert_eq!(low.failure_rate_pct, Some(0.0));
    assert!((high.lift_vs_baseline.unwrap() - 3.0).abs() < 1e-9);

    // OSF flagged twice, HDF once.
    assert_eq!(analysis.kpis.failure_modes[0].mode, FailureMode::Overstrain);
    assert_eq!(analysis.kpis.failure_modes[0].count, 2);

    let business = fs::read_to_string(config.output.export_dir.join("business_kpis.csv")).unwrap();
    let lines: Vec<&str> = business.lines().collect();
    assert_eq!(lines.len(), 10, "header + 9 deduplicated rows");
    assert!(lines[0].starts_with("UDI,Product ID,Type,"));
    assert!(lines[0].ends_with(",risk_score,risk_level"));
    let udis: Vec<&str> = lines[1..]
        .iter()
        .map(|l| l.split(',').next().unwrap())
        .collect();
    assert_eq!(udis, vec!["1", "2", "3", "4", "5", "6", "7", "8", "9"]);
    assert!(lines[1].ends_with(",0.0,Low"));
    assert!(lines[9].ends_with(",1.0,High"));

    let summary = fs::read_to_string(config.output.export_dir.join("risk_summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(
        lines,
        vec![
            "risk_level,units,failure_rate_pct,lift_vs_baseline",
            "Low,3,0.0,0.0",
            "Medium,3,0.0,0.0",
            "High,3,66.67,3.0",
        ]
    );

    let json = fs::read_to_string(config.output.export_dir.join("kpi_summary.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["duplicates_removed"], 1);
    assert_eq!(value["kpis"]["failure_count"], 2);
}

#[test]
fn rerun_overwrites_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_dataset(dir.path(), ROWS);
    let config = config_for(dir.path(), input);
    let options = ExportOptions {
        charts: false,
        json_summary: false,
    };

    pipeline::run(&config, options).unwrap();
    let first = fs::read(config.output.export_dir.join("business_kpis.csv")).unwrap();
    pipeline::run(&config, options).unwrap();
    let second = fs::read(config.output.export_dir.join("business_kpis.csv")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn charts_are_written_as_png() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_dataset(dir.path(), ROWS);
    let config = config_for(dir.path(), input);

    pipeline::run(&config, ExportOptions::default()).unwrap();

    for name in [
        "failure_rate_by_risk_level.png",
        "pareto_failure_modes.png",
        "failure_rate_by_type.png",
    ] {
        let bytes = fs::read(config.output.charts_dir.join(name)).unwrap();
        assert_eq!(&bytes[1..4], b"PNG", "{name} is not a PNG");
    }
}

#[test]
fn missing_input_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path(), dir.path().join("absent.csv"));
    let err = pipeline::run(&config, ExportOptions::default()).unwrap_err();
    assert!(matches!(err, PipelineError::Load(LoadError::DataNotFound(_))));
    assert!(!config.output.export_dir.exists(), "nothing exported on failure");
}

#[test]
fn schema_mismatch_names_missing_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "UDI,Product ID,Type\n1,L1,L\n").unwrap();

    let err = pipeline::analyze(&path, &Default::default()).unwrap_err();
    let message = err.to_string();
    assert!(matches!(err, PipelineError::Load(LoadError::SchemaMismatch { .. })));
    assert!(message.contains("Torque [Nm]"));
}

#[test]
fn header_only_dataset_is_empty_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_dataset(dir.path(), &[]);
    let err = pipeline::analyze(&input, &Default::default()).unwrap_err();
    assert!(matches!(err, PipelineError::Scoring(ScoringError::EmptyDataset)));
}

#[test]
fn invalid_weights_fail_before_loading() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_dataset(dir.path(), ROWS);
    let mut config = config_for(dir.path(), input);
    config.scoring.torque_weight = 0.9;

    let err = pipeline::run(&config, ExportOptions::default()).unwrap_err();
    assert!(matches!(err, PipelineError::Config(_)));
}

#[test]
fn no_failures_leaves_lift_undefined() {
    let dir = tempfile::tempdir().unwrap();
    let healthy: Vec<&str> = ROWS[..7].to_vec();
    let input = write_dataset(dir.path(), &healthy);
    let config = config_for(dir.path(), input);

    let analysis = pipeline::run(
        &config,
        ExportOptions {
            charts: false,
            json_summary: false,
        },
    )
    .unwrap();
    assert!(analysis.risk.buckets.iter().all(|b| b.lift_vs_baseline.is_none()));
    assert!(analysis.risk.independence.is_none());

    let summary = fs::read_to_string(config.output.export_dir.join("risk_summary.csv")).unwrap();
    assert!(summary.lines().skip(1).all(|l| l.ends_with(",0.0,")));
}
