//! pdm-risk: Predictive Maintenance Risk Scoring
//!
//! Batch analysis of the AI4I 2020 machine table: reliability KPIs, a
//! composite risk score bucketed into Low / Medium / High tertiles, and a
//! validation of those buckets against observed failures.
//!
//! ## Architecture
//!
//! - **Acquisition**: CSV loading with schema and value checks
//! - **Processing**: exact-duplicate removal and derived features
//! - **KPI**: failure rates, failure-mode Pareto, operating profiles
//! - **Scoring**: min-max normalization, weighted score, tertiles
//! - **Reporting**: lift per risk level, independence test, console summary
//! - **Export**: CSV tables, JSON digest, PNG charts

pub mod acquisition;
pub mod config;
pub mod export;
pub mod kpi;
pub mod pipeline;
pub mod processing;
pub mod reporting;
pub mod scoring;
pub mod types;

// Re-export configuration
pub use config::{ConfigError, ConstantColumnPolicy, RiskConfig, ScoringConfig};

// Re-export commonly used types
pub use types::{
    EnrichedObservation, FailureMode, KpiReport, Observation, RiskBucket, RiskLevel,
    RiskSummary, ScoredObservation,
};

// Re-export pipeline entry points
pub use pipeline::{analyze, run, Analysis, ExportOptions, PipelineError};
