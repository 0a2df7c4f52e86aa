//! System-wide default constants.
//!
//! Every configurable value falls back to one of these, so a run with no
//! config file reproduces the reference analysis exactly.

// ============================================================================
// Data
// ============================================================================

/// Dataset read when no input path is configured.
pub const DEFAULT_INPUT_PATH: &str = "ai4i2020.csv";

// ============================================================================
// Output
// ============================================================================

/// Directory for CSV (and JSON) exports.
pub const DEFAULT_EXPORT_DIR: &str = "export";

/// Directory for chart images.
pub const DEFAULT_CHARTS_DIR: &str = "outputs";

/// Chart size in pixels: 6.4 x 4.8 in at 150 dpi.
pub const DEFAULT_CHART_WIDTH: u32 = 960;
pub const DEFAULT_CHART_HEIGHT: u32 = 720;

pub const BUSINESS_KPIS_FILE: &str = "business_kpis.csv";
pub const RISK_SUMMARY_FILE: &str = "risk_summary.csv";
pub const KPI_SUMMARY_JSON_FILE: &str = "kpi_summary.json";

pub const CHART_RISK_LEVEL_FILE: &str = "failure_rate_by_risk_level.png";
pub const CHART_PARETO_FILE: &str = "pareto_failure_modes.png";
pub const CHART_TYPE_FILE: &str = "failure_rate_by_type.png";

/// Fonts probed, in order, when `output.font_path` is unset.
pub const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

// ============================================================================
// Scoring
// ============================================================================

pub const DEFAULT_TORQUE_WEIGHT: f64 = 0.4;
pub const DEFAULT_TOOL_WEAR_WEIGHT: f64 = 0.4;
pub const DEFAULT_POWER_PROXY_WEIGHT: f64 = 0.2;

/// Allowed deviation of the weight sum from 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

// ============================================================================
// Config discovery
// ============================================================================

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "PDM_RISK_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "risk_config.toml";
