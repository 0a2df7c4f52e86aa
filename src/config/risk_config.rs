//! Risk Configuration - input/output locations and scoring weights as TOML values
//!
//! Each struct implements `Default` with values matching the reference
//! analysis, so a missing config file changes nothing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a scoring run.
///
/// Load with `RiskConfig::load()` which searches:
/// 1. `$PDM_RISK_CONFIG` env var
/// 2. `./risk_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Dataset location
    #[serde(default)]
    pub data: DataConfig,

    /// Export and chart locations
    #[serde(default)]
    pub output: OutputConfig,

    /// Risk score weights and fallback policy
    #[serde(default)]
    pub scoring: ScoringConfig,
}

impl RiskConfig {
    /// Load configuration using the standard search order:
    /// 1. `$PDM_RISK_CONFIG` environment variable
    /// 2. `./risk_config.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded risk config from {}", defaults::CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", defaults::CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", defaults::CONFIG_ENV_VAR);
            }
        }

        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded risk config from ./{}", defaults::LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::LOCAL_CONFIG_FILE);
                }
            }
        }

        info!("No {} found, using built-in defaults", defaults::LOCAL_CONFIG_FILE);
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys are reported as warnings; they never fail the load.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate weights and output settings.
    ///
    /// Rules:
    /// - Weights must be finite, non-negative and sum to 1.0
    /// - Chart dimensions must be non-zero
    /// - Paths must be non-empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        if let Err(weight_errors) = self.scoring.validate() {
            errors.extend(weight_errors);
        }

        if self.output.chart_width == 0 || self.output.chart_height == 0 {
            errors.push(format!(
                "output chart size must be non-zero, got {}x{}",
                self.output.chart_width, self.output.chart_height
            ));
        }

        if self.data.input_path.as_os_str().is_empty() {
            errors.push("data.input_path cannot be empty".to_string());
        }
        if self.output.export_dir.as_os_str().is_empty() {
            errors.push("output.export_dir cannot be empty".to_string());
        }
        if self.output.charts_dir.as_os_str().is_empty() {
            errors.push("output.charts_dir cannot be empty".to_string());
        }

        let (range_errors, range_warnings) = super::validation::validate_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            Self::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            Self::Serialize(e) => write!(f, "Config serialization error: {e}"),
            Self::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {e}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(_, e) => Some(e),
            Self::Parse(_, e) => Some(e),
            Self::Serialize(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

// ============================================================================
// Data
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// CSV dataset to score
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
        }
    }
}

fn default_input_path() -> PathBuf {
    PathBuf::from(defaults::DEFAULT_INPUT_PATH)
}

// ============================================================================
// Output
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving `business_kpis.csv` and `risk_summary.csv`
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    /// Directory receiving the PNG charts
    #[serde(default = "default_charts_dir")]
    pub charts_dir: PathBuf,

    #[serde(default = "default_chart_width")]
    pub chart_width: u32,

    #[serde(default = "default_chart_height")]
    pub chart_height: u32,

    /// TrueType font for chart text; system fonts are probed when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,

    /// Also write `kpi_summary.json` next to the CSV exports
    #[serde(default)]
    pub write_json_summary: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            export_dir: default_export_dir(),
            charts_dir: default_charts_dir(),
            chart_width: default_chart_width(),
            chart_height: default_chart_height(),
            font_path: None,
            write_json_summary: false,
        }
    }
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(defaults::DEFAULT_EXPORT_DIR)
}
fn default_charts_dir() -> PathBuf {
    PathBuf::from(defaults::DEFAULT_CHARTS_DIR)
}
const fn default_chart_width() -> u32 {
    defaults::DEFAULT_CHART_WIDTH
}
const fn default_chart_height() -> u32 {
    defaults::DEFAULT_CHART_HEIGHT
}

// ============================================================================
// Scoring
// ============================================================================

/// What to do when a risk component column has max == min.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstantColumnPolicy {
    /// Every normalized value becomes 0.0
    #[default]
    Zero,
    /// Abort the run with `ScoringError::ConstantColumn`
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_torque_weight")]
    pub torque_weight: f64,

    #[serde(default = "default_tool_wear_weight")]
    pub tool_wear_weight: f64,

    #[serde(default = "default_power_proxy_weight")]
    pub power_proxy_weight: f64,

    #[serde(default)]
    pub constant_column: ConstantColumnPolicy,
}

impl ScoringConfig {
    pub fn weight_sum(&self) -> f64 {
        self.torque_weight + self.tool_wear_weight + self.power_proxy_weight
    }

    /// Weights must be finite, non-negative and sum to 1.0 (within
    /// `WEIGHT_SUM_TOLERANCE`), which keeps the risk score in [0, 1].
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        for (name, weight) in self.named_weights() {
            if !weight.is_finite() {
                errors.push(format!("scoring.{name} must be finite (got {weight})"));
            } else if weight < 0.0 {
                errors.push(format!("scoring.{name} = {weight:.3} cannot be negative"));
            }
        }
        let weight_sum = self.weight_sum();
        if weight_sum.is_finite() && (weight_sum - 1.0).abs() > defaults::WEIGHT_SUM_TOLERANCE {
            errors.push(format!("scoring weights must sum to 1.0, got {weight_sum:.6}"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn named_weights(&self) -> [(&'static str, f64); 3] {
        [
            ("torque_weight", self.torque_weight),
            ("tool_wear_weight", self.tool_wear_weight),
            ("power_proxy_weight", self.power_proxy_weight),
        ]
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            torque_weight: default_torque_weight(),
            tool_wear_weight: default_tool_wear_weight(),
            power_proxy_weight: default_power_proxy_weight(),
            constant_column: ConstantColumnPolicy::default(),
        }
    }
}

const fn default_torque_weight() -> f64 {
    defaults::DEFAULT_TORQUE_WEIGHT
}
const fn default_tool_wear_weight() -> f64 {
    defaults::DEFAULT_TOOL_WEAR_WEIGHT
}
const fn default_power_proxy_weight() -> f64 {
    defaults::DEFAULT_POWER_PROXY_WEIGHT
}
