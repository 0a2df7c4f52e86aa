//! Config validation: unknown-key detection with Levenshtein suggestions
//! and range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for `RiskConfig`.
///
/// Any new field added to `RiskConfig` must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [data]
        "data",
        "data.input_path",
        // [output]
        "output",
        "output.export_dir",
        "output.charts_dir",
        "output.chart_width",
        "output.chart_height",
        "output.font_path",
        "output.write_json_summary",
        // [scoring]
        "scoring",
        "scoring.torque_weight",
        "scoring.tool_wear_weight",
        "scoring.power_proxy_weight",
        "scoring.constant_column",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties resolve to the lexicographically smallest key so suggestions are stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|(dist, _)| *dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| {
            let suggestion = suggest_correction(&key, &known);
            ValidationWarning {
                message: format!("Unknown config key '{key}'"),
                field: key,
                suggestion,
            }
        })
        .collect()
}

// ============================================================================
// Range Validation
// ============================================================================

/// Largest chart edge accepted without a warning (pixels).
const MAX_TYPICAL_CHART_EDGE: u32 = 8_000;

/// Validate value ranges on a parsed `RiskConfig`.
///
/// Returns (errors, warnings): errors are values that must prevent the run,
/// warnings are suspicious but not fatal.
pub fn validate_ranges(config: &super::RiskConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let errors = Vec::new();
    let mut warnings = Vec::new();

    let out = &config.output;
    if out.chart_width > MAX_TYPICAL_CHART_EDGE || out.chart_height > MAX_TYPICAL_CHART_EDGE {
        warnings.push(ValidationWarning {
            field: "output.chart_width".to_string(),
            message: format!(
                "chart size {}x{} is unusually large (max typical edge {MAX_TYPICAL_CHART_EDGE} px)",
                out.chart_width, out.chart_height
            ),
            suggestion: None,
        });
    }

    if let Some(ref font) = out.font_path {
        if !font.exists() {
            warnings.push(ValidationWarning {
                field: "output.font_path".to_string(),
                message: format!(
                    "output.font_path '{}' does not exist; chart text will fall back to system fonts",
                    font.display()
                ),
                suggestion: None,
            });
        }
    }

    let s = &config.scoring;
    for (name, weight) in [
        ("scoring.torque_weight", s.torque_weight),
        ("scoring.tool_wear_weight", s.tool_wear_weight),
        ("scoring.power_proxy_weight", s.power_proxy_weight),
    ] {
        if weight == 0.0 {
            warnings.push(ValidationWarning {
                field: name.to_string(),
                message: format!("{name} is 0; that component no longer affects the risk score"),
                suggestion: None,
            });
        }
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================
