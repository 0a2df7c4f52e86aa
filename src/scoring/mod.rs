//! Risk Scoring
//!
//! Builds the composite risk score and its tertile buckets:
//!
//! 1. Min-max normalize torque, tool wear and power proxy over the table
//! 2. `risk_score = w_t * torque_norm + w_w * tool_wear_norm + w_p * power_proxy_norm`
//!    with weights summing to 1 (0.4 / 0.4 / 0.2 by default), so the score
//!    is a convex combination in [0, 1]
//! 3. Rank-based tertiles: Low < Medium < High

mod normalizer;
mod segmentation;

pub use normalizer::{min_max_normalize, ColumnRange};
pub use segmentation::{assign_risk_levels, bucket_upper_bounds};

use thiserror::Error;

use crate::config::{ConstantColumnPolicy, ScoringConfig};
use crate::types::{EnrichedObservation, RiskComponents, ScoredObservation};

/// Errors raised while scoring the table
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Dataset is empty after cleaning; risk buckets are undefined")]
    EmptyDataset,

    #[error("Column '{column}' is constant ({value}); min-max normalization is undefined")]
    ConstantColumn { column: String, value: f64 },

    #[error("Invalid risk weights: {}", .0.join("; "))]
    InvalidWeights(Vec<String>),
}

/// Weights of the three normalized components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskWeights {
    pub torque: f64,
    pub tool_wear: f64,
    pub power_proxy: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self::from(&ScoringConfig::default())
    }
}

impl From<&ScoringConfig> for RiskWeights {
    fn from(cfg: &ScoringConfig) -> Self {
        Self {
            torque: cfg.torque_weight,
            tool_wear: cfg.tool_wear_weight,
            power_proxy: cfg.power_proxy_weight,
        }
    }
}

impl RiskWeights {
    pub fn sum(&self) -> f64 {
        self.torque + self.tool_wear + self.power_proxy
    }

    /// Weighted composite of the normalized components.
    pub fn combine(&self, c: &RiskComponents) -> f64 {
        self.torque * c.torque_norm
            + self.tool_wear * c.tool_wear_norm
            + self.power_proxy * c.power_proxy_norm
    }
}

/// Score every row and assign its risk level.
///
/// Row order is preserved. Weights are checked before any row is touched.
pub fn score_table(
    rows: Vec<EnrichedObservation>,
    cfg: &ScoringConfig,
) -> Result<Vec<ScoredObservation>, ScoringError> {
    cfg.validate().map_err(ScoringError::InvalidWeights)?;
    if rows.is_empty() {
        return Err(ScoringError::EmptyDataset);
    }

    let weights = RiskWeights::from(cfg);
    let components = normalized_components(&rows, cfg.constant_column)?;

    let scores: Vec<f64> = components.iter().map(|c| weights.combine(c)).collect();
    let levels = assign_risk_levels(&scores);

    for (level, upper) in bucket_upper_bounds(&scores, &levels) {
        tracing::debug!(%level, upper_score = upper, "Risk bucket boundary");
    }
    tracing::info!(
        rows = rows.len(),
        torque_weight = weights.torque,
        tool_wear_weight = weights.tool_wear,
        power_proxy_weight = weights.power_proxy,
        "Scored risk"
    );

    Ok(rows
        .into_iter()
        .zip(components)
        .zip(scores.into_iter().zip(levels))
        .map(|((row, comp), (score, level))| {
            ScoredObservation::from_enriched(row, comp, score, level)
        })
        .collect())
}

/// Normalized torque, tool wear and power proxy per row.
fn normalized_components(
    rows: &[EnrichedObservation],
    policy: ConstantColumnPolicy,
) -> Result<Vec<RiskComponents>, ScoringError> {
    let torque: Vec<f64> = rows.iter().map(|r| r.observation.torque_nm).collect();
    let wear: Vec<f64> = rows.iter().map(|r| r.observation.tool_wear_min).collect();
    let power: Vec<f64> = rows.iter().map(|r| r.features.power_proxy).collect();

    let torque = min_max_normalize("Torque [Nm]", &torque, policy)?;
    let wear = min_max_normalize("Tool wear [min]", &wear, policy)?;
    let power = min_max_normalize("power_proxy", &power, policy)?;

    Ok(torque
        .into_iter()
        .zip(wear)
        .zip(power)
        .map(|((torque_norm, tool_wear_norm), power_proxy_norm)| RiskComponents {
            torque_norm,
            tool_wear_norm,
            power_proxy_norm,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kpi::test_support::row;
    use crate::types::RiskLevel;

    fn table() -> Vec<EnrichedObservation> {
        (0..9_i32)
            .map(|i| {
                let x = f64::from(i);
                row("L", 20.0 + 5.0 * x, 1400.0 + 10.0 * x, 20.0 * x, i >= 7, &[])
            })
            .collect()
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = RiskWeights::default();
        assert_eq!((w.torque, w.tool_wear, w.power_proxy), (0.4, 0.4, 0.2));
        assert!((w.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_scores_in_unit_interval_with_extremes() {
        let scored = score_table(table(), &ScoringConfig::default()).unwrap();
        assert_eq!(scored.len(), 9);
        assert!(scored.iter().all(|s| (0.0..=1.0).contains(&s.risk_score)));
        // Monotone inputs: first row is the min of every column, last the max.
        assert_eq!(scored[0].risk_score, 0.0);
        assert!((scored[8].risk_score - 1.0).abs() < 1e-12);
        assert_eq!(scored[0].components, RiskComponents::default());
        assert_eq!(scored[8].components.torque_norm, 1.0);
    }

    #[test]
    fn test_levels_follow_score_order() {
        let scored = score_table(table(), &ScoringConfig::default()).unwrap();
        let levels: Vec<RiskLevel> = scored.iter().map(|s| s.risk_level).collect();
        assert_eq!(&levels[0..3], &[RiskLevel::Low; 3]);
        assert_eq!(&levels[3..6], &[RiskLevel::Medium; 3]);
        assert_eq!(&levels[6..9], &[RiskLevel::High; 3]);
    }

    #[test]
    fn test_combine_uses_weights() {
        let w = RiskWeights::default();
        let c = RiskComponents {
            torque_norm: 1.0,
            tool_wear_norm: 0.5,
            power_proxy_norm: 0.0,
        };
        assert!((w.combine(&c) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_weights_not_summing_to_one_rejected() {
        let cfg = ScoringConfig {
            torque_weight: 0.9,
            tool_wear_weight: 0.9,
            power_proxy_weight: 0.9,
            ..ScoringConfig::default()
        };
        match score_table(table(), &cfg).unwrap_err() {
            ScoringError::InvalidWeights(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].contains("sum to 1.0"));
            }
            other => panic!("expected invalid weights, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_weight_rejected() {
        let cfg = ScoringConfig {
            torque_weight: -1.0,
            tool_wear_weight: 1.0,
            power_proxy_weight: 1.0,
            ..ScoringConfig::default()
        };
        match score_table(table(), &cfg).unwrap_err() {
            ScoringError::InvalidWeights(errors) => {
                assert!(errors.iter().any(|e| e.contains("torque_weight") && e.contains("negative")));
            }
            other => panic!("expected invalid weights, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_table_rejected() {
        let err = score_table(Vec::new(), &ScoringConfig::default()).unwrap_err();
        assert!(matches!(err, ScoringError::EmptyDataset));
    }

    #[test]
    fn test_constant_column_policy_applies() {
        let rows: Vec<_> = (0..3_i32)
            .map(|i| row("L", 40.0, 1500.0, f64::from(i), false, &[]))
            .collect();

        let scored = score_table(rows.clone(), &ScoringConfig::default()).unwrap();
        // Torque and power constant: only tool wear contributes.
        assert!((scored[2].risk_score - 0.4).abs() < 1e-12);

        let strict = ScoringConfig {
            constant_column: ConstantColumnPolicy::Error,
            ..ScoringConfig::default()
        };
        let err = score_table(rows, &strict).unwrap_err();
        assert!(matches!(err, ScoringError::ConstantColumn { ref column, .. } if column == "Torque [Nm]"));
    }
}
