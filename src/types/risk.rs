//! Risk scoring and validation types

use serde::{Deserialize, Serialize};

use super::{DerivedFeatures, EnrichedObservation, Observation};

/// Tertile bucket of the risk score population.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskLevel {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl RiskLevel {
    /// Report order: Low -> Medium -> High.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Number of buckets the score population is split into.
    pub const COUNT: usize = 3;

    /// Map a 0-based bucket index to its level, clamping above High.
    pub const fn from_bucket(bucket: usize) -> Self {
        match bucket {
            0 => Self::Low,
            1 => Self::Medium,
            _ => Self::High,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Min-max normalized sub-scores feeding the composite risk score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskComponents {
    pub torque_norm: f64,
    pub tool_wear_norm: f64,
    pub power_proxy_norm: f64,
}

/// Fully scored observation: the final row of the enriched table.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredObservation {
    pub observation: Observation,
    pub features: DerivedFeatures,
    pub components: RiskComponents,
    /// Weighted composite of the components, in [0, 1]
    pub risk_score: f64,
    pub risk_level: RiskLevel,
}

impl ScoredObservation {
    pub fn from_enriched(
        enriched: EnrichedObservation,
        components: RiskComponents,
        risk_score: f64,
        risk_level: RiskLevel,
    ) -> Self {
        Self {
            observation: enriched.observation,
            features: enriched.features,
            components,
            risk_score,
            risk_level,
        }
    }
}

/// Validation figures for one risk bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskBucket {
    pub level: RiskLevel,
    pub units: usize,
    pub failures: usize,
    /// Failure rate in percent; `None` when the bucket is empty
    pub failure_rate_pct: Option<f64>,
    /// Bucket failure rate over global failure rate; `None` when undefined
    pub lift_vs_baseline: Option<f64>,
    pub mean_risk_score: Option<f64>,
}

/// Chi-squared test of independence between risk level and machine failure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndependenceTest {
    pub chi_squared: f64,
    pub degrees_of_freedom: u32,
    pub p_value: f64,
}

/// Risk validation summary, buckets always in Low -> Medium -> High order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSummary {
    pub baseline_failure_rate_pct: f64,
    pub buckets: Vec<RiskBucket>,
    pub independence: Option<IndependenceTest>,
}

impl RiskSummary {
    pub fn bucket(&self, level: RiskLevel) -> Option<&RiskBucket> {
        self.buckets.iter().find(|b| b.level == level)
    }

    pub fn total_units(&self) -> usize {
        self.buckets.iter().map(|b| b.units).sum()
    }
}
