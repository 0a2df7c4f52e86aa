//! Min-max column normalization.

use statrs::statistics::Statistics;

use crate::config::ConstantColumnPolicy;

use super::ScoringError;

/// Observed range of a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnRange {
    pub min: f64,
    pub max: f64,
}

impl ColumnRange {
    /// Range of a non-empty column; `None` for an empty one.
    pub fn of(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        Some(Self {
            min: Statistics::min(values),
            max: Statistics::max(values),
        })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_constant(&self) -> bool {
        self.span() == 0.0
    }
}

/// Normalize a column to [0, 1] with `(x - min) / (max - min)`.
///
/// The column minimum maps to exactly 0 and the maximum to exactly 1. A
/// constant column is resolved by `policy` instead of producing 0/0.
pub fn min_max_normalize(
    column: &str,
    values: &[f64],
    policy: ConstantColumnPolicy,
) -> Result<Vec<f64>, ScoringError> {
    let range = ColumnRange::of(values).ok_or(ScoringError::EmptyDataset)?;

    if range.is_constant() {
        return match policy {
            ConstantColumnPolicy::Zero => {
                tracing::warn!(
                    column,
                    value = range.min,
                    "Constant column, normalized sub-score set to 0"
                );
                Ok(vec![0.0; values.len()])
            }
            ConstantColumnPolicy::Error => Err(ScoringError::ConstantColumn {
                column: column.to_string(),
                value: range.min,
            }),
        };
    }

    let span = range.span();
    Ok(values
        .iter()
        .map(|&x| ((x - range.min) / span).clamp(0.0, 1.0))
        .collect())
}
