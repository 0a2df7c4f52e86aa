//! Rank-based tertile segmentation of the risk score.
//!
//! Rows are ranked by score ascending, ties broken by row index ascending
//! (a stable rank). The row at rank `r` of `n` goes to bucket
//! `floor(3r / n)`, so bucket sizes differ by at most one and equal scores
//! may straddle a boundary. Boundaries follow the data distribution rather
//! than fixed thresholds.

use crate::types::RiskLevel;

/// Assign a risk level to every score, returned in input order.
pub fn assign_risk_levels(scores: &[f64]) -> Vec<RiskLevel> {
    let n = scores.len();
    let mut order: Vec<usize> = (0..n).collect();
    // Stable sort: equal scores keep row order.
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    let mut levels = vec![RiskLevel::Low; n];
    for (rank, &row) in order.iter().enumerate() {
        levels[row] = RiskLevel::from_bucket(rank * RiskLevel::COUNT / n);
    }
    levels
}

/// Highest score that landed in each non-empty bucket, Low then Medium.
///
/// Useful for reporting where the data put the cut points.
pub fn bucket_upper_bounds(scores: &[f64], levels: &[RiskLevel]) -> Vec<(RiskLevel, f64)> {
    RiskLevel::ALL
        .iter()
        .filter_map(|&level| {
            scores
                .iter()
                .zip(levels)
                .filter(|(_, l)| **l == level)
                .map(|(s, _)| *s)
                .reduce(f64::max)
                .map(|max| (level, max))
        })
        .collect()
}
