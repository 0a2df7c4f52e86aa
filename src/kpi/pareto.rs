//! Failure-mode Pareto ranking

use crate::types::{EnrichedObservation, FailureMode, FailureModeShare};

/// Share of each failure mode among all recorded mode flags, largest first.
///
/// Equal counts keep dataset column order (TWF, HDF, PWF, OSF, RNF). When
/// no mode flag is set anywhere every share is 0.
pub fn failure_mode_pareto(rows: &[EnrichedObservation]) -> Vec<FailureModeShare> {
    let counts = FailureMode::ALL.map(|mode| {
        rows.iter()
            .filter(|r| r.observation.failure_modes.get(mode))
            .count()
    });
    let total: usize = counts.iter().sum();

    let mut shares: Vec<FailureModeShare> = FailureMode::ALL
        .iter()
        .zip(counts)
        .map(|(&mode, count)| FailureModeShare {
            mode,
            count,
            share_pct: if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            },
        })
        .collect();

    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kpi::test_support::row;

    #[test]
    fn test_pareto_ranks_and_normalizes() {
        use FailureMode::*;
        let rows = vec![
            row("L", 40.0, 1500.0, 10.0, true, &[HeatDissipation]),
            row("L", 40.0, 1500.0, 10.0, true, &[HeatDissipation, Overstrain]),
            row("L", 40.0, 1500.0, 10.0, true, &[HeatDissipation]),
            row("L", 40.0, 1500.0, 10.0, true, &[Overstrain]),
            row("L", 40.0, 1500.0, 10.0, false, &[Random]),
        ];
        let pareto = failure_mode_pareto(&rows);
        let order: Vec<FailureMode> = pareto.iter().map(|s| s.mode).collect();
        assert_eq!(order, vec![HeatDissipation, Overstrain, Random, ToolWear, Power]);
        assert_eq!(pareto[0].count, 3);
        assert!((pareto[0].share_pct - 50.0).abs() < 1e-9);
        let total: f64 = pareto.iter().map(|s| s.share_pct).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_pareto_without_failures_is_all_zero() {
        let rows = vec![row("L", 40.0, 1500.0, 10.0, false, &[])];
        let pareto = failure_mode_pareto(&rows);
        assert_eq!(pareto.len(), 5);
        assert!(pareto.iter().all(|s| s.count == 0 && s.share_pct == 0.0));
        assert_eq!(pareto[0].mode, FailureMode::ToolWear);
    }
}
