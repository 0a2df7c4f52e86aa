//! Operating-condition profiles by failure mode

use statrs::statistics::Statistics;

use crate::types::{ConditionMeans, EnrichedObservation, FailureMode, OperatingProfile};

/// Mean delta_temp, torque, speed and tool wear of rows with and without `mode`.
pub fn operating_profile(rows: &[EnrichedObservation], mode: FailureMode) -> OperatingProfile {
    let (with, without): (Vec<&EnrichedObservation>, Vec<&EnrichedObservation>) = rows
        .iter()
        .partition(|r| r.observation.failure_modes.get(mode));

    OperatingProfile {
        mode,
        without_failure: condition_means(&without),
        with_failure: condition_means(&with),
    }
}

/// One profile per requested mode, in the order given.
pub fn operating_profiles(
    rows: &[EnrichedObservation],
    modes: &[FailureMode],
) -> Vec<OperatingProfile> {
    modes.iter().map(|&m| operating_profile(rows, m)).collect()
}

fn condition_means(group: &[&EnrichedObservation]) -> Option<ConditionMeans> {
    if group.is_empty() {
        return None;
    }
    Some(ConditionMeans {
        units: group.len(),
        delta_temp: group.iter().map(|r| r.features.delta_temp).mean(),
        torque_nm: group.iter().map(|r| r.observation.torque_nm).mean(),
        rotational_speed_rpm: group
            .iter()
            .map(|r| r.observation.rotational_speed_rpm)
            .mean(),
        tool_wear_min: group.iter().map(|r| r.observation.tool_wear_min).mean(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kpi::test_support::row;

    #[test]
    fn test_profile_splits_by_flag() {
        let rows = vec![
            row("L", 60.0, 1300.0, 200.0, true, &[FailureMode::Overstrain]),
            row("L", 50.0, 1400.0, 180.0, true, &[FailureMode::Overstrain]),
            row("L", 30.0, 1600.0, 20.0, false, &[]),
        ];
        let p = operating_profile(&rows, FailureMode::Overstrain);
        let with = p.with_failure.unwrap();
        let without = p.without_failure.unwrap();
        assert_eq!(with.units, 2);
        assert!((with.torque_nm - 55.0).abs() < 1e-9);
        assert!((with.rotational_speed_rpm - 1350.0).abs() < 1e-9);
        assert!((with.tool_wear_min - 190.0).abs() < 1e-9);
        assert!((with.delta_temp - 10.0).abs() < 1e-9);
        assert_eq!(without.units, 1);
        assert!((without.torque_nm - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_absent_group_is_none() {
        let rows = vec![row("L", 30.0, 1600.0, 20.0, false, &[])];
        let p = operating_profile(&rows, FailureMode::HeatDissipation);
        assert!(p.with_failure.is_none());
        assert_eq!(p.without_failure.map(|m| m.units), Some(1));
    }

    #[test]
    fn test_profiles_follow_requested_order() {
        let rows = vec![row("L", 30.0, 1600.0, 20.0, false, &[])];
        let modes: Vec<FailureMode> = operating_profiles(&rows, &FailureMode::PROFILED)
            .iter()
            .map(|p| p.mode)
            .collect();
        assert_eq!(
            modes,
            vec![FailureMode::HeatDissipation, FailureMode::Overstrain, FailureMode::Power]
        );
    }
}
