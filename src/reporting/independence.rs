//! Chi-squared test of independence between risk level and machine failure.
//!
//! A low p-value means failure frequency genuinely differs between buckets,
//! i.e. the score separates failing from healthy machines.

use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::types::{IndependenceTest, RiskBucket};

/// Pearson chi-squared test on the (risk level x failed) contingency table.
///
/// Returns `None` when any expected cell count is zero (an empty bucket, or
/// no failures / no survivors at all), where the statistic is undefined.
pub fn independence_test(buckets: &[RiskBucket]) -> Option<IndependenceTest> {
    let total: usize = buckets.iter().map(|b| b.units).sum();
    let total_failures: usize = buckets.iter().map(|b| b.failures).sum();
    let total_healthy = total.checked_sub(total_failures)?;
    if total == 0 || total_failures == 0 || total_healthy == 0 || buckets.len() < 2 {
        return None;
    }
    if buckets.iter().any(|b| b.units == 0) {
        return None;
    }

    let n = total as f64;
    let mut statistic = 0.0;
    for b in buckets {
        let units = b.units as f64;
        let cells = [
            (b.failures as f64, units * total_failures as f64 / n),
            ((b.units - b.failures) as f64, units * total_healthy as f64 / n),
        ];
        for (observed, expected) in cells {
            statistic += (observed - expected).powi(2) / expected;
        }
    }

    let dof = u32::try_from(buckets.len() - 1).ok()?;
    let p_value = match ChiSquared::new(f64::from(dof)) {
        Ok(dist) => (1.0 - dist.cdf(statistic)).clamp(0.0, 1.0),
        Err(_) => return None,
    };

    Some(IndependenceTest {
        chi_squared: statistic,
        degrees_of_freedom: dof,
        p_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RiskLevel;

    fn bucket(level: RiskLevel, units: usize, failures: usize) -> RiskBucket {
        RiskBucket {
            level,
            units,
            failures,
            failure_rate_pct: None,
            lift_vs_baseline: None,
            mean_risk_score: None,
        }
    }

    #[test]
    fn test_identical_rates_are_independent() {
        let buckets = vec![
            bucket(RiskLevel::Low, 100, 10),
            bucket(RiskLevel::Medium, 100, 10),
            bucket(RiskLevel::High, 100, 10),
        ];
        let t = independence_test(&buckets).unwrap();
        assert!(t.chi_squared.abs() < 1e-12);
        assert_eq!(t.degrees_of_freedom, 2);
        assert!((t.p_value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_separated_rates_are_significant() {
        let buckets = vec![
            bucket(RiskLevel::Low, 1000, 5),
            bucket(RiskLevel::Medium, 1000, 20),
            bucket(RiskLevel::High, 1000, 120),
        ];
        let t = independence_test(&buckets).unwrap();
        assert!(t.chi_squared > 100.0);
        assert!(t.p_value < 1e-6);
    }

    #[test]
    fn test_known_statistic() {
        // Expected failures 10 per bucket; (0-10)^2/10 + (20-10)^2/10 = 20,
        // healthy side: (30-20)^2/20 + (10-20)^2/20 = 10, middle bucket 0.
        let buckets = vec![
            bucket(RiskLevel::Low, 30, 0),
            bucket(RiskLevel::Medium, 30, 10),
            bucket(RiskLevel::High, 30, 20),
        ];
        let t = independence_test(&buckets).unwrap();
        assert!((t.chi_squared - 30.0).abs() < 1e-9);
        // Survival function of chi2(2) is exp(-x/2).
        assert!((t.p_value - (-15.0_f64).exp()).abs() < 1e-9);
    }

    #[test]
    fn test_undefined_cases() {
        let no_failures = vec![
            bucket(RiskLevel::Low, 3, 0),
            bucket(RiskLevel::Medium, 3, 0),
            bucket(RiskLevel::High, 3, 0),
        ];
        assert!(independence_test(&no_failures).is_none());

        let empty_bucket = vec![
            bucket(RiskLevel::Low, 1, 1),
            bucket(RiskLevel::Medium, 0, 0),
            bucket(RiskLevel::High, 0, 0),
        ];
        assert!(independence_test(&empty_bucket).is_none());
    }
}
