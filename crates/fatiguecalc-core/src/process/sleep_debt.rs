//! Sleep-debt tracker.

/// Sleep need per night used when none is configured.
pub const DEFAULT_IDEAL_SLEEP_HOURS: f64 = 8.0;

/// Performance points lost per hour of debt (0.56 %·100).
const IMPACT_PER_DEBT_HOUR: f64 = 0.0056 * 100.0;
/// Share of surplus sleep credited against debt.
const RECOVERY_EFFICIENCY: f64 = 0.7;

/// Outcome of one debt evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebtAssessment {
    /// Penalty on the 0–100 performance axis.
    pub cognitive_impact: f64,
    /// Hours to subtract from the running debt.
    pub debt_recovery: f64,
}

/// Penalty points for a given debt.
pub fn debt_impact(debt: f64) -> f64 {
    debt * IMPACT_PER_DEBT_HOUR
}

/// Evaluate `debt` against one recovery opportunity of `recovery_sleep_hours`.
///
/// Only sleep beyond `ideal_sleep` recovers debt, at 70 % efficiency, and
/// never more than the outstanding debt.
pub fn assess_sleep_debt(debt: f64, recovery_sleep_hours: f64, ideal_sleep: f64) -> DebtAssessment {
    let debt_recovery = if recovery_sleep_hours > ideal_sleep {
        debt.min((recovery_sleep_hours - ideal_sleep) * RECOVERY_EFFICIENCY)
    } else {
        0.0
    };

    DebtAssessment {
        cognitive_impact: debt_impact(debt),
        debt_recovery,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impact_is_linear_in_debt() {
        let a = assess_sleep_debt(10.0, 8.0, DEFAULT_IDEAL_SLEEP_HOURS);
        assert!((a.cognitive_impact - 5.6).abs() < 1e-9);
        assert_eq!(a.debt_recovery, 0.0);
    }

    #[test]
    fn surplus_sleep_recovers_at_seventy_percent() {
        let a = assess_sleep_debt(10.0, 10.0, DEFAULT_IDEAL_SLEEP_HOURS);
        assert!((a.debt_recovery - 1.4).abs() < 1e-12);
    }

    #[test]
    fn recovery_never_exceeds_outstanding_debt() {
        let a = assess_sleep_debt(0.5, 12.0, DEFAULT_IDEAL_SLEEP_HOURS);
        assert_eq!(a.debt_recovery, 0.5);
        let none = assess_sleep_debt(0.0, 12.0, DEFAULT_IDEAL_SLEEP_HOURS);
        assert_eq!(none.debt_recovery, 0.0);
    }
}
