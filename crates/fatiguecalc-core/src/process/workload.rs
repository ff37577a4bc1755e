//! Workload process.
//!
//! Produces a signed pressure: positive while at work, strongly negative
//! (recovery credit) otherwise.

/// Per-load-unit pressure while working.
const WORK_DRIVE: f64 = 1.14;
/// Recovery credit while off work.
const OFF_WORK_RECOVERY: f64 = 11.0;
/// Normal working day, above which previous-day load carries over.
const CARRYOVER_THRESHOLD_HOURS: f64 = 8.0;

/// Inputs for the workload pressure of one hour.
#[derive(Debug, Clone, Copy)]
pub struct WorkloadInput {
    pub daily_workload_hours: f64,
    pub cognitive_load_rating: f64,
    /// Hours worked the previous day; 0 unless a caller chains days.
    pub previous_day_workload: f64,
    pub at_work: bool,
}

/// Carryover from an overlong previous day.
pub fn workload_carryover(previous_day_workload: f64) -> f64 {
    0.3 * ((previous_day_workload - CARRYOVER_THRESHOLD_HOURS) / CARRYOVER_THRESHOLD_HOURS).max(0.0)
}

/// Workload pressure `Wt`.
pub fn workload_pressure(input: &WorkloadInput) -> f64 {
    let daily_impact = input.daily_workload_hours * input.cognitive_load_rating * 0.1;
    let carryover = workload_carryover(input.previous_day_workload);

    if input.at_work {
        WORK_DRIVE * (1.0 + input.cognitive_load_rating) + daily_impact + carryover
    } else {
        -OFF_WORK_RECOVERY + daily_impact + carryover
    }
}
