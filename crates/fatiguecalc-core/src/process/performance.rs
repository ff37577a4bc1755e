//! Performance synthesizer.
//!
//! The only stage that bounds its output; all earlier stages may drift.

use super::individual::IndividualFactors;

/// Reservoir capacity `Rc`.
pub const RESERVOIR_CAPACITY: f64 = 2880.0;
/// Workload capacity `Wc`.
pub const WORKLOAD_CAPACITY: f64 = 75.0;
/// Identity value of the learned-model enhancement hook.
pub const NO_ENHANCEMENT: f64 = 1.0;

const CIRCADIAN_BASE_GAIN: f64 = 7.0;
const CIRCADIAN_DEPLETION_GAIN: f64 = 5.0;

/// Everything the synthesizer combines for one hour.
#[derive(Debug, Clone, Copy)]
pub struct PerformanceInputs {
    pub reservoir_level: f64,
    pub circadian: f64,
    pub inertia: f64,
    pub workload: f64,
    pub sleep_debt_impact: f64,
    pub factors: IndividualFactors,
    /// Scalar from an external learned model. No model ships with this
    /// crate, so callers pass [`NO_ENHANCEMENT`] unless they calibrated one.
    pub ml_enhancement: f64,
}

/// Performance score in `[0, 100]`.
pub fn performance_score(inputs: &PerformanceInputs) -> f64 {
    let rt = inputs.reservoir_level;
    let mut score = 100.0 * (rt / RESERVOIR_CAPACITY)
        + (CIRCADIAN_BASE_GAIN
            + CIRCADIAN_DEPLETION_GAIN * (RESERVOIR_CAPACITY - rt) / RESERVOIR_CAPACITY)
            * inputs.circadian
        - inputs.inertia;

    // Negative workload is off-work recovery and is not applied.
    if inputs.workload > 0.0 {
        score *= (WORKLOAD_CAPACITY - inputs.workload) / WORKLOAD_CAPACITY;
    }

    score -= inputs.sleep_debt_impact;
    score *= inputs.factors.sleep_need_modifier;
    score *= inputs.ml_enhancement;

    score.clamp(0.0, 100.0)
}
