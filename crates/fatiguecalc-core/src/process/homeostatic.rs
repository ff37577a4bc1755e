//! Homeostatic (sleep-pressure) process.
//!
//! One reservoir level is carried between hours. The level is
//! unbounded: long sleep stretches and prolonged wake both push it past any
//! fixed range, and only the performance synthesizer clamps.

use super::individual::IndividualFactors;

/// Base hourly depletion while awake.
const BASE_DECAY: f64 = 0.5;
/// Sleep quantity that leaves the depletion rate unadjusted.
const REFERENCE_SLEEP_HOURS: f64 = 8.0;
/// Sleep-period asymptote contribution before glial modulation.
const BASE_AS_FACTOR: f64 = 0.235;

/// `1 − e^(−Δt/τ)` for the unit time step and unit time constants.
fn unit_step_gain() -> f64 {
    1.0 - (-1.0_f64).exp()
}

/// Inputs for one homeostatic update besides the carried level.
#[derive(Debug, Clone, Copy)]
pub struct HomeostaticInput {
    pub asleep: bool,
    /// Recovery driver; fixed at 1 in the present model.
    pub recovery_driver: f64,
    pub sleep_quality: f64,
    pub sleep_quantity: f64,
    pub adenosine_level: f64,
    pub factors: IndividualFactors,
}

/// Hourly wake depletion `K_adjusted`.
pub fn wake_decay_rate(sleep_quantity: f64, adenosine_level: f64, deprivation_sensitivity: f64) -> f64 {
    let adenosine_factor = 1.0 + (adenosine_level - 1.0) * 0.3;
    BASE_DECAY
        * (1.0 + (REFERENCE_SLEEP_HOURS - sleep_quantity) * 0.1)
        * adenosine_factor
        * deprivation_sensitivity
}

/// Advance the reservoir one hour from `prev_level`.
///
/// Asleep: `as + q·g·R + g·(ai − as)` with `g = 1 − e^−1` and
/// `as = 0.235·(1 + (q − 0.5)·0.2)`. Awake: `R − K_adjusted`, a flat
/// per-hour decrement independent of absolute simulation time.
pub fn reservoir_step(prev_level: f64, input: &HomeostaticInput) -> f64 {
    if input.asleep {
        let glial_factor = 1.0 + (input.sleep_quality - 0.5) * 0.2;
        let as_factor = BASE_AS_FACTOR * glial_factor;
        let gain = unit_step_gain();
        let recovery_factor = input.sleep_quality * gain;
        as_factor + recovery_factor * prev_level + gain * (input.recovery_driver - as_factor)
    } else {
        prev_level
            - wake_decay_rate(
                input.sleep_quantity,
                input.adenosine_level,
                input.factors.deprivation_sensitivity,
            )
    }
}
