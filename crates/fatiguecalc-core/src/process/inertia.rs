//! Sleep-inertia process.
//!
//! Driven by hours since the last wake transition, not by absolute hour.

/// Inputs for the inertia penalty.
#[derive(Debug, Clone, Copy)]
pub struct InertiaInput {
    pub time_since_wake: f64,
    pub sleep_quantity: f64,
    pub adenosine_level: f64,
    /// Consecutive restricted nights; 0 unless a caller supplies history.
    pub sleep_restriction_days: u32,
}

/// Window after waking during which inertia applies.
pub fn max_inertia_duration(sleep_quantity: f64) -> f64 {
    if sleep_quantity >= 6.0 {
        0.25
    } else if sleep_quantity >= 4.0 {
        0.5
    } else {
        1.0
    }
}

fn restriction_multiplier(days: u32) -> f64 {
    if days > 2 {
        1.5 + f64::from(days - 2) * 0.3
    } else {
        1.0
    }
}

/// Peak inertia penalty `Imax`.
pub fn peak_inertia(sleep_quantity: f64, sleep_restriction_days: u32) -> f64 {
    let shortfall = ((4.0 - sleep_quantity) * 0.5).max(0.0);
    5.0 * (1.0 + shortfall) * restriction_multiplier(sleep_restriction_days)
}

/// Inertia penalty in performance points.
pub fn sleep_inertia(input: &InertiaInput) -> f64 {
    if input.time_since_wake >= max_inertia_duration(input.sleep_quantity) {
        return 0.0;
    }
    let decay_rate = 0.067 * (1.0 + input.adenosine_level * 0.3);
    peak_inertia(input.sleep_quantity, input.sleep_restriction_days)
        * (-input.time_since_wake / decay_rate).exp()
}
