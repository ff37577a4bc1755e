//! Circadian oscillator.
//!
//! A stateless function of absolute simulation hour. The output is an
//! oscillator value, not a score, so it is never clamped.

use std::f64::consts::PI;

/// Default amplitude of the 12-hour ultradian term.
pub const DEFAULT_ULTRADIAN_AMPLITUDE: f64 = 0.2;

/// Acrophase of the primary 24 h component (hour of day).
const PRIMARY_PHASE: f64 = 18.0;
/// Phase of the 12 h harmonic (hour of day).
const HARMONIC_PHASE: f64 = 3.0;
/// Relative weight of the 12 h harmonic.
const HARMONIC_WEIGHT: f64 = 0.5;

/// Circadian value at absolute hour `hour`.
///
/// `cos(2π(t−p)/24) + 0.5·cos(4π(t−p′)/24) + A·cos(2πt/12)` with
/// `p = 18 + chronotype_offset + genetic_phase_shift` and
/// `p′ = 3 + chronotype_offset + genetic_phase_shift`.
pub fn circadian(
    hour: u32,
    chronotype_offset: f64,
    ultradian_amplitude: f64,
    genetic_phase_shift: f64,
) -> f64 {
    let t = f64::from(hour);
    let shift = chronotype_offset + genetic_phase_shift;
    let p = PRIMARY_PHASE + shift;
    let p_prime = HARMONIC_PHASE + shift;

    (2.0 * PI * (t - p) / 24.0).cos()
        + HARMONIC_WEIGHT * (4.0 * PI * (t - p_prime) / 24.0).cos()
        + ultradian_amplitude * (2.0 * PI * t / 12.0).cos()
}

/// [`circadian`] with the default ultradian amplitude and no genetic shift.
pub fn circadian_default(hour: u32, chronotype_offset: f64) -> f64 {
    circadian(hour, chronotype_offset, DEFAULT_ULTRADIAN_AMPLITUDE, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_closed_form_at_reference_hours() {
        // t = 18: cos(0) + 0.5·cos(4π·15/24) + 0.2·cos(3π)
        let expected = 1.0 + 0.5 * (4.0 * PI * 15.0 / 24.0).cos() - 0.2;
        assert!((circadian_default(18, 0.0) - expected).abs() < 1e-12);

        // t = 0 without ultradian term
        let expected = (2.0 * PI * -18.0 / 24.0).cos() + 0.5 * (4.0 * PI * -3.0 / 24.0).cos();
        assert!((circadian(0, 0.0, 0.0, 0.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn chronotype_and_genetic_shift_are_additive() {
        let a = circadian(30, 1.5, 0.2, 0.5);
        let b = circadian(30, 2.0, 0.2, 0.0);
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn periodic_over_a_day() {
        for t in 0..72 {
            let here = circadian(t, 0.0, 0.0, 0.0);
            let next = circadian(t + 24, 0.0, 0.0, 0.0);
            assert!((here - next).abs() < 1e-9, "hour {t}");
        }
    }

    #[test]
    fn stays_within_summed_amplitudes() {
        for t in 0..240 {
            let v = circadian(t, -2.5, 0.2, 0.0);
            assert!(v.abs() <= 1.7 + 1e-9);
        }
    }
}
