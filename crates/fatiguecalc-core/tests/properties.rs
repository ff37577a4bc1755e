//! Property-based tests using proptest
//!
//! Invariants that hold for any admissible schedule and profile.

use fatiguecalc_core::calibration::{calibrate, SearchSpace};
use fatiguecalc_core::process::circadian;
use fatiguecalc_core::{
    simulate, simulate_detailed, IndividualProfile, SimulationParams, SleepSchedule, WorkSchedule,
};
use proptest::prelude::*;

fn sleep_strategy() -> impl Strategy<Value = SleepSchedule> {
    (0u32..24, 1u32..12, 0.0f64..=1.0, 0.0f64..20.0)
        .prop_map(|(bed, hours, quality, debt)| {
            SleepSchedule::from_window(f64::from(bed), f64::from(bed + hours), quality, debt)
        })
}

fn work_strategy() -> impl Strategy<Value = WorkSchedule> {
    (5u32..14, 1u32..12, 0.0f64..=3.0).prop_map(|(start, hours, load)| {
        WorkSchedule::from_window(f64::from(start), f64::from(start + hours), load)
    })
}

fn profile_strategy() -> impl Strategy<Value = IndividualProfile> {
    (-3.0f64..3.0, 18u32..80).prop_map(|(offset, age)| IndividualProfile {
        chronotype_offset: offset,
        age,
        ..IndividualProfile::default()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn scores_stay_in_range(
        sleep in sleep_strategy(),
        work in work_strategy(),
        profile in profile_strategy(),
    ) {
        let result = simulate(72, &sleep, &work, &profile).unwrap();
        for p in &result.performance_score {
            prop_assert!((0.0..=100.0).contains(p), "score {} out of range", p);
        }
    }

    #[test]
    fn adenosine_saturates(sleep in sleep_strategy(), work in work_strategy()) {
        let samples = simulate_detailed(
            96,
            &sleep,
            &work,
            &IndividualProfile::default(),
            &SimulationParams::default(),
        )
        .unwrap();
        for s in &samples {
            prop_assert!((0.5..=2.0).contains(&s.adenosine_level));
        }
    }

    #[test]
    fn runs_are_deterministic(
        sleep in sleep_strategy(),
        work in work_strategy(),
        profile in profile_strategy(),
    ) {
        let a = simulate(48, &sleep, &work, &profile).unwrap();
        let b = simulate(48, &sleep, &work, &profile).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn circadian_repeats_daily(t in 0u32..10_000, offset in -3.0f64..3.0, amp in 0.0f64..0.5) {
        let a = circadian(t, offset, amp, 0.0);
        let b = circadian(t + 24, offset, amp, 0.0);
        prop_assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn calibration_recovers_grid_factor(
        index in 0usize..201,
        predictions in prop::collection::vec(1.0f64..100.0, 1..50),
    ) {
        let space = SearchSpace::default();
        let factor = space.candidate(index);
        let truth: Vec<f64> = predictions.iter().map(|p| factor * p).collect();
        let result = calibrate(&predictions, &truth, space).unwrap();
        prop_assert_eq!(result.best_factor, factor);
        prop_assert_eq!(result.best_rmse, 0.0);
    }
}
