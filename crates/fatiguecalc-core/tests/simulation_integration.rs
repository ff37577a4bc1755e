//! Integration tests for the simulation driver.

use fatiguecalc_core::process::circadian_default;
use fatiguecalc_core::{
    simulate, simulate_detailed, IndividualProfile, SimulationParams, SleepSchedule, WorkSchedule,
};

fn night_sleep() -> SleepSchedule {
    SleepSchedule::from_window(22.0, 6.0, 0.8, 0.0)
}

#[test]
fn one_day_has_24_hours_in_order() {
    let result = simulate(
        24,
        &night_sleep(),
        &WorkSchedule::from_window(9.0, 17.0, 1.0),
        &IndividualProfile::default(),
    )
    .unwrap();

    assert_eq!(result.len(), 24);
    assert_eq!(result.hour_index, (0..24).collect::<Vec<u32>>());
    for (t, c) in result.circadian_value.iter().enumerate() {
        assert!((c - circadian_default(t as u32, 0.0)).abs() < 1e-12);
    }
    assert!(result.performance_score.iter().all(|p| (0.0..=100.0).contains(p)));
}

#[test]
fn first_hour_starts_from_initial_reservoir() {
    let samples = simulate_detailed(
        3,
        &night_sleep(),
        &WorkSchedule::off(),
        &IndividualProfile::default(),
        &SimulationParams::default(),
    )
    .unwrap();
    assert_eq!(samples[0].previous_reservoir_level, 2400.0);
    assert_eq!(samples[1].previous_reservoir_level, samples[0].reservoir_level);
}

#[test]
fn heavier_load_never_helps_during_work() {
    let sleep = night_sleep();
    let profile = IndividualProfile::default();
    let heavy = WorkSchedule::from_window(9.0, 17.0, 1.0);
    let light = WorkSchedule::from_window(9.0, 17.0, 0.0);

    let heavy_run = simulate(24, &sleep, &heavy, &profile).unwrap();
    let light_run = simulate(24, &sleep, &light, &profile).unwrap();

    let mut heavy_sum = 0.0;
    let mut light_sum = 0.0;
    for hour in 0..24u32 {
        let (h, l) = (
            heavy_run.performance_score[hour as usize],
            light_run.performance_score[hour as usize],
        );
        if heavy.is_at_work(hour) {
            // Hours 9-11 clamp to 0 under both loads, so only 12-16 differ.
            assert!(h <= l, "hour {hour}: {h} > {l}");
            heavy_sum += h;
            light_sum += l;
        } else {
            assert_eq!(h, l, "hour {hour} is off work");
        }
    }
    assert!(heavy_sum < light_sum);
}

#[test]
fn restricted_week_does_not_improve_daily_minimum() {
    let sleep = SleepSchedule::from_window(0.0, 5.0, 0.7, 0.0);
    let work = WorkSchedule::from_window(9.0, 17.0, 1.0);
    let result = simulate(5 * 24, &sleep, &work, &IndividualProfile::default()).unwrap();

    let day_min = |d: usize| result.day(d).iter().copied().fold(f64::INFINITY, f64::min);
    let day_mean = |d: usize| result.day(d).iter().sum::<f64>() / 24.0;
    assert_eq!(result.day_count(), 5);
    assert!(day_min(4) <= day_min(0));
    assert!(day_mean(4) < day_mean(0));
}

#[test]
fn identical_inputs_give_identical_runs() {
    let sleep = SleepSchedule::from_window(23.0, 7.0, 0.6, 2.0);
    let work = WorkSchedule::from_window(8.0, 18.0, 2.0).with_rest_days(vec![5, 6]);
    let profile = IndividualProfile {
        chronotype_offset: 1.5,
        ..IndividualProfile::default()
    };
    let a = simulate(96, &sleep, &work, &profile).unwrap();
    let b = simulate(96, &sleep, &work, &profile).unwrap();
    assert_eq!(a, b);
}

#[test]
fn rest_days_switch_to_recovery_pressure() {
    let work = WorkSchedule::from_window(9.0, 17.0, 1.0).with_rest_days(vec![5, 6]);
    let samples = simulate_detailed(
        7 * 24,
        &night_sleep(),
        &work,
        &IndividualProfile::default(),
        &SimulationParams::default(),
    )
    .unwrap();
    assert!(samples[10].at_work && samples[10].workload > 0.0);
    let saturday = &samples[5 * 24 + 10];
    assert!(!saturday.at_work);
    assert!(saturday.workload < 0.0);
}
