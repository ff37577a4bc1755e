//! Integration tests for calibrating the enhancement factor against a run.

use std::io::Write;

use fatiguecalc_core::export::read_calibration_pairs;
use fatiguecalc_core::{
    calibrate, simulate, simulate_with, IndividualProfile, SearchSpace, SimulationParams, SleepSchedule,
    WorkSchedule,
};

fn baseline() -> (SleepSchedule, WorkSchedule, IndividualProfile) {
    (
        SleepSchedule::from_window(22.0, 7.0, 0.8, 0.0),
        WorkSchedule::from_window(9.0, 17.0, 1.0),
        IndividualProfile::default(),
    )
}

#[test]
fn calibrated_factor_reproduces_observations() {
    let (sleep, work, profile) = baseline();
    let predictions = simulate(72, &sleep, &work, &profile).unwrap().performance_score;
    let observed: Vec<f64> = predictions.iter().map(|p| p * 1.1).collect();

    let fit = calibrate(&predictions, &observed, SearchSpace::default()).unwrap();
    assert!((fit.best_factor - 1.1).abs() < 1e-9);

    let params = SimulationParams::default().with_enhancement(fit.best_factor);
    let enhanced = simulate_with(72, &sleep, &work, &profile, &params).unwrap();
    for (e, o) in enhanced.performance_score.iter().zip(&observed) {
        assert!((e - o.min(100.0)).abs() < 1e-6);
    }
}

#[test]
fn calibration_from_csv_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "predicted,actual").unwrap();
    for p in [20.0, 40.0, 60.0, 80.0] {
        writeln!(file, "{p},{}", p * 0.9).unwrap();
    }
    file.flush().unwrap();

    let (predicted, actual) = read_calibration_pairs(std::fs::File::open(file.path()).unwrap()).unwrap();
    assert_eq!(predicted.len(), 4);
    let fit = calibrate(&predicted, &actual, SearchSpace::default()).unwrap();
    assert!((fit.best_factor - 0.9).abs() < 1e-9);
}

#[test]
fn short_ground_truth_is_rejected() {
    let (sleep, work, profile) = baseline();
    let predictions = simulate(100, &sleep, &work, &profile).unwrap().performance_score;
    let observed = &predictions[..99];
    assert!(calibrate(&predictions, observed, SearchSpace::default()).is_err());
}
