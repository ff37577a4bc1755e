//! Grid-search calibration of the enhancement multiplier.
//!
//! Finds the scalar `f` minimising `RMSE(f · predictions, ground_truth)` over
//! an inclusive, evenly spaced grid. Candidates are evaluated in parallel;
//! the answer is the same as a sequential scan, with ties going to the
//! smallest factor.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Inclusive grid of candidate factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSpace {
    pub low: f64,
    pub high: f64,
    pub steps: usize,
}

impl Default for SearchSpace {
    fn default() -> Self {
        Self {
            low: 0.5,
            high: 1.5,
            steps: 201,
        }
    }
}

impl SearchSpace {
    pub fn new(low: f64, high: f64, steps: usize) -> Result<Self, ValidationError> {
        let space = Self { low, high, steps };
        space.validate()?;
        Ok(space)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let finite = self.low.is_finite() && self.high.is_finite();
        if !finite || self.low > self.high || self.steps == 0 {
            return Err(ValidationError::InvalidSearchSpace {
                low: self.low,
                high: self.high,
                steps: self.steps,
            });
        }
        Ok(())
    }

    /// The `i`-th candidate; the last one is exactly `high`.
    pub fn candidate(&self, i: usize) -> f64 {
        if self.steps == 1 {
            return self.low;
        }
        self.low + (self.high - self.low) * (i as f64) / ((self.steps - 1) as f64)
    }

    /// Distance between adjacent candidates.
    pub fn resolution(&self) -> f64 {
        if self.steps <= 1 {
            0.0
        } else {
            (self.high - self.low) / ((self.steps - 1) as f64)
        }
    }
}

/// Best factor and the error it achieves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationResult {
    pub best_factor: f64,
    pub best_rmse: f64,
}

/// Root-mean-squared error of `factor · predictions` against `ground_truth`.
pub fn scaled_rmse(factor: f64, predictions: &[f64], ground_truth: &[f64]) -> f64 {
    let sum_sq: f64 = predictions
        .iter()
        .zip(ground_truth)
        .map(|(p, y)| {
            let diff = factor * p - y;
            diff * diff
        })
        .sum();
    (sum_sq / predictions.len() as f64).sqrt()
}

/// Brute-force the enhancement factor over `space`.
pub fn calibrate(
    predictions: &[f64],
    ground_truth: &[f64],
    space: SearchSpace,
) -> Result<CalibrationResult, ValidationError> {
    if predictions.len() != ground_truth.len() {
        return Err(ValidationError::LengthMismatch {
            predictions: predictions.len(),
            ground_truth: ground_truth.len(),
        });
    }
    if predictions.is_empty() {
        return Err(ValidationError::EmptyCollection(
            "calibration requires at least one prediction".to_string(),
        ));
    }
    space.validate()?;

    let (index, best_rmse) = (0..space.steps)
        .into_par_iter()
        .map(|i| (i, scaled_rmse(space.candidate(i), predictions, ground_truth)))
        .reduce(
            || (usize::MAX, f64::INFINITY),
            |a, b| {
                // NaN never wins; equal errors keep the lower index.
                if b.1 < a.1 || (b.1 == a.1 && b.0 < a.0) || a.1.is_nan() {
                    b
                } else {
                    a
                }
            },
        );

    if index == usize::MAX {
        return Err(ValidationError::InvalidValue {
            field: "predictions".to_string(),
            message: "no candidate produced a finite error".to_string(),
        });
    }

    let result = CalibrationResult {
        best_factor: space.candidate(index),
        best_rmse,
    };
    tracing::info!(
        best_factor = result.best_factor,
        best_rmse = result.best_rmse,
        samples = predictions.len(),
        "calibration complete"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_spacing() {
        let space = SearchSpace::default();
        assert!((space.resolution() - 0.005).abs() < 1e-15);
        assert_eq!(space.candidate(0), 0.5);
        assert_eq!(space.candidate(100), 1.0);
        assert_eq!(space.candidate(200), 1.5);
    }

    #[test]
    fn identical_series_calibrate_to_one() {
        let y: Vec<f64> = (0..100).map(|i| 50.0 + (i as f64 * 0.37).sin() * 25.0).collect();
        let result = calibrate(&y, &y, SearchSpace::default()).unwrap();
        assert!((result.best_factor - 1.0).abs() < 0.005);
        assert_eq!(result.best_rmse, 0.0);
    }

    #[test]
    fn recovers_known_scale() {
        let predictions: Vec<f64> = (1..=50).map(f64::from).collect();
        let truth: Vec<f64> = predictions.iter().map(|p| p * 1.2).collect();
        let result = calibrate(&predictions, &truth, SearchSpace::default()).unwrap();
        assert!((result.best_factor - 1.2).abs() < 1e-9);
        assert!(result.best_rmse < 1e-9);
    }

    #[test]
    fn factor_outside_grid_lands_on_edge() {
        let predictions = vec![10.0, 20.0, 30.0];
        let truth: Vec<f64> = predictions.iter().map(|p| p * 3.0).collect();
        let result = calibrate(&predictions, &truth, SearchSpace::default()).unwrap();
        assert_eq!(result.best_factor, 1.5);
    }

    #[test]
    fn mismatched_lengths_fail() {
        let err = calibrate(&[1.0; 100], &[1.0; 99], SearchSpace::default()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::LengthMismatch {
                predictions: 100,
                ground_truth: 99
            }
        );
    }

    #[test]
    fn empty_input_fails() {
        assert!(calibrate(&[], &[], SearchSpace::default()).is_err());
    }

    #[test]
    fn zero_predictions_tie_to_lowest_factor() {
        let result = calibrate(&[0.0, 0.0], &[1.0, 1.0], SearchSpace::default()).unwrap();
        assert_eq!(result.best_factor, 0.5);
        assert_eq!(result.best_rmse, 1.0);
    }

    #[test]
    fn rejects_inverted_space() {
        assert!(SearchSpace::new(1.5, 0.5, 10).is_err());
        assert!(SearchSpace::new(0.5, 1.5, 0).is_err());
    }
}
