//! Core error types for fatiguecalc-core.
//!
//! Input problems surface as [`ValidationError`] before any simulation work
//! starts. Numeric saturation inside the model is not an error and never
//! appears here.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for fatiguecalc-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Rejected input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Tabular export/import errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Home/config directory could not be prepared
    #[error("Configuration directory unavailable: {0}")]
    DirectoryUnavailable(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Simulation horizon of zero hours
    #[error("Simulation duration must be at least one hour")]
    NonPositiveDuration,

    /// Scalar outside its admissible range
    #[error("Value {value} for '{field}' is outside [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Hourly pattern with the wrong number of entries
    #[error("{schedule} pattern has {len} hourly entries, expected 24")]
    IncompletePattern { schedule: String, len: usize },

    /// Hour-of-day key absent from a keyed pattern
    #[error("{schedule} pattern is missing hour {hour}")]
    MissingHour { schedule: String, hour: u8 },

    /// Calibration inputs of different lengths
    #[error("predictions ({predictions}) and ground truth ({ground_truth}) must have the same length")]
    LengthMismatch {
        predictions: usize,
        ground_truth: usize,
    },

    /// Empty collection
    #[error("Empty collection: {0}")]
    EmptyCollection(String),

    /// Calibration grid that cannot be evaluated
    #[error("Invalid search space [{low}, {high}] with {steps} steps")]
    InvalidSearchSpace { low: f64, high: f64, steps: usize },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    /// Check that `value` lies in `[min, max]`; NaN is rejected.
    pub fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
        if value >= min && value <= max {
            Ok(())
        } else {
            Err(ValidationError::OutOfRange {
                field: field.to_string(),
                value,
                min,
                max,
            })
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_range_accepts_bounds() {
        assert!(ValidationError::check_range("quality", 0.0, 0.0, 1.0).is_ok());
        assert!(ValidationError::check_range("quality", 1.0, 0.0, 1.0).is_ok());
    }

    #[test]
    fn check_range_rejects_nan_and_outliers() {
        assert!(ValidationError::check_range("quality", f64::NAN, 0.0, 1.0).is_err());
        let err = ValidationError::check_range("quality", 1.2, 0.0, 1.0).unwrap_err();
        assert_eq!(err.to_string(), "Value 1.2 for 'quality' is outside [0, 1]");
    }

    #[test]
    fn validation_converts_into_core_error() {
        let err: CoreError = ValidationError::NonPositiveDuration.into();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
