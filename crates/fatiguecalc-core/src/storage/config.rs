//! TOML-based application configuration.
//!
//! Holds the defaults the command line falls back to:
//! - Model constants and the enhancement factor
//! - The individual profile
//! - Sleep window, quality and starting debt
//! - Working hours, load and rest days
//! - Simulation horizon and calibration grid
//!
//! Configuration is stored at `~/.config/fatiguecalc/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::calibration::SearchSpace;
use crate::error::{ConfigError, ValidationError};
use crate::schedule::{IndividualProfile, SleepSchedule, WorkSchedule};
use crate::simulation::{days_to_hours, SimulationParams, MAX_SIMULATION_DAYS};

/// Nightly sleep window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepConfig {
    #[serde(default = "default_bedtime")]
    pub bedtime: f64,
    #[serde(default = "default_wake_time")]
    pub wake_time: f64,
    #[serde(default = "default_quality")]
    pub quality: f64,
    /// Sleep debt carried into the run, in hours.
    #[serde(default)]
    pub debt: f64,
}

/// Working hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_work_start")]
    pub start: f64,
    #[serde(default = "default_work_end")]
    pub end: f64,
    /// Cognitive load, 0–3.
    #[serde(default = "default_load")]
    pub load_rating: f64,
    /// Day indices counted from the first simulated day.
    #[serde(default = "default_rest_days")]
    pub rest_days: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_days")]
    pub days: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/fatiguecalc/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: SimulationParams,
    #[serde(default)]
    pub profile: IndividualProfile,
    #[serde(default)]
    pub sleep: SleepConfig,
    #[serde(default)]
    pub work: WorkConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub calibration: SearchSpace,
}

// Default functions
fn default_bedtime() -> f64 {
    22.0
}
fn default_wake_time() -> f64 {
    7.0
}
fn default_quality() -> f64 {
    2.0 / 3.0
}
fn default_true() -> bool {
    true
}
fn default_work_start() -> f64 {
    9.0
}
fn default_work_end() -> f64 {
    17.0
}
fn default_load() -> f64 {
    1.0
}
fn default_rest_days() -> Vec<u8> {
    vec![5, 6]
}
fn default_days() -> u32 {
    3
}

impl Default for SleepConfig {
    fn default() -> Self {
        Self {
            bedtime: default_bedtime(),
            wake_time: default_wake_time(),
            quality: default_quality(),
            debt: 0.0,
        }
    }
}

impl Default for WorkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            start: default_work_start(),
            end: default_work_end(),
            load_rating: default_load(),
            rest_days: default_rest_days(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { days: default_days() }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(root: &'a serde_json::Value, key: &str) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(root: &mut serde_json::Value, key: &str, value: &str) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => {
                        serde_json::Value::Bool(value.parse::<bool>().map_err(|e| invalid(e.to_string()))?)
                    }
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Path of the config file in the data directory.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory, writing defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the data directory.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(error = %e, "using default configuration");
                Self::default()
            }
        }
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Every leaf key with its value, sorted by key.
    pub fn entries(&self) -> Vec<(String, String)> {
        fn walk(prefix: &str, value: &serde_json::Value, out: &mut Vec<(String, String)>) {
            match value {
                serde_json::Value::Object(map) => {
                    for (k, v) in map {
                        let key = if prefix.is_empty() {
                            k.clone()
                        } else {
                            format!("{prefix}.{k}")
                        };
                        walk(&key, v, out);
                    }
                }
                serde_json::Value::String(s) => out.push((prefix.to_string(), s.clone())),
                other => out.push((prefix.to_string(), other.to_string())),
            }
        }

        let mut out = Vec::new();
        if let Ok(json) = serde_json::to_value(self) {
            walk("", &json, &mut out);
        }
        out
    }

    /// Set a value by dot-separated key, keeping the field's type. The
    /// change is rejected if the result does not validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// or is out of range.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate().map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        *self = updated;
        Ok(())
    }

    /// Report the first value the model would reject.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::check_range("sleep.bedtime", self.sleep.bedtime, 0.0, 24.0)?;
        ValidationError::check_range("sleep.wake_time", self.sleep.wake_time, 0.0, 24.0)?;
        ValidationError::check_range("work.start", self.work.start, 0.0, 24.0)?;
        ValidationError::check_range("work.end", self.work.end, 0.0, 24.0)?;
        if self.simulation.days == 0 {
            return Err(ValidationError::NonPositiveDuration);
        }
        ValidationError::check_range(
            "simulation.days",
            f64::from(self.simulation.days),
            1.0,
            f64::from(MAX_SIMULATION_DAYS),
        )?;
        ValidationError::check_range("profile.chronotype_offset", self.profile.chronotype_offset, -12.0, 12.0)?;
        self.sleep_schedule().validate()?;
        self.work_schedule().validate()?;
        self.model.validate()?;
        self.calibration.validate()?;
        Ok(())
    }

    /// Sleep window shifted by the profile's chronotype offset.
    pub fn sleep_schedule(&self) -> SleepSchedule {
        SleepSchedule::with_chronotype_shift(
            self.sleep.bedtime,
            self.sleep.wake_time,
            self.profile.chronotype_offset,
            self.sleep.quality,
            self.sleep.debt,
        )
    }

    pub fn work_schedule(&self) -> WorkSchedule {
        if self.work.enabled {
            WorkSchedule::from_window(self.work.start, self.work.end, self.work.load_rating)
                .with_rest_days(self.work.rest_days.clone())
        } else {
            WorkSchedule::off()
        }
    }

    pub fn duration_hours(&self) -> Result<u32, ValidationError> {
        days_to_hours(self.simulation.days)
    }
}
