//! Hour-stepped simulation driver.
//!
//! The driver owns one [`SimulationState`] per run and threads it through
//! [`SimulationState::step`] for each hour. No state outlives a run and
//! nothing is shared between runs, so independent simulations can execute
//! side by side.
//!
//! ## Step order
//!
//! ```text
//! schedules(t mod 24) -> adenosine -> time since wake -> reservoir
//!   -> circadian -> inertia -> sleep debt -> workload -> performance
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::process::{
    assess_sleep_debt, circadian, performance_score, reservoir_step, sleep_inertia,
    workload_pressure, Adenosine, HomeostaticInput, IndividualFactors, InertiaInput,
    PerformanceInputs, WorkloadInput, DEFAULT_IDEAL_SLEEP_HOURS, DEFAULT_ULTRADIAN_AMPLITUDE,
    NO_ENHANCEMENT,
};
use crate::schedule::{IndividualProfile, SleepSchedule, WorkSchedule};

/// Reservoir level fed into hour 0.
pub const DEFAULT_INITIAL_RESERVOIR: f64 = 2400.0;

/// Longest configured run, in days.
pub const MAX_SIMULATION_DAYS: u32 = 3650;

/// Hour count of `days` whole days, rejecting counts that overflow `u32`.
pub fn days_to_hours(days: u32) -> Result<u32, ValidationError> {
    days.checked_mul(24).ok_or_else(|| ValidationError::InvalidValue {
        field: "days".to_string(),
        message: format!("{days} days is too long to simulate hour by hour"),
    })
}

/// Model constants that callers may override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    #[serde(default = "default_initial_reservoir")]
    pub initial_reservoir_level: f64,
    /// Homeostatic recovery driver `ai`.
    #[serde(default = "default_recovery_driver")]
    pub recovery_driver: f64,
    #[serde(default = "default_ultradian_amplitude")]
    pub ultradian_amplitude: f64,
    #[serde(default)]
    pub genetic_phase_shift: f64,
    #[serde(default = "default_ideal_sleep")]
    pub ideal_sleep_hours: f64,
    /// Output multiplier of an external learned model. 1.0 is the identity
    /// and is what every run uses unless a calibrated factor is supplied.
    #[serde(default = "default_ml_enhancement")]
    pub ml_enhancement: f64,
    /// Restricted nights preceding the run, passed to the inertia process.
    #[serde(default)]
    pub sleep_restriction_days: u32,
    /// Hours worked the day before the run, passed to the workload process.
    #[serde(default)]
    pub previous_day_workload: f64,
}

fn default_initial_reservoir() -> f64 {
    DEFAULT_INITIAL_RESERVOIR
}
fn default_recovery_driver() -> f64 {
    1.0
}
fn default_ultradian_amplitude() -> f64 {
    DEFAULT_ULTRADIAN_AMPLITUDE
}
fn default_ideal_sleep() -> f64 {
    DEFAULT_IDEAL_SLEEP_HOURS
}
fn default_ml_enhancement() -> f64 {
    NO_ENHANCEMENT
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            initial_reservoir_level: DEFAULT_INITIAL_RESERVOIR,
            recovery_driver: 1.0,
            ultradian_amplitude: DEFAULT_ULTRADIAN_AMPLITUDE,
            genetic_phase_shift: 0.0,
            ideal_sleep_hours: DEFAULT_IDEAL_SLEEP_HOURS,
            ml_enhancement: NO_ENHANCEMENT,
            sleep_restriction_days: 0,
            previous_day_workload: 0.0,
        }
    }
}

impl SimulationParams {
    /// Set the enhancement multiplier, e.g. a calibrated factor.
    pub fn with_enhancement(mut self, factor: f64) -> Self {
        self.ml_enhancement = factor;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let finite = [
            ("model.initial_reservoir_level", self.initial_reservoir_level),
            ("model.recovery_driver", self.recovery_driver),
            ("model.ultradian_amplitude", self.ultradian_amplitude),
            ("model.genetic_phase_shift", self.genetic_phase_shift),
        ];
        for (field, value) in finite {
            ValidationError::check_range(field, value, f64::MIN, f64::MAX)?;
        }
        ValidationError::check_range("model.ideal_sleep_hours", self.ideal_sleep_hours, 0.0, 24.0)?;
        ValidationError::check_range("model.ml_enhancement", self.ml_enhancement, 0.0, f64::MAX)?;
        ValidationError::check_range("model.previous_day_workload", self.previous_day_workload, 0.0, 24.0)?;
        Ok(())
    }
}

/// Borrowed inputs shared by every step of one run.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub sleep: &'a SleepSchedule,
    pub work: &'a WorkSchedule,
    pub profile: &'a IndividualProfile,
    pub factors: IndividualFactors,
    pub params: &'a SimulationParams,
}

impl<'a> StepContext<'a> {
    /// Resolve individual factors once for the run.
    pub fn new(
        sleep: &'a SleepSchedule,
        work: &'a WorkSchedule,
        profile: &'a IndividualProfile,
        params: &'a SimulationParams,
    ) -> Self {
        Self {
            sleep,
            work,
            profile,
            factors: profile.factors(),
            params,
        }
    }
}

/// State carried from one simulated hour to the next.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Absolute hour the next step will compute.
    pub hour: u32,
    /// Reservoir level produced by the previous step (the seed before hour 0).
    pub reservoir_level: f64,
    pub adenosine: Adenosine,
    pub sleep_debt: f64,
    pub time_since_wake: f64,
    pub prev_sleep_flag: bool,
}

impl SimulationState {
    /// State before hour 0.
    pub fn seed(sleep: &SleepSchedule, params: &SimulationParams) -> Self {
        Self {
            hour: 0,
            reservoir_level: params.initial_reservoir_level,
            adenosine: Adenosine::default(),
            sleep_debt: sleep.debt,
            time_since_wake: 0.0,
            prev_sleep_flag: sleep.is_asleep(0),
        }
    }

    /// Compute hour `self.hour` and return the state for the following hour.
    pub fn step(self, ctx: &StepContext<'_>) -> (SimulationState, HourSample) {
        let t = self.hour;
        let params = ctx.params;
        let asleep = ctx.sleep.is_asleep(t);
        let at_work = ctx.work.is_at_work(t);

        let adenosine = self.adenosine.step(asleep);

        // Reset while asleep and on the waking hour itself.
        let time_since_wake = if asleep || self.prev_sleep_flag {
            0.0
        } else {
            self.time_since_wake + 1.0
        };

        let reservoir_level = reservoir_step(
            self.reservoir_level,
            &HomeostaticInput {
                asleep,
                recovery_driver: params.recovery_driver,
                sleep_quality: ctx.sleep.quality,
                sleep_quantity: ctx.sleep.quantity,
                adenosine_level: adenosine.level(),
                factors: ctx.factors,
            },
        );

        let circadian_value = circadian(
            t,
            ctx.profile.chronotype_offset,
            params.ultradian_amplitude,
            params.genetic_phase_shift,
        );

        let inertia = sleep_inertia(&InertiaInput {
            time_since_wake,
            sleep_quantity: ctx.sleep.quantity,
            adenosine_level: adenosine.level(),
            sleep_restriction_days: params.sleep_restriction_days,
        });

        // Every hour is a recovery opportunity at the schedule's quantity.
        let debt = assess_sleep_debt(self.sleep_debt, ctx.sleep.quantity, params.ideal_sleep_hours);
        let sleep_debt = self.sleep_debt - debt.debt_recovery;

        let workload = workload_pressure(&WorkloadInput {
            daily_workload_hours: ctx.work.daily_hours,
            cognitive_load_rating: ctx.work.load_rating,
            previous_day_workload: params.previous_day_workload,
            at_work,
        });

        let performance = performance_score(&PerformanceInputs {
            reservoir_level,
            circadian: circadian_value,
            inertia,
            workload,
            sleep_debt_impact: debt.cognitive_impact,
            factors: ctx.factors,
            ml_enhancement: params.ml_enhancement,
        });

        let sample = HourSample {
            hour: t,
            asleep,
            at_work,
            previous_reservoir_level: self.reservoir_level,
            reservoir_level,
            adenosine_level: adenosine.level(),
            time_since_wake,
            circadian: circadian_value,
            inertia,
            workload,
            sleep_debt,
            sleep_debt_impact: debt.cognitive_impact,
            performance,
        };

        tracing::trace!(
            hour = t,
            asleep,
            at_work,
            reservoir = reservoir_level,
            adenosine = adenosine.level(),
            inertia,
            workload,
            performance,
            "simulated hour"
        );

        let next = SimulationState {
            hour: t + 1,
            reservoir_level,
            adenosine,
            sleep_debt,
            time_since_wake,
            prev_sleep_flag: asleep,
        };

        (next, sample)
    }
}

/// Full record of one simulated hour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourSample {
    pub hour: u32,
    pub asleep: bool,
    pub at_work: bool,
    /// Reservoir level that entered this hour's update.
    pub previous_reservoir_level: f64,
    pub reservoir_level: f64,
    pub adenosine_level: f64,
    pub time_since_wake: f64,
    pub circadian: f64,
    pub inertia: f64,
    pub workload: f64,
    /// Debt remaining after this hour's recovery.
    pub sleep_debt: f64,
    pub sleep_debt_impact: f64,
    pub performance: f64,
}

/// Parallel per-hour output sequences of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub hour_index: Vec<u32>,
    pub circadian_value: Vec<f64>,
    pub performance_score: Vec<f64>,
}

impl SimulationResult {
    pub fn len(&self) -> usize {
        self.hour_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hour_index.is_empty()
    }

    /// Performance scores of day `day` (0-based); shorter for a trailing
    /// partial day, empty past the end.
    pub fn day(&self, day: usize) -> &[f64] {
        let start = day.saturating_mul(24).min(self.performance_score.len());
        let end = day.saturating_add(1).saturating_mul(24).min(self.performance_score.len());
        &self.performance_score[start..end]
    }

    /// Number of days touched by the run, counting a partial last day.
    pub fn day_count(&self) -> usize {
        self.performance_score.len().div_ceil(24)
    }
}

impl From<&[HourSample]> for SimulationResult {
    fn from(samples: &[HourSample]) -> Self {
        Self {
            hour_index: samples.iter().map(|s| s.hour).collect(),
            circadian_value: samples.iter().map(|s| s.circadian).collect(),
            performance_score: samples.iter().map(|s| s.performance).collect(),
        }
    }
}

fn validate_inputs(
    duration_hours: u32,
    sleep: &SleepSchedule,
    work: &WorkSchedule,
    profile: &IndividualProfile,
    params: &SimulationParams,
) -> Result<(), ValidationError> {
    if duration_hours == 0 {
        return Err(ValidationError::NonPositiveDuration);
    }
    sleep.validate()?;
    work.validate()?;
    ValidationError::check_range("profile.chronotype_offset", profile.chronotype_offset, -12.0, 12.0)?;
    params.validate()
}

/// Simulate `duration_hours` hours and keep every intermediate value.
pub fn simulate_detailed(
    duration_hours: u32,
    sleep: &SleepSchedule,
    work: &WorkSchedule,
    profile: &IndividualProfile,
    params: &SimulationParams,
) -> Result<Vec<HourSample>> {
    validate_inputs(duration_hours, sleep, work, profile, params)?;

    let ctx = StepContext::new(sleep, work, profile, params);
    tracing::debug!(
        duration_hours,
        sleep_need_modifier = ctx.factors.sleep_need_modifier,
        deprivation_sensitivity = ctx.factors.deprivation_sensitivity,
        "starting simulation"
    );

    let mut state = SimulationState::seed(sleep, params);
    let mut samples = Vec::with_capacity(duration_hours as usize);
    for _ in 0..duration_hours {
        let (next, sample) = state.step(&ctx);
        samples.push(sample);
        state = next;
    }

    tracing::debug!(
        hours = samples.len(),
        final_reservoir = state.reservoir_level,
        final_debt = state.sleep_debt,
        "simulation finished"
    );
    Ok(samples)
}

/// Simulate with explicit model parameters.
pub fn simulate_with(
    duration_hours: u32,
    sleep: &SleepSchedule,
    work: &WorkSchedule,
    profile: &IndividualProfile,
    params: &SimulationParams,
) -> Result<SimulationResult> {
    let samples = simulate_detailed(duration_hours, sleep, work, profile, params)?;
    Ok(SimulationResult::from(samples.as_slice()))
}

/// Simulate with default model parameters.
pub fn simulate(
    duration_hours: u32,
    sleep: &SleepSchedule,
    work: &WorkSchedule,
    profile: &IndividualProfile,
) -> Result<SimulationResult> {
    simulate_with(duration_hours, sleep, work, profile, &SimulationParams::default())
}
