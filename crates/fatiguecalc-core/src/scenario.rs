//! Named scenarios, parameter sweeps and the sleep-restriction study.
//!
//! A [`Scenario`] bundles everything one run needs and round-trips through
//! JSON. [`ScenarioHarness`] runs scenarios, keeps a history, and fans sweeps
//! out over rayon; each run owns its own state, so results come back in input
//! order and match a sequential loop exactly.

use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::schedule::{IndividualProfile, SleepSchedule, WorkSchedule};
use crate::simulation::{days_to_hours, simulate_with, SimulationParams, SimulationResult};
use crate::stats::PerformanceReport;

/// Simulation scenario definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub duration_hours: u32,
    pub sleep: SleepSchedule,
    #[serde(default)]
    pub work: WorkSchedule,
    #[serde(default)]
    pub profile: IndividualProfile,
    #[serde(default)]
    pub params: SimulationParams,
}

impl Scenario {
    /// Three days of 22:00–07:00 sleep at quality 2/3 and a 09:00–17:00
    /// working day at load 1.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration_hours: 72,
            sleep: SleepSchedule::from_window(22.0, 7.0, 2.0 / 3.0, 0.0),
            work: WorkSchedule::from_window(9.0, 17.0, 1.0),
            profile: IndividualProfile::default(),
            params: SimulationParams::default(),
        }
    }

    pub fn with_duration_hours(mut self, hours: u32) -> Self {
        self.duration_hours = hours;
        self
    }

    pub fn with_days(mut self, days: u32) -> Result<Self, ValidationError> {
        self.duration_hours = days_to_hours(days)?;
        Ok(self)
    }

    pub fn with_sleep(mut self, sleep: SleepSchedule) -> Self {
        self.sleep = sleep;
        self
    }

    pub fn with_work(mut self, work: WorkSchedule) -> Self {
        self.work = work;
        self
    }

    pub fn with_profile(mut self, profile: IndividualProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_params(mut self, params: SimulationParams) -> Self {
        self.params = params;
        self
    }

    /// Run the scenario and analyse the result.
    pub fn run(&self) -> Result<ScenarioOutcome> {
        let result = simulate_with(self.duration_hours, &self.sleep, &self.work, &self.profile, &self.params)?;
        let report = PerformanceReport::analyze(&result, self.sleep.debt, self.profile.factors())?;
        Ok(ScenarioOutcome {
            scenario: self.clone(),
            result,
            report,
        })
    }

    /// Write as pretty JSON.
    pub fn export(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Read a scenario written by [`Scenario::export`].
    pub fn import(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Outcome of one scenario run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub scenario: Scenario,
    pub result: SimulationResult,
    pub report: PerformanceReport,
}

/// One change applied to a base scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ScenarioVariation {
    /// Sleep `hours` starting at `bedtime`, keeping quality and debt.
    SleepWindow { bedtime: f64, hours: f64 },
    SleepQuality(f64),
    LoadRating(f64),
    ChronotypeOffset(f64),
    InitialDebt(f64),
    Days(u32),
}

impl ScenarioVariation {
    /// Apply to `scenario`. A sleep window must last strictly between 0 and
    /// 24 hours.
    pub fn apply(&self, mut scenario: Scenario) -> Result<Scenario, ValidationError> {
        match self {
            ScenarioVariation::SleepWindow { bedtime, hours } => {
                ValidationError::check_range("bedtime", *bedtime, 0.0, 24.0)?;
                check_nightly_sleep(*hours)?;
                scenario.sleep =
                    SleepSchedule::from_window(*bedtime, bedtime + hours, scenario.sleep.quality, scenario.sleep.debt);
            }
            ScenarioVariation::SleepQuality(q) => scenario.sleep.quality = *q,
            ScenarioVariation::LoadRating(load) => scenario.work.load_rating = *load,
            ScenarioVariation::ChronotypeOffset(offset) => scenario.profile.chronotype_offset = *offset,
            ScenarioVariation::InitialDebt(debt) => scenario.sleep.debt = *debt,
            ScenarioVariation::Days(days) => scenario.duration_hours = days_to_hours(*days)?,
        }
        scenario.name = format!("{} [{}]", scenario.name, self.label());
        Ok(scenario)
    }

    pub fn label(&self) -> String {
        match self {
            ScenarioVariation::SleepWindow { bedtime, hours } => format!("sleep {hours}h from {bedtime:02}:00"),
            ScenarioVariation::SleepQuality(q) => format!("quality {q:.2}"),
            ScenarioVariation::LoadRating(load) => format!("load {load}"),
            ScenarioVariation::ChronotypeOffset(offset) => format!("chronotype {offset:+}h"),
            ScenarioVariation::InitialDebt(debt) => format!("debt {debt}h"),
            ScenarioVariation::Days(days) => format!("{days} days"),
        }
    }
}

/// A night of `hours` must leave the sleep pattern neither empty nor full.
fn check_nightly_sleep(hours: f64) -> Result<(), ValidationError> {
    if hours > 0.0 && hours < 24.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: "sleep hours".to_string(),
            message: format!("{hours} must lie strictly between 0 and 24"),
        })
    }
}

/// Runs scenarios and remembers what it ran.
#[derive(Debug, Default)]
pub struct ScenarioHarness {
    history: Vec<ScenarioOutcome>,
}

impl ScenarioHarness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run_scenario(&mut self, scenario: &Scenario) -> Result<ScenarioOutcome> {
        let outcome = scenario.run()?;
        tracing::info!(
            scenario = %scenario.name,
            hours = scenario.duration_hours,
            mean = outcome.report.mean,
            "scenario complete"
        );
        self.history.push(outcome.clone());
        Ok(outcome)
    }

    /// Run `base` once per variation, in parallel. Nothing is recorded if
    /// any run fails.
    pub fn run_sweep(&mut self, base: &Scenario, variations: &[ScenarioVariation]) -> Result<Vec<ScenarioOutcome>> {
        let outcomes = variations
            .par_iter()
            .map(|variation| -> Result<ScenarioOutcome> { variation.apply(base.clone())?.run() })
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(base = %base.name, runs = outcomes.len(), "sweep complete");
        self.history.extend(outcomes.iter().cloned());
        Ok(outcomes)
    }

    pub fn history(&self) -> &[ScenarioOutcome] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

/// Nightly sleep durations compared over a fixed week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestrictionStudy {
    /// Hours of sleep per night, each starting at midnight.
    pub durations: Vec<f64>,
    pub days: u32,
    pub quality: f64,
    pub work: WorkSchedule,
    pub profile: IndividualProfile,
    pub params: SimulationParams,
}

impl Default for RestrictionStudy {
    fn default() -> Self {
        Self {
            durations: (1..=7).map(f64::from).collect(),
            days: 7,
            quality: 0.7,
            work: WorkSchedule::from_window(9.0, 17.0, 1.0),
            profile: IndividualProfile::default(),
            params: SimulationParams::default(),
        }
    }
}

/// Result for one nightly duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestrictionOutcome {
    pub sleep_hours: f64,
    pub report: PerformanceReport,
    /// Mean performance over hours spent at work; `None` without work hours.
    pub work_mean: Option<f64>,
}

/// Simulate every duration in `study` and summarise each run.
pub fn sleep_restriction_study(study: &RestrictionStudy) -> Result<Vec<RestrictionOutcome>> {
    let base = Scenario::new("sleep restriction")
        .with_days(study.days)?
        .with_sleep(SleepSchedule::from_window(0.0, 8.0, study.quality, 0.0))
        .with_work(study.work.clone())
        .with_profile(study.profile.clone())
        .with_params(study.params.clone());

    let outcomes = study
        .durations
        .par_iter()
        .map(|&hours| -> Result<RestrictionOutcome> {
            let outcome = ScenarioVariation::SleepWindow { bedtime: 0.0, hours }.apply(base.clone())?.run()?;
            let work_scores: Vec<f64> = outcome
                .result
                .hour_index
                .iter()
                .zip(&outcome.result.performance_score)
                .filter(|(h, _)| study.work.is_at_work(**h))
                .map(|(_, p)| *p)
                .collect();
            let work_mean = if work_scores.is_empty() {
                None
            } else {
                Some(work_scores.iter().sum::<f64>() / work_scores.len() as f64)
            };
            Ok(RestrictionOutcome {
                sleep_hours: hours,
                report: outcome.report,
                work_mean,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::info!(durations = outcomes.len(), days = study.days, "sleep restriction study complete");
    Ok(outcomes)
}
