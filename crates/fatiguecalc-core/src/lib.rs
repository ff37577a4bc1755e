//! # FatigueCalc Core Library
//!
//! Hour-by-hour prediction of cognitive performance on a 0–100 scale from a
//! sleep schedule, a work schedule and an individual profile. The command
//! line binary is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Processes**: Pure per-hour models (circadian oscillator, adenosine,
//!   homeostatic reservoir, sleep inertia, sleep debt, workload, individual
//!   factors) combined by the performance synthesizer
//! - **Simulation**: A driver that threads one explicit state value through
//!   every hour of a run
//! - **Calibration**: Grid search for the enhancement multiplier
//! - **Stats/Export**: Zone analysis, daily summaries and CSV tables
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`simulate`]: Run the model for a number of hours
//! - [`SimulationState`]: One step of the model in isolation
//! - [`calibrate`]: Fit the enhancement factor to observed scores
//! - [`PerformanceReport`]: Summary statistics of a run
//! - [`Config`]: Application configuration management

pub mod calibration;
pub mod error;
pub mod export;
pub mod process;
pub mod scenario;
pub mod schedule;
pub mod simulation;
pub mod stats;
pub mod storage;

pub use calibration::{calibrate, CalibrationResult, SearchSpace};
pub use error::{ConfigError, CoreError, ValidationError};
pub use scenario::{RestrictionStudy, Scenario, ScenarioHarness, ScenarioVariation};
pub use schedule::{HourlyPattern, IndividualProfile, SleepSchedule, WorkSchedule};
pub use simulation::{
    days_to_hours, simulate, simulate_detailed, simulate_with, HourSample, SimulationParams, SimulationResult,
    SimulationState, MAX_SIMULATION_DAYS,
};
pub use stats::{DailySummary, PerformanceReport, PerformanceZone};
pub use storage::Config;
