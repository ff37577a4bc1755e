//! Process functions of the extended two-process model.
//!
//! Each process is a small pure function (or saturating value type) over
//! explicit inputs. The simulation driver owns all carried state and calls
//! these in dependency order.

mod adenosine;
mod circadian;
mod homeostatic;
mod individual;
mod inertia;
mod performance;
mod sleep_debt;
mod workload;

pub use adenosine::{Adenosine, ADENOSINE_INITIAL, ADENOSINE_MAX, ADENOSINE_MIN};
pub use circadian::{circadian, circadian_default, DEFAULT_ULTRADIAN_AMPLITUDE};
pub use homeostatic::{reservoir_step, wake_decay_rate, HomeostaticInput};
pub use individual::{individual_factors, IndividualFactors};
pub use inertia::{max_inertia_duration, peak_inertia, sleep_inertia, InertiaInput};
pub use performance::{
    performance_score, PerformanceInputs, NO_ENHANCEMENT, RESERVOIR_CAPACITY, WORKLOAD_CAPACITY,
};
pub use sleep_debt::{assess_sleep_debt, debt_impact, DebtAssessment, DEFAULT_IDEAL_SLEEP_HOURS};
pub use workload::{workload_carryover, workload_pressure, WorkloadInput};
