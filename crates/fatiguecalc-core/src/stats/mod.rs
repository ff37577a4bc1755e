//! Post-run analysis of simulated performance.
//!
//! Classifies hours into zones, summarises whole runs and individual days,
//! and renders a quick terminal chart.

mod report;
mod zones;

pub use report::{DailySummary, OverallRisk, PerformanceReport, ZoneCounts, render_ascii_chart};
pub use zones::{BASELINE_PERFORMANCE, PerformanceBand, PerformanceZone, RiskLevel, risk_score};
