//! Performance zones, bands and hourly risk levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Population baseline performance used for deviation columns.
pub const BASELINE_PERFORMANCE: f64 = 77.5;

/// Four-way classification at 80/60/50.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerformanceZone {
    /// ≥ 80
    Optimal,
    /// 60–79
    Moderate,
    /// 50–59
    Poor,
    /// < 50
    Critical,
}

impl PerformanceZone {
    pub const ALL: [PerformanceZone; 4] = [
        PerformanceZone::Optimal,
        PerformanceZone::Moderate,
        PerformanceZone::Poor,
        PerformanceZone::Critical,
    ];

    pub fn classify(score: f64) -> Self {
        if score >= 80.0 {
            PerformanceZone::Optimal
        } else if score >= 60.0 {
            PerformanceZone::Moderate
        } else if score >= 50.0 {
            PerformanceZone::Poor
        } else {
            PerformanceZone::Critical
        }
    }

    /// Hourly risk level matching this zone.
    pub fn risk_level(self) -> RiskLevel {
        match self {
            PerformanceZone::Optimal => RiskLevel::Low,
            PerformanceZone::Moderate => RiskLevel::Moderate,
            PerformanceZone::Poor => RiskLevel::High,
            PerformanceZone::Critical => RiskLevel::Critical,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PerformanceZone::Optimal => "Optimal",
            PerformanceZone::Moderate => "Moderate",
            PerformanceZone::Poor => "Poor",
            PerformanceZone::Critical => "Critical",
        }
    }
}

impl fmt::Display for PerformanceZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Three-way classification at 80/60.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerformanceBand {
    High,
    Moderate,
    Low,
}

impl PerformanceBand {
    pub fn classify(score: f64) -> Self {
        if score < 60.0 {
            PerformanceBand::Low
        } else if score < 80.0 {
            PerformanceBand::Moderate
        } else {
            PerformanceBand::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PerformanceBand::High => "High",
            PerformanceBand::Moderate => "Moderate",
            PerformanceBand::Low => "Low",
        }
    }
}

impl fmt::Display for PerformanceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shortfall below the optimal threshold, `max(0, 80 − score)`.
pub fn risk_score(score: f64) -> f64 {
    (80.0 - score).max(0.0)
}
