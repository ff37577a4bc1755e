//! Run-level and per-day performance summaries.

use serde::{Deserialize, Serialize};

use super::zones::{risk_score, PerformanceZone};
use crate::error::ValidationError;
use crate::process::{debt_impact, IndividualFactors};
use crate::simulation::SimulationResult;

/// Hours spent in each zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneCounts {
    pub optimal: usize,
    pub moderate: usize,
    pub poor: usize,
    pub critical: usize,
}

impl ZoneCounts {
    pub fn from_scores(scores: &[f64]) -> Self {
        let mut counts = Self::default();
        for score in scores {
            match PerformanceZone::classify(*score) {
                PerformanceZone::Optimal => counts.optimal += 1,
                PerformanceZone::Moderate => counts.moderate += 1,
                PerformanceZone::Poor => counts.poor += 1,
                PerformanceZone::Critical => counts.critical += 1,
            }
        }
        counts
    }

    pub fn get(&self, zone: PerformanceZone) -> usize {
        match zone {
            PerformanceZone::Optimal => self.optimal,
            PerformanceZone::Moderate => self.moderate,
            PerformanceZone::Poor => self.poor,
            PerformanceZone::Critical => self.critical,
        }
    }

    pub fn total(&self) -> usize {
        self.optimal + self.moderate + self.poor + self.critical
    }
}

/// Run-level risk from the share of poor and critical hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallRisk {
    Low,
    Moderate,
    High,
}

impl OverallRisk {
    pub fn from_percentage(risk_percentage: f64) -> Self {
        if risk_percentage > 30.0 {
            OverallRisk::High
        } else if risk_percentage > 15.0 {
            OverallRisk::Moderate
        } else {
            OverallRisk::Low
        }
    }
}

/// Statistics for one complete simulated day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// 1-based day number.
    pub day: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub optimal_hours: usize,
    /// Hours below 60.
    pub poor_critical_hours: usize,
    /// Mean shortfall below 80.
    pub risk_score: f64,
}

impl DailySummary {
    fn from_day(day: usize, scores: &[f64]) -> Self {
        let n = scores.len() as f64;
        Self {
            day,
            mean: scores.iter().sum::<f64>() / n,
            min: scores.iter().copied().fold(f64::INFINITY, f64::min),
            max: scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            optimal_hours: scores.iter().filter(|s| **s >= 80.0).count(),
            poor_critical_hours: scores.iter().filter(|s| **s < 60.0).count(),
            risk_score: scores.iter().map(|s| risk_score(*s)).sum::<f64>() / n,
        }
    }

    /// One summary per complete 24-hour day; a trailing partial day is skipped.
    pub fn for_result(result: &SimulationResult) -> Vec<Self> {
        result
            .performance_score
            .chunks_exact(24)
            .enumerate()
            .map(|(i, day)| Self::from_day(i + 1, day))
            .collect()
    }
}

/// Summary of a whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub hours: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// First hour index reaching the minimum.
    pub min_hour: u32,
    /// First hour index reaching the maximum.
    pub max_hour: u32,
    pub zones: ZoneCounts,
    /// Share of hours in the poor or critical zone, in percent.
    pub risk_percentage: f64,
    pub overall_risk: OverallRisk,
    pub sleep_debt_hours: f64,
    /// Points lost to the initial debt.
    pub sleep_debt_impact: f64,
    pub factors: IndividualFactors,
    pub daily: Vec<DailySummary>,
    pub recommendations: Vec<String>,
}

impl PerformanceReport {
    /// Analyse `result` for a person with `factors` who started with
    /// `sleep_debt_hours` of debt.
    pub fn analyze(
        result: &SimulationResult,
        sleep_debt_hours: f64,
        factors: IndividualFactors,
    ) -> Result<Self, ValidationError> {
        let scores = &result.performance_score;
        if scores.is_empty() {
            return Err(ValidationError::EmptyCollection(
                "cannot analyse an empty simulation".to_string(),
            ));
        }

        let n = scores.len() as f64;
        let mean = scores.iter().sum::<f64>() / n;
        let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;

        let (min_idx, min) = extreme(scores, |a, b| a < b);
        let (max_idx, max) = extreme(scores, |a, b| a > b);

        let zones = ZoneCounts::from_scores(scores);
        let risk_percentage = (zones.poor + zones.critical) as f64 / n * 100.0;
        let overall_risk = OverallRisk::from_percentage(risk_percentage);

        let recommendations = recommendations(overall_risk, &zones, sleep_debt_hours);

        Ok(Self {
            hours: scores.len(),
            mean,
            min,
            max,
            std_dev: variance.sqrt(),
            min_hour: result.hour_index[min_idx],
            max_hour: result.hour_index[max_idx],
            zones,
            risk_percentage,
            overall_risk,
            sleep_debt_hours,
            sleep_debt_impact: debt_impact(sleep_debt_hours),
            factors,
            daily: DailySummary::for_result(result),
            recommendations,
        })
    }
}

/// Index and value of the first element preferred by `better`.
fn extreme(scores: &[f64], better: impl Fn(f64, f64) -> bool) -> (usize, f64) {
    let mut best = (0, scores[0]);
    for (i, s) in scores.iter().enumerate().skip(1) {
        if better(*s, best.1) {
            best = (i, *s);
        }
    }
    best
}

fn recommendations(risk: OverallRisk, zones: &ZoneCounts, sleep_debt_hours: f64) -> Vec<String> {
    let mut out = vec![match risk {
        OverallRisk::High => "High risk: consider adjusting sleep schedule or workload".to_string(),
        OverallRisk::Moderate => "Moderate risk: monitor fatigue levels closely".to_string(),
        OverallRisk::Low => "Low risk: current schedule appears sustainable".to_string(),
    }];
    if zones.critical > 0 {
        out.push(format!(
            "{} critical hour(s) below 50: avoid safety-sensitive tasks in these periods",
            zones.critical
        ));
    }
    if sleep_debt_hours > 10.0 {
        out.push("Priority: address sleep debt through extended sleep periods".to_string());
    }
    out
}

/// Bar chart of one day (0-based) of a run.
pub fn render_ascii_chart(result: &SimulationResult, day: usize) -> String {
    let scores = result.day(day);
    let mut output = format!("\nDay {} Performance:\n", day + 1);
    output.push_str(&"─".repeat(50));
    output.push('\n');

    if scores.is_empty() {
        output.push_str("(no data)\n");
        return output;
    }

    for (i, score) in scores.iter().enumerate() {
        let hour_of_day = (day * 24 + i) % 24;
        let bar_length = ((score / 100.0) * 30.0).round().clamp(0.0, 30.0) as usize;
        let bar = "█".repeat(bar_length);
        let empty = " ".repeat(30 - bar_length);

        let zone_indicator = match PerformanceZone::classify(*score) {
            PerformanceZone::Optimal => "●",
            PerformanceZone::Moderate => "○",
            PerformanceZone::Poor => "·",
            PerformanceZone::Critical => "!",
        };

        output.push_str(&format!(
            "{:02}:00 {}{}{} {:5.1}\n",
            hour_of_day, bar, empty, zone_indicator, score
        ));
    }

    output.push_str(&"─".repeat(50));
    output.push_str("\n● Optimal  ○ Moderate  · Poor  ! Critical\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_from(scores: Vec<f64>) -> SimulationResult {
        SimulationResult {
            hour_index: (0..scores.len() as u32).collect(),
            circadian_value: vec![0.0; scores.len()],
            performance_score: scores,
        }
    }

    #[test]
    fn report_statistics() {
        let result = result_from(vec![90.0, 70.0, 55.0, 40.0]);
        let report = PerformanceReport::analyze(&result, 0.0, IndividualFactors::default()).unwrap();
        assert_eq!(report.mean, 63.75);
        assert_eq!(report.min, 40.0);
        assert_eq!(report.max_hour, 0);
        assert_eq!(report.min_hour, 3);
        assert_eq!(
            report.zones,
            ZoneCounts {
                optimal: 1,
                moderate: 1,
                poor: 1,
                critical: 1
            }
        );
        assert_eq!(report.risk_percentage, 50.0);
        assert_eq!(report.overall_risk, OverallRisk::High);
        // variance = (26.25² + 6.25² + 8.75² + 23.75²) / 4
        let expected = ((689.0625 + 39.0625 + 76.5625 + 564.0625) / 4.0_f64).sqrt();
        assert!((report.std_dev - expected).abs() < 1e-12);
        assert!(report.daily.is_empty());
    }

    #[test]
    fn empty_run_cannot_be_analysed() {
        let result = result_from(Vec::new());
        assert!(PerformanceReport::analyze(&result, 0.0, IndividualFactors::default()).is_err());
    }

    #[test]
    fn recommendations_flag_debt_and_critical_hours() {
        let result = result_from(vec![30.0; 24]);
        let report = PerformanceReport::analyze(&result, 12.0, IndividualFactors::default()).unwrap();
        assert_eq!(report.recommendations.len(), 3);
        assert!((report.sleep_debt_impact - 6.72).abs() < 1e-9);
    }

    #[test]
    fn daily_summaries_skip_partial_day() {
        let mut scores = vec![85.0; 24];
        scores.extend(vec![55.0; 24]);
        scores.extend(vec![70.0; 5]);
        let daily = DailySummary::for_result(&result_from(scores));
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].optimal_hours, 24);
        assert_eq!(daily[0].risk_score, 0.0);
        assert_eq!(daily[1].day, 2);
        assert_eq!(daily[1].poor_critical_hours, 24);
        assert_eq!(daily[1].risk_score, 25.0);
    }

    #[test]
    fn chart_has_one_row_per_hour() {
        let result = result_from(vec![50.0; 48]);
        let chart = render_ascii_chart(&result, 1);
        assert!(chart.contains("Day 2 Performance"));
        assert_eq!(chart.lines().filter(|l| l.contains(":00 ")).count(), 24);
        assert!(render_ascii_chart(&result, 5).contains("(no data)"));
    }
}
