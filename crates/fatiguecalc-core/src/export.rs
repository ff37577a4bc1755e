//! CSV export of simulation runs and CSV import of calibration pairs.
//!
//! A run is written as three tables: one row per simulated hour, one row per
//! complete day, and a `parameter,value` metadata table. Hour `i` of the run
//! is stamped `start + i hours`.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDateTime, Timelike};
use serde::Serialize;

use crate::error::{CoreError, Result, ValidationError};
use crate::schedule::{IndividualProfile, SleepSchedule};
use crate::simulation::{SimulationParams, SimulationResult};
use crate::stats::{
    risk_score, DailySummary, PerformanceBand, PerformanceReport, PerformanceZone, BASELINE_PERFORMANCE,
};

pub const HOURLY_FILE: &str = "hourly_performance.csv";
pub const DAILY_FILE: &str = "daily_summary.csv";
pub const METADATA_FILE: &str = "model_metadata.csv";

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the hourly table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyRow {
    pub datetime: String,
    pub hour: u32,
    pub day_of_week: String,
    /// 1-based.
    pub day_number: u32,
    pub performance: f64,
    pub zone: &'static str,
    pub band: &'static str,
    pub risk_level: &'static str,
    pub deviation_from_baseline: f64,
    pub deviation_from_mean: f64,
    pub risk_score: f64,
}

/// Build the hourly table for `result`, stamping hours from `start`.
pub fn hourly_rows(result: &SimulationResult, start: NaiveDateTime) -> Vec<HourlyRow> {
    let scores = &result.performance_score;
    let mean = if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };

    result
        .hour_index
        .iter()
        .zip(scores)
        .map(|(&hour, &performance)| {
            let stamp = start + Duration::hours(i64::from(hour));
            let zone = PerformanceZone::classify(performance);
            HourlyRow {
                datetime: stamp.format(DATETIME_FORMAT).to_string(),
                hour: stamp.hour(),
                day_of_week: stamp.format("%A").to_string(),
                day_number: hour / 24 + 1,
                performance,
                zone: zone.label(),
                band: PerformanceBand::classify(performance).label(),
                risk_level: zone.risk_level().label(),
                deviation_from_baseline: performance - BASELINE_PERFORMANCE,
                deviation_from_mean: performance - mean,
                risk_score: risk_score(performance),
            }
        })
        .collect()
}

pub fn write_hourly<W: Write>(writer: W, result: &SimulationResult, start: NaiveDateTime) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in hourly_rows(result, start) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_daily<W: Write>(writer: W, daily: &[DailySummary]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for day in daily {
        wtr.serialize(day)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_metadata<W: Write>(writer: W, entries: &[(String, String)]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["parameter", "value"])?;
    for (key, value) in entries {
        wtr.write_record([key.as_str(), value.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Parameter/value pairs describing a run and its analysis.
pub fn run_metadata(
    sleep: &SleepSchedule,
    profile: &IndividualProfile,
    params: &SimulationParams,
    report: &PerformanceReport,
) -> Vec<(String, String)> {
    let genetic = if profile.genetic_profile.is_empty() {
        "none".to_string()
    } else {
        profile
            .genetic_profile
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let entries: Vec<(&str, String)> = vec![
        ("model_version", env!("CARGO_PKG_VERSION").to_string()),
        ("duration_hours", report.hours.to_string()),
        ("duration_days", (report.hours / 24).to_string()),
        ("average_performance", format!("{:.1}", report.mean)),
        ("performance_std_dev", format!("{:.1}", report.std_dev)),
        ("optimal_hours", report.zones.optimal.to_string()),
        ("moderate_hours", report.zones.moderate.to_string()),
        ("poor_hours", report.zones.poor.to_string()),
        ("critical_hours", report.zones.critical.to_string()),
        ("risk_percentage", format!("{:.1}%", report.risk_percentage)),
        ("sleep_quality", format!("{:.3}", sleep.quality)),
        ("sleep_quantity_hours", format!("{:.1}", sleep.quantity)),
        ("sleep_debt_hours", format!("{:.1}", report.sleep_debt_hours)),
        ("sleep_debt_impact", format!("{:.1}", report.sleep_debt_impact)),
        ("sleep_need_modifier", format!("{:.3}", report.factors.sleep_need_modifier)),
        (
            "deprivation_sensitivity",
            format!("{:.3}", report.factors.deprivation_sensitivity),
        ),
        ("genetic_profile", genetic),
        ("sex", profile.sex.to_string()),
        ("age", profile.age.to_string()),
        ("chronotype_offset", format!("{:.1}h", profile.chronotype_offset)),
        ("ml_enhancement", format!("{:.3}", params.ml_enhancement)),
    ];

    entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

/// Files produced by [`export_run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub hourly: PathBuf,
    pub daily: PathBuf,
    pub metadata: PathBuf,
}

/// Write the three tables of a run into `dir`, creating it if needed.
pub fn export_run(
    dir: &Path,
    result: &SimulationResult,
    report: &PerformanceReport,
    metadata: &[(String, String)],
    start: NaiveDateTime,
) -> Result<ExportPaths> {
    std::fs::create_dir_all(dir)?;
    let paths = ExportPaths {
        hourly: dir.join(HOURLY_FILE),
        daily: dir.join(DAILY_FILE),
        metadata: dir.join(METADATA_FILE),
    };

    write_hourly(File::create(&paths.hourly)?, result, start)?;
    write_daily(File::create(&paths.daily)?, &report.daily)?;
    write_metadata(File::create(&paths.metadata)?, metadata)?;

    tracing::info!(dir = %dir.display(), hours = result.len(), days = report.daily.len(), "exported run");
    Ok(paths)
}

/// Read `predicted,actual` pairs (with a header row) for calibration.
pub fn read_calibration_pairs<R: Read>(reader: R) -> Result<(Vec<f64>, Vec<f64>)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut predicted = Vec::new();
    let mut actual = Vec::new();
    for (row_idx, record) in csv_reader.records().enumerate() {
        let record = record?;
        let column = |i: usize, name: &str| -> Result<f64> {
            let raw = record.get(i).ok_or_else(|| {
                CoreError::Custom(format!("row {}: missing {name} column", row_idx + 1))
            })?;
            raw.parse::<f64>().map_err(|e| {
                CoreError::Validation(ValidationError::InvalidValue {
                    field: name.to_string(),
                    message: format!("row {}: '{raw}': {e}", row_idx + 1),
                })
            })
        };
        predicted.push(column(0, "predicted")?);
        actual.push(column(1, "actual")?);
    }
    Ok((predicted, actual))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn midnight() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 3)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn result_from(scores: Vec<f64>) -> SimulationResult {
        SimulationResult {
            hour_index: (0..scores.len() as u32).collect(),
            circadian_value: vec![0.0; scores.len()],
            performance_score: scores,
        }
    }

    #[test]
    fn hourly_rows_follow_start_time() {
        let result = result_from(vec![85.0; 26]);
        let rows = hourly_rows(&result, midnight());
        assert_eq!(rows[0].datetime, "2025-03-03 00:00:00");
        assert_eq!(rows[0].day_of_week, "Monday");
        assert_eq!(rows[25].hour, 1);
        assert_eq!(rows[25].day_number, 2);
        assert_eq!(rows[25].day_of_week, "Tuesday");
        assert_eq!(rows[0].zone, "Optimal");
        assert_eq!(rows[0].risk_level, "Low");
        assert_eq!(rows[0].deviation_from_baseline, 7.5);
        assert_eq!(rows[0].risk_score, 0.0);
    }

    #[test]
    fn hourly_csv_has_header_and_one_line_per_hour() {
        let result = result_from(vec![40.0, 90.0]);
        let mut buf = Vec::new();
        write_hourly(&mut buf, &result, midnight()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("datetime,hour,day_of_week,day_number,performance"));
        assert!(lines[1].contains("Critical"));
        // mean 65 → deviation -25
        assert!(lines[1].contains(",-25"));
    }

    #[test]
    fn metadata_table_is_two_columns() {
        let mut buf = Vec::new();
        let entries = vec![("a".to_string(), "1".to_string()), ("b".to_string(), "x, y".to_string())];
        write_metadata(&mut buf, &entries).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "parameter,value\na,1\nb,\"x, y\"\n");
    }

    #[test]
    fn export_run_writes_three_files() {
        let dir = tempfile::tempdir().unwrap();
        let result = result_from(vec![70.0; 48]);
        let report = PerformanceReport::analyze(&result, 0.0, Default::default()).unwrap();
        let metadata = run_metadata(
            &SleepSchedule::from_window(22.0, 6.0, 0.8, 0.0),
            &IndividualProfile::default(),
            &SimulationParams::default(),
            &report,
        );
        let paths = export_run(&dir.path().join("out"), &result, &report, &metadata, midnight()).unwrap();

        let daily = std::fs::read_to_string(&paths.daily).unwrap();
        assert_eq!(daily.lines().count(), 3);
        assert!(daily.starts_with("day,mean,min,max"));
        let hourly = std::fs::read_to_string(&paths.hourly).unwrap();
        assert_eq!(hourly.lines().count(), 49);
        let meta = std::fs::read_to_string(&paths.metadata).unwrap();
        assert!(meta.contains("duration_days,2"));
        assert!(meta.contains("genetic_profile,none"));
    }

    #[test]
    fn reads_calibration_pairs() {
        let input = "predicted,actual\n50, 55\n60,66.5\n";
        let (p, a) = read_calibration_pairs(input.as_bytes()).unwrap();
        assert_eq!(p, vec![50.0, 60.0]);
        assert_eq!(a, vec![55.0, 66.5]);
    }

    #[test]
    fn bad_calibration_value_reports_row() {
        let input = "predicted,actual\n50,abc\n";
        let err = read_calibration_pairs(input.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }
}
