//! Simulate command: hourly prediction, summary and export.

use std::path::PathBuf;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::Args;

use fatiguecalc_core::export::{export_run, run_metadata};
use fatiguecalc_core::stats::{render_ascii_chart, PerformanceZone};
use fatiguecalc_core::{days_to_hours, simulate_with, Config, PerformanceReport, SimulationResult};

use crate::inputs::ModelArgs;

/// Horizon below which cumulative effects are not yet visible.
const MIN_RECOMMENDED_HOURS: u32 = 72;

#[derive(Args)]
pub struct SimulateArgs {
    /// Days to simulate (default from config)
    #[arg(long, conflicts_with = "hours")]
    days: Option<u32>,
    /// Hours to simulate
    #[arg(long)]
    hours: Option<u32>,
    /// First simulated day (YYYY-MM-DD), starting at midnight; default today
    #[arg(long)]
    start: Option<NaiveDate>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
    /// Write hourly, daily and metadata CSV files into DIR
    #[arg(long, value_name = "DIR")]
    export: Option<PathBuf>,
    /// Print an hourly chart of day N (1-based)
    #[arg(long, value_name = "DAY")]
    chart: Option<usize>,
    #[command(flatten)]
    model: ModelArgs,
}

pub fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load_or_default();
    args.model.apply(&mut config)?;

    let hours = match (args.hours, args.days) {
        (Some(h), _) => h,
        (None, Some(d)) => days_to_hours(d)?,
        (None, None) => config.duration_hours()?,
    };
    if hours < MIN_RECOMMENDED_HOURS {
        tracing::warn!(hours, "fewer than 3 days simulated; cumulative effects need at least 72 hours");
    }

    let sleep = config.sleep_schedule();
    let work = config.work_schedule();
    let result = simulate_with(hours, &sleep, &work, &config.profile, &config.model)?;
    let report = PerformanceReport::analyze(&result, sleep.debt, config.profile.factors())?;

    let exported = match &args.export {
        Some(dir) => {
            let start = start_datetime(args.start);
            let metadata = run_metadata(&sleep, &config.profile, &config.model, &report);
            Some(export_run(dir, &result, &report, &metadata, start)?)
        }
        None => None,
    };

    if args.json {
        let json = serde_json::json!({ "result": result, "report": report });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    print_report(&report);
    if let Some(day) = args.chart {
        print_chart(&result, day)?;
    }
    if let Some(paths) = exported {
        println!("\nExported:");
        println!("  {}", paths.hourly.display());
        println!("  {}", paths.daily.display());
        println!("  {}", paths.metadata.display());
    }
    Ok(())
}

fn start_datetime(date: Option<NaiveDate>) -> NaiveDateTime {
    date.unwrap_or_else(|| Local::now().date_naive())
        .and_time(NaiveTime::default())
}

pub(crate) fn print_chart(result: &SimulationResult, day: usize) -> Result<(), Box<dyn std::error::Error>> {
    let days = result.day_count();
    if day == 0 || day > days {
        return Err(format!("chart day {day} is outside 1..={days}").into());
    }
    println!("{}", render_ascii_chart(result, day - 1));
    Ok(())
}

pub(crate) fn print_report(report: &PerformanceReport) {
    println!("\nPerformance Summary ({} hours)", report.hours);
    println!("{}", "=".repeat(50));
    println!("  Average:  {:.1}  (std dev {:.1})", report.mean, report.std_dev);
    println!("  Lowest:   {:.1}  at hour {}", report.min, report.min_hour);
    println!("  Highest:  {:.1}  at hour {}", report.max, report.max_hour);

    println!("\nZones:");
    for zone in PerformanceZone::ALL {
        let count = report.zones.get(zone);
        let pct = count as f64 / report.hours as f64 * 100.0;
        println!("  {:<9} {:>4} h  {:5.1}%", zone.label(), count, pct);
    }
    println!(
        "\nRisk: {:?} ({:.1}% of hours poor or critical)",
        report.overall_risk, report.risk_percentage
    );
    if report.sleep_debt_hours > 0.0 {
        println!(
            "Sleep debt: {:.1} h ({:.1} points)",
            report.sleep_debt_hours, report.sleep_debt_impact
        );
    }
    println!(
        "Individual factors: sleep need x{:.3}, sensitivity x{:.3}",
        report.factors.sleep_need_modifier, report.factors.deprivation_sensitivity
    );

    if !report.daily.is_empty() {
        println!("\n  Day   Mean    Min    Max  Optimal  <60   Risk");
        for day in &report.daily {
            println!(
                "  {:>3}  {:5.1}  {:5.1}  {:5.1}  {:>7}  {:>3}  {:5.1}",
                day.day, day.mean, day.min, day.max, day.optimal_hours, day.poor_critical_hours, day.risk_score
            );
        }
    }

    println!("\nRecommendations:");
    for rec in &report.recommendations {
        println!("  - {rec}");
    }
}
